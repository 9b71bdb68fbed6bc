use serde::{Serialize, Deserialize};

use crate::groups::flatten_matrix;
use crate::knockout::seed_positions;
use crate::rematch::is_play_off_rematch;
use crate::section::SectionMap;
use crate::seed::{Pair, SeedSlot};

/// How round-1 pairs are drawn from a linear seed order or a group
/// qualifier matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairingMethod {
    /// Consecutive pairing: 1v2, 3v4, and so on.
    #[default]
    Consecutive,
    /// First half of the order against the second half, position by position.
    Cross,
    /// Even-indexed seeds against odd-indexed seeds rotated by half the
    /// pair count.
    Shift,
    /// Deterministic seeded shuffle, then consecutive pairing.
    Random,
    /// Matrix prefill: snake-flattened ranks, winners against opposite
    /// runners-up.
    Snake,
    /// Matrix prefill: each rank row is a pot, shuffled deterministically,
    /// pots crossed.
    PotDraw,
    /// Matrix prefill: greedy placement keeping same-group qualifiers in
    /// distant bracket sections.
    AntiSameGroup,
    /// Pool prefill: never-beaten seeds against the weakest available
    /// opponent that is not a provable rematch.
    StrongWeak,
    /// Pool prefill: strong seeds at bisection positions, weakest-first
    /// opponents, bounded rematch-reducing swap pass.
    Ladder,
    /// As `Ladder`, but opponents picked farthest from their mirrored
    /// pool position.
    LadderReverse,
}

/// Reproducible pseudorandom source for the draw methods that shuffle.
/// A linear-congruential generator over a string-derived seed: not
/// cryptographic, but identical keys and input order always give the
/// identical draw.
#[derive(Debug, Clone)]
pub struct SeedRng {
    state: u32,
}

impl SeedRng {
    pub fn from_key(key: &str) -> SeedRng {
        let mut seed: u32 = 0;
        for byte in key.bytes() {
            seed = seed.wrapping_mul(31).wrapping_add(byte as u32);
        }
        SeedRng { state: seed }
    }

    fn next(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        self.next() % bound
    }

    /// In-place Fisher-Yates driven by the generator.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i as u32 + 1) as usize;
            items.swap(i, j);
        }
    }
}

/// Draws round-1 pairs from a linear seed order. Seeds beyond the
/// bracket capacity are dropped; capacity beyond the seed list becomes
/// BYEs, then double-BYE repair runs. The matrix and pool methods need
/// richer inputs than a flat list and degrade to consecutive pairing
/// here; `pair_from_matrix` and the pool prefills serve them properly.
pub fn arrange_into_pairs(
    seeds: &[SeedSlot],
    pair_count: u32,
    method: PairingMethod,
    seed_key: &str,
) -> Vec<Pair> {
    let pair_count = pair_count.max(1) as usize;
    let capacity = pair_count * 2;
    let mut pool: Vec<SeedSlot> = seeds.iter().copied().take(capacity).collect();

    let mut pairs = match method {
        PairingMethod::Cross => {
            pool.resize(capacity, SeedSlot::Bye);
            let (first, second) = pool.split_at(pair_count);
            first
                .iter()
                .zip(second.iter())
                .map(|(&a, &b)| Pair::new(0, a, b))
                .collect()
        }
        PairingMethod::Shift => {
            pool.resize(capacity, SeedSlot::Bye);
            let evens: Vec<SeedSlot> = pool.iter().step_by(2).copied().collect();
            let odds: Vec<SeedSlot> = pool.iter().skip(1).step_by(2).copied().collect();
            let rotation = pair_count / 2;
            (0..pair_count)
                .map(|i| Pair::new(0, evens[i], odds[(i + rotation) % pair_count]))
                .collect()
        }
        PairingMethod::Random => {
            SeedRng::from_key(seed_key).shuffle(&mut pool);
            pool.resize(capacity, SeedSlot::Bye);
            consecutive(&pool)
        }
        _ => {
            pool.resize(capacity, SeedSlot::Bye);
            consecutive(&pool)
        }
    };

    fix_double_byes(&mut pairs);
    renumber(&mut pairs);
    pairs
}

fn consecutive(pool: &[SeedSlot]) -> Vec<Pair> {
    pool.chunks(2)
        .map(|chunk| Pair::new(0, chunk[0], chunk[1]))
        .collect()
}

fn renumber(pairs: &mut [Pair]) {
    for (i, pair) in pairs.iter_mut().enumerate() {
        pair.ordinal = i as u32 + 1;
    }
}

fn take_one(pair: &mut Pair) -> SeedSlot {
    if pair.b.is_genuine() {
        std::mem::replace(&mut pair.b, SeedSlot::Bye)
    } else {
        std::mem::replace(&mut pair.a, SeedSlot::Bye)
    }
}

fn find_donor(pairs: &[Pair], skip: usize, needed: u32) -> Option<usize> {
    (skip + 1..pairs.len())
        .find(|&j| pairs[j].genuine_count() >= needed)
        .or_else(|| (0..skip).find(|&j| pairs[j].genuine_count() >= needed))
}

/// Repairs BYE/BYE pairs without changing the genuine-entrant multiset
/// or the pair count.
///
/// When genuine entrants outnumber the pairs, every BYE/BYE pair can be
/// filled: each borrows from a donor holding two entrants (searching
/// forward first), falling back to a one-entrant donor. With fewer
/// entrants than pairs only the spare second entrants get spread, first
/// come first served, and the remaining BYE/BYE pairs legitimately stay.
pub fn fix_double_byes(pairs: &mut [Pair]) {
    let genuine: u32 = pairs.iter().map(Pair::genuine_count).sum();
    if genuine == 0 {
        return;
    }

    if (genuine as usize) < pairs.len() {
        for i in 0..pairs.len() {
            if !pairs[i].is_double_bye() {
                continue;
            }
            if let Some(j) = (0..pairs.len()).find(|&j| j != i && pairs[j].genuine_count() == 2) {
                let taken = take_one(&mut pairs[j]);
                pairs[i].a = taken;
            }
        }
    } else {
        for i in 0..pairs.len() {
            if !pairs[i].is_double_bye() {
                continue;
            }
            let donor = find_donor(pairs, i, 2).or_else(|| find_donor(pairs, i, 1));
            if let Some(j) = donor {
                let taken = take_one(&mut pairs[j]);
                pairs[i].a = taken;
            }
        }
    }
}

/// Pairs each strong seed, consumed front to back, against the weakest
/// available opponent that is not a provable rematch; a rematch is
/// accepted only when every remaining opponent conflicts. Leftover weak
/// seeds pair among themselves, a final odd one against a BYE.
pub fn pair_strong_weak(strong: &[SeedSlot], weak: &[SeedSlot], pair_count: u32) -> Vec<Pair> {
    let pair_count = pair_count.max(1) as usize;
    let mut weak: Vec<SeedSlot> = weak.to_vec();
    let mut pairs: Vec<Pair> = Vec::with_capacity(pair_count);

    for &seed in strong.iter().take(pair_count) {
        if pairs.len() == pair_count {
            break;
        }
        let opponent = if weak.is_empty() {
            SeedSlot::Bye
        } else {
            let pick = (0..weak.len())
                .rev()
                .find(|&i| !is_play_off_rematch(&seed, &weak[i]))
                .unwrap_or(weak.len() - 1);
            weak.remove(pick)
        };
        pairs.push(Pair::new(0, seed, opponent));
    }

    while pairs.len() < pair_count && !weak.is_empty() {
        let a = weak.remove(0);
        let b = if weak.is_empty() { SeedSlot::Bye } else { weak.remove(0) };
        pairs.push(Pair::new(0, a, b));
    }

    while pairs.len() < pair_count {
        pairs.push(Pair::new(0, SeedSlot::Bye, SeedSlot::Bye));
    }

    fix_double_byes(&mut pairs);
    renumber(&mut pairs);
    pairs
}

/// Strong seeds take the standard bisection positions; opponents come
/// from the weak pool, weakest first (or mirrored-farthest for the
/// reverse variant), skipping provable rematches when possible. A
/// bounded local search then swaps opponents across pairs while a swap
/// strictly reduces the total rematch count.
pub fn pair_ladder(strong: &[SeedSlot], weak: &[SeedSlot], pair_count: u32, reverse: bool) -> Vec<Pair> {
    let pair_count = pair_count.max(1);
    let positions = seed_positions(pair_count);
    let mut pairs: Vec<Pair> = (1..=pair_count)
        .map(|ordinal| Pair::new(ordinal, SeedSlot::Bye, SeedSlot::Bye))
        .collect();

    let placed = strong.len().min(pair_count as usize);
    for (k, &seed) in strong.iter().take(placed).enumerate() {
        pairs[positions[k]].a = seed;
    }

    let mut weak: Vec<SeedSlot> = weak.to_vec();
    for k in 0..placed {
        if weak.is_empty() {
            break;
        }
        let anchor = pairs[positions[k]].a;
        let pick = if reverse {
            pick_mirrored(&weak, &anchor, k)
        } else {
            pick_weakest(&weak, &anchor)
        };
        pairs[positions[k]].b = weak.remove(pick);
    }

    // Whatever the pool still holds fills the open slots in pair order.
    let mut leftovers = weak.into_iter();
    'fill: for pair in pairs.iter_mut() {
        for slot in [&mut pair.a, &mut pair.b] {
            if slot.is_bye() {
                match leftovers.next() {
                    Some(seed) => *slot = seed,
                    None => break 'fill,
                }
            }
        }
    }

    fix_double_byes(&mut pairs);

    for _ in 0..20 {
        if !reduce_rematches_once(&mut pairs) {
            break;
        }
    }

    renumber(&mut pairs);
    pairs
}

fn pick_weakest(weak: &[SeedSlot], anchor: &SeedSlot) -> usize {
    (0..weak.len())
        .rev()
        .find(|&i| !is_play_off_rematch(anchor, &weak[i]))
        .unwrap_or(weak.len() - 1)
}

fn pick_mirrored(weak: &[SeedSlot], anchor: &SeedSlot, strong_index: usize) -> usize {
    let target = (weak.len() - 1).saturating_sub(strong_index);
    let distance = |i: usize| i.abs_diff(target);

    let mut order: Vec<usize> = (0..weak.len()).collect();
    order.sort_by(|&a, &b| distance(b).cmp(&distance(a)).then(a.cmp(&b)));
    order
        .iter()
        .copied()
        .find(|&i| !is_play_off_rematch(anchor, &weak[i]))
        .unwrap_or(order[0])
}

fn reduce_rematches_once(pairs: &mut [Pair]) -> bool {
    let conflicts = |a: &SeedSlot, b: &SeedSlot| is_play_off_rematch(a, b) as u32;
    let mut improved = false;
    for i in 0..pairs.len() {
        for j in (i + 1)..pairs.len() {
            let before = conflicts(&pairs[i].a, &pairs[i].b) + conflicts(&pairs[j].a, &pairs[j].b);
            let after = conflicts(&pairs[i].a, &pairs[j].b) + conflicts(&pairs[j].a, &pairs[i].b);
            if after < before {
                let b_i = pairs[i].b;
                pairs[i].b = pairs[j].b;
                pairs[j].b = b_i;
                improved = true;
            }
        }
    }
    improved
}

/// Draws round-1 pairs from a rank-major group qualifier matrix.
pub fn pair_from_matrix(
    matrix: &[Vec<SeedSlot>],
    pair_count: u32,
    method: PairingMethod,
    seed_key: &str,
) -> Vec<Pair> {
    match method {
        PairingMethod::Snake => {
            arrange_into_pairs(&flatten_matrix(matrix, true), pair_count, PairingMethod::Cross, seed_key)
        }
        PairingMethod::PotDraw => {
            let mut rng = SeedRng::from_key(seed_key);
            let mut pots = matrix.to_vec();
            for pot in pots.iter_mut() {
                rng.shuffle(pot);
            }
            arrange_into_pairs(&flatten_matrix(&pots, false), pair_count, PairingMethod::Cross, seed_key)
        }
        PairingMethod::AntiSameGroup => anti_same_group(matrix, pair_count),
        other => arrange_into_pairs(&flatten_matrix(matrix, false), pair_count, other, seed_key),
    }
}

/// Rank-1 finishers anchor the bisection positions; every later
/// qualifier takes the open slot where its own group collides least,
/// per the hierarchical section score.
fn anti_same_group(matrix: &[Vec<SeedSlot>], pair_count: u32) -> Vec<Pair> {
    let pair_count = pair_count.max(1);
    let positions = seed_positions(pair_count);
    let mut pairs: Vec<Pair> = (1..=pair_count)
        .map(|ordinal| Pair::new(ordinal, SeedSlot::Bye, SeedSlot::Bye))
        .collect();
    let mut map = SectionMap::new(pair_count);

    let anchors = matrix.first().map(|row| row.as_slice()).unwrap_or(&[]);
    for (k, &slot) in anchors.iter().take(pair_count as usize).enumerate() {
        pairs[positions[k]].a = slot;
        if let Some(group) = slot.group() {
            map.commit(group, positions[k] as u32);
        }
    }

    for row in matrix.iter().skip(1) {
        for &slot in row {
            let open: Vec<usize> = (0..pairs.len())
                .filter(|&i| pairs[i].a.is_bye() || pairs[i].b.is_bye())
                .collect();
            let Some(&best) = open.iter().min_by_key(|&&i| match slot.group() {
                Some(group) => map.score(group, i as u32),
                None => 0,
            }) else {
                break;
            };
            if pairs[best].a.is_bye() {
                pairs[best].a = slot;
            } else {
                pairs[best].b = slot;
            }
            if let Some(group) = slot.group() {
                map.commit(group, best as u32);
            }
        }
    }

    fix_double_byes(&mut pairs);
    renumber(&mut pairs);
    pairs
}
