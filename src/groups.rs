use serde::{Serialize, Deserialize};

use crate::rules::StageRules;
use crate::seed::{Entrant, SeedSlot};

/// Configuration for a round-robin group stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    pub group_count: u32,
    /// Per-group extra-slot overrides for distributing the remainder.
    /// `None` appends the whole remainder to the last group.
    pub manual_extras: Option<Vec<u32>>,
    /// Top-N finishers advancing from each group.
    pub qualifiers_per_group: u32,
    pub rules: StageRules,
}

impl GroupConfig {
    pub fn new(group_count: u32, qualifiers_per_group: u32) -> GroupConfig {
        GroupConfig {
            group_count,
            manual_extras: None,
            qualifiers_per_group,
            rules: StageRules::default(),
        }
    }
}

/// Splits `total` entrants over `group_count` groups.
///
/// Base size is `total / group_count`. Without manual extras the whole
/// remainder lands in the last group. Manual extras are clamped so their
/// sum never exceeds the remainder (excess trimmed from the last
/// overridden groups backward); any remainder the extras leave unclaimed
/// still lands in the last group, so the sizes always sum to `total`.
pub fn compute_group_sizes(total: u32, group_count: u32, manual_extras: Option<&[u32]>) -> Vec<u32> {
    let group_count = group_count.max(1);
    let base = total / group_count;
    let remainder = total - base * group_count;

    let mut sizes = vec![base; group_count as usize];
    let last = sizes.len() - 1;

    let mut extras = match manual_extras {
        Some(given) => {
            let mut extras = given.to_vec();
            extras.resize(group_count as usize, 0);
            extras
        }
        None => {
            sizes[last] += remainder;
            return sizes;
        }
    };

    let mut excess = extras.iter().sum::<u32>().saturating_sub(remainder);
    for extra in extras.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let cut = (*extra).min(excess);
        *extra -= cut;
        excess -= cut;
    }

    let unclaimed = remainder - extras.iter().sum::<u32>();
    for (size, extra) in sizes.iter_mut().zip(extras.iter()) {
        *size += extra;
    }
    sizes[last] += unclaimed;

    sizes
}

/// Number of round-robin rounds a group of the given size plays. Even
/// sizes need size-1 rounds; odd sizes need one extra because every
/// round one team sits out.
pub fn round_robin_round_count(size: u32) -> u32 {
    match size {
        0 | 1 => 0,
        even if even % 2 == 0 => even - 1,
        odd => odd,
    }
}

/// Deals entrants into groups of the given sizes in snake order over the
/// supplied seed order: group 1..n left to right, then n..1, and so on.
/// A group that has reached its size is skipped on later passes.
pub fn assign_groups(entrants: &[Entrant], sizes: &[u32]) -> Vec<Vec<SeedSlot>> {
    let mut groups: Vec<Vec<SeedSlot>> = vec![Vec::new(); sizes.len()];
    let mut pending = entrants.iter();
    let mut forward = true;

    'deal: loop {
        let order: Vec<usize> = if forward {
            (0..groups.len()).collect()
        } else {
            (0..groups.len()).rev().collect()
        };

        let mut placed_any = false;
        for g in order {
            if groups[g].len() as u32 >= sizes[g] {
                continue;
            }
            match pending.next() {
                Some(entrant) => {
                    groups[g].push(SeedSlot::Registration { id: entrant.id });
                    placed_any = true;
                }
                None => break 'deal,
            }
        }
        if !placed_any {
            break;
        }
        forward = !forward;
    }

    groups
}

/// Sorts entrants strongest-first by rating for seeded dealing. Unrated
/// entrants keep their input order after every rated one.
pub fn rating_order(entrants: &[Entrant]) -> Vec<Entrant> {
    let mut ordered = entrants.to_vec();
    ordered.sort_by(|a, b| match (b.rating, a.rating) {
        (Some(rb), Some(ra)) => rb.cmp(&ra),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });
    ordered
}

/// Rank-major qualifier matrix for a finished group stage: all rank-1
/// finishers, then all rank-2 finishers, and so on. The cross, shift,
/// snake and pot-draw prefill strategies consume this shape.
pub fn group_qualifier_matrix(group_count: u32, stage: usize, top_n: u32) -> Vec<Vec<SeedSlot>> {
    let mut matrix = Vec::with_capacity(top_n as usize);
    for rank in 1..=top_n {
        let row: Vec<SeedSlot> = (0..group_count as usize)
            .map(|group| SeedSlot::GroupRank { stage, group, rank })
            .collect();
        matrix.push(row);
    }
    matrix
}

/// Flattens a qualifier matrix row-major, optionally reversing every
/// other row (snake order).
pub fn flatten_matrix(matrix: &[Vec<SeedSlot>], snake: bool) -> Vec<SeedSlot> {
    let mut flat = Vec::new();
    for (i, row) in matrix.iter().enumerate() {
        if snake && i % 2 == 1 {
            flat.extend(row.iter().rev().copied());
        } else {
            flat.extend(row.iter().copied());
        }
    }
    flat
}
