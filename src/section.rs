use std::collections::HashMap;

/// Hierarchical occupancy map over bracket sections, used to steer
/// placements that keep entrants from the same source group apart.
///
/// With P first-round pairs there are L = log2(P) levels: halves,
/// quarters, eighths, down to the individual pairs. Placing two
/// same-group entrants into the same half carries the highest weight,
/// 2^(L+2); each deeper level weighs half as much. Because a direct
/// same-pair collision also collides at every shallower level, its
/// cumulative score is the worst of all.
#[derive(Debug, Clone)]
pub struct SectionMap {
    levels: u32,
    pair_count: u32,
    counts: HashMap<(u32, u32, usize), u32>,
}

impl SectionMap {
    pub fn new(pair_count: u32) -> SectionMap {
        let pair_count = pair_count.max(1);
        SectionMap {
            levels: pair_count.ilog2(),
            pair_count,
            counts: HashMap::new(),
        }
    }

    fn section_at(&self, level: u32, pair_index: u32) -> u32 {
        // Level 0 splits the pairs into 2 sections, level 1 into 4, ...
        let sections = 2u32 << level;
        pair_index * sections / self.pair_count
    }

    fn weight(&self, level: u32) -> u64 {
        1u64 << (self.levels + 2 - level)
    }

    /// Cost of placing an entrant from `group` into the given pair:
    /// existing same-group occupants weighted by how shallow a section
    /// they share with the candidate.
    pub fn score(&self, group: usize, pair_index: u32) -> u64 {
        let mut total = 0u64;
        for level in 0..self.levels {
            let key = (level, self.section_at(level, pair_index), group);
            if let Some(&count) = self.counts.get(&key) {
                total += count as u64 * self.weight(level);
            }
        }
        total
    }

    /// Records an entrant from `group` occupying the given pair.
    pub fn commit(&mut self, group: usize, pair_index: u32) {
        for level in 0..self.levels {
            let key = (level, self.section_at(level, pair_index), group);
            *self.counts.entry(key).or_insert(0) += 1;
        }
    }
}
