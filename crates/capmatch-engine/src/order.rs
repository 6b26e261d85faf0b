//! Intra-round proposal ordering.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use capmatch_config::TieBreak;
use capmatch_core::Student;

/// Arranges the proposals of a round according to the configured tie-break.
///
/// One instance lives for exactly one run, so a shuffled order is a pure
/// function of the seed.
pub(crate) struct ProposalOrder {
    tie_break: TieBreak,
    rng: ChaCha8Rng,
}

impl ProposalOrder {
    pub(crate) fn new(tie_break: TieBreak, seed: u64) -> Self {
        Self {
            tie_break,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Sorts candidate student indices in place.
    pub(crate) fn arrange(&mut self, candidates: &mut [usize], students: &[&Student]) {
        candidates.sort_by(|&a, &b| students[a].id().cmp(students[b].id()));
        match self.tie_break {
            TieBreak::AscendingId => {}
            TieBreak::DescendingId => candidates.reverse(),
            TieBreak::Shuffled => candidates.shuffle(&mut self.rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn students() -> Vec<Student> {
        ["BDBA003", "BDBA001", "BCSAI001", "BDBA002"]
            .into_iter()
            .map(|id| Student::new(id, ["T1", "T2", "T3", "T4", "T5"]).unwrap())
            .collect()
    }

    fn ids(order: &[usize], students: &[&Student]) -> Vec<String> {
        order.iter().map(|&i| students[i].id().to_string()).collect()
    }

    #[test]
    fn test_ascending() {
        let owned = students();
        let refs: Vec<&Student> = owned.iter().collect();
        let mut candidates = vec![0, 1, 2, 3];
        ProposalOrder::new(TieBreak::AscendingId, 0).arrange(&mut candidates, &refs);
        assert_eq!(
            ids(&candidates, &refs),
            vec!["BCSAI001", "BDBA001", "BDBA002", "BDBA003"]
        );
    }

    #[test]
    fn test_descending() {
        let owned = students();
        let refs: Vec<&Student> = owned.iter().collect();
        let mut candidates = vec![3, 0, 1];
        ProposalOrder::new(TieBreak::DescendingId, 0).arrange(&mut candidates, &refs);
        assert_eq!(ids(&candidates, &refs), vec!["BDBA003", "BDBA002", "BDBA001"]);
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let owned = students();
        let refs: Vec<&Student> = owned.iter().collect();

        let mut a = vec![0, 1, 2, 3];
        let mut b = vec![3, 2, 1, 0];
        ProposalOrder::new(TieBreak::Shuffled, 99).arrange(&mut a, &refs);
        ProposalOrder::new(TieBreak::Shuffled, 99).arrange(&mut b, &refs);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2, 3]);
    }
}
