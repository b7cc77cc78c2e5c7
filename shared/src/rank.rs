use crate::model::Member;

pub const PODIUM_SIZE: u32 = 3;

/// Competition ranking over distinct scores.
///
/// A score's rank is one more than the number of distinct scores strictly above it,
/// so `[10, 10, 5]` ranks as `[1, 1, 2]`. Rebuilt from scratch whenever the member list
/// changes; never updated in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankTable {
    distinct_desc: Vec<f64>,
}

impl RankTable {
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut distinct_desc: Vec<f64> = scores.into_iter().map(rankable).collect();
        distinct_desc.sort_by(|a, b| b.total_cmp(a));
        distinct_desc.dedup();
        Self { distinct_desc }
    }

    pub fn from_members(members: &[Member]) -> Self {
        Self::from_scores(members.iter().map(|member| member.score))
    }

    /// Rank for `score`. Total: a score absent from the table still ranks below every
    /// distinct score greater than it.
    pub fn rank_of(&self, score: f64) -> u32 {
        let score = rankable(score);
        let above = self.distinct_desc.partition_point(|candidate| *candidate > score);
        above as u32 + 1
    }
}

pub fn is_podium(rank: u32) -> bool {
    (1..=PODIUM_SIZE).contains(&rank)
}

fn rankable(score: f64) -> f64 {
    if !score.is_finite() || score == 0.0 {
        0.0
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::{RankTable, is_podium};

    fn ranks(scores: &[f64]) -> Vec<u32> {
        let table = RankTable::from_scores(scores.iter().copied());
        scores.iter().map(|score| table.rank_of(*score)).collect()
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let table = RankTable::from_scores(std::iter::empty());
        assert_eq!(table, RankTable::default());
        assert_eq!(table.rank_of(42.0), 1);
    }

    #[test]
    fn ties_share_rank_without_gaps() {
        assert_eq!(ranks(&[10.0, 10.0, 5.0]), vec![1, 1, 2]);
        assert_eq!(ranks(&[9.0, 7.0, 7.0, 3.0]), vec![1, 2, 2, 3]);
    }

    #[test]
    fn rank_order_mirrors_score_order() {
        let scores = [4.0, 12.0, -3.0, 12.0, 0.0, 7.5, 4.0];
        let table = RankTable::from_scores(scores);
        for a in scores {
            for b in scores {
                let (ra, rb) = (table.rank_of(a), table.rank_of(b));
                assert_eq!(a > b, ra < rb, "scores {a} vs {b}");
                assert_eq!(a == b, ra == rb, "scores {a} vs {b}");
            }
        }
    }

    #[test]
    fn ranks_stay_within_distinct_count() {
        let scores = [3.0, 3.0, 3.0, 1.0, 8.0];
        assert!(ranks(&scores).iter().all(|rank| (1..=3).contains(rank)));
        assert_eq!(ranks(&scores), vec![2, 2, 2, 3, 1]);
    }

    #[test]
    fn non_finite_scores_rank_as_zero() {
        let table = RankTable::from_scores([f64::NAN, 0.0, -0.0, 2.0]);
        assert_eq!(table.rank_of(2.0), 1);
        assert_eq!(table.rank_of(0.0), 2);
        assert_eq!(table.rank_of(f64::NAN), 2);
        assert_eq!(table.rank_of(-0.0), 2);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let scores = [5.0, 1.0, 5.0, 9.0];
        assert_eq!(RankTable::from_scores(scores), RankTable::from_scores(scores));
    }

    #[test]
    fn podium_is_top_three() {
        assert!(!is_podium(0));
        assert!(is_podium(1));
        assert!(is_podium(3));
        assert!(!is_podium(4));
    }
}
