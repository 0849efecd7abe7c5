//! The participant record and the ordering key the board sorts by.

use rust_decimal::Decimal;

/// A customer tracked by the leaderboard.
///
/// `score` is only meaningful for ranking while it is strictly positive;
/// a participant whose score has been driven to zero or below is removed
/// from the board entirely (see [`crate::service::LeaderboardService::update_score`])
/// but its record is kept in the id map so a later positive delta finds
/// it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: i64,
    pub score: Decimal,
}

impl Participant {
    pub fn new(id: i64, score: Decimal) -> Self {
        Self { id, score }
    }

    pub fn rank_key(&self) -> RankKey {
        RankKey {
            score: self.score,
            id: self.id,
        }
    }
}

/// The board's sort key: higher score first, ties broken by lower id.
///
/// Kept separate from [`Participant`] so the board can be ordered by
/// deriving `Ord` rather than hand-writing a comparator — the derive
/// compares fields in declaration order, so `neg_score` must come first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankKey {
    score: Decimal,
    id: i64,
}

impl RankKey {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn score(&self) -> Decimal {
        self.score
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Higher score sorts first, so compare in reverse; then lower id first.
        other.score.cmp(&self.score).then(self.id.cmp(&other.id))
    }
}
