//! Vote ledger types.
//!
//! The ledger stores the current standing of each (comment, voter) pair,
//! not a history of votes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CommentId, CommenterId, Timestamp};

/// Direction of a vote, always one of -1, 0 or +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i8", from = "i64")]
pub enum VoteDirection {
    Down,
    #[default]
    None,
    Up,
}

impl VoteDirection {
    /// Clamps any magnitude onto the three directions.
    pub fn clamp(raw: i64) -> Self {
        match raw.signum() {
            1 => VoteDirection::Up,
            -1 => VoteDirection::Down,
            _ => VoteDirection::None,
        }
    }

    pub fn value(&self) -> i8 {
        match self {
            VoteDirection::Down => -1,
            VoteDirection::None => 0,
            VoteDirection::Up => 1,
        }
    }
}

impl From<VoteDirection> for i8 {
    fn from(direction: VoteDirection) -> Self {
        direction.value()
    }
}

impl From<i64> for VoteDirection {
    fn from(raw: i64) -> Self {
        VoteDirection::clamp(raw)
    }
}

/// A voter's current standing on a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub comment_id: CommentId,
    pub voter_id: CommenterId,
    pub direction: VoteDirection,
    pub voted_at: Timestamp,
}

impl Vote {
    pub fn new(comment_id: CommentId, voter_id: CommenterId, direction: VoteDirection) -> Self {
        Self {
            comment_id,
            voter_id,
            direction,
            voted_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn clamps_out_of_range_directions() {
        assert_eq!(VoteDirection::clamp(5), VoteDirection::Up);
        assert_eq!(VoteDirection::clamp(-9), VoteDirection::Down);
        assert_eq!(VoteDirection::clamp(0), VoteDirection::None);
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&VoteDirection::Down).unwrap(), "-1");
        let parsed: VoteDirection = serde_json::from_str("7").unwrap();
        assert_eq!(parsed, VoteDirection::Up);
    }

    proptest! {
        #[test]
        fn clamp_preserves_sign(raw in any::<i64>()) {
            prop_assert_eq!(i64::from(VoteDirection::clamp(raw).value()), raw.signum());
        }
    }
}
