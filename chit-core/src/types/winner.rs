//! Winner Types
//!
//! A winner row records one admin-selected prize recipient for a scheme.
//! Status progresses pending -> claimed -> delivered, or to cancelled from
//! either non-terminal state. A cancelled row frees its rank.

use super::common::{CardId, SchemeId, WinnerId};
use crate::error::{ChitError, ChitResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prize fulfilment status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinnerStatus {
    Pending,
    Claimed,
    Delivered,
    Cancelled,
}

impl WinnerStatus {
    pub fn is_valid_transition(&self, new_status: &WinnerStatus) -> bool {
        match (self, new_status) {
            (WinnerStatus::Pending, WinnerStatus::Claimed) => true,
            (WinnerStatus::Pending, WinnerStatus::Cancelled) => true,
            (WinnerStatus::Claimed, WinnerStatus::Delivered) => true,
            (WinnerStatus::Claimed, WinnerStatus::Cancelled) => true,
            _ => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, WinnerStatus::Delivered | WinnerStatus::Cancelled)
    }

    pub fn name(&self) -> &'static str {
        match self {
            WinnerStatus::Pending => "pending",
            WinnerStatus::Claimed => "claimed",
            WinnerStatus::Delivered => "delivered",
            WinnerStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WinnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One prize slot in a scheme's draw
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Winner {
    pub winner_id: WinnerId,
    pub scheme_id: SchemeId,
    pub card_id: CardId,
    /// 1-based, unique and contiguous among non-cancelled winners of a scheme
    pub rank: u32,
    pub status: WinnerStatus,
    pub won_at: DateTime<Utc>,
}

impl Winner {
    pub fn transition(&mut self, new_status: WinnerStatus) -> ChitResult<()> {
        if !self.status.is_valid_transition(&new_status) {
            return Err(ChitError::InvalidWinnerTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }
        self.status = new_status;
        Ok(())
    }

    /// Cancelled rows do not occupy a rank or block re-eligibility
    pub fn occupies_slot(&self) -> bool {
        self.status != WinnerStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_winner() -> Winner {
        Winner {
            winner_id: WinnerId::new("win_1"),
            scheme_id: SchemeId::new("scheme_1"),
            card_id: CardId::new("card_1"),
            rank: 1,
            status: WinnerStatus::Pending,
            won_at: Utc::now(),
        }
    }

    #[test]
    fn test_happy_path_progression() {
        let mut winner = test_winner();
        winner.transition(WinnerStatus::Claimed).unwrap();
        winner.transition(WinnerStatus::Delivered).unwrap();
        assert!(winner.status.is_terminal());
    }

    #[test]
    fn test_cannot_skip_claimed() {
        let mut winner = test_winner();
        let err = winner.transition(WinnerStatus::Delivered).unwrap_err();
        assert_eq!(err.kind(), "invalid_winner_transition");
    }

    #[test]
    fn test_cancelled_frees_slot() {
        let mut winner = test_winner();
        winner.transition(WinnerStatus::Cancelled).unwrap();
        assert!(!winner.occupies_slot());
        assert!(winner.transition(WinnerStatus::Pending).is_err());
    }
}
