use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One entry in the pot. Immutable once created; the list is append-only
/// until the round resets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deposit {
    pub id: String,
    pub user: String,
    pub token: String,
    pub amount: f64,
    pub timestamp: i64,
}

/// What a depositor (the feed or an external caller) submits. The engine
/// assigns the id and timestamp on acceptance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRequest {
    pub user: String,
    pub token: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundPhase {
    Active,
    Ending,
    Ended,
    Starting,
}

impl fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundPhase::Active => "active",
            RoundPhase::Ending => "ending",
            RoundPhase::Ended => "ended",
            RoundPhase::Starting => "starting",
        };
        f.write_str(s)
    }
}

/// A settled round, as kept by the draw history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastDraw {
    pub round_id: u64,
    pub winner: String,
    pub amount: f64,
    pub settled_at: i64,
}

/// Point-in-time copy of all round-scoped state for observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub round_id: u64,
    pub phase: RoundPhase,
    pub deposits: Vec<Deposit>,
    pub pot: f64,
    pub seconds: u32,
    pub new_round_countdown: u32,
    pub winner: Option<Deposit>,
    pub win_amount: f64,
    pub spin_rotation: f64,
    pub animation_in_flight: bool,
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
