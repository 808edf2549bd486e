use serde::{Deserialize, Serialize};

use crate::state::Deposit;
use crate::wheel::SpinScenario;

/// Cue for the presentation layer's audio hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Deposit,
    UserDeposit,
    Win,
}

/// Everything the engine tells the outside world, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RoundEvent {
    RoundStarted {
        round_id: u64,
    },
    DepositAccepted {
        deposit: Deposit,
        pot_after: f64,
        sound: SoundCue,
    },
    /// Active-phase countdown, once per second.
    CountdownTick {
        seconds: u32,
    },
    /// The round stopped taking deposits and a winner is being drawn.
    RoundLocked {
        round_id: u64,
    },
    SpinStarted {
        round_id: u64,
        rotation: f64,
        scenario: SpinScenario,
    },
    RoundSettled {
        round_id: u64,
        winner: String,
        amount: f64,
        sound: SoundCue,
    },
    /// Ended-phase countdown toward the next round, once per second.
    NewRoundTick {
        seconds: u32,
    },
    /// Wheel rotation snapped back to zero for the next round.
    WheelReset,
}
