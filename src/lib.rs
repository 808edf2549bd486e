//! Headless any-token jackpot round simulator: the round state machine, the
//! donut-chart slice math, the dramatized wheel spin and the simulated
//! deposit feed, plus the wallet-facing helpers (balance/price aggregation
//! and the deposit transfer builder). Presentation stays outside; consumers
//! drive their UI from the event stream.

pub mod chart;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod events;
pub mod feed;
pub mod history;
pub mod state;
pub mod tokens;
pub mod tx;
pub mod wheel;

pub use config::{EngineConfig, FeedConfig};
pub use engine::EngineHandle;
pub use errors::{ApiError, EngineError, TxError};
pub use events::{RoundEvent, SoundCue};
pub use state::{Deposit, DepositRequest, PastDraw, RoundPhase, RoundSnapshot};
