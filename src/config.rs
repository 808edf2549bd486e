use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Tunables for the round state machine. Defaults mirror the production
/// front-end timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Pot capacity in display dollars; sizes the remaining-capacity slice.
    pub capacity: f64,
    pub round_duration_secs: u32,
    pub new_round_countdown_secs: u32,
    pub spin_start_delay: Duration,
    pub spin_duration: Duration,
    pub spin_buffer: Duration,
    pub round_restart_delay: Duration,
    pub deposit_settle_window: Duration,
    pub history_limit: usize,
    /// Fixed RNG seed for reproducible draws; fresh entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: ROUND_CAPACITY,
            round_duration_secs: ROUND_DURATION_SECS,
            new_round_countdown_secs: NEW_ROUND_COUNTDOWN_SECS,
            spin_start_delay: Duration::from_millis(SPIN_START_DELAY_MS),
            spin_duration: Duration::from_millis(SPIN_DURATION_MS),
            spin_buffer: Duration::from_millis(SPIN_BUFFER_MS),
            round_restart_delay: Duration::from_millis(ROUND_RESTART_DELAY_MS),
            deposit_settle_window: Duration::from_millis(DEPOSIT_SETTLE_WINDOW_MS),
            history_limit: HISTORY_LIMIT,
            seed: None,
        }
    }
}

/// Tunables for the simulated deposit feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub min_interval: Duration,
    pub max_interval: Duration,
    /// Chance a fabricated deposit is attributed to the viewer.
    pub self_deposit_chance: f64,
    /// Chance the fabricated token is USDC instead of SOL.
    pub stable_token_chance: f64,
    /// Whole-dollar amount range, upper bound exclusive.
    pub min_amount: u32,
    pub max_amount: u32,
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(FEED_MIN_INTERVAL_MS),
            max_interval: Duration::from_millis(FEED_MAX_INTERVAL_MS),
            self_deposit_chance: SELF_DEPOSIT_CHANCE,
            stable_token_chance: STABLE_TOKEN_CHANCE,
            min_amount: FEED_MIN_AMOUNT,
            max_amount: FEED_MAX_AMOUNT,
            seed: None,
        }
    }
}
