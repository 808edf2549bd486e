//! Simulated deposit feed: fabricates a deposit every 5-9 seconds while the
//! round is taking them. The engine is the gatekeeper; a rejection (round
//! not active, chart transition in flight) is just a skipped beat.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tokio::time;

use crate::config::FeedConfig;
use crate::constants::SELF_USER;
use crate::engine::EngineHandle;
use crate::errors::EngineError;
use crate::state::DepositRequest;

/// One fabricated deposit: 20% chance it belongs to the viewer, 30% chance
/// it's USDC instead of SOL, whole dollars in [min_amount, max_amount).
pub fn synth_deposit<R: Rng + ?Sized>(cfg: &FeedConfig, rng: &mut R) -> DepositRequest {
    let user = if rng.gen_bool(cfg.self_deposit_chance) {
        SELF_USER.to_string()
    } else {
        format!("User{}", rng.gen_range(0..10_000u32))
    };
    let token = if rng.gen_bool(cfg.stable_token_chance) {
        "USDC"
    } else {
        "SOL"
    };
    let amount = rng.gen_range(cfg.min_amount..cfg.max_amount) as f64;
    DepositRequest {
        user,
        token: token.to_string(),
        amount,
    }
}

/// Runs until the engine goes away.
pub async fn run_feed(handle: EngineHandle, cfg: FeedConfig) {
    let mut rng = match cfg.seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };
    loop {
        let spread = cfg.max_interval.saturating_sub(cfg.min_interval);
        let wait = cfg.min_interval + spread.mul_f64(rng.gen::<f64>());
        time::sleep(wait).await;

        let req = synth_deposit(&cfg, &mut rng);
        match handle.deposit(req).await {
            Ok(deposit) => tracing::debug!(
                user = %deposit.user,
                token = %deposit.token,
                amount = deposit.amount,
                "simulated deposit landed"
            ),
            Err(EngineError::EngineClosed) => break,
            Err(err) => tracing::trace!(%err, "simulated deposit skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabricated_deposits_respect_the_documented_ranges() {
        let cfg = FeedConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(1234);
        let mut self_count = 0u32;
        let mut usdc_count = 0u32;
        let samples = 2_000;

        for _ in 0..samples {
            let req = synth_deposit(&cfg, &mut rng);
            assert!(req.amount >= cfg.min_amount as f64);
            assert!(req.amount < cfg.max_amount as f64);
            assert_eq!(req.amount.fract(), 0.0, "amounts are whole dollars");
            assert!(req.token == "SOL" || req.token == "USDC");
            if req.user == SELF_USER {
                self_count += 1;
            } else {
                assert!(req.user.starts_with("User"));
                let tail: u32 = req.user["User".len()..].parse().unwrap();
                assert!(tail < 10_000);
            }
            if req.token == "USDC" {
                usdc_count += 1;
            }
        }

        // Seeded run, so these are deterministic; the bands just document
        // the intended probabilities.
        let self_rate = self_count as f64 / samples as f64;
        let usdc_rate = usdc_count as f64 / samples as f64;
        assert!((0.15..0.25).contains(&self_rate), "self rate {self_rate}");
        assert!((0.25..0.35).contains(&usdc_rate), "usdc rate {usdc_rate}");
    }
}
