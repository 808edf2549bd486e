//! Pure angle math for the spinning wheel: which wedge a deposit owns, and
//! how far to rotate so the pointer lands inside the winner's wedge with a
//! bit of manufactured drama. The winner is chosen before any of this runs;
//! the spin only visualizes a predetermined outcome.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_SPIN_TURNS, MIN_SPIN_TURNS, POINTER_ANGLE, SPIN_WOBBLE_DEGREES,
};
use crate::errors::EngineError;
use crate::state::Deposit;

/// Angular range `[start_angle, end_angle)` a deposit owns within the pie.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceSpan {
    pub start_angle: f64,
    pub end_angle: f64,
    pub slice_angle: f64,
}

pub fn remaining_capacity(total: f64, capacity: f64) -> f64 {
    (capacity - total).max(0.0)
}

/// Walks the pie in render order (remaining capacity first, then deposits in
/// insertion order) and returns the span owned by `target_id`.
pub fn deposit_span(
    deposits: &[Deposit],
    target_id: &str,
    total: f64,
    capacity: f64,
) -> Option<SliceSpan> {
    let remaining = remaining_capacity(total, capacity);
    let whole = total + remaining;
    if whole <= 0.0 {
        return None;
    }

    let mut cumulative = (remaining / whole) * 360.0;
    for deposit in deposits {
        let slice_angle = (deposit.amount / whole) * 360.0;
        if deposit.id == target_id {
            return Some(SliceSpan {
                start_angle: cumulative,
                end_angle: cumulative + slice_angle,
                slice_angle,
            });
        }
        cumulative += slice_angle;
    }
    None
}

/// The five near-miss flavors the wheel can land with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinScenario {
    /// Just 2-8% past the start of the winner's wedge.
    BarelyMadeIt,
    /// 2-8% before the end of the wedge.
    AlmostMissed,
    /// Somewhere in the middle 40% of the wedge.
    CenterHit,
    /// 1-5% past the start, flirting with the previous wedge.
    CloseCallBefore,
    /// 1-5% before the end, flirting with the next wedge.
    CloseCallAfter,
}

impl SpinScenario {
    pub const ALL: [SpinScenario; 5] = [
        SpinScenario::BarelyMadeIt,
        SpinScenario::AlmostMissed,
        SpinScenario::CenterHit,
        SpinScenario::CloseCallBefore,
        SpinScenario::CloseCallAfter,
    ];

    fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Resting angle inside the winner's span for this scenario. Always
    /// strictly within `[start_angle, end_angle)`; the rotation wobble is
    /// applied later, by `plan_spin`.
    pub fn target_angle<R: Rng + ?Sized>(self, span: &SliceSpan, rng: &mut R) -> f64 {
        let w = span.slice_angle;
        match self {
            SpinScenario::BarelyMadeIt => span.start_angle + w * (0.02 + rng.gen::<f64>() * 0.06),
            SpinScenario::AlmostMissed => span.end_angle - w * (0.02 + rng.gen::<f64>() * 0.06),
            SpinScenario::CenterHit => {
                let lo = span.start_angle + w * 0.3;
                let hi = span.start_angle + w * 0.7;
                lo + rng.gen::<f64>() * (hi - lo)
            }
            SpinScenario::CloseCallBefore => {
                span.start_angle + w * (0.01 + rng.gen::<f64>() * 0.04)
            }
            SpinScenario::CloseCallAfter => span.end_angle - w * (0.01 + rng.gen::<f64>() * 0.04),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub scenario: SpinScenario,
    /// In-band resting angle, before wobble.
    pub target_angle: f64,
    /// Full rotation to animate: 6-12 turns plus pointer alignment.
    pub rotation: f64,
}

/// Picks a drama scenario and composes the final rotation so the pointer
/// (fixed at the top) ends up over the target angle, give or take the wobble.
pub fn plan_spin<R: Rng + ?Sized>(
    deposits: &[Deposit],
    winner_id: &str,
    total: f64,
    capacity: f64,
    rng: &mut R,
) -> Result<SpinPlan, EngineError> {
    let span = deposit_span(deposits, winner_id, total, capacity)
        .ok_or(EngineError::WinnerNotInRound)?;

    let scenario = SpinScenario::pick(rng);
    let target_angle = scenario.target_angle(&span, rng);

    let turns = MIN_SPIN_TURNS + rng.gen::<f64>() * (MAX_SPIN_TURNS - MIN_SPIN_TURNS);
    let wobble = (rng.gen::<f64>() - 0.5) * 2.0 * SPIN_WOBBLE_DEGREES;
    let rotation = turns * 360.0 + (POINTER_ANGLE - (target_angle + wobble));

    tracing::debug!(
        ?scenario,
        start = span.start_angle,
        end = span.end_angle,
        target = target_angle,
        rotation,
        "spin planned"
    );

    Ok(SpinPlan {
        scenario,
        target_angle,
        rotation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn deposit(id: &str, amount: f64) -> Deposit {
        Deposit {
            id: id.to_string(),
            user: format!("user-{id}"),
            token: "SOL".to_string(),
            amount,
            timestamp: 0,
        }
    }

    #[test]
    fn spans_follow_render_order() {
        let deposits = vec![deposit("a", 500.0), deposit("b", 500.0)];
        // remaining = 1000, whole = 2000, remaining slice = 180 degrees
        let a = deposit_span(&deposits, "a", 1_000.0, 2_000.0).unwrap();
        assert!((a.start_angle - 180.0).abs() < 1e-9);
        assert!((a.end_angle - 270.0).abs() < 1e-9);

        let b = deposit_span(&deposits, "b", 1_000.0, 2_000.0).unwrap();
        assert!((b.start_angle - 270.0).abs() < 1e-9);
        assert!((b.end_angle - 360.0).abs() < 1e-9);
    }

    #[test]
    fn spans_cover_full_circle_when_over_capacity() {
        let deposits = vec![deposit("a", 3_000.0), deposit("b", 1_000.0)];
        let a = deposit_span(&deposits, "a", 4_000.0, 2_000.0).unwrap();
        let b = deposit_span(&deposits, "b", 4_000.0, 2_000.0).unwrap();
        assert!((a.start_angle - 0.0).abs() < 1e-9);
        assert!((a.slice_angle + b.slice_angle - 360.0).abs() < 1e-9);
        assert!((b.end_angle - 360.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_target_has_no_span() {
        let deposits = vec![deposit("a", 100.0)];
        assert!(deposit_span(&deposits, "nope", 100.0, 2_000.0).is_none());
    }

    #[test]
    fn scenario_targets_stay_in_band() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let span = SliceSpan {
            start_angle: 120.0,
            end_angle: 200.0,
            slice_angle: 80.0,
        };
        for _ in 0..200 {
            for scenario in SpinScenario::ALL {
                let t = scenario.target_angle(&span, &mut rng);
                assert!(
                    t > span.start_angle && t < span.end_angle,
                    "{scenario:?} landed at {t} outside [{}, {})",
                    span.start_angle,
                    span.end_angle
                );
                match scenario {
                    SpinScenario::CenterHit => {
                        assert!(t >= span.start_angle + 80.0 * 0.3);
                        assert!(t <= span.start_angle + 80.0 * 0.7);
                    }
                    SpinScenario::BarelyMadeIt => {
                        assert!(t <= span.start_angle + 80.0 * 0.08 + 1e-9)
                    }
                    SpinScenario::AlmostMissed => {
                        assert!(t >= span.end_angle - 80.0 * 0.08 - 1e-9)
                    }
                    SpinScenario::CloseCallBefore => {
                        assert!(t <= span.start_angle + 80.0 * 0.05 + 1e-9)
                    }
                    SpinScenario::CloseCallAfter => {
                        assert!(t >= span.end_angle - 80.0 * 0.05 - 1e-9)
                    }
                }
            }
        }
    }

    #[test]
    fn rotation_decomposes_into_six_to_twelve_turns() {
        let deposits = vec![deposit("a", 400.0), deposit("b", 600.0)];
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        for _ in 0..200 {
            let plan = plan_spin(&deposits, "b", 1_000.0, 2_000.0, &mut rng).unwrap();
            // rotation = turns * 360 + (90 - target) - wobble
            let spun = plan.rotation - (POINTER_ANGLE - plan.target_angle);
            assert!(spun >= MIN_SPIN_TURNS * 360.0 - SPIN_WOBBLE_DEGREES);
            assert!(spun <= MAX_SPIN_TURNS * 360.0 + SPIN_WOBBLE_DEGREES);
        }
    }

    #[test]
    fn plan_rejects_winner_outside_round() {
        let deposits = vec![deposit("a", 400.0)];
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let err = plan_spin(&deposits, "ghost", 400.0, 2_000.0, &mut rng).unwrap_err();
        assert_eq!(err, EngineError::WinnerNotInRound);
    }
}
