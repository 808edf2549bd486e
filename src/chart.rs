//! Slice builder for the donut chart. Deposits keep their insertion order
//! and their keys stay stable across appends, so already-rendered slices
//! never change position while an animation is running.

use serde::Serialize;

use crate::constants::{BACKGROUND_COLOR, CHART_COLORS, REMAINING_CAPACITY_KEY};
use crate::state::Deposit;
use crate::wheel::remaining_capacity;

/// Derived wedge of the donut: either the remaining-capacity filler or one
/// deposit. Never stored; rebuilt on every deposit-list change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub key: String,
    pub value: f64,
    pub color: &'static str,
    pub is_remaining: bool,
    pub deposit: Option<Deposit>,
}

/// Remaining capacity first, then deposits in insertion order, colors cycled
/// through the palette by index.
pub fn build_slices(deposits: &[Deposit], capacity: f64) -> Vec<ChartSlice> {
    let total: f64 = deposits.iter().map(|d| d.amount).sum();
    let remaining = remaining_capacity(total, capacity);

    let mut slices = Vec::with_capacity(deposits.len() + 1);
    slices.push(ChartSlice {
        key: REMAINING_CAPACITY_KEY.to_string(),
        value: remaining,
        color: BACKGROUND_COLOR,
        is_remaining: true,
        deposit: None,
    });

    for (i, deposit) in deposits.iter().enumerate() {
        slices.push(ChartSlice {
            key: deposit.id.clone(),
            value: deposit.amount,
            color: CHART_COLORS[i % CHART_COLORS.len()],
            is_remaining: false,
            deposit: Some(deposit.clone()),
        });
    }

    slices
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn values_sum_to_total_plus_remaining() {
        let deposits = vec![deposit("a", 250.5), deposit("b", 320.8), deposit("c", 178.2)];
        let total: f64 = deposits.iter().map(|d| d.amount).sum();
        let slices = build_slices(&deposits, 2_000.0);
        let sum: f64 = slices.iter().map(|s| s.value).sum();
        assert!((sum - (total + (2_000.0 - total))).abs() < 1e-9);
        assert!((slices[0].value - (2_000.0 - total)).abs() < 1e-9);
    }

    #[test]
    fn remaining_clamps_at_zero_when_over_capacity() {
        let deposits = vec![deposit("a", 1_500.0), deposit("b", 900.0)];
        let slices = build_slices(&deposits, 2_000.0);
        assert_eq!(slices[0].value, 0.0);
        assert!(slices[0].is_remaining);
    }

    #[test]
    fn slices_keep_insertion_order_not_amount_order() {
        let deposits = vec![deposit("small", 10.0), deposit("big", 900.0), deposit("mid", 300.0)];
        let slices = build_slices(&deposits, 2_000.0);
        let keys: Vec<&str> = slices.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec![REMAINING_CAPACITY_KEY, "small", "big", "mid"]);
    }

    #[test]
    fn keys_stay_stable_under_appends() {
        let mut deposits = vec![deposit("a", 100.0), deposit("b", 200.0)];
        let before = build_slices(&deposits, 2_000.0);
        deposits.push(deposit("c", 300.0));
        let after = build_slices(&deposits, 2_000.0);
        for (prev, next) in before.iter().zip(after.iter()) {
            assert_eq!(prev.key, next.key);
            assert_eq!(prev.color, next.color);
        }
    }

    #[test]
    fn colors_cycle_through_palette() {
        let deposits: Vec<Deposit> = (0..45).map(|i| deposit(&format!("d{i}"), 1.0)).collect();
        let slices = build_slices(&deposits, 2_000.0);
        // slice 0 is the filler; deposit i sits at slice i+1
        assert_eq!(slices[1].color, CHART_COLORS[0]);
        assert_eq!(slices[21].color, CHART_COLORS[0]);
        assert_eq!(slices[45].color, CHART_COLORS[44 % CHART_COLORS.len()]);
    }

    #[test]
    fn empty_round_is_one_filler_slice() {
        let slices = build_slices(&[], 2_000.0);
        assert_eq!(slices.len(), 1);
        assert_eq!(slices[0].value, 2_000.0);
        assert_eq!(slices[0].color, BACKGROUND_COLOR);
    }
}
