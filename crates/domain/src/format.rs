//! Display formatting for balances and queue status.
//!
//! String shapes match the product UI: grouped thousands with up to
//! three fraction digits for stats, four fixed places for balances.

use crate::vault::QueueState;
use primitive_types::U256;
use rust_decimal::Decimal;

/// Grouped display with up to three fraction digits, trailing zeros
/// trimmed: `1234567.8912` -> `"1,234,567.891"`.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = value.round_dp(3).normalize();
    let s = rounded.to_string();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let grouped = group_thousands(int_part);
    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Fixed-point display with exactly `dp` fraction digits.
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    format!("{:.1$}", value.round_dp(dp), dp as usize)
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{sign}{out}")
}

/// One-line queue summary as shown on the withdrawal page.
///
/// `queued` and `free` are already in display units (STT, not wei).
pub fn queue_summary(state: &QueueState, queued: Decimal, free: Decimal) -> String {
    if state.pending_requests.is_zero() {
        return "No pending withdrawal requests".to_string();
    }
    let pending = state.pending_requests.low_u64();
    format!(
        "{} pending requests ({} STT queued, {} STT available)",
        pending,
        format_grouped(queued),
        format_grouped(free)
    )
}

/// Share-of-supply percentage for the portfolio panel.
pub fn share_percentage(user_shares: U256, total_supply: U256) -> Decimal {
    if total_supply.is_zero() {
        return Decimal::ZERO;
    }
    // f64 precision is plenty for a percentage readout
    let user = user_shares.to_string().parse::<f64>().unwrap_or(0.0);
    let total = total_supply.to_string().parse::<f64>().unwrap_or(1.0);
    Decimal::from_f64_retain(user / total * 100.0)
        .unwrap_or(Decimal::ZERO)
        .round_dp(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_grouping() {
        assert_eq!(format_grouped(dec!(0)), "0");
        assert_eq!(format_grouped(dec!(999)), "999");
        assert_eq!(format_grouped(dec!(1000)), "1,000");
        assert_eq!(format_grouped(dec!(1234567.8912)), "1,234,567.891");
        assert_eq!(format_grouped(dec!(1.5)), "1.5");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(format_fixed(dec!(1.5), 4), "1.5000");
        assert_eq!(format_fixed(dec!(0.123456), 4), "0.1235");
    }

    #[test]
    fn test_queue_summary_empty() {
        let state = QueueState {
            pending_requests: U256::zero(),
            queued_assets: U256::zero(),
            free_liquidity: U256::zero(),
            head: U256::zero(),
            tail: U256::zero(),
        };
        assert_eq!(
            queue_summary(&state, dec!(0), dec!(0)),
            "No pending withdrawal requests"
        );
    }

    #[test]
    fn test_queue_summary_pending() {
        let state = QueueState {
            pending_requests: U256::from(3),
            queued_assets: U256::zero(),
            free_liquidity: U256::zero(),
            head: U256::zero(),
            tail: U256::from(3),
        };
        assert_eq!(
            queue_summary(&state, dec!(1500), dec!(2.25)),
            "3 pending requests (1,500 STT queued, 2.25 STT available)"
        );
    }

    #[test]
    fn test_share_percentage() {
        let pct = share_percentage(U256::from(25), U256::from(1000));
        assert_eq!(pct, dec!(2.5));
        assert_eq!(share_percentage(U256::from(1), U256::zero()), dec!(0));
    }
}
