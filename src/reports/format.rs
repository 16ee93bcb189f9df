//! Display formatting for report figures.

use rust_decimal::{Decimal, RoundingStrategy};

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);

    let text = rounded.abs().to_string();
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, group_thousands(integer), fraction),
        None => format!("{}{}", sign, group_thousands(integer)),
    }
}

/// Formats an amount with thousands separators and two decimals.
///
/// # Examples
///
/// ```
/// use hr_cost_engine::reports::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(1_234_567_891, 3)), "1,234,567.89");
/// assert_eq!(format_amount(Decimal::ZERO), "0.00");
/// ```
pub fn format_amount(amount: Decimal) -> String {
    format_fixed(amount, 2)
}

/// Formats an amount with thousands separators and no decimals.
pub fn format_amount_whole(amount: Decimal) -> String {
    format_fixed(amount, 0)
}

/// Formats an amount followed by a currency label, if one is configured.
pub fn format_currency(amount: Decimal, currency_label: &str) -> String {
    let label = currency_label.trim();
    if label.is_empty() {
        format_amount(amount)
    } else {
        format!("{} {}", format_amount(amount), label)
    }
}

/// Formats a percentage value (already scaled to 0-100) with two decimals.
pub fn format_percent(percent: Decimal) -> String {
    format!("{}%", format_fixed(percent, 2))
}

/// Returns `part` as a percentage of `whole`, rounded to two decimals.
///
/// Returns zero when `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / whole).round_dp(2)
}
