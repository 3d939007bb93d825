use rust_decimal::{Decimal, RoundingStrategy};

/// Dollar amount rounded to cents with thousand separators.
/// e.g. `1234567.891` → `"$1,234,567.89"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let cents = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{:.2}", cents.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, &b) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(b as char);
    }

    let sign = if cents < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{dec_part}")
}

/// Pad `label` on the right so amounts line up in a column.
pub(crate) fn column(label: &str, width: usize) -> String {
    let count = label.chars().count();
    let mut out = label.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(count)));
    out
}
