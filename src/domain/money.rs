/// Parses a non-negative decimal amount string into cents.
///
/// Accepts an optional fractional part of at most two digits (`"12"`,
/// `"12.3"`, `"12.34"`). Returns `None` for anything else, including
/// negative amounts.
pub fn parse_amount(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    if !whole.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    if fraction.len() > 2 || !fraction.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().ok()?
    };

    let cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    units.checked_mul(100)?.checked_add(cents)
}

/// Formats cents as a decimal string with exactly two fraction digits.
///
/// Uses integer arithmetic only, so large totals never pick up binary
/// floating-point rounding error.
pub fn format_amount(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    format!("{sign}{}.{:02}", magnitude / 100, magnitude % 100)
}
