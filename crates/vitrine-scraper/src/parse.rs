//! Price text parsing for Brazilian-formatted catalog prices.
//!
//! Catalog prices look like `"R$ 1.234,56"`: `.` groups thousands and `,`
//! separates centavos. Already-clean decimals such as `"49.90"` must parse to
//! the same value, so a lone dot followed by one or two digits is read as a
//! decimal point when no comma is present.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parses a price token into a [`Decimal`].
///
/// Every character that is not a digit, comma or dot is discarded first, so
/// currency symbols, spaces and labels are ignored. Returns `None` when no
/// number remains (e.g. `"Grátis"`) or the remainder is not a valid decimal
/// (e.g. `"1,2,3"`). Sign is never parsed; callers validate positivity.
#[must_use]
pub fn parse_price(text: &str) -> Option<Decimal> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let numeric = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if has_decimal_dot(&cleaned) {
        cleaned
    } else {
        cleaned.replace('.', "")
    };

    let numeric = numeric.trim_end_matches('.');
    let numeric = if numeric.starts_with('.') {
        format!("0{numeric}")
    } else {
        numeric.to_owned()
    };

    Decimal::from_str(&numeric).ok()
}

/// `true` when `s` has exactly one `.` followed by one or two trailing digits.
fn has_decimal_dot(s: &str) -> bool {
    let mut dots = s.match_indices('.');
    let (Some((idx, _)), None) = (dots.next(), dots.next()) else {
        return false;
    };
    let fraction = &s[idx + 1..];
    (1..=2).contains(&fraction.len())
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
