//! Display formatting and input coercion helpers.
//!
//! Every figure the dashboard shows goes through here: currency amounts in
//! Norwegian kroner with nb-NO digit grouping, percentages with one decimal
//! and ratio multiples with two. The inverse helpers turn raw control input
//! into the non-negative whole-krone values the engine works with.

use fixed_decimal::FixedDecimal;
use icu::decimal::{options::FixedDecimalFormatterOptions, FixedDecimalFormatter};
use icu::locid::Locale;
use writeable::Writeable;

/// Currency sign placed in front of every formatted amount.
pub const CURRENCY_SIGN: &str = "kr";

/// BCP-47 tag of the display locale.
pub const LOCALE_TAG: &str = "nb-NO";

/// Format an amount as whole kroner, e.g. `kr 1 500 000`.
///
/// Fractions are rounded half away from zero. Non-finite input renders as zero
/// so a transient bad value never blanks a widget.
pub fn format_currency(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    // -0.0 would otherwise render with a sign
    let whole = if rounded == 0.0 { 0 } else { rounded as i128 };
    format!("{CURRENCY_SIGN} {}", format_grouped(whole))
}

/// Format a fraction as a percentage with one decimal, e.g. `0.25` → `25.0%`.
pub fn format_percentage(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.1}%", value * 100.0)
}

/// Format a ratio as a multiple with two decimals, e.g. `6.67x`.
pub fn format_ratio_multiple(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{value:.2}x")
}

/// Format an already-scaled percentage as a whole-number badge, e.g. `(40%)`.
pub fn format_percent_badge(percent: f64) -> String {
    let percent = if percent.is_finite() { percent } else { 0.0 };
    format!("({percent:.0}%)")
}

/// Parse a string produced by [`format_currency`] back into its amount.
///
/// Returns `None` when the input carries no digits at all.
pub fn parse_currency(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let magnitude: f64 = digits.parse().ok()?;
    let negative = text.contains('-') || text.contains('\u{2212}');
    Some(if negative { -magnitude } else { magnitude })
}

/// Coerce a raw numeric control value into a line-item value.
///
/// NaN, infinities and negative numbers become 0; fractions are truncated.
pub fn coerce_value(raw: f64) -> u64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    raw.trunc() as u64
}

/// Parse free-text input the way a browser `parseInt` would, then coerce.
///
/// Leading whitespace and an optional sign are accepted, parsing stops at the
/// first non-digit. Anything unparseable, or negative, becomes 0.
pub fn parse_value(text: &str) -> u64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}

thread_local! {
    /// Built once per thread.
    static GROUPING_FORMATTER: Option<FixedDecimalFormatter> = build_formatter();
}

fn build_formatter() -> Option<FixedDecimalFormatter> {
    let locale: Locale = match LOCALE_TAG.parse() {
        Ok(locale) => locale,
        Err(e) => {
            tracing::warn!(error = %e, tag = LOCALE_TAG, "invalid display locale; using plain grouping");
            return None;
        }
    };
    match FixedDecimalFormatter::try_new(&locale.into(), FixedDecimalFormatterOptions::default()) {
        Ok(formatter) => Some(formatter),
        Err(e) => {
            tracing::warn!(error = %e, tag = LOCALE_TAG, "decimal formatter unavailable; using plain grouping");
            None
        }
    }
}

/// Group the digits of a whole number according to the display locale.
fn format_grouped(whole: i128) -> String {
    GROUPING_FORMATTER.with(|formatter| match formatter {
        Some(formatter) => formatter
            .format(&FixedDecimal::from(whole))
            .write_to_string()
            .into_owned(),
        None => fallback_grouped(whole),
    })
}

/// Plain grouping with no-break spaces and a minus sign, matching nb-NO output.
fn fallback_grouped(whole: i128) -> String {
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(c);
    }
    if whole < 0 {
        format!("\u{2212}{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_locale_has_a_formatter() {
        assert!(build_formatter().is_some());
        assert!(GROUPING_FORMATTER.with(Option::is_some));
    }

    #[test]
    fn fallback_grouping_matches_locale_shape() {
        assert_eq!(fallback_grouped(0), "0");
        assert_eq!(fallback_grouped(999), "999");
        assert_eq!(fallback_grouped(1_500_000), "1\u{a0}500\u{a0}000");
        assert_eq!(fallback_grouped(-12_345), "\u{2212}12\u{a0}345");
        assert_eq!(
            fallback_grouped(10_000_000_000_000_000_000),
            "10\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000\u{a0}000"
        );
    }
}
