//! Locale-aware money text.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};

use super::Locale;

/// Formats `amount` with two decimals and thousands grouping.
///
/// # Examples
///
/// ```
/// use salary_engine::render::{Locale, format_money};
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_money(Decimal::from(1518), Locale::PtBr), "1.518,00");
/// assert_eq!(format_money(Decimal::from(1518), Locale::EnUs), "1,518.00");
/// assert_eq!(format_money(Decimal::new(-57500, 2), Locale::PtBr), "-575,00");
/// ```
pub fn format_money(amount: Decimal, locale: Locale) -> String {
    let rounded = round_money(amount);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (units, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut out = String::with_capacity(text.len() + units.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(units, locale.grouping_separator()));
    out.push(locale.decimal_separator());
    out.push_str(cents);
    out
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Parses money typed the way `locale` writes it.
///
/// Grouping separators and a leading `R$` are ignored. Empty text is zero.
///
/// # Errors
///
/// Returns `InvalidInput` naming `field` when the text is not a number.
///
/// # Examples
///
/// ```
/// use salary_engine::render::{Locale, parse_money};
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_money("1.518,00", Locale::PtBr, "gross_salary").unwrap(), Decimal::new(151800, 2));
/// assert_eq!(parse_money("", Locale::PtBr, "gross_salary").unwrap(), Decimal::ZERO);
/// assert!(parse_money("abc", Locale::EnUs, "gross_salary").is_err());
/// ```
pub fn parse_money(text: &str, locale: Locale, field: &str) -> EngineResult<Decimal> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != locale.grouping_separator() && !c.is_whitespace())
        .map(|c| if c == locale.decimal_separator() { '.' } else { c })
        .collect();

    Decimal::from_str(&normalized).map_err(|_| {
        EngineError::invalid_input(field, format!("'{}' is not a valid amount", text.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(format_money(dec("0"), Locale::PtBr), "0,00");
        assert_eq!(format_money(dec("999.9"), Locale::PtBr), "999,90");
        assert_eq!(format_money(dec("1000"), Locale::PtBr), "1.000,00");
        assert_eq!(format_money(dec("1234567.891"), Locale::PtBr), "1.234.567,89");
        assert_eq!(format_money(dec("1234567.891"), Locale::EnUs), "1,234,567.89");
    }

    #[test]
    fn test_format_keeps_sign() {
        assert_eq!(format_money(dec("-1042.77"), Locale::EnUs), "-1,042.77");
        assert_eq!(format_money(dec("-0.001"), Locale::EnUs), "0.00");
    }

    #[test]
    fn test_parse_pt_br() {
        assert_eq!(parse_money("3.000,00", Locale::PtBr, "x").unwrap(), dec("3000.00"));
        assert_eq!(parse_money("R$ 1.518,5", Locale::PtBr, "x").unwrap(), dec("1518.5"));
        assert_eq!(parse_money("40", Locale::PtBr, "x").unwrap(), dec("40"));
        assert_eq!(parse_money("1,5", Locale::PtBr, "x").unwrap(), dec("1.5"));
    }

    #[test]
    fn test_parse_en_us() {
        assert_eq!(parse_money("3,000.00", Locale::EnUs, "x").unwrap(), dec("3000.00"));
        assert_eq!(parse_money(" 12.34 ", Locale::EnUs, "x").unwrap(), dec("12.34"));
    }

    #[test]
    fn test_parse_blank_is_zero() {
        assert_eq!(parse_money("   ", Locale::EnUs, "x").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_error_names_field() {
        let err = parse_money("12a", Locale::PtBr, "advance_percent").unwrap_err();
        assert_eq!(
            err,
            EngineError::invalid_input("advance_percent", "'12a' is not a valid amount")
        );
    }

    #[test]
    fn test_format_then_parse() {
        for locale in [Locale::PtBr, Locale::EnUs] {
            let text = format_money(dec("98765.43"), locale);
            assert_eq!(parse_money(&text, locale, "x").unwrap(), dec("98765.43"));
        }
    }
}
