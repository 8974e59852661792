//! Validation utilities for form cells

use bigdecimal::BigDecimal;
use std::fmt;
use std::str::FromStr;

use crate::types::*;

/// Longest amount cell, in characters, that is parsed at all
pub const MAX_AMOUNT_TEXT_LEN: usize = 64;

/// Amounts must be below 10^18 and carry at most 18 decimal places
pub const MAX_AMOUNT_EXPONENT: i64 = 18;

/// Why an amount cell could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountIssue {
    Missing,
    NotANumber,
    Negative,
    OutOfRange,
    TooPrecise { max_scale: i64 },
}

impl fmt::Display for AmountIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountIssue::Missing => f.write_str("amount is missing"),
            AmountIssue::NotANumber => f.write_str("not a number"),
            AmountIssue::Negative => f.write_str("amount cannot be negative"),
            AmountIssue::OutOfRange => f.write_str("amount is out of range"),
            AmountIssue::TooPrecise { max_scale } => {
                write!(f, "more than {} decimal places", max_scale)
            }
        }
    }
}

/// Parse an amount cell into a non-negative decimal.
///
/// Accepts an optional leading `$` and comma thousands separators
/// (`1,250.50`); misplaced commas make the cell not a number.
pub fn parse_amount(raw: &RawAmount) -> Result<BigDecimal, AmountIssue> {
    let text = match raw {
        RawAmount::Number(number) => number.to_string(),
        RawAmount::Text(text) => text.trim().to_string(),
        RawAmount::Other(_) => return Err(AmountIssue::NotANumber),
    };
    if text.is_empty() {
        return Err(AmountIssue::Missing);
    }
    if text.len() > MAX_AMOUNT_TEXT_LEN {
        return Err(AmountIssue::OutOfRange);
    }

    let text = text.strip_prefix('$').unwrap_or(&text);
    let text = strip_thousands_separators(text).ok_or(AmountIssue::NotANumber)?;
    let amount = BigDecimal::from_str(&text).map_err(|_| AmountIssue::NotANumber)?;

    validate_amount_range(&amount)?;
    validate_non_negative_amount(&amount)?;
    Ok(amount)
}

/// Remove comma thousands separators, or `None` when they are misplaced.
/// The first group holds one to three digits, every later group exactly three.
fn strip_thousands_separators(text: &str) -> Option<String> {
    if !text.contains(',') {
        return Some(text.to_string());
    }

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };
    if fraction.is_some_and(|fraction| fraction.contains(',')) {
        return None;
    }

    let (sign, digits) = match whole.strip_prefix(['-', '+']) {
        Some(digits) => (&whole[..1], digits),
        None => ("", whole),
    };
    let mut groups = digits.split(',');
    let first = groups.next()?;
    if first.is_empty() || first.len() > 3 || !first.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut cleaned = format!("{}{}", sign, first);
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        cleaned.push_str(group);
    }
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

/// Validate that an amount stays within the magnitude and precision
/// that grading can sum exactly: below 10^18, at most 18 decimal places.
/// Exponent notation such as `1e20000000` is rejected here, before any arithmetic.
pub fn validate_amount_range(amount: &BigDecimal) -> Result<(), AmountIssue> {
    let (digits, scale) = amount.as_bigint_and_exponent();
    let digit_count = digits.magnitude().to_string().len() as i64;
    let integer_digits = digit_count.saturating_sub(scale);
    if integer_digits > MAX_AMOUNT_EXPONENT || scale.saturating_sub(digit_count) >= MAX_AMOUNT_EXPONENT
    {
        return Err(AmountIssue::OutOfRange);
    }

    let (_, scale) = amount.normalized().as_bigint_and_exponent();
    if scale > MAX_AMOUNT_EXPONENT {
        Err(AmountIssue::OutOfRange)
    } else {
        Ok(())
    }
}

/// Validate that an amount is zero or positive
pub fn validate_non_negative_amount(amount: &BigDecimal) -> Result<(), AmountIssue> {
    if *amount < BigDecimal::from(0) {
        Err(AmountIssue::Negative)
    } else {
        Ok(())
    }
}

/// Validate that an amount has at most `max_scale` decimal places.
/// Trailing zeros do not count, so `500.10` has one decimal place.
pub fn validate_amount_scale(amount: &BigDecimal, max_scale: i64) -> Result<(), AmountIssue> {
    let (_, scale) = amount.normalized().as_bigint_and_exponent();
    if scale > max_scale {
        Err(AmountIssue::TooPrecise { max_scale })
    } else {
        Ok(())
    }
}

/// Parse the entry-type cell. Full names are case-insensitive;
/// "Dr"/"Cr" are accepted only when `accept_abbreviations` is set.
pub fn parse_entry_type(text: &str, accept_abbreviations: bool) -> Option<EntryType> {
    if let Ok(entry_type) = EntryType::from_str(text) {
        return Some(entry_type);
    }
    if !accept_abbreviations {
        return None;
    }

    match text.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
        "dr" => Some(EntryType::Debit),
        "cr" => Some(EntryType::Credit),
        _ => None,
    }
}

impl FromStr for EntryType {
    type Err = GraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(EntryType::Debit),
            "credit" => Ok(EntryType::Credit),
            _ => Err(GraderError::Validation(format!(
                "'{}' is not an entry type, expected Debit or Credit",
                s
            ))),
        }
    }
}

impl FromStr for AccountCategory {
    type Err = GraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asset" | "assets" => Ok(AccountCategory::Asset),
            "liability" | "liabilities" => Ok(AccountCategory::Liability),
            "equity" => Ok(AccountCategory::Equity),
            "revenue" | "revenues" | "income" => Ok(AccountCategory::Revenue),
            "expense" | "expenses" => Ok(AccountCategory::Expense),
            _ => Err(GraderError::Validation(format!(
                "'{}' is not an account category",
                s
            ))),
        }
    }
}

/// Validate that an account name is valid
pub fn validate_account_name(name: &str) -> GraderResult<()> {
    if name.trim().is_empty() {
        return Err(GraderError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }

    if name.len() > 100 {
        return Err(GraderError::Validation(
            "Account name cannot exceed 100 characters".to_string(),
        ));
    }

    Ok(())
}
