//! Core types and data structures for journal entry grading

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Types of entries in double-entry bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryType {
    /// Debit entry - increases Assets and Expenses, decreases Liabilities, Equity, and Revenue
    Debit,
    /// Credit entry - increases Liabilities, Equity, and Revenue, decreases Assets and Expenses
    Credit,
}

impl EntryType {
    /// The other side of the entry; used to build reversing entries
    pub fn opposite(self) -> Self {
        match self {
            EntryType::Debit => EntryType::Credit,
            EntryType::Credit => EntryType::Debit,
        }
    }

    /// Label used by the tutorial's entry-type column
    pub fn label(self) -> &'static str {
        match self {
            EntryType::Debit => "Debit",
            EntryType::Credit => "Credit",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The five account categories of a chart of accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountCategory {
    /// Resources owned by the business (Cash, Property, Equipment)
    Asset,
    /// Debts or obligations (Loans, Accounts Payable, Accrued Expenses)
    Liability,
    /// Residual interest after liabilities (Owner's Equity, Retained Earnings)
    Equity,
    /// Income earned from operations (Rental Income, Service Revenue)
    Revenue,
    /// Costs incurred in generating revenue (Maintenance, Utilities, Marketing)
    Expense,
}

impl AccountCategory {
    /// All categories in chart order
    pub const ALL: [AccountCategory; 5] = [
        AccountCategory::Asset,
        AccountCategory::Liability,
        AccountCategory::Equity,
        AccountCategory::Revenue,
        AccountCategory::Expense,
    ];

    /// Returns the normal balance side for this category.
    /// Assets and Expenses normally have debit balances,
    /// Liabilities, Equity, and Revenue normally have credit balances.
    pub fn normal_balance(self) -> EntryType {
        match self {
            AccountCategory::Asset | AccountCategory::Expense => EntryType::Debit,
            AccountCategory::Liability | AccountCategory::Equity | AccountCategory::Revenue => {
                EntryType::Credit
            }
        }
    }

    /// Plural heading, as shown in the chart of accounts editor
    pub fn heading(self) -> &'static str {
        match self {
            AccountCategory::Asset => "Assets",
            AccountCategory::Liability => "Liabilities",
            AccountCategory::Equity => "Equity",
            AccountCategory::Revenue => "Revenue",
            AccountCategory::Expense => "Expenses",
        }
    }
}

impl fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Amount cell as submitted by the form, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    /// Any other JSON value (booleans, arrays, objects); never a valid amount
    Other(serde_json::Value),
}

impl RawAmount {
    /// True when the cell holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            RawAmount::Number(_) | RawAmount::Other(_) => false,
            RawAmount::Text(text) => text.trim().is_empty(),
        }
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAmount::Number(number) => write!(f, "{}", number),
            RawAmount::Text(text) => f.write_str(text),
            RawAmount::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<&BigDecimal> for RawAmount {
    fn from(amount: &BigDecimal) -> Self {
        RawAmount::Text(amount.to_string())
    }
}

impl From<&str> for RawAmount {
    fn from(text: &str) -> Self {
        RawAmount::Text(text.to_string())
    }
}

/// One row of the journal entry table, exactly as the learner filled it in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRow {
    /// Account name; may be blank
    #[serde(
        rename = "Account",
        alias = "account",
        default,
        deserialize_with = "text_cell"
    )]
    pub account: String,
    /// Side as typed or selected ("Debit", "Credit"); may be blank or unrecognized
    #[serde(
        rename = "Entry Type",
        alias = "entry_type",
        alias = "side",
        default,
        deserialize_with = "text_cell"
    )]
    pub entry_type: String,
    /// Amount cell; may be missing or non-numeric
    #[serde(rename = "Amount ($)", alias = "amount", default)]
    pub amount: Option<RawAmount>,
}

/// Read a text cell leniently: `null` is blank, numbers and booleans keep their JSON text
fn text_cell<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}

impl EntryRow {
    /// Create a new row from raw cell values
    pub fn new(
        account: impl Into<String>,
        entry_type: impl Into<String>,
        amount: Option<RawAmount>,
    ) -> Self {
        Self {
            account: account.into(),
            entry_type: entry_type.into(),
            amount,
        }
    }

    /// An untouched form row: blank account and side, zero or blank amount
    pub fn is_placeholder(&self) -> bool {
        self.account.trim().is_empty()
            && self.entry_type.trim().is_empty()
            && match &self.amount {
                None => true,
                Some(amount) if amount.is_blank() => true,
                Some(amount) => crate::utils::parse_amount(amount)
                    .map(|value| value == BigDecimal::from(0))
                    .unwrap_or(false),
            }
    }
}

impl From<EntryLine> for EntryRow {
    fn from(line: EntryLine) -> Self {
        Self {
            amount: Some(RawAmount::from(&line.amount)),
            entry_type: line.entry_type.label().to_string(),
            account: line.account,
        }
    }
}

/// A validated journal line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryLine {
    /// Account being affected
    pub account: String,
    /// Type of entry (Debit or Credit)
    pub entry_type: EntryType,
    /// Non-negative amount of the entry
    pub amount: BigDecimal,
}

impl EntryLine {
    /// Create a new line
    pub fn new(account: impl Into<String>, entry_type: EntryType, amount: BigDecimal) -> Self {
        Self {
            account: account.into(),
            entry_type,
            amount,
        }
    }

    /// Create a debit line
    pub fn debit(account: impl Into<String>, amount: BigDecimal) -> Self {
        Self::new(account, EntryType::Debit, amount)
    }

    /// Create a credit line
    pub fn credit(account: impl Into<String>, amount: BigDecimal) -> Self {
        Self::new(account, EntryType::Credit, amount)
    }
}

/// Ordered set of rows recorded together for one transaction.
///
/// The balance invariant (debits equal credits) is checked by grading and
/// never enforced here, since learners submit unbalanced entries on purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JournalEntry {
    pub rows: Vec<EntryRow>,
}

impl JournalEntry {
    /// Create an entry from raw form rows
    pub fn new(rows: Vec<EntryRow>) -> Self {
        Self { rows }
    }

    /// Create an entry from validated lines
    pub fn from_lines(lines: impl IntoIterator<Item = EntryLine>) -> Self {
        Self {
            rows: lines.into_iter().map(EntryRow::from).collect(),
        }
    }

    /// Blank form with `count` placeholder rows, as the exercises start out
    pub fn blank(count: usize) -> Self {
        Self {
            rows: (0..count)
                .map(|_| EntryRow::new("", "", Some(RawAmount::Number(0.into()))))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Classification of a graded entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradeStatus {
    /// Debits equal credits and both are above zero
    Balanced,
    /// Totals differ, or only one side carries an amount
    Unbalanced,
    /// Both totals are zero
    Empty,
}

impl GradeStatus {
    /// Feedback message shown to the learner, if any
    pub fn message(self) -> Option<&'static str> {
        match self {
            GradeStatus::Balanced => Some("Balanced Entry: Debits equal Credits!"),
            GradeStatus::Unbalanced => {
                Some("Unbalanced Entry: Please ensure total debits equal total credits.")
            }
            GradeStatus::Empty => None,
        }
    }
}

/// Problem found on a single row during grading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum WarningKind {
    /// Amount missing, non-numeric, negative or too precise; excluded from totals
    InvalidAmount { value: String, reason: String },
    /// Side not one of Debit/Credit; excluded from totals
    InvalidSide { value: String },
}

/// A warning attached to a row of the graded entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWarning {
    /// Zero-based row index within the entry
    pub line: usize,
    /// Account name of the row, as submitted
    pub account: String,
    #[serde(flatten)]
    pub kind: WarningKind,
}

impl fmt::Display for LineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let account = if self.account.trim().is_empty() {
            "<blank account>"
        } else {
            self.account.as_str()
        };
        match &self.kind {
            WarningKind::InvalidAmount { value, reason } => write!(
                f,
                "Line {} ({}): invalid amount '{}': {}",
                self.line + 1,
                account,
                value,
                reason
            ),
            WarningKind::InvalidSide { value } => write!(
                f,
                "Line {} ({}): invalid entry type '{}', expected Debit or Credit",
                self.line + 1,
                account,
                value
            ),
        }
    }
}

/// Outcome of grading one journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeResult {
    /// Sum of all valid debit amounts
    pub total_debits: BigDecimal,
    /// Sum of all valid credit amounts
    pub total_credits: BigDecimal,
    /// Balanced, Unbalanced or Empty
    pub status: GradeStatus,
    /// Rows excluded from the totals, in row order
    pub warnings: Vec<LineWarning>,
}

impl GradeResult {
    /// Derive the result from the two totals
    pub fn from_totals(
        total_debits: BigDecimal,
        total_credits: BigDecimal,
        warnings: Vec<LineWarning>,
    ) -> Self {
        let zero = BigDecimal::from(0);
        let status = if total_debits == zero && total_credits == zero {
            GradeStatus::Empty
        } else if total_debits == total_credits && total_debits > zero {
            GradeStatus::Balanced
        } else {
            GradeStatus::Unbalanced
        };

        Self {
            total_debits,
            total_credits,
            status,
            warnings,
        }
    }

    /// Check if the entry is balanced (debits = credits > 0)
    pub fn is_balanced(&self) -> bool {
        self.status == GradeStatus::Balanced
    }

    /// Check if any row was excluded from the totals
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Difference between debits and credits (positive when debits are larger)
    pub fn difference(&self) -> BigDecimal {
        &self.total_debits - &self.total_credits
    }
}

/// Errors that can occur outside of grading itself
#[derive(Debug, thiserror::Error)]
pub enum GraderError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for grader operations
pub type GraderResult<T> = Result<T, GraderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_balance() {
        assert_eq!(AccountCategory::Asset.normal_balance(), EntryType::Debit);
        assert_eq!(AccountCategory::Expense.normal_balance(), EntryType::Debit);
        assert_eq!(AccountCategory::Liability.normal_balance(), EntryType::Credit);
        assert_eq!(AccountCategory::Equity.normal_balance(), EntryType::Credit);
        assert_eq!(AccountCategory::Revenue.normal_balance(), EntryType::Credit);
    }

    #[test]
    fn test_status_from_totals() {
        let balanced =
            GradeResult::from_totals(BigDecimal::from(500), BigDecimal::from(500), Vec::new());
        assert_eq!(balanced.status, GradeStatus::Balanced);

        let empty = GradeResult::from_totals(BigDecimal::from(0), BigDecimal::from(0), Vec::new());
        assert_eq!(empty.status, GradeStatus::Empty);

        let one_sided =
            GradeResult::from_totals(BigDecimal::from(0), BigDecimal::from(300), Vec::new());
        assert_eq!(one_sided.status, GradeStatus::Unbalanced);
        assert_eq!(one_sided.difference(), BigDecimal::from(-300));
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            GradeStatus::Balanced.message(),
            Some("Balanced Entry: Debits equal Credits!")
        );
        assert_eq!(
            GradeStatus::Unbalanced.message(),
            Some("Unbalanced Entry: Please ensure total debits equal total credits.")
        );
        assert_eq!(GradeStatus::Empty.message(), None);
    }

    #[test]
    fn test_entry_row_deserializes_form_columns() {
        let json = r#"[
            {"Account": "Cash", "Entry Type": "Debit", "Amount ($)": 1000},
            {"account": "Rental Income", "entry_type": "Credit", "amount": "800.50"},
            {"Account": "", "Entry Type": ""}
        ]"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.len(), 3);
        assert_eq!(entry.rows[0].amount, Some(RawAmount::Number(1000.into())));
        assert_eq!(entry.rows[1].amount, Some(RawAmount::from("800.50")));
        assert_eq!(entry.rows[2].amount, None);
        assert!(entry.rows[2].is_placeholder());
    }

    #[test]
    fn test_entry_row_tolerates_unexpected_cell_types() {
        let json = r#"[
            {"Account": "a", "Entry Type": null, "Amount ($)": 5},
            {"Account": null, "Entry Type": "Credit", "Amount ($)": true},
            {"Account": 1010, "Entry Type": "Debit", "Amount ($)": [1, 2]}
        ]"#;
        let entry: JournalEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.rows[0].entry_type, "");
        assert_eq!(entry.rows[1].account, "");
        assert_eq!(
            entry.rows[1].amount,
            Some(RawAmount::Other(serde_json::Value::Bool(true)))
        );
        assert_eq!(entry.rows[2].account, "1010");
        assert_eq!(entry.rows[2].amount.as_ref().unwrap().to_string(), "[1,2]");
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(JournalEntry::blank(2).rows.iter().all(EntryRow::is_placeholder));
        assert!(!EntryRow::new("Cash", "", Some(RawAmount::from("0"))).is_placeholder());
        assert!(!EntryRow::new("", "", Some(RawAmount::from("abc"))).is_placeholder());
        assert!(!EntryRow::new("", "", Some(RawAmount::from("10"))).is_placeholder());
    }

    #[test]
    fn test_warning_display() {
        let warning = LineWarning {
            line: 0,
            account: "Repair Expense".to_string(),
            kind: WarningKind::InvalidAmount {
                value: "abc".to_string(),
                reason: "not a number".to_string(),
            },
        };
        assert_eq!(
            warning.to_string(),
            "Line 1 (Repair Expense): invalid amount 'abc': not a number"
        );
    }
}
