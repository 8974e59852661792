//! Balanced double-entry validation of submitted journal entries

use bigdecimal::BigDecimal;

use crate::config::GraderConfig;
use crate::traits::*;
use crate::types::*;
use crate::utils::{parse_amount, parse_entry_type, validate_amount_scale, AmountIssue};

/// Grades journal entries: totals per side plus a Balanced/Unbalanced/Empty status
#[derive(Debug, Clone, Default)]
pub struct LedgerEntryValidator {
    config: GraderConfig,
}

impl LedgerEntryValidator {
    /// Create a validator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with a custom configuration
    pub fn with_config(config: GraderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GraderConfig {
        &self.config
    }

    /// Grade an entry. Rows with an unusable amount or side are excluded
    /// from the totals and reported as warnings.
    pub fn grade(&self, entry: &JournalEntry) -> GradeResult {
        let mut total_debits = BigDecimal::from(0);
        let mut total_credits = BigDecimal::from(0);
        let mut warnings = Vec::new();

        for (index, row) in entry.rows.iter().enumerate() {
            if self.is_skipped(row) {
                tracing::trace!(line = index, "skipping placeholder row");
                continue;
            }

            match self.parse_row(row) {
                Ok(line) => match line.entry_type {
                    EntryType::Debit => total_debits += line.amount,
                    EntryType::Credit => total_credits += line.amount,
                },
                Err(kinds) => warnings.extend(kinds.into_iter().map(|kind| LineWarning {
                    line: index,
                    account: row.account.clone(),
                    kind,
                })),
            }
        }

        for warning in &warnings {
            tracing::debug!(%warning, "row excluded from totals");
        }

        let result = GradeResult::from_totals(total_debits, total_credits, warnings);
        tracing::debug!(
            lines = entry.len(),
            total_debits = %result.total_debits,
            total_credits = %result.total_credits,
            status = ?result.status,
            "graded journal entry"
        );
        result
    }

    /// Rows that count toward the totals, with their row index
    pub fn valid_lines(&self, entry: &JournalEntry) -> Vec<(usize, EntryLine)> {
        entry
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !self.is_skipped(row))
            .filter_map(|(index, row)| self.parse_row(row).ok().map(|line| (index, line)))
            .collect()
    }

    fn is_skipped(&self, row: &EntryRow) -> bool {
        self.config.skip_placeholder_rows && row.is_placeholder()
    }

    /// Turn a raw row into a line, or the reasons it cannot count.
    /// Amount problems come before side problems.
    fn parse_row(&self, row: &EntryRow) -> Result<EntryLine, Vec<WarningKind>> {
        let amount = self.row_amount(row);
        let entry_type = parse_entry_type(&row.entry_type, self.config.accept_side_abbreviations);

        match (entry_type, amount) {
            (Some(entry_type), Ok(amount)) => {
                Ok(EntryLine::new(row.account.clone(), entry_type, amount))
            }
            (entry_type, amount) => {
                let mut kinds = Vec::new();
                if let Err(issue) = amount {
                    kinds.push(WarningKind::InvalidAmount {
                        value: row.amount.as_ref().map(|a| a.to_string()).unwrap_or_default(),
                        reason: issue.to_string(),
                    });
                }
                if entry_type.is_none() {
                    kinds.push(WarningKind::InvalidSide {
                        value: row.entry_type.clone(),
                    });
                }
                Err(kinds)
            }
        }
    }

    fn row_amount(&self, row: &EntryRow) -> Result<BigDecimal, AmountIssue> {
        let amount = match &row.amount {
            Some(raw) => parse_amount(raw)?,
            None => return Err(AmountIssue::Missing),
        };
        if let Some(max_scale) = self.config.max_amount_scale {
            validate_amount_scale(&amount, max_scale)?;
        }
        Ok(amount)
    }
}

impl EntryGrader for LedgerEntryValidator {
    fn grade(&self, entry: &JournalEntry) -> GradeResult {
        LedgerEntryValidator::grade(self, entry)
    }
}

/// Grade `(account, side, amount)` tuples with the default configuration
pub fn grade_rows<A, S, M>(rows: &[(A, S, M)]) -> GradeResult
where
    A: AsRef<str>,
    S: AsRef<str>,
    M: AsRef<str>,
{
    let entry = JournalEntry::new(
        rows.iter()
            .map(|(account, side, amount)| {
                EntryRow::new(
                    account.as_ref(),
                    side.as_ref(),
                    Some(RawAmount::from(amount.as_ref())),
                )
            })
            .collect(),
    );
    LedgerEntryValidator::new().grade(&entry)
}
