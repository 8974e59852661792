//! Journal entry construction: builder, reversing entries and common patterns

use bigdecimal::BigDecimal;

use crate::types::*;
use crate::utils::parse_entry_type;

/// Builder for journal entries with typed lines
#[derive(Debug, Default)]
pub struct JournalEntryBuilder {
    lines: Vec<EntryLine>,
}

impl JournalEntryBuilder {
    /// Create a new, empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a debit line
    pub fn debit(mut self, account: impl Into<String>, amount: BigDecimal) -> Self {
        self.lines.push(EntryLine::debit(account, amount));
        self
    }

    /// Add a credit line
    pub fn credit(mut self, account: impl Into<String>, amount: BigDecimal) -> Self {
        self.lines.push(EntryLine::credit(account, amount));
        self
    }

    /// Add a custom line
    pub fn line(mut self, line: EntryLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Build the entry. Balance is not checked here; grade the result instead.
    pub fn build(self) -> JournalEntry {
        JournalEntry::from_lines(self.lines)
    }
}

impl JournalEntry {
    /// The reversing entry: same accounts and amounts with every side swapped.
    ///
    /// Rows whose side is not recognized are copied unchanged, so the
    /// reversal grades with the same warnings as the original.
    pub fn reversed(&self) -> JournalEntry {
        let rows = self
            .rows
            .iter()
            .map(|row| match parse_entry_type(&row.entry_type, true) {
                Some(entry_type) => EntryRow {
                    entry_type: entry_type.opposite().label().to_string(),
                    ..row.clone()
                },
                None => row.clone(),
            })
            .collect();
        JournalEntry::new(rows)
    }

    /// A one-debit, one-credit entry, as entered in the free-form simulator
    pub fn simple(
        debit_account: impl Into<String>,
        debit_amount: BigDecimal,
        credit_account: impl Into<String>,
        credit_amount: BigDecimal,
    ) -> JournalEntry {
        JournalEntryBuilder::new()
            .debit(debit_account, debit_amount)
            .credit(credit_account, credit_amount)
            .build()
    }
}

/// Common journal entry patterns
pub mod patterns {
    use super::*;

    /// Recognize an expense before it is paid (debit expense, credit liability)
    pub fn accrual(
        expense_account: impl Into<String>,
        liability_account: impl Into<String>,
        amount: BigDecimal,
    ) -> JournalEntry {
        JournalEntryBuilder::new()
            .debit(expense_account, amount.clone())
            .credit(liability_account, amount)
            .build()
    }

    /// Settle a liability in cash (debit liability, credit cash)
    pub fn payment(
        liability_account: impl Into<String>,
        cash_account: impl Into<String>,
        amount: BigDecimal,
    ) -> JournalEntry {
        JournalEntryBuilder::new()
            .debit(liability_account, amount.clone())
            .credit(cash_account, amount)
            .build()
    }

    /// Record revenue received in cash (debit cash, credit revenue)
    pub fn cash_revenue(
        cash_account: impl Into<String>,
        revenue_account: impl Into<String>,
        amount: BigDecimal,
    ) -> JournalEntry {
        JournalEntryBuilder::new()
            .debit(cash_account, amount.clone())
            .credit(revenue_account, amount)
            .build()
    }
}
