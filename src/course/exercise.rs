//! Journal entry exercises and answer checking

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ledger::LedgerEntryValidator;
use crate::traits::{normalize, AccountPolicy, AllowedAccounts};
use crate::types::*;

/// One line of the expected answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedLine {
    pub entry_type: EntryType,
    /// Accepted account names; the first is the preferred answer
    pub accounts: Vec<String>,
    pub amount: BigDecimal,
}

impl ExpectedLine {
    pub fn new(entry_type: EntryType, accounts: &[&str], amount: BigDecimal) -> Self {
        Self {
            entry_type,
            accounts: accounts.iter().map(|a| a.to_string()).collect(),
            amount,
        }
    }

    /// Whether a submitted line satisfies this expected line
    pub fn matches(&self, line: &EntryLine) -> bool {
        line.entry_type == self.entry_type
            && line.amount == self.amount
            && self
                .accounts
                .iter()
                .any(|account| normalize(account) == normalize(&line.account))
    }
}

impl fmt::Display for ExpectedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.entry_type)?;
        match self.accounts.split_first() {
            Some((first, [])) => write!(f, "{}", first)?,
            Some((first, rest)) => write!(f, "{} (or {})", first, rest.join(" or "))?,
            None => f.write_str("<any account>")?,
        }
        write!(f, " ${}", self.amount)
    }
}

/// A journal entry exercise from the course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    pub date: Option<NaiveDate>,
    /// Account names offered by the form
    pub account_options: Vec<String>,
    pub expected: Vec<ExpectedLine>,
}

/// A row whose account is not one of the offered options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisallowedAccount {
    pub line: usize,
    pub account: String,
}

/// Result of checking a submission against an exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseFeedback {
    pub exercise_id: String,
    pub grade: GradeResult,
    pub disallowed_accounts: Vec<DisallowedAccount>,
    /// Expected lines with no matching submitted line
    pub missing: Vec<ExpectedLine>,
    /// Row indices of valid lines that match no expected line
    pub unexpected_lines: Vec<usize>,
}

impl ExerciseFeedback {
    /// Balanced, free of warnings, and exactly the expected lines
    pub fn is_correct(&self) -> bool {
        self.grade.is_balanced()
            && !self.grade.has_warnings()
            && self.disallowed_accounts.is_empty()
            && self.missing.is_empty()
            && self.unexpected_lines.is_empty()
    }
}

impl Exercise {
    /// Check a submission with the default validator
    pub fn check(&self, entry: &JournalEntry) -> ExerciseFeedback {
        self.check_with(&LedgerEntryValidator::new(), entry)
    }

    /// Check a submission: grade it, then match valid lines to the expected
    /// lines in any order, each submitted line used at most once. The pairing
    /// is a maximum matching, so an expected line with alternative accounts
    /// never takes the only line a stricter expected line could use.
    pub fn check_with(
        &self,
        validator: &LedgerEntryValidator,
        entry: &JournalEntry,
    ) -> ExerciseFeedback {
        let grade = validator.grade(entry);
        let lines = validator.valid_lines(entry);
        let policy = AllowedAccounts::new(&self.account_options);

        let disallowed_accounts = lines
            .iter()
            .filter(|(_, line)| !policy.allows(&line.account))
            .map(|(index, line)| DisallowedAccount {
                line: *index,
                account: line.account.clone(),
            })
            .collect();

        let submitted: Vec<&EntryLine> = lines.iter().map(|(_, line)| line).collect();
        let owner = match_expected_lines(&self.expected, &submitted);

        let mut matched = vec![false; self.expected.len()];
        for expected in owner.iter().flatten() {
            matched[*expected] = true;
        }
        let missing = self
            .expected
            .iter()
            .zip(&matched)
            .filter(|(_, matched)| !**matched)
            .map(|(expected, _)| expected.clone())
            .collect();

        let unexpected_lines = lines
            .iter()
            .zip(&owner)
            .filter(|(_, owner)| owner.is_none())
            .map(|((index, _), _)| *index)
            .collect();

        let feedback = ExerciseFeedback {
            exercise_id: self.id.clone(),
            grade,
            disallowed_accounts,
            missing,
            unexpected_lines,
        };
        tracing::debug!(
            exercise = %self.id,
            correct = feedback.is_correct(),
            missing = feedback.missing.len(),
            "checked exercise submission"
        );
        feedback
    }

    /// Expected answer as shown after submission, one line per entry
    pub fn expected_answer(&self) -> Vec<String> {
        self.expected.iter().map(|line| line.to_string()).collect()
    }

    /// Empty form for this exercise, one placeholder row per expected line
    pub fn blank_form(&self) -> JournalEntry {
        JournalEntry::blank(self.expected.len())
    }
}

/// Pair submitted lines with expected lines using augmenting paths.
/// Returns, for each submitted line, the index of the expected line it satisfies.
fn match_expected_lines(
    expected: &[ExpectedLine],
    submitted: &[&EntryLine],
) -> Vec<Option<usize>> {
    let mut owner = vec![None; submitted.len()];
    for index in 0..expected.len() {
        let mut visited = vec![false; submitted.len()];
        assign(index, expected, submitted, &mut owner, &mut visited);
    }
    owner
}

fn assign(
    index: usize,
    expected: &[ExpectedLine],
    submitted: &[&EntryLine],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for (position, line) in submitted.iter().enumerate() {
        if visited[position] || !expected[index].matches(line) {
            continue;
        }
        visited[position] = true;
        let free = match owner[position] {
            None => true,
            Some(current) => assign(current, expected, submitted, owner, visited),
        };
        if free {
            owner[position] = Some(index);
            return true;
        }
    }
    false
}

/// All exercises in the course, in course order
pub fn catalog() -> Vec<Exercise> {
    let amount = || BigDecimal::from(500);
    let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();

    vec![
        Exercise {
            id: "pipe-invoice".to_string(),
            title: "Invoice receipt for a pipe replacement".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 18),
            account_options: owned(&[
                "Pipe Replacement Expense",
                "Maintenance Expense",
                "Accounts Payable",
                "Accrued Expenses",
            ]),
            expected: vec![
                ExpectedLine::new(
                    EntryType::Debit,
                    &["Pipe Replacement Expense", "Maintenance Expense"],
                    amount(),
                ),
                ExpectedLine::new(
                    EntryType::Credit,
                    &["Accounts Payable", "Accrued Expenses"],
                    amount(),
                ),
            ],
        },
        Exercise {
            id: "pipe-payment".to_string(),
            title: "Payment of the pipe replacement invoice".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1),
            account_options: owned(&["Accounts Payable", "Accrued Expenses", "Cash"]),
            expected: vec![
                ExpectedLine::new(
                    EntryType::Debit,
                    &["Accounts Payable", "Accrued Expenses"],
                    amount(),
                ),
                ExpectedLine::new(EntryType::Credit, &["Cash"], amount()),
            ],
        },
        Exercise {
            id: "repair-accrual".to_string(),
            title: "Accrue a repair expense".to_string(),
            date: None,
            account_options: owned(&["Repair Expense", "Accrued Expenses"]),
            expected: vec![
                ExpectedLine::new(EntryType::Debit, &["Repair Expense"], amount()),
                ExpectedLine::new(EntryType::Credit, &["Accrued Expenses"], amount()),
            ],
        },
        Exercise {
            id: "repair-reversal".to_string(),
            title: "Reverse the repair expense accrual".to_string(),
            date: None,
            account_options: owned(&["Accrued Expenses", "Repair Expense"]),
            expected: vec![
                ExpectedLine::new(EntryType::Debit, &["Accrued Expenses"], amount()),
                ExpectedLine::new(EntryType::Credit, &["Repair Expense"], amount()),
            ],
        },
    ]
}

/// Look up an exercise by id
pub fn find(id: &str) -> GraderResult<Exercise> {
    catalog()
        .into_iter()
        .find(|exercise| exercise.id == id)
        .ok_or_else(|| GraderError::UnknownExercise(id.to_string()))
}
