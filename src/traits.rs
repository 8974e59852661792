//! Traits for grading and account rules

use std::collections::BTreeSet;

use crate::types::*;

/// Anything that can grade a journal entry.
///
/// Grading never fails: malformed rows are reported in
/// [`GradeResult::warnings`] and left out of the totals.
pub trait EntryGrader: Send + Sync {
    /// Grade a single entry
    fn grade(&self, entry: &JournalEntry) -> GradeResult;
}

/// Trait for deciding which account names a row may use
pub trait AccountPolicy: Send + Sync {
    /// Whether `account` is acceptable for a submitted row
    fn allows(&self, account: &str) -> bool;
}

/// Accepts every account name
pub struct AnyAccount;

impl AccountPolicy for AnyAccount {
    fn allows(&self, _account: &str) -> bool {
        true
    }
}

/// Accepts only the listed account names, ignoring case and surrounding whitespace
#[derive(Debug, Clone, Default)]
pub struct AllowedAccounts {
    names: BTreeSet<String>,
}

impl AllowedAccounts {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names.into_iter().map(|n| normalize(n.as_ref())).collect(),
        }
    }
}

impl AccountPolicy for AllowedAccounts {
    fn allows(&self, account: &str) -> bool {
        self.names.contains(&normalize(account))
    }
}

pub(crate) fn normalize(account: &str) -> String {
    account.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_accounts() {
        let policy = AllowedAccounts::new(["Cash", "Accounts Payable"]);
        assert!(policy.allows("cash"));
        assert!(policy.allows(" Accounts Payable "));
        assert!(!policy.allows("Rental Income"));
        assert!(AnyAccount.allows("Rental Income"));
    }
}
