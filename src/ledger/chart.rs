//! Chart of accounts built from the category/name editor

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::traits::{normalize, AccountPolicy};
use crate::types::*;
use crate::utils::validate_account_name;

/// A named account and its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartAccount {
    pub name: String,
    pub category: AccountCategory,
}

/// Organized listing of accounts across the five categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    accounts: Vec<ChartAccount>,
}

impl ChartOfAccounts {
    /// Create an empty chart
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a chart from `(category, account name)` rows.
    ///
    /// Fully blank rows are skipped. A blank name, an unknown category or a
    /// duplicate name fails the whole chart.
    pub fn from_rows<C, N>(rows: &[(C, N)]) -> GraderResult<Self>
    where
        C: AsRef<str>,
        N: AsRef<str>,
    {
        let mut chart = Self::new();
        for (index, (category, name)) in rows.iter().enumerate() {
            let (category, name) = (category.as_ref(), name.as_ref());
            if category.trim().is_empty() && name.trim().is_empty() {
                continue;
            }

            let category = AccountCategory::from_str(category).map_err(|e| at_row(index, e))?;
            chart
                .add_account(name, category)
                .map_err(|e| at_row(index, e))?;
        }

        tracing::debug!(accounts = chart.len(), "built chart of accounts");
        Ok(chart)
    }

    /// Add an account to the chart
    pub fn add_account(&mut self, name: &str, category: AccountCategory) -> GraderResult<()> {
        validate_account_name(name)?;

        if self.category_of(name).is_some() {
            return Err(GraderError::Validation(format!(
                "Account '{}' already exists",
                name.trim()
            )));
        }

        self.accounts.push(ChartAccount {
            name: name.trim().to_string(),
            category,
        });
        Ok(())
    }

    /// Look up the category of an account, ignoring case
    pub fn category_of(&self, name: &str) -> Option<AccountCategory> {
        let wanted = normalize(name);
        self.accounts
            .iter()
            .find(|account| normalize(&account.name) == wanted)
            .map(|account| account.category)
    }

    /// Account names grouped by category, in chart order.
    /// Every category is present, possibly with no accounts.
    pub fn by_category(&self) -> BTreeMap<AccountCategory, Vec<&str>> {
        let mut grouped: BTreeMap<AccountCategory, Vec<&str>> = AccountCategory::ALL
            .iter()
            .map(|category| (*category, Vec::new()))
            .collect();
        for account in &self.accounts {
            grouped
                .entry(account.category)
                .or_default()
                .push(account.name.as_str());
        }
        grouped
    }

    pub fn accounts(&self) -> &[ChartAccount] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sample chart for a real estate and leasing business
    pub fn real_estate_default() -> Self {
        use AccountCategory::*;

        let accounts = [
            ("Cash", Asset),
            ("Accounts Receivable", Asset),
            ("Property Assets", Asset),
            ("Loans", Liability),
            ("Accrued Expenses", Liability),
            ("Accounts Payable", Liability),
            ("Owner's Equity", Equity),
            ("Retained Earnings", Equity),
            ("Rental Income", Revenue),
            ("Service Revenue", Revenue),
            ("Maintenance Expense", Expense),
            ("Utilities Expense", Expense),
            ("Marketing Expense", Expense),
            ("Repair Expense", Expense),
            ("Pipe Replacement Expense", Expense),
        ];

        Self {
            accounts: accounts
                .into_iter()
                .map(|(name, category)| ChartAccount {
                    name: name.to_string(),
                    category,
                })
                .collect(),
        }
    }
}

fn at_row(index: usize, err: GraderError) -> GraderError {
    match err {
        GraderError::Validation(message) => {
            GraderError::Validation(format!("Row {}: {}", index + 1, message))
        }
        other => other,
    }
}

impl AccountPolicy for ChartOfAccounts {
    fn allows(&self, account: &str) -> bool {
        self.category_of(account).is_some()
    }
}
