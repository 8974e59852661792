//! Budget builder, flat forecast and lease incentive simulator

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;
use crate::utils::validate_non_negative_amount;

/// Lease terms offered by the incentive simulator
pub const LEASE_TERMS: [u32; 3] = [12, 24, 36];

/// A named monthly expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub name: String,
    pub amount: BigDecimal,
}

/// Monthly budget for a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub rental_income: BigDecimal,
    pub expenses: Vec<BudgetItem>,
}

/// One month of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub label: String,
    pub rental_income: BigDecimal,
    pub total_expenses: BigDecimal,
    pub net_income: BigDecimal,
}

/// Month-by-month forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub rows: Vec<ForecastRow>,
}

impl Forecast {
    /// Net income summed over every month
    pub fn total_net_income(&self) -> BigDecimal {
        self.rows.iter().map(|row| &row.net_income).sum()
    }
}

impl BudgetPlan {
    /// Create a plan with no expenses
    pub fn new(rental_income: BigDecimal) -> Self {
        Self {
            rental_income,
            expenses: Vec::new(),
        }
    }

    /// Add an expense line
    pub fn expense(mut self, name: impl Into<String>, amount: BigDecimal) -> Self {
        self.expenses.push(BudgetItem {
            name: name.into(),
            amount,
        });
        self
    }

    /// The course's sample property: $5,000 rent; maintenance, utilities and marketing
    pub fn sample_property() -> Self {
        Self::new(BigDecimal::from(5000))
            .expense("Maintenance", BigDecimal::from(800))
            .expense("Utilities", BigDecimal::from(300))
            .expense("Marketing", BigDecimal::from(400))
    }

    pub fn total_expenses(&self) -> BigDecimal {
        self.expenses.iter().map(|item| &item.amount).sum()
    }

    /// Rental income less total expenses; negative when expenses exceed income
    pub fn net_income(&self) -> BigDecimal {
        &self.rental_income - &self.total_expenses()
    }

    /// Project the same month forward `months` times
    pub fn forecast(&self, months: u32) -> GraderResult<Forecast> {
        if months == 0 {
            return Err(GraderError::Validation(
                "Forecast must cover at least one month".to_string(),
            ));
        }

        let total_expenses = self.total_expenses();
        let net_income = &self.rental_income - &total_expenses;
        let rows = (1..=months)
            .map(|month| ForecastRow {
                label: format!("Month {}", month),
                rental_income: self.rental_income.clone(),
                total_expenses: total_expenses.clone(),
                net_income: net_income.clone(),
            })
            .collect();

        Ok(Forecast { rows })
    }
}

/// Discount spread evenly over a lease term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaseIncentive {
    total_discount: BigDecimal,
    term_months: u32,
}

impl LeaseIncentive {
    pub fn new(total_discount: BigDecimal, term_months: u32) -> GraderResult<Self> {
        if !LEASE_TERMS.contains(&term_months) {
            return Err(GraderError::Validation(format!(
                "Lease term must be one of {:?} months, got {}",
                LEASE_TERMS, term_months
            )));
        }
        validate_non_negative_amount(&total_discount).map_err(|issue| {
            GraderError::Validation(format!("Incentive discount: {}", issue))
        })?;

        Ok(Self {
            total_discount,
            term_months,
        })
    }

    pub fn total_discount(&self) -> &BigDecimal {
        &self.total_discount
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Discount recognized each month, rounded to cents
    pub fn monthly_adjustment(&self) -> BigDecimal {
        (&self.total_discount / BigDecimal::from(self.term_months)).round(2)
    }
}
