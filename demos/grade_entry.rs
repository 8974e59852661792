//! Walk through the course's journal entries and budgeting tools

use bigdecimal::BigDecimal;
use journal_grader::course::{exercise, BudgetPlan, LeaseIncentive};
use journal_grader::{
    patterns, ChartOfAccounts, GradeResult, JournalEntry, LedgerEntryValidator,
};

fn show(title: &str, result: &GradeResult) {
    println!("{}", title);
    println!("  Total Debits:  ${}", result.total_debits);
    println!("  Total Credits: ${}", result.total_credits);
    if let Some(message) = result.status.message() {
        println!("  {}", message);
    }
    for warning in &result.warnings {
        println!("  ⚠ {}", warning);
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    journal_grader::telemetry::init();
    let validator = LedgerEntryValidator::new();

    // 1. A sale of rental services for cash
    let rent = patterns::cash_revenue("Cash", "Rental Income", BigDecimal::from(2000));
    show("📒 Rental income received", &validator.grade(&rent));

    // 2. An entry with a typo in the amount column
    let rows = r#"[
        {"Account": "Repair Expense", "Entry Type": "Debit", "Amount ($)": "5OO"},
        {"Account": "Accrued Expenses", "Entry Type": "Credit", "Amount ($)": 500}
    ]"#;
    let typo: JournalEntry = serde_json::from_str(rows)?;
    show("📒 Accrual with a typo", &validator.grade(&typo));

    // 3. The accrual exercise and its reversing entry
    let accrual = patterns::accrual("Repair Expense", "Accrued Expenses", BigDecimal::from(500));
    for (id, entry) in [
        ("repair-accrual", accrual.clone()),
        ("repair-reversal", accrual.reversed()),
    ] {
        let exercise = exercise::find(id)?;
        let feedback = exercise.check(&entry);
        println!(
            "🎓 {}: {}",
            exercise.title,
            if feedback.is_correct() { "correct" } else { "incorrect" }
        );
    }
    println!();

    // 4. Chart of accounts
    println!("📊 Chart of Accounts");
    let chart = ChartOfAccounts::real_estate_default();
    for (category, accounts) in chart.by_category() {
        println!("  {}: {}", category, accounts.join(", "));
    }
    println!();

    // 5. Budget and lease incentive
    let plan = BudgetPlan::sample_property();
    println!("💰 Monthly net income: ${}", plan.net_income());
    let forecast = plan.forecast(6)?;
    println!("   Six-month net income: ${}", forecast.total_net_income());

    let incentive = LeaseIncentive::new(BigDecimal::from(1200), 12)?;
    println!(
        "   Monthly incentive adjustment over {} months: ${}",
        incentive.term_months(),
        incentive.monthly_adjustment()
    );

    Ok(())
}
