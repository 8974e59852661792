//! Integration tests for journal-grader

use bigdecimal::BigDecimal;
use journal_grader::{
    course::{exercise, BudgetPlan, LeaseIncentive},
    grade_rows, patterns, ChartOfAccounts, EntryGrader, EntryLine, EntryRow, GradeStatus,
    GraderConfig, JournalEntry, JournalEntryBuilder, LedgerEntryValidator, RawAmount,
    WarningKind,
};
use proptest::prelude::*;

#[test]
fn test_scenario_balanced_pipe_replacement() {
    let result = grade_rows(&[
        ("Pipe Replacement Expense", "Debit", "500"),
        ("Accounts Payable", "Credit", "500"),
    ]);

    assert_eq!(result.total_debits, BigDecimal::from(500));
    assert_eq!(result.total_credits, BigDecimal::from(500));
    assert_eq!(result.status, GradeStatus::Balanced);
}

#[test]
fn test_scenario_unbalanced_rental_income() {
    let result = grade_rows(&[("Cash", "Debit", "1000"), ("Rental Income", "Credit", "800")]);

    assert_eq!(result.total_debits, BigDecimal::from(1000));
    assert_eq!(result.total_credits, BigDecimal::from(800));
    assert_eq!(result.status, GradeStatus::Unbalanced);
    assert_eq!(
        result.status.message(),
        Some("Unbalanced Entry: Please ensure total debits equal total credits.")
    );
}

#[test]
fn test_scenario_blank_form() {
    let result = grade_rows(&[("", "", "0"), ("", "", "0")]);

    assert_eq!(result.total_debits, BigDecimal::from(0));
    assert_eq!(result.total_credits, BigDecimal::from(0));
    assert_eq!(result.status, GradeStatus::Empty);
    assert_eq!(result.status.message(), None);
}

#[test]
fn test_scenario_non_numeric_amount() {
    let result = grade_rows(&[("Repair Expense", "Debit", "abc")]);

    assert_eq!(result.total_debits, BigDecimal::from(0));
    assert_eq!(result.total_credits, BigDecimal::from(0));
    assert_eq!(result.status, GradeStatus::Empty);
    assert_eq!(result.warnings.len(), 1);
    assert!(matches!(
        result.warnings[0].kind,
        WarningKind::InvalidAmount { .. }
    ));
}

#[test]
fn test_grading_form_json() {
    let json = r#"[
        {"Account": "Repair Expense", "Entry Type": "Debit", "Amount ($)": 500},
        {"Account": "Accrued Expenses", "Entry Type": "Credit", "Amount ($)": 500.0}
    ]"#;
    let entry: JournalEntry = serde_json::from_str(json).unwrap();
    let result = LedgerEntryValidator::new().grade(&entry);

    assert_eq!(result.status, GradeStatus::Balanced);

    let output = serde_json::to_value(&result).unwrap();
    assert_eq!(output["status"], "Balanced");
    assert!(output["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn test_warnings_serialize_with_kind() {
    let entry = JournalEntry::new(vec![EntryRow::new(
        "Cash",
        "Sideways",
        Some(RawAmount::from("10")),
    )]);
    let result = LedgerEntryValidator::new().grade(&entry);
    let output = serde_json::to_value(&result.warnings).unwrap();

    assert_eq!(output[0]["kind"], "InvalidSide");
    assert_eq!(output[0]["value"], "Sideways");
    assert_eq!(output[0]["line"], 0);
}

#[test]
fn test_config_from_json_changes_grading() {
    let config = GraderConfig::from_json_str(r#"{"accept_side_abbreviations": false}"#).unwrap();
    let validator = LedgerEntryValidator::with_config(config);
    let result = grade_with(&validator, &[("Cash", "Dr", "10"), ("Loans", "Credit", "10")]);

    assert_eq!(result.status, GradeStatus::Unbalanced);
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_accrual_and_reversal_exercises() {
    let accrual = patterns::accrual("Repair Expense", "Accrued Expenses", BigDecimal::from(500));
    let reversal = accrual.reversed();

    let accrual_feedback = exercise::find("repair-accrual").unwrap().check(&accrual);
    let reversal_feedback = exercise::find("repair-reversal").unwrap().check(&reversal);

    assert!(accrual_feedback.is_correct());
    assert!(reversal_feedback.is_correct());
}

#[test]
fn test_pipe_replacement_invoice_then_payment() {
    let invoice = JournalEntryBuilder::new()
        .debit("Pipe Replacement Expense", BigDecimal::from(500))
        .credit("Accounts Payable", BigDecimal::from(500))
        .build();
    let payment = patterns::payment("Accounts Payable", "Cash", BigDecimal::from(500));

    assert!(exercise::find("pipe-invoice")
        .unwrap()
        .check(&invoice)
        .is_correct());
    assert!(exercise::find("pipe-payment")
        .unwrap()
        .check(&payment)
        .is_correct());

    // Paying before the invoice was recorded uses Cash, which the invoice form does not offer
    let feedback = exercise::find("pipe-invoice").unwrap().check(&payment);
    assert!(!feedback.is_correct());
    assert_eq!(feedback.disallowed_accounts.len(), 1);
}

#[test]
fn test_exercise_accounts_exist_in_default_chart() {
    let chart = ChartOfAccounts::real_estate_default();
    for exercise in exercise::catalog() {
        for account in &exercise.account_options {
            assert!(
                chart.category_of(account).is_some(),
                "{} missing from chart",
                account
            );
        }
    }
}

#[test]
fn test_budget_and_lease_tools() {
    let plan = BudgetPlan::sample_property();
    let forecast = plan.forecast(6).unwrap();
    assert_eq!(forecast.rows.len(), 6);
    assert_eq!(forecast.rows[2].net_income, BigDecimal::from(3500));

    let incentive = LeaseIncentive::new(BigDecimal::from(1200), 24).unwrap();
    assert_eq!(incentive.monthly_adjustment(), BigDecimal::from(50));
}

fn grade_with(grader: &dyn EntryGrader, rows: &[(&str, &str, &str)]) -> journal_grader::GradeResult {
    let entry = JournalEntry::new(
        rows.iter()
            .map(|(account, side, amount)| {
                EntryRow::new(*account, *side, Some(RawAmount::from(*amount)))
            })
            .collect(),
    );
    grader.grade(&entry)
}

fn arb_row() -> impl Strategy<Value = EntryRow> {
    let side = prop_oneof![
        Just("Debit".to_string()),
        Just("Credit".to_string()),
        Just(String::new()),
        "[a-z]{1,6}",
    ];
    let amount = prop_oneof![
        (0u32..100_000u32, 0u32..100u32).prop_map(|(whole, cents)| format!("{}.{:02}", whole, cents)),
        Just("abc".to_string()),
        Just(String::new()),
        Just("-5".to_string()),
    ];
    ("[A-Za-z ]{0,12}", side, amount)
        .prop_map(|(account, side, amount)| EntryRow::new(account, side, Some(RawAmount::Text(amount))))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Grading never panics and is idempotent
    #[test]
    fn grading_is_deterministic(rows in prop::collection::vec(arb_row(), 0..12)) {
        let entry = JournalEntry::new(rows);
        let validator = LedgerEntryValidator::new();
        prop_assert_eq!(validator.grade(&entry), validator.grade(&entry));
    }

    /// Reordering lines does not change totals or status
    #[test]
    fn reordering_keeps_totals(rows in prop::collection::vec(arb_row(), 0..12)) {
        let validator = LedgerEntryValidator::new();
        let forward = validator.grade(&JournalEntry::new(rows.clone()));
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let backward = validator.grade(&JournalEntry::new(reversed_rows));

        prop_assert_eq!(&forward.total_debits, &backward.total_debits);
        prop_assert_eq!(&forward.total_credits, &backward.total_credits);
        prop_assert_eq!(forward.status, backward.status);
        prop_assert_eq!(forward.warnings.len(), backward.warnings.len());
    }

    /// All-zero amounts always grade as Empty
    #[test]
    fn zero_amounts_are_empty(sides in prop::collection::vec(prop_oneof![Just("Debit"), Just("Credit")], 0..10)) {
        let entry = JournalEntry::from_lines(
            sides.into_iter().map(|side| {
                if side == "Debit" {
                    EntryLine::debit("Cash", BigDecimal::from(0))
                } else {
                    EntryLine::credit("Cash", BigDecimal::from(0))
                }
            }),
        );
        prop_assert_eq!(LedgerEntryValidator::new().grade(&entry).status, GradeStatus::Empty);
    }

    /// Matching debit and credit legs balance regardless of count or order
    #[test]
    fn matched_legs_balance(amounts in prop::collection::vec(1i64..1_000_000i64, 1..10)) {
        let mut builder = JournalEntryBuilder::new();
        for amount in &amounts {
            builder = builder.debit("Repair Expense", BigDecimal::from(*amount));
        }
        for amount in amounts.iter().rev() {
            builder = builder.credit("Accrued Expenses", BigDecimal::from(*amount));
        }
        let entry = builder.build();
        let validator = LedgerEntryValidator::new();

        let result = validator.grade(&entry);
        prop_assert_eq!(result.status, GradeStatus::Balanced);

        let reversed = validator.grade(&entry.reversed());
        prop_assert_eq!(reversed.status, GradeStatus::Balanced);
        prop_assert_eq!(reversed.total_debits, result.total_credits);
    }
}
