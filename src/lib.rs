//! # Journal Grader
//!
//! Grading for double-entry journal entries submitted in an accounting course,
//! plus the course's supporting exercises and budgeting tools.
//!
//! ## Features
//!
//! - **Entry grading**: total debits and credits, classified as Balanced, Unbalanced or Empty
//! - **Per-line warnings**: rows with an invalid amount or side are reported, never fatal
//! - **Exercises**: the course's journal entry exercises with answer checking
//! - **Chart of accounts**: Assets, Liabilities, Equity, Revenue and Expenses
//! - **Budget builder**: net income, flat forecasts and lease incentive spreading
//!
//! ## Quick Start
//!
//! ```rust
//! use journal_grader::{grade_rows, GradeStatus};
//!
//! let result = grade_rows(&[
//!     ("Pipe Replacement Expense", "Debit", "500"),
//!     ("Accounts Payable", "Credit", "500"),
//! ]);
//! assert_eq!(result.status, GradeStatus::Balanced);
//! assert_eq!(
//!     result.status.message(),
//!     Some("Balanced Entry: Debits equal Credits!")
//! );
//! ```

pub mod config;
pub mod course;
pub mod ledger;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::GraderConfig;
pub use ledger::*;
pub use traits::*;
pub use types::*;

// Re-export entry patterns for convenience
pub use ledger::entry::patterns;
