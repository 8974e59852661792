//! Ledger module containing entry grading, construction and the chart of accounts

pub mod chart;
pub mod entry;
pub mod validator;

pub use chart::*;
pub use entry::*;
pub use validator::*;
