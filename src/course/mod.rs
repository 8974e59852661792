//! Course material: journal entry exercises and the budgeting tools

pub mod budget;
pub mod exercise;

pub use budget::*;
pub use exercise::{DisallowedAccount, Exercise, ExerciseFeedback, ExpectedLine};
