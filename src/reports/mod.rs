//! Reports module for expense-control
//!
//! Income, expense and balance totals per person and per category, with
//! grand totals. Each report renders for the terminal or exports as CSV.

pub mod category_totals;
pub mod person_totals;
pub mod totals;

pub use category_totals::{CategoryTotalsReport, CategoryTotalsRow};
pub use person_totals::{PersonTotalsReport, PersonTotalsRow};
pub use totals::{compute_totals, Totals};
