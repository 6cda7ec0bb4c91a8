//! Consistency checker
//!
//! Three independent passes over a finished tree, each a pure function of
//! the tree plus the shared tolerance. All passes run regardless of
//! individual failures; findings are accumulated, never thrown.

pub mod api;
pub mod duplication;
pub mod recursive;
pub mod totals;

use crate::core::fcmp::Tolerance;
use crate::core::model::ReportTree;

/// The five metrics every summation invariant is stated over
pub const METRICS: [&str; 5] = [
    "Area",
    "Peak Dynamic",
    "Subthreshold Leakage",
    "Gate Leakage",
    "Runtime Dynamic",
];

/// Aggregate/instance name pairs for the top-level duplication pattern
pub const PAIRS: [(&str, &str); 4] = [
    ("Total Cores", "Core"),
    ("Total L2s", "L2"),
    ("Total NoCs (Network/Bus)", "NOC"),
    ("Total MCs", "Memory Controller"),
];

/// Accumulated findings of a consistency run; empty errors = success
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Run all three consistency passes over a finished tree
pub fn check_tree(tree: &ReportTree, tol: &Tolerance) -> CheckOutcome {
    let mut outcome = CheckOutcome::default();
    outcome
        .errors
        .extend(duplication::check_duplication(tree, tol));
    outcome.errors.extend(totals::check_totals(tree, tol));
    outcome.errors.extend(recursive::check_recursive(tree, tol));
    outcome
}
