//! Processor-total check
//!
//! The Processor summary reports whole-chip totals which must equal the
//! sum of the four top-level aggregates. `Total Leakage` and `Peak Power`
//! are derived quantities, not independently summed:
//!
//! ```text
//! Total Leakage = Subthreshold Leakage + Gate Leakage
//! Peak Power    = Peak Dynamic + Total Leakage
//! ```

use crate::check::{METRICS, PAIRS};
use crate::core::fcmp::Tolerance;
use crate::core::model::ReportTree;

/// The seven root totals the Processor summary reports
const ROOT_TOTALS: [&str; 7] = [
    "Area",
    "Peak Power",
    "Total Leakage",
    "Peak Dynamic",
    "Subthreshold Leakage",
    "Gate Leakage",
    "Runtime Dynamic",
];

/// Compare the root totals against sums over the four aggregates
///
/// An aggregate missing a metric contributes 0 without error; components
/// are legitimately absent from some configurations. A missing root total
/// is an error: the Processor summary always reports all seven.
pub fn check_totals(tree: &ReportTree, tol: &Tolerance) -> Vec<String> {
    let mut errors = Vec::new();
    let root = tree.node(ReportTree::ROOT);

    let mut summed = std::collections::HashMap::new();
    for metric in METRICS {
        let total: f64 = PAIRS
            .iter()
            .filter_map(|(agg_name, _)| tree.child_of(ReportTree::ROOT, agg_name))
            .filter_map(|id| tree.node(id).number(metric))
            .sum();
        summed.insert(metric, total);
    }

    let leakage = summed["Subthreshold Leakage"] + summed["Gate Leakage"];
    let peak_power = summed["Peak Dynamic"] + leakage;

    for name in ROOT_TOTALS {
        let expected = match name {
            "Total Leakage" => leakage,
            "Peak Power" => peak_power,
            _ => summed[name],
        };
        match root.number(name) {
            Some(actual) => {
                if !tol.eq(expected, actual) {
                    errors.push(format!(
                        "Processor: {} disagrees: expected {} from aggregates, report says {}",
                        name, expected, actual
                    ));
                }
            }
            None => {
                errors.push(format!("Processor: total '{}' missing", name));
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Scalar;

    /// Root with consistent totals over two aggregates (the other two absent)
    fn totals_tree() -> ReportTree {
        let mut tree = ReportTree::new();
        let root = ReportTree::ROOT;

        let cores = tree.add_child(root, "Total Cores", 1, 2);
        for (m, v) in [
            ("Area", 40.0),
            ("Peak Dynamic", 60.0),
            ("Subthreshold Leakage", 12.0),
            ("Gate Leakage", 1.2),
            ("Runtime Dynamic", 30.0),
        ] {
            tree.set_scalar(cores, m, Scalar::Number(v));
        }

        let l2s = tree.add_child(root, "Total L2s", 1, 1);
        for (m, v) in [
            ("Area", 10.0),
            ("Peak Dynamic", 10.0),
            ("Subthreshold Leakage", 4.0),
            ("Gate Leakage", 0.5),
            ("Runtime Dynamic", 5.0),
        ] {
            tree.set_scalar(l2s, m, Scalar::Number(v));
        }

        for (m, v) in [
            ("Area", 50.0),
            ("Peak Power", 87.7),
            ("Total Leakage", 17.7),
            ("Peak Dynamic", 70.0),
            ("Subthreshold Leakage", 16.0),
            ("Gate Leakage", 1.7),
            ("Runtime Dynamic", 35.0),
        ] {
            tree.set_scalar(root, m, Scalar::Number(v));
        }
        tree
    }

    #[test]
    fn test_consistent_totals_pass() {
        let tree = totals_tree();
        let errors = check_totals(&tree, &Tolerance::default());
        assert!(errors.is_empty(), "unexpected: {:?}", errors);
    }

    #[test]
    fn test_absent_aggregates_contribute_zero() {
        // only two of the four aggregates exist; no error for the others
        let tree = totals_tree();
        let errors = check_totals(&tree, &Tolerance::default());
        assert!(!errors.iter().any(|e| e.contains("missing")));
    }

    #[test]
    fn test_broken_area_total_names_both_values() {
        let mut tree = totals_tree();
        tree.set_scalar(ReportTree::ROOT, "Area", Scalar::Number(51.0));
        let errors = check_totals(&tree, &Tolerance::default());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Area"));
        assert!(errors[0].contains("50"));
        assert!(errors[0].contains("51"));
    }

    #[test]
    fn test_derived_totals_checked_against_derivation() {
        // break Peak Power only; the summed metrics stay consistent
        let mut tree = totals_tree();
        tree.set_scalar(ReportTree::ROOT, "Peak Power", Scalar::Number(90.0));
        let errors = check_totals(&tree, &Tolerance::default());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Peak Power"));
    }

    #[test]
    fn test_missing_root_total_is_error() {
        let mut tree = ReportTree::new();
        for (m, v) in [
            ("Area", 0.0),
            ("Peak Power", 0.0),
            ("Total Leakage", 0.0),
            ("Peak Dynamic", 0.0),
            ("Subthreshold Leakage", 0.0),
            ("Gate Leakage", 0.0),
        ] {
            tree.set_scalar(ReportTree::ROOT, m, Scalar::Number(v));
        }
        // Runtime Dynamic deliberately left out
        let errors = check_totals(&tree, &Tolerance::default());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Runtime Dynamic"));
        assert!(errors[0].contains("missing"));
    }
}
