//! Top-level duplication check
//!
//! The report states each major component twice: an aggregate under the
//! Processor summary (`Total Cores`) and a structural single instance
//! (`Core`). The two must reconcile once instance multiplicities are
//! cross-applied:
//!
//! ```text
//! aggregate.metric * instance._COUNT_ ~= instance.metric * aggregate._COUNT_
//! ```

use crate::check::{METRICS, PAIRS};
use crate::core::fcmp::Tolerance;
use crate::core::model::ReportTree;

/// Verify the aggregate/instance cross-multiplication invariant
///
/// A missing node or metric records one error and skips only that
/// comparison; every other pair and metric is still checked.
pub fn check_duplication(tree: &ReportTree, tol: &Tolerance) -> Vec<String> {
    let mut errors = Vec::new();

    for (agg_name, inst_name) in PAIRS {
        let agg_id = tree.child_of(ReportTree::ROOT, agg_name);
        let inst_id = tree.child_of(ReportTree::ROOT, inst_name);

        let (agg_id, inst_id) = match (agg_id, inst_id) {
            (Some(a), Some(i)) => (a, i),
            (a, i) => {
                if a.is_none() {
                    errors.push(format!("{}: component missing from report", agg_name));
                }
                if i.is_none() {
                    errors.push(format!("{}: component missing from report", inst_name));
                }
                continue;
            }
        };

        let agg = tree.node(agg_id);
        let inst = tree.node(inst_id);

        for metric in METRICS {
            let (agg_val, inst_val) = match (agg.number(metric), inst.number(metric)) {
                (Some(a), Some(i)) => (a, i),
                (a, i) => {
                    if a.is_none() {
                        errors.push(format!("{}: metric '{}' missing", agg_name, metric));
                    }
                    if i.is_none() {
                        errors.push(format!("{}: metric '{}' missing", inst_name, metric));
                    }
                    continue;
                }
            };

            let lhs = agg_val * inst.count as f64;
            let rhs = inst_val * agg.count as f64;
            if !tol.eq(lhs, rhs) {
                errors.push(format!(
                    "{}/{}: {} disagrees: {} * {} = {} vs {} * {} = {}",
                    agg_name, inst_name, metric, agg_val, inst.count, lhs, inst_val, agg.count,
                    rhs
                ));
            }
        }
    }

    errors
}
