//! Recursive structural check
//!
//! Within each base component, every node's own metrics (scaled by its
//! instance multiplicity) must equal the sum of its children's
//! contributions. The check runs independently per component and walks the
//! whole sub-tree, collecting one error per failing metric, tagged with the
//! dotted component path.

use crate::check::METRICS;
use crate::core::fcmp::Tolerance;
use crate::core::model::{NodeId, ReportTree};

/// Base components the structural check descends into
const BASE_COMPONENTS: [&str; 4] = ["Core", "L2", "Memory Controller", "NOC"];

/// Child key excluded from summation: the upstream tool reports the Local
/// Predictor's numbers a second time inside the Branch Predictor, so
/// counting it would double its contribution.
const EXCLUDED_CHILD: &str = "Local Predictor";

/// Check parent-vs-children summation across all base components
///
/// A metric absent on a node is skipped, not flagged, even when children
/// exist; childless leaves are never compared. Components absent from the
/// report are skipped entirely.
pub fn check_recursive(tree: &ReportTree, tol: &Tolerance) -> Vec<String> {
    let mut errors = Vec::new();
    for name in BASE_COMPONENTS {
        if let Some(id) = tree.child_of(ReportTree::ROOT, name) {
            check_node(tree, id, name, tol, &mut errors);
        }
    }
    errors
}

fn check_node(tree: &ReportTree, id: NodeId, path: &str, tol: &Tolerance, errors: &mut Vec<String>) {
    let node = tree.node(id);
    let children: Vec<(&str, NodeId)> = node
        .children()
        .filter(|(name, _)| *name != EXCLUDED_CHILD)
        .collect();

    if !children.is_empty() {
        for metric in METRICS {
            let Some(local) = node.number(metric) else {
                continue;
            };
            let scaled = local * node.count as f64;
            let summed: f64 = children
                .iter()
                .map(|(_, child_id)| {
                    let child = tree.node(*child_id);
                    child.number(metric).unwrap_or(0.0) * child.count as f64
                })
                .sum();
            if !tol.eq(scaled, summed) {
                errors.push(format!(
                    "{}: {} disagrees: node reports {}, children sum to {}",
                    path, metric, scaled, summed
                ));
            }
        }
    }

    for (name, child_id) in children {
        let child_path = format!("{}.{}", path, name);
        check_node(tree, child_id, &child_path, tol, errors);
    }
}
