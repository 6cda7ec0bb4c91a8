//! Tree differ
//!
//! Recursive structural and value comparison of two parsed reports, used
//! for regression testing across tool versions. Every key present in
//! either tree must be present and type-consistent in the other; numeric
//! scalars compare with tolerant equality, everything else exactly. All
//! discrepancies are collected in one pass; the differ never short-circuits.

use std::path::Path;

use anyhow::Result;

use crate::core::fcmp::Tolerance;
use crate::core::model::{
    Entry, NodeId, ReportTree, ResultItem, ResultSet, Scalar, COUNT_KEY, DEPTH_KEY,
};
use crate::core::render::{RenderConfig, Renderer};
use crate::parser::builder::parse_file;

/// Compare two trees; returns `(equal, errors)` with one error per
/// discrepancy, each tagged with the full dotted key path.
pub fn diff_trees(a: &ReportTree, b: &ReportTree, tol: &Tolerance) -> (bool, Vec<String>) {
    let mut errors = Vec::new();
    diff_nodes(
        a,
        ReportTree::ROOT,
        b,
        ReportTree::ROOT,
        "",
        true,
        tol,
        &mut errors,
    );
    (errors.is_empty(), errors)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

#[allow(clippy::too_many_arguments)]
fn diff_nodes(
    a: &ReportTree,
    a_id: NodeId,
    b: &ReportTree,
    b_id: NodeId,
    path: &str,
    is_root: bool,
    tol: &Tolerance,
    errors: &mut Vec<String>,
) {
    let a_node = a.node(a_id);
    let b_node = b.node(b_id);

    if a_node.depth != b_node.depth {
        errors.push(format!(
            "{}: {} != {}",
            join(path, DEPTH_KEY),
            a_node.depth,
            b_node.depth
        ));
    }
    if !is_root && a_node.count != b_node.count {
        errors.push(format!(
            "{}: {} != {}",
            join(path, COUNT_KEY),
            a_node.count,
            b_node.count
        ));
    }

    for (key, a_entry) in a_node.entries() {
        let key_path = join(path, key);
        match b_node.get(key) {
            None => errors.push(format!("{}: missing in second report", key_path)),
            Some(b_entry) => match (a_entry, b_entry) {
                (Entry::Scalar(x), Entry::Scalar(y)) => diff_scalars(&key_path, x, y, tol, errors),
                (Entry::Child(ca), Entry::Child(cb)) => {
                    diff_nodes(a, *ca, b, *cb, &key_path, false, tol, errors);
                }
                (Entry::Child(_), Entry::Scalar(_)) => {
                    errors.push(format!("{}: sub-tree vs scalar", key_path));
                }
                (Entry::Scalar(_), Entry::Child(_)) => {
                    errors.push(format!("{}: scalar vs sub-tree", key_path));
                }
            },
        }
    }

    for (key, _) in b_node.entries() {
        if a_node.get(key).is_none() {
            errors.push(format!("{}: missing in first report", join(path, key)));
        }
    }
}

fn diff_scalars(path: &str, a: &Scalar, b: &Scalar, tol: &Tolerance, errors: &mut Vec<String>) {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => {
            if !tol.eq(*x, *y) {
                errors.push(format!("{}: {} != {}", path, x, y));
            }
        }
        (Scalar::Text(x), Scalar::Text(y)) => {
            if x != y {
                errors.push(format!("{}: '{}' != '{}'", path, x, y));
            }
        }
        _ => {
            errors.push(format!("{}: numeric vs text value", path));
        }
    }
}

/// Run the diff command
pub fn run_diff(a_path: &Path, b_path: &Path, tol: &Tolerance, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    let mut fatal = false;

    let a = parse_file(a_path);
    let b = parse_file(b_path);
    for (parsed, path) in [(&a, a_path), (&b, b_path)] {
        for error in &parsed.errors {
            result_set.push(ResultItem::error(error).with_path(path.display().to_string()));
        }
        for warning in &parsed.warnings {
            result_set.push(ResultItem::warning(warning).with_path(path.display().to_string()));
        }
    }

    let equal = match (&a.tree, &b.tree) {
        (Some(a_tree), Some(b_tree)) => {
            let (equal, errors) = diff_trees(a_tree, b_tree, tol);
            for error in errors {
                result_set.push(ResultItem::error(error));
            }
            equal
        }
        _ => {
            fatal = true;
            false
        }
    };

    result_set.push(ResultItem::summary(serde_json::json!({
        "equal": equal,
        "errors": result_set.error_count(),
    })));

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    if fatal || !equal {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tol() -> Tolerance {
        Tolerance::default()
    }

    fn small_tree() -> ReportTree {
        let mut tree = ReportTree::new();
        tree.set_scalar(ReportTree::ROOT, "Area", Scalar::Number(6.0));
        let core = tree.add_child(ReportTree::ROOT, "Core", 1, 2);
        tree.set_scalar(core, "Area", Scalar::Number(3.0));
        tree.set_scalar(core, "Device Type", Scalar::Text("ITRS".into()));
        tree
    }

    #[test]
    fn test_identical_trees_equal() {
        let (equal, errors) = diff_trees(&small_tree(), &small_tree(), &tol());
        assert!(equal);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_numeric_drift_within_tolerance_equal() {
        let a = small_tree();
        let mut b = small_tree();
        let core = b.child_of(ReportTree::ROOT, "Core").unwrap();
        b.set_scalar(core, "Area", Scalar::Number(3.0 + 3.0 * 1e-7));
        let (equal, _) = diff_trees(&a, &b, &tol());
        assert!(equal);
    }

    #[test]
    fn test_three_independent_diffs_found_in_one_pass() {
        let a = small_tree();
        let mut b = small_tree();
        b.set_scalar(ReportTree::ROOT, "Area", Scalar::Number(7.0));
        let core = b.child_of(ReportTree::ROOT, "Core").unwrap();
        b.set_scalar(core, "Area", Scalar::Number(9.0));
        b.set_scalar(core, "Device Type", Scalar::Text("LOP".into()));

        let (equal, errors) = diff_trees(&a, &b, &tol());
        assert!(!equal);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_missing_key_reported_on_both_sides() {
        let mut a = small_tree();
        let mut b = small_tree();
        a.set_scalar(ReportTree::ROOT, "Only A", Scalar::Number(1.0));
        b.set_scalar(ReportTree::ROOT, "Only B", Scalar::Number(1.0));

        let (_, errors) = diff_trees(&a, &b, &tol());
        assert!(errors.iter().any(|e| e == "Only A: missing in second report"));
        assert!(errors.iter().any(|e| e == "Only B: missing in first report"));
    }

    #[test]
    fn test_type_disagreement_is_mismatch() {
        let a = small_tree();
        let mut b = small_tree();
        let core = b.child_of(ReportTree::ROOT, "Core").unwrap();
        b.add_child(core, "Extra", 2, 1);
        let mut c = small_tree();
        c.set_scalar(
            c.child_of(ReportTree::ROOT, "Core").unwrap(),
            "Device Type",
            Scalar::Number(1.0),
        );

        let (_, errors) = diff_trees(&a, &b, &tol());
        assert!(errors
            .iter()
            .any(|e| e.contains("Core.Extra: missing in first report")));

        let (_, errors) = diff_trees(&a, &c, &tol());
        assert!(errors
            .iter()
            .any(|e| e == "Core.Device Type: numeric vs text value"));
    }

    #[test]
    fn test_count_difference_reported_under_reserved_key() {
        let a = small_tree();
        let mut b = ReportTree::new();
        b.set_scalar(ReportTree::ROOT, "Area", Scalar::Number(6.0));
        let core = b.add_child(ReportTree::ROOT, "Core", 1, 4);
        b.set_scalar(core, "Area", Scalar::Number(3.0));
        b.set_scalar(core, "Device Type", Scalar::Text("ITRS".into()));

        let (equal, errors) = diff_trees(&a, &b, &tol());
        assert!(!equal);
        assert_eq!(errors, vec!["Core._COUNT_: 2 != 4".to_string()]);
    }

    #[test]
    fn test_scalar_vs_subtree_tagged_with_path() {
        let mut a = ReportTree::new();
        a.set_scalar(ReportTree::ROOT, "Core", Scalar::Number(1.0));
        let mut b = ReportTree::new();
        b.add_child(ReportTree::ROOT, "Core", 1, 1);

        let (_, errors) = diff_trees(&a, &b, &tol());
        assert_eq!(errors, vec!["Core: scalar vs sub-tree".to_string()]);
    }
}
