//! Dotted-path extraction
//!
//! Downstream tooling pulls single quantities out of parsed reports by
//! dotted path, e.g. `Total Cores.Subthreshold Leakage`: every intermediate
//! segment must resolve to a sub-tree and the final segment to a scalar.
//!
//! The reserved pseudo-path `_SOLVED_` is not a tree lookup: it derives a
//! boolean from the parse warnings, false when any warning mentions a
//! violated design constraint.

use std::path::Path;

use anyhow::Result;
use thiserror::Error;

use crate::core::model::{Entry, ReportTree, ResultItem, ResultSet, Scalar};
use crate::core::render::{RenderConfig, Renderer};
use crate::parser::builder::parse_file;

/// Pseudo-path resolved against warnings instead of the tree
pub const SOLVED_PATH: &str = "_SOLVED_";

/// Failure to resolve a dotted path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("segment '{0}' not found")]
    Missing(String),

    #[error("segment '{0}' is not a sub-tree")]
    NotATree(String),

    #[error("'{0}' does not name a scalar value")]
    NotAScalar(String),
}

/// Resolve a dotted path to a scalar inside the tree
pub fn resolve<'a>(tree: &'a ReportTree, path: &str) -> Result<&'a Scalar, PathError> {
    let mut segments = path.split('.').peekable();
    let mut node = ReportTree::ROOT;

    while let Some(segment) = segments.next() {
        let entry = tree
            .node(node)
            .get(segment)
            .ok_or_else(|| PathError::Missing(segment.to_string()))?;
        let is_last = segments.peek().is_none();
        match entry {
            Entry::Scalar(scalar) if is_last => return Ok(scalar),
            Entry::Scalar(_) => return Err(PathError::NotATree(segment.to_string())),
            Entry::Child(_) if is_last => return Err(PathError::NotAScalar(segment.to_string())),
            Entry::Child(child) => node = *child,
        }
    }

    Err(PathError::NotAScalar(path.to_string()))
}

/// Whether the tool satisfied all its internal design constraints
///
/// True unless some warning contains "constraint" (case-insensitive).
pub fn solved(warnings: &[String]) -> bool {
    !warnings
        .iter()
        .any(|w| w.to_lowercase().contains("constraint"))
}

/// Run the get command
pub fn run_get(report: &Path, path: &str, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    let parsed = parse_file(report);
    let report_path = report.display().to_string();

    for error in &parsed.errors {
        result_set.push(ResultItem::error(error).with_path(report_path.clone()));
    }

    let mut failed = parsed.tree.is_none();
    if let Some(tree) = &parsed.tree {
        if path == SOLVED_PATH {
            result_set.push(ResultItem::value(
                report_path.clone(),
                SOLVED_PATH,
                serde_json::json!(solved(&parsed.warnings)),
            ));
        } else {
            match resolve(tree, path) {
                Ok(scalar) => {
                    result_set.push(ResultItem::value(report_path.clone(), path, scalar.to_json()));
                }
                Err(e) => {
                    failed = true;
                    result_set
                        .push(ResultItem::error(format!("{}: {}", path, e)).with_path(report_path));
                }
            }
        }
    }

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
