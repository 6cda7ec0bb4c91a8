//! Check API - parse a report and validate its internal consistency

use anyhow::Result;
use std::path::Path;

use crate::check::check_tree;
use crate::core::fcmp::Tolerance;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::parser::builder::parse_file;

/// Run the check command
pub fn run_check(report: &Path, tol: &Tolerance, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    let report_path = report.display().to_string();

    let parsed = parse_file(report);
    for error in &parsed.errors {
        result_set.push(ResultItem::error(error).with_path(report_path.clone()));
    }
    for warning in &parsed.warnings {
        result_set.push(ResultItem::warning(warning).with_path(report_path.clone()));
    }

    let consistent = match &parsed.tree {
        Some(tree) => {
            let outcome = check_tree(tree, tol);
            let consistent = outcome.errors.is_empty();
            for error in outcome.errors {
                result_set.push(ResultItem::error(error).with_path(report_path.clone()));
            }
            for warning in outcome.warnings {
                result_set.push(ResultItem::warning(warning).with_path(report_path.clone()));
            }
            consistent
        }
        None => false,
    };

    let failed = !consistent || !parsed.errors.is_empty();
    result_set.push(ResultItem::summary(serde_json::json!({
        "consistent": consistent && parsed.errors.is_empty(),
        "errors": result_set.error_count(),
    })));

    let renderer = Renderer::with_config(config);
    println!("{}", renderer.render(&result_set));

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
