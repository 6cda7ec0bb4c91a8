//! Parse API - turn one report into a rendered tree with diagnostics

use anyhow::Result;
use std::path::Path;

use crate::core::file_reader::read_report;
use crate::core::model::{Meta, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::core::util::{get_file_size, hash_bytes};
use crate::parser::builder::parse_content;
use crate::query::solved;

/// Run the parse command
pub fn run_parse(report: &Path, config: RenderConfig) -> Result<()> {
    let mut result_set = ResultSet::new();
    let report_path = report.display().to_string();
    let renderer = Renderer::with_config(config);

    let read = read_report(report);
    let Some(content) = read.content else {
        result_set.push(
            ResultItem::error(read.skip_reason.unwrap_or_else(|| "unreadable input".into()))
                .with_path(report_path),
        );
        println!("{}", renderer.render(&result_set));
        std::process::exit(1);
    };

    let mut parsed = parse_content(&content);
    if read.lossy_conversion {
        parsed
            .warnings
            .push(format!("{}: invalid UTF-8 replaced", report.display()));
    }
    for error in &parsed.errors {
        result_set.push(ResultItem::error(error).with_path(report_path.clone()));
    }
    for warning in &parsed.warnings {
        result_set.push(ResultItem::warning(warning).with_path(report_path.clone()));
    }

    if let Some(tree) = &parsed.tree {
        let meta = Meta {
            hash: Some(hash_bytes(content.as_bytes())),
            size: get_file_size(report).ok(),
        };
        result_set.push(ResultItem::tree(report_path.clone(), tree.to_json()).with_meta(meta));
    }

    result_set.push(ResultItem::summary(serde_json::json!({
        "errors": parsed.errors.len(),
        "warnings": parsed.warnings.len(),
        "solved": solved(&parsed.warnings),
    })));

    println!("{}", renderer.render(&result_set));
    Ok(())
}
