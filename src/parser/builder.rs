//! Tree builder
//!
//! Drives the section state machine and a depth-indexed node stack over a
//! report in a single forward pass. Structural problems are recorded as
//! error/warning strings and parsing continues; nothing here ever fails
//! fatally except unreadable input (handled in `parse_file`).

use std::path::Path;

use crate::core::file_reader::read_report;
use crate::core::model::{NodeId, ParsedReport, ReportTree, Scalar};
use crate::parser::classify::{classify, HeadingStyle, LineKind, Section};
use crate::parser::depth::depth_of;

struct Builder {
    tree: ReportTree,
    stack: Vec<NodeId>,
    level: u32,
    section: Option<Section>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Builder {
    fn new() -> Self {
        Self {
            tree: ReportTree::new(),
            stack: vec![ReportTree::ROOT],
            level: 0,
            section: None,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    fn top(&self) -> NodeId {
        *self.stack.last().expect("stack never empties below root")
    }

    /// Reset the state machine on a section header
    ///
    /// The single `section` variable replaces any previously active section,
    /// so a stale sibling section can never stay on.
    fn enter_section(&mut self, section: Section) {
        self.section = Some(section);
        self.level = section.base_depth();
        self.stack.clear();
        self.stack.push(ReportTree::ROOT);
        if section != Section::Processor {
            let node =
                self.tree
                    .add_child(ReportTree::ROOT, section.display_name(), 1, 1);
            self.stack.push(node);
        }
    }

    fn on_heading(&mut self, name: &str, count: u32, depth: u32) {
        if depth <= self.level {
            while self.stack.len() > 1 && self.tree.node(self.top()).depth >= depth {
                self.stack.pop();
            }
        }
        let node = self.tree.add_child(self.top(), name, depth, count);
        self.stack.push(node);
        self.level = depth;
    }

    fn on_key_value(&mut self, line_no: usize, key: &str, value: Scalar, depth: u32) {
        if depth < self.level {
            self.errors.push(format!(
                "line {}: key-value pair '{}' under no heading",
                line_no, key
            ));
        } else {
            let key = if key == "Area Overhead" {
                // known quirk of one tool version
                self.warnings.push(format!(
                    "line {}: key 'Area Overhead' renamed to 'Area'",
                    line_no
                ));
                "Area"
            } else {
                key
            };
            self.tree.set_scalar(self.top(), key, value);
        }
        self.level = depth;
    }

    /// Text while no section is active never builds tree structure; it is
    /// scanned for tool-emitted error and constraint messages only.
    fn scan_inactive(&mut self, line_no: usize, line: &str) {
        let lower = line.to_lowercase();
        if lower.contains("error") {
            self.errors
                .push(format!("line {}: {}", line_no, line.trim()));
        }
        if lower.contains("constraint") {
            self.warnings
                .push(format!("line {}: {}", line_no, line.trim()));
        }
    }

    fn feed(&mut self, line_no: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        if let Some(section) = Section::from_header(line) {
            self.enter_section(section);
            return;
        }

        let Some(section) = self.section else {
            self.scan_inactive(line_no, line);
            return;
        };

        let style = if section == Section::Processor {
            HeadingStyle::Processor
        } else {
            HeadingStyle::Component
        };
        let depth = depth_of(line);

        match classify(line, style) {
            LineKind::Divider => {}
            LineKind::Heading { name, count } => self.on_heading(&name, count, depth),
            LineKind::KeyValue { key, value } => self.on_key_value(line_no, &key, value, depth),
            LineKind::Text => {
                self.warnings.push(format!(
                    "line {}: unmatched line: '{}'",
                    line_no,
                    line.trim()
                ));
            }
        }
    }

    fn finish(self) -> ParsedReport {
        ParsedReport {
            tree: Some(self.tree),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}

/// Parse report content into a tree plus accumulated errors and warnings
pub fn parse_content(content: &str) -> ParsedReport {
    let mut builder = Builder::new();
    for (idx, line) in content.lines().enumerate() {
        builder.feed(idx + 1, line);
    }
    builder.finish()
}

/// Parse a report file; unreadable input yields no tree and one error
pub fn parse_file(path: &Path) -> ParsedReport {
    let read = read_report(path);
    match read.content {
        Some(content) => {
            let mut parsed = parse_content(&content);
            if read.lossy_conversion {
                parsed
                    .warnings
                    .push(format!("{}: invalid UTF-8 replaced", path.display()));
            }
            parsed
        }
        None => ParsedReport::unreadable(
            read.skip_reason
                .unwrap_or_else(|| format!("cannot read {}", path.display())),
        ),
    }
}
