//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md, raw

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    /// Drop warning items from the output
    pub quiet: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        let filtered;
        let result_set = if self.config.quiet {
            filtered = ResultSet {
                items: result_set
                    .items
                    .iter()
                    .filter(|i| i.kind != Kind::Warning)
                    .cloned()
                    .collect(),
            };
            &filtered
        } else {
            result_set
        };
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => self.render_raw(result_set),
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown grouped by item kind
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut out = String::new();

        let errors: Vec<&ResultItem> = result_set
            .items
            .iter()
            .filter(|i| i.kind == Kind::Error)
            .collect();
        let warnings: Vec<&ResultItem> = result_set
            .items
            .iter()
            .filter(|i| i.kind == Kind::Warning)
            .collect();

        if !errors.is_empty() {
            out.push_str("## Errors\n\n");
            for item in &errors {
                out.push_str(&format!("- {}\n", item.message.as_deref().unwrap_or("")));
            }
            out.push('\n');
        }

        if !warnings.is_empty() {
            out.push_str("## Warnings\n\n");
            for item in &warnings {
                out.push_str(&format!("- {}\n", item.message.as_deref().unwrap_or("")));
            }
            out.push('\n');
        }

        for item in &result_set.items {
            match item.kind {
                Kind::Tree => {
                    out.push_str(&format!(
                        "## Tree: {}\n\n```json\n{}\n```\n\n",
                        item.path.as_deref().unwrap_or("<input>"),
                        item.data
                            .as_ref()
                            .and_then(|d| serde_json::to_string_pretty(d).ok())
                            .unwrap_or_default()
                    ));
                }
                Kind::Value => {
                    out.push_str(&format!(
                        "## Value: {}\n\n`{}`\n\n",
                        item.key.as_deref().unwrap_or(""),
                        item.data
                            .as_ref()
                            .map(|d| d.to_string())
                            .unwrap_or_default()
                    ));
                }
                Kind::Summary => {
                    out.push_str(&format!(
                        "## Summary\n\n```json\n{}\n```\n",
                        item.data
                            .as_ref()
                            .and_then(|d| serde_json::to_string_pretty(d).ok())
                            .unwrap_or_default()
                    ));
                }
                _ => {}
            }
        }

        out
    }

    /// Render messages and payloads only (unstable; intended for debugging)
    fn render_raw(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                item.message
                    .clone()
                    .or_else(|| item.data.as_ref().map(|d| d.to_string()))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
