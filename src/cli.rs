//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::fcmp::{Tolerance, DEFAULT_TOLERANCE};
use crate::core::render::{OutputFormat, RenderConfig};

/// mcparse - parse, validate and diff McPAT power reports.
#[derive(Parser, Debug)]
#[command(name = "mcparse")]
#[command(
    author,
    version,
    about,
    long_about = r#"mcparse emits a unified, machine-readable result model for every command.

Each command prints a ResultSet in the selected format (default: jsonl).

Output formats:
- jsonl: one JSON object per line (best for piping into tools)
- json: a single JSON array
- md: human-friendly Markdown
- raw: messages only (unstable; intended for debugging)

Examples:
    mcparse parse run0/power.txt
    mcparse check run0/power.txt
    mcparse diff run0/power.txt run1/power.txt
    mcparse get run0/power.txt "Total Cores.Subthreshold Leakage"
    mcparse get run0/power.txt _SOLVED_
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(
        long,
        global = true,
        default_value = "jsonl",
        value_name = "FORMAT",
        long_help = "Select the output format for ResultSet.\n\n\
Supported values:\n\
- jsonl (default)\n\
- json\n\
- md (markdown)\n\
- raw\n\n\
Tip: Prefer jsonl when you want stable, line-oriented output for piping."
    )]
    pub format: String,

    /// Quiet mode (minimal output).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Drop warning items from the output. Errors, trees, values and summaries\n\
are still printed; summary counts are unaffected."
    )]
    pub quiet: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
This is useful when manually inspecting results. Has no effect on md/raw formats."
    )]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a report into its hierarchical tree.
    #[command(
        long_about = "Parse one power report and emit its full tree as a single result item,\n\
plus one item per structural error or warning and a closing summary.\n\n\
Unrecognized lines are warned about, never fatal; the exit status is nonzero\n\
only when the input cannot be read at all.\n\n\
Examples:\n\
  mcparse parse run0/power.txt\n\
  mcparse parse run0/power.txt --format md --pretty\n"
    )]
    Parse {
        /// Report file to parse.
        #[arg(value_name = "REPORT")]
        report: PathBuf,
    },

    /// Validate a report's internal consistency.
    #[command(
        long_about = "Parse a report and run all consistency passes over the finished tree:\n\
the aggregate/instance duplication cross-check, the processor-total check,\n\
and the recursive child-summation check.\n\n\
All passes run regardless of individual failures; every finding becomes one\n\
result item. Exit status is nonzero when any error was recorded.\n\n\
Examples:\n\
  mcparse check run0/power.txt\n\
  mcparse check run0/power.txt --tolerance 1e-4\n"
    )]
    Check {
        /// Report file to validate.
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Relative tolerance for numeric comparisons.
        #[arg(
            long,
            default_value_t = DEFAULT_TOLERANCE,
            value_name = "TOL",
            long_help = "Relative tolerance for all numeric comparisons.\n\n\
The default reflects the rounding applied by the report-producing tool;\n\
loosen it when comparing across tool builds with different print precision."
        )]
        tolerance: f64,
    },

    /// Compare two parsed reports structurally and by value.
    #[command(
        long_about = "Parse two reports and compare the resulting trees: every key present in\n\
either must be present and type-consistent in the other; numeric values\n\
compare with tolerant equality. All discrepancies are reported in one pass.\n\n\
Exit status is nonzero when the trees differ, making this suitable for\n\
regression gating across tool versions.\n\n\
Examples:\n\
  mcparse diff run0/power.txt run1/power.txt\n\
  mcparse diff a.txt b.txt --tolerance 1e-3\n"
    )]
    Diff {
        /// First report file.
        #[arg(value_name = "REPORT_A")]
        report_a: PathBuf,

        /// Second report file.
        #[arg(value_name = "REPORT_B")]
        report_b: PathBuf,

        /// Relative tolerance for numeric comparisons.
        #[arg(long, default_value_t = DEFAULT_TOLERANCE, value_name = "TOL")]
        tolerance: f64,
    },

    /// Extract one value from a report by dotted path.
    #[command(
        long_about = "Parse a report and resolve a dotted path into the tree, e.g.\n\
\"Total Cores.Subthreshold Leakage\": every intermediate segment must be a\n\
sub-tree and the final segment a scalar.\n\n\
The reserved pseudo-path _SOLVED_ is not a lookup: it reports whether the\n\
producing tool satisfied all of its internal design constraints.\n\n\
Examples:\n\
  mcparse get run0/power.txt \"Total Cores.Area\"\n\
  mcparse get run0/power.txt _SOLVED_\n"
    )]
    Get {
        /// Report file to query.
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Dotted path to resolve (or _SOLVED_).
        #[arg(value_name = "PATH")]
        path: String,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty).quiet(cli.quiet);

    match cli.command {
        Commands::Parse { report } => crate::parser::api::run_parse(&report, render_config),

        Commands::Check { report, tolerance } => {
            crate::check::api::run_check(&report, &Tolerance::new(tolerance), render_config)
        }

        Commands::Diff {
            report_a,
            report_b,
            tolerance,
        } => crate::diff::run_diff(
            &report_a,
            &report_b,
            &Tolerance::new(tolerance),
            render_config,
        ),

        Commands::Get { report, path } => crate::query::run_get(&report, &path, render_config),
    }
}
