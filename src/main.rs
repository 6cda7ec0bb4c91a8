//! mcparse - parse, validate and diff McPAT power reports
//!
//! mcparse provides:
//! - Parsing of loosely formatted power reports into hierarchical trees
//! - Internal consistency validation (duplication, totals, child sums)
//! - Tree-vs-tree comparison for regression testing across tool versions
//! - Dotted-path extraction of individual quantities

use anyhow::Result;
use clap::Parser;

mod check;
mod cli;
mod core;
mod diff;
mod parser;
mod query;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
