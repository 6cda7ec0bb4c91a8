//! Indentation depth tracking
//!
//! The report format nests by two-space indentation. One known formatting
//! quirk: `Device Type` rows are printed at their heading's indent instead
//! of the metric indent, so they count one level deeper than computed.
//! Other indentation widths are unsupported by design.

/// Nesting depth of a line
pub fn depth_of(line: &str) -> u32 {
    let leading = line.chars().take_while(|c| c.is_whitespace()).count() as u32;
    let depth = leading / 2;
    if line.trim_start().starts_with("Device Type") {
        depth + 1
    } else {
        depth
    }
}
