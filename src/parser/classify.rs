//! Line classification
//!
//! Every non-blank report line falls into one category: a section header,
//! a divider row, a key/value assignment, a component heading, or free
//! text. The heading grammar differs between the Processor summary section
//! and the per-component sections, so classification takes a style.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::Scalar;

/// Top-level report sections, mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Processor,
    Core,
    L2,
    L3,
    MemoryController,
    Noc,
    FirstLevelDirectory,
    Niu,
    Pcie,
    Buses,
}

impl Section {
    /// Key under which the section's node is attached to the root
    pub fn display_name(&self) -> &'static str {
        match self {
            Section::Processor => "Processor",
            Section::Core => "Core",
            Section::L2 => "L2",
            Section::L3 => "L3",
            Section::MemoryController => "Memory Controller",
            Section::Noc => "NOC",
            Section::FirstLevelDirectory => "First Level Directory",
            Section::Niu => "NIU",
            Section::Pcie => "PCIe",
            Section::Buses => "BUSES",
        }
    }

    /// Base nesting depth when the section is entered
    ///
    /// Everything except the Processor summary is semantically nested under
    /// the processor even though its header reads as column 0.
    pub fn base_depth(&self) -> u32 {
        match self {
            Section::Processor => 0,
            _ => 1,
        }
    }

    /// Recognize a section header line
    ///
    /// Headers sit at column 0 with an optional trailing colon. The L3
    /// header is the documented exception: the upstream tool prints it with
    /// irregular leading indentation, so L3 alone is also recognized
    /// indented.
    pub fn from_header(line: &str) -> Option<Section> {
        let indented = line.starts_with(char::is_whitespace);
        let mut name = line.trim();
        name = name.strip_suffix(':').unwrap_or(name).trim_end();

        if indented {
            return if name == "L3" { Some(Section::L3) } else { None };
        }

        match name {
            "Processor" => Some(Section::Processor),
            "Core" => Some(Section::Core),
            "L2" => Some(Section::L2),
            "L3" => Some(Section::L3),
            "Memory Controller" => Some(Section::MemoryController),
            "NOC" => Some(Section::Noc),
            "First Level Directory" => Some(Section::FirstLevelDirectory),
            "NIU" => Some(Section::Niu),
            "PCIe" => Some(Section::Pcie),
            "BUSES" => Some(Section::Buses),
            _ => None,
        }
    }
}

/// Which heading grammar applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `<name>: <optional integer>[ <unit words>]`, e.g. `Total Cores: 8 cores`
    Processor,
    /// `<name> [(Count: <n>)]:`, e.g. `Data Cache (Count: 2):`
    Component,
}

/// Classification of one non-blank line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// Row of asterisks separating sections
    Divider,
    /// `<key> = <value>` assignment
    KeyValue { key: String, value: Scalar },
    /// Component heading with its instance multiplicity
    Heading { name: String, count: u32 },
    /// Anything else
    Text,
}

static DIVIDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\*{3,}\s*$").expect("Invalid DIVIDER_RE regex"));

static KV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([^=]+?)\s*=\s*(.+?)\s*$").expect("Invalid KV_RE regex"));

/// Signed number with optional exponent and optional W / mm^2 suffix
static NUM_VAL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][-+]?\d+)?)(?:\s*(?:W|mm\^2))?$")
        .expect("Invalid NUM_VAL_RE regex")
});

/// Alphabetic phrase value, e.g. `ITRS high performance`
static TEXT_VAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z ]*$").expect("Invalid TEXT_VAL_RE regex"));

static PROC_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S.*?):\s*(?:(\d+)(?:\s+[A-Za-z ]+?)?)?\s*$")
        .expect("Invalid PROC_HEAD_RE regex")
});

static COMP_HEAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S.*?)\s*(?:\(Count:\s*(\d+)\)\s*)?:\s*$")
        .expect("Invalid COMP_HEAD_RE regex")
});

/// Classify one non-blank line under the given heading style
pub fn classify(line: &str, style: HeadingStyle) -> LineKind {
    if DIVIDER_RE.is_match(line) {
        return LineKind::Divider;
    }

    if let Some(caps) = KV_RE.captures(line) {
        let key = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let raw = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        if let Some(num) = NUM_VAL_RE.captures(raw) {
            if let Ok(n) = num[1].parse::<f64>() {
                return LineKind::KeyValue {
                    key: key.to_string(),
                    value: Scalar::Number(n),
                };
            }
        }
        if TEXT_VAL_RE.is_match(raw) {
            return LineKind::KeyValue {
                key: key.to_string(),
                value: Scalar::Text(raw.to_string()),
            };
        }
        // '=' present but the value matches neither grammar
        return LineKind::Text;
    }

    let head_re: &Regex = match style {
        HeadingStyle::Processor => &PROC_HEAD_RE,
        HeadingStyle::Component => &COMP_HEAD_RE,
    };
    if let Some(caps) = head_re.captures(line) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();
        let count = caps
            .get(2)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(1);
        return LineKind::Heading { name, count };
    }

    LineKind::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_headers_at_column_zero() {
        assert_eq!(Section::from_header("Processor: "), Some(Section::Processor));
        assert_eq!(Section::from_header("Core:"), Some(Section::Core));
        assert_eq!(Section::from_header("L2"), Some(Section::L2));
        assert_eq!(
            Section::from_header("Memory Controller:"),
            Some(Section::MemoryController)
        );
        assert_eq!(Section::from_header("NOC:"), Some(Section::Noc));
        assert_eq!(Section::from_header("BUSES"), Some(Section::Buses));
        assert_eq!(Section::from_header("Total Cores: 8 cores"), None);
    }

    #[test]
    fn test_l3_header_tolerates_indentation() {
        assert_eq!(Section::from_header("     L3"), Some(Section::L3));
        assert_eq!(Section::from_header("   L3:"), Some(Section::L3));
        // other sections are column 0 only
        assert_eq!(Section::from_header("  Core:"), None);
        assert_eq!(Section::from_header("  L2:"), None);
    }

    #[test]
    fn test_section_base_depth() {
        assert_eq!(Section::Processor.base_depth(), 0);
        assert_eq!(Section::Core.base_depth(), 1);
        assert_eq!(Section::Buses.base_depth(), 1);
    }

    #[test]
    fn test_classify_divider() {
        assert_eq!(
            classify(
                "*****************************************************************",
                HeadingStyle::Component
            ),
            LineKind::Divider
        );
    }

    #[test]
    fn test_classify_numeric_key_value() {
        let kind = classify("    Area = 26.5758 mm^2", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::KeyValue {
                key: "Area".into(),
                value: Scalar::Number(26.5758),
            }
        );

        let kind = classify("  Peak Dynamic = 117.979 W", HeadingStyle::Processor);
        assert_eq!(
            kind,
            LineKind::KeyValue {
                key: "Peak Dynamic".into(),
                value: Scalar::Number(117.979),
            }
        );
    }

    #[test]
    fn test_classify_signed_and_exponent_values() {
        let kind = classify("  Gate Leakage = 1.234e-05 W", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::KeyValue {
                key: "Gate Leakage".into(),
                value: Scalar::Number(1.234e-5),
            }
        );

        let kind = classify("  Slack = -0.5 W", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::KeyValue {
                key: "Slack".into(),
                value: Scalar::Number(-0.5),
            }
        );
    }

    #[test]
    fn test_classify_text_key_value() {
        let kind = classify("  Device Type= ITRS high performance", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::KeyValue {
                key: "Device Type".into(),
                value: Scalar::Text("ITRS high performance".into()),
            }
        );
    }

    #[test]
    fn test_classify_malformed_value_is_text() {
        // '=' present but the value fits neither grammar
        assert_eq!(
            classify("  Projection = 32nm@2013", HeadingStyle::Component),
            LineKind::Text
        );
    }

    #[test]
    fn test_classify_processor_heading_with_count() {
        let kind = classify("  Total Cores: 2 cores ", HeadingStyle::Processor);
        assert_eq!(
            kind,
            LineKind::Heading {
                name: "Total Cores".into(),
                count: 2,
            }
        );
    }

    #[test]
    fn test_classify_processor_heading_without_count() {
        let kind = classify("  Total L2s: ", HeadingStyle::Processor);
        assert_eq!(
            kind,
            LineKind::Heading {
                name: "Total L2s".into(),
                count: 1,
            }
        );
    }

    #[test]
    fn test_classify_processor_heading_parenthesized_name() {
        let kind = classify("  Total NoCs (Network/Bus): ", HeadingStyle::Processor);
        assert_eq!(
            kind,
            LineKind::Heading {
                name: "Total NoCs (Network/Bus)".into(),
                count: 1,
            }
        );
    }

    #[test]
    fn test_classify_component_heading() {
        let kind = classify("      Instruction Fetch Unit:", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::Heading {
                name: "Instruction Fetch Unit".into(),
                count: 1,
            }
        );
    }

    #[test]
    fn test_classify_component_heading_with_count() {
        let kind = classify("      Data Cache (Count: 2):", HeadingStyle::Component);
        assert_eq!(
            kind,
            LineKind::Heading {
                name: "Data Cache".into(),
                count: 2,
            }
        );
    }

    #[test]
    fn test_classify_free_text() {
        assert_eq!(
            classify("  Core clock Rate(MHz) 3400", HeadingStyle::Processor),
            LineKind::Text
        );
        assert_eq!(
            classify("McPAT (version 1.3) results", HeadingStyle::Component),
            LineKind::Text
        );
    }
}
