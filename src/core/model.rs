//! Core data model
//!
//! Two families of types live here:
//! - the parsed report tree: arena storage (`ReportTree`, `NodeId`, `Node`)
//!   with explicit tagged entries (`Entry::Scalar` / `Entry::Child`)
//! - the unified result model (`ResultItem` / `ResultSet`) that every
//!   command maps to before rendering output

use serde::{Deserialize, Serialize};

/// Reserved key for a node's nesting depth in the JSON projection
pub const DEPTH_KEY: &str = "_DEPTH_";

/// Reserved key for a node's instance multiplicity in the JSON projection
pub const COUNT_KEY: &str = "_COUNT_";

/// Index of a node inside a [`ReportTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// A leaf value inside the report tree
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Numeric metric, unit suffix already stripped (W, mm^2)
    Number(f64),
    /// Free-form textual value (e.g. a device type)
    Text(String),
}

impl Scalar {
    /// Numeric view of the scalar, `None` for text values
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }

    /// JSON projection of the scalar
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Number(n) => serde_json::json!(n),
            Scalar::Text(s) => serde_json::json!(s),
        }
    }
}

/// A named entry of a node: either a scalar metric or a child component
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Scalar(Scalar),
    Child(NodeId),
}

/// One component (or the report root) in the tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Nesting depth at which this node's heading was found
    pub depth: u32,
    /// Instance multiplicity from the heading, >= 1 (unused at the root)
    pub count: u32,
    /// Entries in report order; names are unique within a node
    entries: Vec<(String, Entry)>,
}

impl Node {
    fn new(depth: u32, count: u32) -> Self {
        Self {
            depth,
            count,
            entries: Vec::new(),
        }
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, e)| e)
    }

    /// Scalar entry by name, `None` for children or absent keys
    pub fn scalar(&self, name: &str) -> Option<&Scalar> {
        match self.get(name)? {
            Entry::Scalar(s) => Some(s),
            Entry::Child(_) => None,
        }
    }

    /// Numeric scalar by name
    pub fn number(&self, name: &str) -> Option<f64> {
        self.scalar(name)?.as_number()
    }

    /// Child node id by name
    pub fn child(&self, name: &str) -> Option<NodeId> {
        match self.get(name)? {
            Entry::Child(id) => Some(*id),
            Entry::Scalar(_) => None,
        }
    }

    /// Entries in report order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Child entries in report order
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.entries.iter().filter_map(|(k, e)| match e {
            Entry::Child(id) => Some((k.as_str(), *id)),
            Entry::Scalar(_) => None,
        })
    }

    /// Whether this node has at least one child component
    pub fn has_children(&self) -> bool {
        self.children().next().is_some()
    }

    fn set(&mut self, name: &str, entry: Entry) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == name) {
            slot.1 = entry;
        } else {
            self.entries.push((name.to_string(), entry));
        }
    }
}

/// Arena-backed report tree
///
/// Nodes are stored flat and referenced by [`NodeId`]; the root is always
/// index 0 with depth 0. Consumers receive the finished tree immutably.
#[derive(Debug, Clone)]
pub struct ReportTree {
    nodes: Vec<Node>,
}

impl ReportTree {
    /// Id of the root node
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(0, 1)],
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Attach a fresh empty node under `parent` keyed by `name`
    pub fn add_child(&mut self, parent: NodeId, name: &str, depth: u32, count: u32) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(depth, count));
        self.nodes[parent.0].set(name, Entry::Child(id));
        id
    }

    /// Assign a scalar entry on `id`
    pub fn set_scalar(&mut self, id: NodeId, name: &str, value: Scalar) {
        self.nodes[id.0].set(name, Entry::Scalar(value));
    }

    /// Resolve a direct child of `id` by name
    pub fn child_of(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.node(id).child(name)
    }

    /// JSON projection of the whole tree
    ///
    /// Every non-root node carries its reserved `_DEPTH_` and `_COUNT_`
    /// keys; the root carries `_DEPTH_` only.
    pub fn to_json(&self) -> serde_json::Value {
        self.node_json(Self::ROOT, true)
    }

    fn node_json(&self, id: NodeId, is_root: bool) -> serde_json::Value {
        let node = self.node(id);
        let mut map = serde_json::Map::new();
        map.insert(DEPTH_KEY.to_string(), serde_json::json!(node.depth));
        if !is_root {
            map.insert(COUNT_KEY.to_string(), serde_json::json!(node.count));
        }
        for (name, entry) in node.entries() {
            let value = match entry {
                Entry::Scalar(s) => s.to_json(),
                Entry::Child(child) => self.node_json(*child, false),
            };
            map.insert(name.to_string(), value);
        }
        serde_json::Value::Object(map)
    }
}

impl Default for ReportTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of parsing one report
///
/// A present tree may coexist with warnings and even non-fatal errors;
/// callers must inspect both sequences. The tree is absent only for fatal
/// I/O failures (exactly one error, zero warnings).
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub tree: Option<ReportTree>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParsedReport {
    /// Fatal outcome: unreadable input, no tree
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            tree: None,
            errors: vec![reason.into()],
            warnings: Vec::new(),
        }
    }
}

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Tree,
    Value,
    Error,
    Warning,
    Summary,
}

/// Metadata for a result item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Content hash of the input report (XXH3)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Input size in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// The unified result item that all commands must produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Report file this result refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Dotted key path inside the tree (for values and tagged findings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Human-readable message (errors, warnings)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Structured payload (the tree itself, an extracted value, summary)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Metadata
    #[serde(default)]
    pub meta: Meta,
}

impl ResultItem {
    /// Create a tree result carrying the full JSON projection
    pub fn tree(path: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: Kind::Tree,
            path: Some(path.into()),
            key: None,
            message: None,
            data: Some(data),
            meta: Meta::default(),
        }
    }

    /// Create a value result for one extracted scalar
    pub fn value(path: impl Into<String>, key: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            kind: Kind::Value,
            path: Some(path.into()),
            key: Some(key.into()),
            message: None,
            data: Some(data),
            meta: Meta::default(),
        }
    }

    /// Create an error result
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: Kind::Error,
            path: None,
            key: None,
            message: Some(message.into()),
            data: None,
            meta: Meta::default(),
        }
    }

    /// Create a warning result
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: Kind::Warning,
            path: None,
            key: None,
            message: Some(message.into()),
            data: None,
            meta: Meta::default(),
        }
    }

    /// Create a summary result with a structured payload
    pub fn summary(data: serde_json::Value) -> Self {
        Self {
            kind: Kind::Summary,
            path: None,
            key: None,
            message: None,
            data: Some(data),
            meta: Meta::default(),
        }
    }

    /// Set the report path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set metadata
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    #[allow(dead_code)]
    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Count of error items
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|i| i.kind == Kind::Error).count()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
