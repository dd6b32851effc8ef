use serde::Serialize;
use serde_json::Value;

use crate::path::PathExpression;

/// Output of rendering one JSON subtree.
#[derive(Debug, Clone, Serialize)]
pub enum RenderNode {
    Leaf(LeafNode),
    Container(ContainerNode),
}

impl RenderNode {
    pub fn as_container(&self) -> Option<&ContainerNode> {
        match self {
            RenderNode::Container(container) => Some(container),
            RenderNode::Leaf(_) => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RenderNode::Leaf(leaf) => leaf.type_name,
            RenderNode::Container(container) => container.kind.type_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeafNode {
    pub text: String,
    pub type_name: &'static str,
    pub path: PathExpression,
}

impl LeafNode {
    pub fn new(value: &Value, path: PathExpression) -> Self {
        Self {
            text: leaf_text(value),
            type_name: value_type_name(value),
            path,
        }
    }

    /// Empty cell standing in for a missing or null column key.
    pub fn empty(path: PathExpression) -> Self {
        Self {
            text: String::new(),
            type_name: "null",
            path,
        }
    }

    /// Index cell of an array row. Carries the element's own path.
    pub fn index(index: usize, path: PathExpression) -> Self {
        Self {
            text: index.to_string(),
            type_name: "number",
            path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    pub fn type_name(self) -> &'static str {
        match self {
            ContainerKind::Array => "array",
            ContainerKind::Object => "object",
        }
    }

    pub fn count_brackets(self) -> (char, char) {
        match self {
            ContainerKind::Array => ('[', ']'),
            ContainerKind::Object => ('{', '}'),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContainerNode {
    pub kind: ContainerKind,
    pub instance_id: u64,
    /// Key or index this container is nested under; `None` at a spanning cell.
    pub title: Option<String>,
    /// Column keys for array containers; always empty for objects.
    pub columns: Vec<String>,
    pub rows: Vec<RenderRow>,
    pub expanded: bool,
}

impl ContainerNode {
    pub fn is_top_level(&self) -> bool {
        self.instance_id == 0
    }

    /// Expander control label: `[{sign}] {title} {open}{count}{close}`.
    /// The title falls back to the row count when none is available.
    pub fn expander_label(&self) -> String {
        let sign = if self.expanded { '-' } else { '+' };
        let (open, close) = self.kind.count_brackets();
        let count = self.rows.len();
        let title = self.title.clone().unwrap_or_else(|| count.to_string());
        format!("[{sign}] {title} {open}{count}{close}")
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum RenderRow {
    /// Object row: key cell plus value cell.
    Entry { key: String, value: RenderNode },
    /// Array row: index cell plus either one cell per column key or a
    /// single cell spanning all columns.
    Element { index: LeafNode, cells: ElementCells },
}

#[derive(Debug, Clone, Serialize)]
pub enum ElementCells {
    Columns(Vec<RenderNode>),
    Spanning(RenderNode),
}

pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

/// Leaf display text: `null` renders as the literal text, booleans and
/// numbers as their canonical form, strings unquoted.
pub fn leaf_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => String::new(),
    }
}
