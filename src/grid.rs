use serde_json::Value;

use crate::classify::{classify, NodeKind};
use crate::path::PathExpression;
use crate::types::{ContainerKind, ContainerNode, ElementCells, LeafNode, RenderNode, RenderRow};

/// One render pass worth of state: the monotonic container-instance
/// counter. Owned by the caller, not ambient, so concurrent grids stay
/// isolated from each other.
#[derive(Debug, Default)]
pub struct RenderSession {
    next_id: u64,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the counter before a new top-level render pass. Identifiers
    /// are unique within a pass and reused across passes; old output is
    /// discarded wholesale on every render.
    pub fn reset(&mut self) {
        self.next_id = 0;
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Render a whole document. A top-level `null` means there is nothing
    /// to render. Never fails for well-typed input.
    pub fn render_document(&mut self, doc: &Value) -> Option<RenderNode> {
        if doc.is_null() {
            return None;
        }
        self.reset();
        Some(self.render(doc, PathExpression::root(), None))
    }

    /// Render one subtree nested under `title` (the object key or array
    /// index above it; `None` at the root and at spanning cells).
    pub fn render(
        &mut self,
        value: &Value,
        path: PathExpression,
        title: Option<String>,
    ) -> RenderNode {
        match classify(value) {
            NodeKind::Array { columns } => {
                let instance_id = self.alloc_id();
                let items = value.as_array().map(Vec::as_slice).unwrap_or_default();
                let rows = items
                    .iter()
                    .enumerate()
                    .map(|(index, element)| {
                        self.render_element_row(element, &path, index, &columns)
                    })
                    .collect();
                RenderNode::Container(ContainerNode {
                    kind: ContainerKind::Array,
                    expanded: instance_id == 0,
                    instance_id,
                    title,
                    columns,
                    rows,
                })
            }
            NodeKind::Object { keys } => {
                let instance_id = self.alloc_id();
                let rows = keys
                    .into_iter()
                    .filter_map(|key| {
                        let entry = value.get(key.as_str())?;
                        let child_path = path.key(&key);
                        let cell = match entry {
                            Value::Object(_) | Value::Array(_) => {
                                self.render(entry, child_path, Some(key.clone()))
                            }
                            leaf => RenderNode::Leaf(LeafNode::new(leaf, child_path)),
                        };
                        Some(RenderRow::Entry { key, value: cell })
                    })
                    .collect();
                RenderNode::Container(ContainerNode {
                    kind: ContainerKind::Object,
                    expanded: instance_id == 0,
                    instance_id,
                    title,
                    columns: Vec::new(),
                    rows,
                })
            }
            NodeKind::Leaf => RenderNode::Leaf(LeafNode::new(value, path)),
        }
    }

    // One array row. Object elements fill one cell per column key; array
    // and primitive elements get a single cell spanning all columns so
    // heterogeneous arrays never misalign the column grid.
    fn render_element_row(
        &mut self,
        element: &Value,
        parent: &PathExpression,
        index: usize,
        columns: &[String],
    ) -> RenderRow {
        let element_path = parent.index(index);
        let index_cell = LeafNode::index(index, element_path.clone());
        let cells = match element {
            Value::Object(map) => ElementCells::Columns(
                columns
                    .iter()
                    .map(|key| {
                        let child_path = element_path.key(key);
                        match map.get(key) {
                            None | Some(Value::Null) => {
                                RenderNode::Leaf(LeafNode::empty(child_path))
                            }
                            Some(cell @ (Value::Object(_) | Value::Array(_))) => {
                                self.render(cell, child_path, Some(key.clone()))
                            }
                            Some(cell) => RenderNode::Leaf(LeafNode::new(cell, child_path)),
                        }
                    })
                    .collect(),
            ),
            Value::Array(_) => {
                ElementCells::Spanning(self.render(element, element_path.clone(), None))
            }
            leaf => ElementCells::Spanning(RenderNode::Leaf(LeafNode::new(
                leaf,
                element_path.clone(),
            ))),
        };
        RenderRow::Element {
            index: index_cell,
            cells,
        }
    }
}
