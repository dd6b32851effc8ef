use std::fmt;

use crate::types::{ContainerKind, ContainerNode, ElementCells, LeafNode, RenderNode, RenderRow};

pub const EXPANDER_TARGET_ATTRIBUTE: &str = "data-target-id";
pub const PATH_ATTRIBUTE: &str = "data-json-path";
pub const CELL_ATTRIBUTE: &str = "data-cell";
pub const TABLE_SHRINKED_CLASSNAME: &str = "shrinked";
pub const JSON_GRID_CONTAINER_CLASSNAME: &str = "json-grid-container";
pub const JSON_GRID_ELEMENT_CONTAINER_CLASSNAME: &str = "json-grid-element-container";
pub const EXPANDER_CLASSNAME: &str = "expander";
pub const HIGHLIGHT_CLASSNAME: &str = "highlight";
pub const CELL_HOVER_CLASSNAME: &str = "cell-hover";
pub const CELL_LOCKED_CLASSNAME: &str = "cell-locked";

/// One node of the materialized output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An owned stand-in for a rendered markup element. The attribute linkage
/// between tables (`id="table-{n}"`), expanders (`data-target-id`) and
/// leaf cells (`data-json-path`) is the wire format the interaction and
/// search layers operate on.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        if !text.is_empty() {
            self.children.push(Node::Text(text.to_string()));
        }
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !class.is_empty() && !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|existing| existing != class);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(existing, _)| existing == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    pub fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this subtree in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.append_text(&mut out);
        out
    }

    fn append_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.append_text(out),
            }
        }
    }

    /// First element in document order (self included) matching `pred`.
    pub fn find(&self, pred: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if pred(self) {
            return Some(self);
        }
        for child in self.child_elements() {
            if let Some(found) = child.find(pred) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_mut(&mut self, pred: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(element) = child {
                if let Some(found) = element.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Every element in document order (self included) matching `pred`.
    pub fn find_all(&self, pred: &impl Fn(&Element) -> bool) -> Vec<&Element> {
        let mut out = Vec::new();
        self.collect_matching(pred, &mut out);
        out
    }

    fn collect_matching<'a>(&'a self, pred: &impl Fn(&Element) -> bool, out: &mut Vec<&'a Element>) {
        if pred(self) {
            out.push(self);
        }
        for child in self.child_elements() {
            child.collect_matching(pred, out);
        }
    }

    /// Pre-order mutable visit of self and every descendant element.
    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(element) = child {
                element.for_each_mut(f);
            }
        }
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if let Some(id) = &self.id {
            write!(f, r#" id="{}""#, escape_html(id))?;
        }
        if !self.classes.is_empty() {
            write!(f, r#" class="{}""#, escape_html(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attrs {
            write!(f, r#" {}="{}""#, name, escape_html(value))?;
        }
        f.write_str(">")?;
        for child in &self.children {
            match child {
                Node::Element(element) => write!(f, "{element}")?,
                Node::Text(text) => f.write_str(&escape_html(text))?,
            }
        }
        write!(f, "</{}>", self.tag)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Materialize a rendered document as its mount element: the grid
/// container div holding the top-level table or leaf.
pub fn mount(node: &RenderNode) -> Element {
    let mut container = Element::new("div").with_class(JSON_GRID_CONTAINER_CLASSNAME);
    container.push(build_node(node));
    container
}

fn build_node(node: &RenderNode) -> Node {
    match node {
        RenderNode::Leaf(leaf) => Node::Element(build_leaf(leaf)),
        RenderNode::Container(container) => Node::Element(build_container(container)),
    }
}

fn build_leaf(leaf: &LeafNode) -> Element {
    let mut span = Element::new("span")
        .with_class(leaf.type_name)
        .with_class("value")
        .with_text(&leaf.text);
    span.set_attr(PATH_ATTRIBUTE, &leaf.path.to_string());
    span
}

fn build_container(container: &ContainerNode) -> Element {
    let mut wrapper = Element::new("div").with_class(JSON_GRID_ELEMENT_CONTAINER_CLASSNAME);
    let table_id = format!("table-{}", container.instance_id);

    let mut table = Element::new("table").with_class("table").with_id(&table_id);
    if !container.expanded {
        table.add_class(TABLE_SHRINKED_CLASSNAME);
    }
    let mut tbody = Element::new("tbody");
    if container.kind == ContainerKind::Array {
        tbody.push_element(build_header_row(&container.columns));
    }
    for row in &container.rows {
        tbody.push_element(build_row(row, &container.columns));
    }
    table.push_element(tbody);

    if !container.is_top_level() {
        let mut expander = Element::new("span")
            .with_class(EXPANDER_CLASSNAME)
            .with_text(&container.expander_label());
        expander.set_attr(EXPANDER_TARGET_ATTRIBUTE, &table_id);
        wrapper.push_element(expander);
    }
    wrapper.push_element(table);
    wrapper
}

fn build_header_row(columns: &[String]) -> Element {
    let mut tr = Element::new("tr");
    tr.push_element(Element::new("th"));
    for column in columns {
        tr.push_element(Element::new("th").with_text(column));
    }
    tr
}

fn build_row(row: &RenderRow, columns: &[String]) -> Element {
    let mut tr = Element::new("tr");
    match row {
        RenderRow::Entry { key, value } => {
            tr.push_element(
                Element::new("td")
                    .with_class("string")
                    .with_class("rowName")
                    .with_text(key),
            );
            let mut td = Element::new("td").with_class(value.type_name());
            td.push(build_node(value));
            tr.push_element(td);
        }
        RenderRow::Element { index, cells } => {
            let mut index_td = Element::new("td").with_class(index.type_name);
            index_td.push_element(build_leaf(index));
            tr.push_element(index_td);
            match cells {
                ElementCells::Columns(nodes) => {
                    for cell in nodes {
                        let mut td = Element::new("td")
                            .with_class(cell.type_name())
                            .with_class("table-wrapper");
                        td.push(build_node(cell));
                        tr.push_element(td);
                    }
                }
                ElementCells::Spanning(node) => {
                    let mut td = Element::new("td")
                        .with_class(node.type_name())
                        .with_class("table-wrapper");
                    if !columns.is_empty() {
                        td.set_attr("colspan", &columns.len().to_string());
                    }
                    td.push(build_node(node));
                    tr.push_element(td);
                }
            }
        }
    }
    tr
}

/// Flip the collapsed state of the container whose table carries
/// `target_id`. Returns whether a toggle happened.
pub fn toggle_expander(root: &mut Element, target_id: &str) -> bool {
    let Some(container) = root.find_mut(&|el: &Element| {
        el.has_class(JSON_GRID_ELEMENT_CONTAINER_CLASSNAME)
            && el.child_elements().any(|child| child.id() == Some(target_id))
    }) else {
        return false;
    };
    let collapsed = container
        .child_elements()
        .find(|child| child.id() == Some(target_id))
        .map(|table| table.has_class(TABLE_SHRINKED_CLASSNAME))
        .unwrap_or(false);
    set_expanded(container, collapsed)
}

/// Expand or collapse one element container in place. A container with no
/// expander control (the top-level table) is never touched. Returns
/// whether the state changed.
pub fn set_expanded(container: &mut Element, expanded: bool) -> bool {
    if !container
        .child_elements()
        .any(|child| child.has_class(EXPANDER_CLASSNAME))
    {
        return false;
    }
    let Some(table) = container
        .child_elements_mut()
        .find(|child| child.tag() == "table")
    else {
        return false;
    };
    let currently_expanded = !table.has_class(TABLE_SHRINKED_CLASSNAME);
    if currently_expanded == expanded {
        return false;
    }
    if expanded {
        table.remove_class(TABLE_SHRINKED_CLASSNAME);
    } else {
        table.add_class(TABLE_SHRINKED_CLASSNAME);
    }
    let sign = if expanded { "-" } else { "+" };
    if let Some(expander) = container
        .child_elements_mut()
        .find(|child| child.has_class(EXPANDER_CLASSNAME))
    {
        set_expander_sign(expander, sign);
    }
    true
}

// The label keeps its sign inside the leading `[+]`/`[-]` text run; only
// that character changes on toggle, the trailing title/count text stays.
fn set_expander_sign(expander: &mut Element, sign: &str) {
    if let Some(Node::Text(text)) = expander.children_mut().first_mut() {
        if text.starts_with('[') && text.len() >= 3 {
            text.replace_range(1..2, sign);
            return;
        }
    }
    let label = expander.text_content();
    if label.len() >= 3 {
        *expander.children_mut() = vec![Node::Text(format!("[{sign}]{}", &label[3..]))];
    }
}

pub const GRID_BASE_STYLES: &str = "body{font-family:monospace;margin:1rem;background:#1e1e2e;color:#cdd6f4;}\
body.light-mode{background:#ffffff;color:#24273a;}\
.json-grid-container table{border-collapse:collapse;}\
.json-grid-container td,.json-grid-container th{border:1px solid #45475a;padding:0.25em 0.6em;vertical-align:top;text-align:left;}\
body.light-mode .json-grid-container td,body.light-mode .json-grid-container th{border-color:#b8c0e0;}\
.json-grid-container .rowName{font-weight:bold;}\
.json-grid-container table.shrinked{display:none;}\
.json-grid-container .expander{cursor:pointer;user-select:none;color:#89b4fa;}\
.json-grid-container .cell-hover{background:#313244;}\
.json-grid-container .cell-locked{outline:2px solid #89b4fa;}\
.json-grid-container .highlight{background:#f9e2af;color:#1e1e2e;}";

/// Wrap a mounted grid in a self-contained HTML page.
pub fn to_page(title: &str, body_class: &str, root: &Element) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body class=\"{}\">{}</body></html>\n",
        escape_html(title),
        GRID_BASE_STYLES,
        escape_html(body_class),
        root.to_html()
    )
}
