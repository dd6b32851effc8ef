use json_grid::dom::{
    self, Element, EXPANDER_CLASSNAME, EXPANDER_TARGET_ATTRIBUTE, PATH_ATTRIBUTE,
    TABLE_SHRINKED_CLASSNAME,
};
use json_grid::grid::RenderSession;
use json_grid::path::PathExpression;
use json_grid::types::{leaf_text, ContainerKind, ElementCells, RenderNode, RenderRow};
use serde_json::{json, Value};

fn render(doc: &Value) -> (RenderNode, Element) {
    let mut session = RenderSession::new();
    let node = session.render_document(doc).expect("renderable document");
    let root = dom::mount(&node);
    (node, root)
}

// Every rendered leaf span as (path attribute, text), in document order.
fn leaf_cells(root: &Element) -> Vec<(String, String)> {
    root.find_all(&|el: &Element| el.attr(PATH_ATTRIBUTE).is_some())
        .into_iter()
        .map(|span| {
            (
                span.attr(PATH_ATTRIBUTE).unwrap().to_string(),
                span.text_content(),
            )
        })
        .collect()
}

fn collect_ids(node: &RenderNode, out: &mut Vec<u64>) {
    if let RenderNode::Container(container) = node {
        out.push(container.instance_id);
        for row in &container.rows {
            match row {
                RenderRow::Entry { value, .. } => collect_ids(value, out),
                RenderRow::Element { cells, .. } => match cells {
                    ElementCells::Columns(cells) => {
                        cells.iter().for_each(|cell| collect_ids(cell, out))
                    }
                    ElementCells::Spanning(cell) => collect_ids(cell, out),
                },
            }
        }
    }
}

fn collect_value_leaves<'a>(node: &'a RenderNode, out: &mut Vec<&'a json_grid::LeafNode>) {
    match node {
        RenderNode::Leaf(leaf) => out.push(leaf),
        RenderNode::Container(container) => {
            for row in &container.rows {
                match row {
                    RenderRow::Entry { value, .. } => collect_value_leaves(value, out),
                    RenderRow::Element { cells, .. } => match cells {
                        ElementCells::Columns(cells) => {
                            cells.iter().for_each(|cell| collect_value_leaves(cell, out))
                        }
                        ElementCells::Spanning(cell) => collect_value_leaves(cell, out),
                    },
                }
            }
        }
    }
}

#[test]
fn object_document_renders_key_value_rows() {
    let doc = json!({"a": 1, "b": "x"});
    let (node, root) = render(&doc);

    let container = node.as_container().unwrap();
    assert_eq!(container.kind, ContainerKind::Object);
    assert_eq!(container.instance_id, 0);
    assert!(container.expanded);
    assert_eq!(container.rows.len(), 2);

    // No expander control anywhere: the root is the only container.
    assert!(root
        .find(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .is_none());

    let keys: Vec<String> = root
        .find_all(&|el: &Element| el.has_class("rowName"))
        .iter()
        .map(|td| td.text_content())
        .collect();
    assert_eq!(keys, ["a", "b"]);

    assert_eq!(
        leaf_cells(&root),
        [
            ("x.a".to_string(), "1".to_string()),
            ("x.b".to_string(), "x".to_string()),
        ]
    );
}

#[test]
fn array_of_objects_uses_first_seen_column_union() {
    let doc = json!([{"a": 1}, {"b": 2}]);
    let (node, root) = render(&doc);

    let container = node.as_container().unwrap();
    assert_eq!(container.kind, ContainerKind::Array);
    assert_eq!(container.columns, ["a", "b"]);
    assert_eq!(container.rows.len(), 2);

    // Header: corner cell plus one cell per column, in union order.
    let headers: Vec<String> = root
        .find_all(&|el: &Element| el.tag() == "th")
        .iter()
        .map(|th| th.text_content())
        .collect();
    assert_eq!(headers, ["", "a", "b"]);

    // A key absent on one element is an empty cell, not a missing column.
    let cells = leaf_cells(&root);
    assert!(cells.contains(&("x[0].a".into(), "1".into())));
    assert!(cells.contains(&("x[0].b".into(), "".into())));
    assert!(cells.contains(&("x[1].a".into(), "".into())));
    assert!(cells.contains(&("x[1].b".into(), "2".into())));
}

#[test]
fn column_union_keeps_first_seen_order_and_skips_non_objects() {
    let doc = json!([{"b": 1, "a": 2}, 5, {"c": 3, "a": 4}, [7]]);
    let (node, _) = render(&doc);
    let container = node.as_container().unwrap();
    assert_eq!(container.columns, ["b", "a", "c"]);
}

#[test]
fn primitive_array_renders_spanning_cells() {
    let doc = json!([1, 2, 3]);
    let (node, root) = render(&doc);

    let container = node.as_container().unwrap();
    assert!(container.columns.is_empty());
    for (row, expected) in container.rows.iter().zip(["1", "2", "3"]) {
        match row {
            RenderRow::Element {
                cells: ElementCells::Spanning(RenderNode::Leaf(leaf)),
                ..
            } => assert_eq!(leaf.text, expected),
            other => panic!("expected spanning leaf row, got {other:?}"),
        }
    }

    let cells = leaf_cells(&root);
    assert!(cells.contains(&("x[0]".into(), "1".into())));
    assert!(cells.contains(&("x[1]".into(), "2".into())));
    assert!(cells.contains(&("x[2]".into(), "3".into())));
}

#[test]
fn empty_containers_render_zero_count_expanders() {
    let doc = json!({"e": {}, "f": []});
    let (_, root) = render(&doc);

    let labels: Vec<String> = root
        .find_all(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .iter()
        .map(|expander| expander.text_content())
        .collect();
    assert_eq!(labels, ["[+] e {0}", "[+] f [0]"]);

    let table = root
        .find(&|el: &Element| el.id() == Some("table-1"))
        .unwrap();
    assert!(table.has_class(TABLE_SHRINKED_CLASSNAME));
    assert!(table.find(&|el: &Element| el.tag() == "tr").is_none());
}

#[test]
fn toggling_flips_only_the_sign() {
    let doc = json!({"nested": {"k": 1}});
    let (_, mut root) = render(&doc);

    let label_before = root
        .find(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .unwrap()
        .text_content();
    assert_eq!(label_before, "[+] nested {1}");

    assert!(dom::toggle_expander(&mut root, "table-1"));
    let label_after = root
        .find(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .unwrap()
        .text_content();
    assert_eq!(label_after, format!("[-]{}", &label_before[3..]));
    let table = root
        .find(&|el: &Element| el.id() == Some("table-1"))
        .unwrap();
    assert!(!table.has_class(TABLE_SHRINKED_CLASSNAME));

    assert!(dom::toggle_expander(&mut root, "table-1"));
    let label_again = root
        .find(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .unwrap()
        .text_content();
    assert_eq!(label_again, label_before);
}

#[test]
fn instance_ids_are_unique_within_a_pass_and_reset_across_passes() {
    let doc = json!({"a": {"b": [1, {"c": {}}]}, "d": [[2]]});
    let mut session = RenderSession::new();

    let node = session.render_document(&doc).unwrap();
    let mut ids = Vec::new();
    collect_ids(&node, &mut ids);
    let mut deduped = ids.clone();
    deduped.sort_unstable();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
    assert!(ids.contains(&0));

    let again = session.render_document(&doc).unwrap();
    let mut ids_again = Vec::new();
    collect_ids(&again, &mut ids_again);
    assert_eq!(ids, ids_again);
}

#[test]
fn only_the_top_level_container_starts_expanded() {
    let doc = json!({"a": {"b": {"c": 1}}});
    let (_, root) = render(&doc);

    for table in root.find_all(&|el: &Element| el.tag() == "table") {
        if table.id() == Some("table-0") {
            assert!(!table.has_class(TABLE_SHRINKED_CLASSNAME));
        } else {
            assert!(table.has_class(TABLE_SHRINKED_CLASSNAME));
        }
    }

    let targets: Vec<String> = root
        .find_all(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .iter()
        .map(|expander| expander.attr(EXPANDER_TARGET_ATTRIBUTE).unwrap().to_string())
        .collect();
    assert_eq!(targets.len(), 2);
    assert!(!targets.contains(&"table-0".to_string()));
}

#[test]
fn leaf_paths_resolve_back_to_their_values() {
    let doc = json!({
        "name": "widget",
        "tags": ["a", "b"],
        "items": [
            {"id": 1, "props": {"color": "red"}},
            {"id": 2, "qty": 7},
            [true, null],
            "loose"
        ],
        "flag": false,
        "nothing": null
    });
    let (node, _) = render(&doc);

    let mut leaves = Vec::new();
    collect_value_leaves(&node, &mut leaves);
    assert!(!leaves.is_empty());
    for leaf in leaves {
        match leaf.path.resolve(&doc) {
            Some(Value::Null) => {
                // Null renders as the literal text in object rows and as
                // an empty cell in array column cells.
                assert!(leaf.text.is_empty() || leaf.text == "null");
            }
            Some(value) => assert_eq!(leaf.text, leaf_text(value)),
            // A column key missing on this element: rendered empty.
            None => assert_eq!(leaf.text, ""),
        }
    }
}

#[test]
fn spanning_containers_fall_back_to_row_count_titles() {
    let doc = json!([[1, 2]]);
    let (_, root) = render(&doc);
    let expander = root
        .find(&|el: &Element| el.has_class(EXPANDER_CLASSNAME))
        .unwrap();
    assert_eq!(expander.text_content(), "[+] 2 [2]");
}

#[test]
fn null_document_renders_nothing() {
    let mut session = RenderSession::new();
    assert!(session.render_document(&Value::Null).is_none());
    // Other falsy-looking documents still render.
    assert!(session.render_document(&json!(0)).is_some());
    assert!(session.render_document(&json!("")).is_some());
    assert!(session.render_document(&json!({})).is_some());
}

#[test]
fn top_level_primitive_renders_a_bare_leaf() {
    let mut session = RenderSession::new();
    let node = session.render_document(&json!("hello")).unwrap();
    match node {
        RenderNode::Leaf(leaf) => {
            assert_eq!(leaf.text, "hello");
            assert_eq!(leaf.path.to_string(), "x");
        }
        other => panic!("expected a leaf, got {other:?}"),
    }
}

#[test]
fn paths_round_trip_through_parse() {
    let doc = json!({"items": [{"name": "a"}]});
    let (_, root) = render(&doc);
    for (path_text, _) in leaf_cells(&root) {
        let parsed = PathExpression::parse(&path_text).expect("parseable rendered path");
        assert_eq!(parsed.to_string(), path_text);
    }
}
