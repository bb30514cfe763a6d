//! Column rebalancing for Row nodes.
//!
//! A row's column count is a tree mutation: changing it synthesizes or
//! truncates Column children, then rewrites every column's width and
//! horizontal padding so the outer edges are flush and each internal gap
//! is split evenly between its two neighbours.

use mailwright_model::registry::{column_padding, column_template, column_width, px};
use mailwright_model::{clone_with_fresh_ids, ComponentKind, ComponentNode, ComponentTree, IdSource};
use serde_json::{json, Map, Value};
use tracing::debug;

/// Resize row `row_id` to `count` columns, clamped to `[1, max_columns]`.
///
/// Existing columns keep their content; surplus columns are dropped with
/// their subtree. Non-column children are left where they are.
pub fn set_column_count<S: IdSource>(
    tree: &ComponentTree,
    row_id: &str,
    count: usize,
    max_columns: usize,
    default_gap: f64,
    ids: &mut S,
) -> ComponentTree {
    let Some(row) = find_row(tree, row_id) else {
        return tree.clone();
    };

    let count = count.clamp(1, max_columns.max(1));
    let gap = row_gap(row, default_gap);
    let existing = row.children().iter().filter(|c| is_column(c)).count();

    let mut children = Vec::with_capacity(row.children().len() + count);
    let mut seen = 0;
    for child in row.children() {
        if is_column(child) {
            seen += 1;
            if seen > count {
                continue;
            }
        }
        children.push(child.clone());
    }
    for index in existing..count {
        children.push(clone_with_fresh_ids(&column_template(index, count, gap), ids));
    }

    debug!(row_id, from = existing, to = count, "Resizing row");

    let mut row = row.clone();
    row.children = Some(children);
    row.props.insert("columnCount".to_string(), json!(count));
    layout_columns(&mut row, gap);
    tree.replace_node(row_id, row)
}

/// Change the gap of row `row_id` and re-run the padding rewrite.
/// Negative or non-finite gaps are ignored.
pub fn set_column_gap(tree: &ComponentTree, row_id: &str, gap: f64) -> ComponentTree {
    if !gap.is_finite() || gap < 0.0 {
        debug!(row_id, gap, "Ignoring invalid column gap");
        return tree.clone();
    }
    let Some(row) = find_row(tree, row_id) else {
        return tree.clone();
    };

    let mut row = row.clone();
    row.props.insert("columnGap".to_string(), json!(gap));
    layout_columns(&mut row, gap);
    tree.replace_node(row_id, row)
}

fn find_row<'a>(tree: &'a ComponentTree, row_id: &str) -> Option<&'a ComponentNode> {
    match tree.find_node(row_id) {
        Some(node) if ComponentKind::from_key(&node.kind) == Some(ComponentKind::Row) => Some(node),
        Some(node) => {
            debug!(node_id = row_id, kind = %node.kind, "Column resize target is not a row");
            None
        }
        None => {
            debug!(node_id = row_id, "Column resize target not found");
            None
        }
    }
}

fn is_column(node: &ComponentNode) -> bool {
    ComponentKind::from_key(&node.kind) == Some(ComponentKind::Column)
}

fn row_gap(row: &ComponentNode, default_gap: f64) -> f64 {
    row.prop_f64("columnGap")
        .filter(|g| g.is_finite() && *g >= 0.0)
        .unwrap_or(default_gap)
}

/// Rewrite width and horizontal padding of every column child of `row`.
fn layout_columns(row: &mut ComponentNode, gap: f64) {
    let Some(children) = row.children_mut() else {
        return;
    };
    let count = children.iter().filter(|c| is_column(c)).count();

    for (index, column) in children.iter_mut().filter(|c| is_column(c)).enumerate() {
        let (left, right) = column_padding(index, count, gap);
        let mut style = column
            .style()
            .cloned()
            .unwrap_or_else(Map::new);
        style.insert("width".to_string(), Value::from(column_width(count)));
        style.insert("paddingLeft".to_string(), Value::from(px(left)));
        style.insert("paddingRight".to_string(), Value::from(px(right)));
        column.props.insert("style".to_string(), Value::Object(style));
    }
}
