//! Key/value table detection.
//!
//! Confluence pages often use a two-column table with a header cell on one
//! side as a property sheet. Those read better as `**Key:** Value` lines than
//! as a grid.

use crate::adf::{AdfNode, NodeKind};

/// Whether every row holds exactly one header and one plain cell, in either order.
///
/// A table without rows is not a property table.
pub fn is_property_table(table: &AdfNode) -> bool {
    let rows = table.children();
    !rows.is_empty() && rows.iter().all(is_property_row)
}

fn is_property_row(row: &AdfNode) -> bool {
    match row.children() {
        [first, second] => matches!(
            (first.kind(), second.kind()),
            (NodeKind::TableHeader, NodeKind::TableCell) | (NodeKind::TableCell, NodeKind::TableHeader)
        ),
        _ => false,
    }
}

/// Index of the header cell within a property row.
pub fn header_position(row: &AdfNode) -> Option<usize> {
    row.children()
        .iter()
        .position(|cell| cell.kind() == NodeKind::TableHeader)
}
