//! Table components for the resource page.
//!
//! - `columns`: column widths
//! - `header`: header rendering
//! - `row`: record rows and placeholder rows

pub mod columns;
pub mod header;
pub mod row;

use bizdesk_business::ResourceTableState;
use egui::{Align, Layout, Ui};
use egui_extras::TableBuilder;

pub use row::RowAction;

use columns::{HEADER_HEIGHT, ROW_HEIGHT, table_columns};
use header::render_table_header;
use row::{render_placeholder_row, render_record_row};

pub const NO_RECORDS: &str = "No records found";

/// Renders the current page of `table`. Returns the row action clicked this
/// frame, if any.
pub fn render_table(
    table: &ResourceTableState,
    loading: bool,
    max_height: f32,
    ui: &mut Ui,
) -> Option<RowAction> {
    let columns = table.visible_columns();
    if columns.is_empty() {
        ui.weak("All columns are hidden.");
        return None;
    }
    let rows = table.page_rows();

    let mut builder = TableBuilder::new(ui)
        .striped(false)
        .resizable(true)
        .max_scroll_height(max_height)
        .cell_layout(Layout::left_to_right(Align::Center));
    for column in table_columns(&columns) {
        builder = builder.column(column);
    }

    let mut action = None;
    builder
        .header(HEADER_HEIGHT, |mut header| {
            render_table_header(&mut header, &columns);
        })
        .body(|mut body| {
            if rows.is_empty() {
                let text = if loading { "Loading..." } else { NO_RECORDS };
                body.row(ROW_HEIGHT, |mut row| {
                    render_placeholder_row(&mut row, columns.len(), text);
                });
                return;
            }
            for record in rows {
                body.row(ROW_HEIGHT, |mut row| {
                    if let Some(clicked) = render_record_row(&mut row, &columns, record) {
                        action = Some(clicked);
                    }
                });
            }
        });

    action
}
