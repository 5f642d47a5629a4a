//! Row rendering for the resource table.

use bizdesk_business::{Column, Record};
use egui::{Frame, Label, Margin, RichText, Stroke, Ui};
use egui_extras::TableRow;

use crate::utils::colors::COLOR_RED;

/// What the user asked for on a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Edit(Record),
    Delete(Record),
}

/// Renders `record` across the visible columns.
#[inline]
pub fn render_record_row(
    row: &mut TableRow<'_, '_>,
    columns: &[&Column],
    record: &Record,
) -> Option<RowAction> {
    let mut action = None;

    for column in columns {
        row.col(|ui| {
            if column.is_actions() {
                action = render_action_buttons(ui, record);
            } else {
                render_data_cell(ui, &record.field_text(&column.key));
            }
            draw_cell_bottom_border(ui);
        });
    }

    action
}

/// Single row spanning the first column, used for "No records found" and
/// loading placeholders.
#[inline]
pub fn render_placeholder_row(row: &mut TableRow<'_, '_>, column_count: usize, text: &str) {
    row.col(|ui| {
        render_data_cell(ui, text);
    });
    for _ in 1..column_count {
        row.col(|_| {});
    }
}

#[inline]
fn render_data_cell(ui: &mut Ui, text: &str) {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, |ui| {
            ui.add(Label::new(text).truncate());
        });
}

fn render_action_buttons(ui: &mut Ui, record: &Record) -> Option<RowAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        if ui.small_button("✏ Edit").clicked() {
            action = Some(RowAction::Edit(record.clone()));
        }
        if ui
            .small_button(RichText::new("🗑 Delete").color(COLOR_RED))
            .clicked()
        {
            action = Some(RowAction::Delete(record.clone()));
        }
    });
    action
}

/// Draws a bottom border line for a cell.
#[inline]
fn draw_cell_bottom_border(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let border_color = ui.visuals().widgets.noninteractive.bg_stroke.color;
    ui.painter().hline(
        rect.left()..=rect.right(),
        rect.bottom(),
        Stroke::new(1.0, border_color),
    );
}
