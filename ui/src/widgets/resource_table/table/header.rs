//! Table header rendering for the resource table.

use bizdesk_business::Column;
use egui::{Frame, Margin, Ui};
use egui_extras::TableRow;

use crate::utils::colors::HEADER_BG_COLOR;

/// Renders one bold, centered header cell per visible column.
#[inline]
pub fn render_table_header(header: &mut TableRow<'_, '_>, columns: &[&Column]) {
    for column in columns {
        header.col(|ui| {
            render_header_cell(ui, &column.label);
        });
    }
}

#[inline]
fn render_header_cell(ui: &mut Ui, label: &str) {
    let fill = if ui.visuals().dark_mode {
        ui.visuals().faint_bg_color
    } else {
        HEADER_BG_COLOR
    };
    Frame::NONE
        .fill(fill)
        .inner_margin(Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.centered_and_justified(|ui| {
                ui.strong(label);
            });
        });
}
