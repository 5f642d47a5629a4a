//! First / previous / next / last navigation under the table.

use bizdesk_business::ResourceTableState;
use egui::{Button, Ui};

/// Vertical space kept free for the pagination row.
pub const PAGINATION_HEIGHT: f32 = 40.0;

pub fn render_pagination(table: &mut ResourceTableState, ui: &mut Ui) {
    let total = table.filtered_len();
    let has_prev = table.paginator().has_prev();
    let has_next = table.paginator().has_next(total);

    ui.horizontal(|ui| {
        if ui.add_enabled(has_prev, Button::new("« First")).clicked() {
            table.first_page();
        }
        if ui.add_enabled(has_prev, Button::new("‹ Prev")).clicked() {
            table.prev_page();
        }
        ui.label(page_label(table.current_page(), table.total_pages()));
        if ui.add_enabled(has_next, Button::new("Next ›")).clicked() {
            table.next_page();
        }
        if ui.add_enabled(has_next, Button::new("Last »")).clicked() {
            table.last_page();
        }
        ui.separator();
        ui.weak(range_label(table, total));
    });
}

/// An empty view still reads as page 1 of 1.
fn page_label(page: usize, pages: usize) -> String {
    format!("Page {page} of {}", pages.max(1))
}

fn range_label(table: &ResourceTableState, total: usize) -> String {
    if total == 0 {
        return "0 records".to_owned();
    }
    let range = table.paginator().range(total);
    format!("{}-{} of {total} records", range.start + 1, range.end)
}
