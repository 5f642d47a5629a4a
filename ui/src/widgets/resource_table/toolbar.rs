//! Search box, column menu, page size and export buttons above the table.

use bizdesk_business::{
    PAGE_SIZES, RefreshResourceCommand, ResourceListCompute, ResourceSchema, ResourceTableState,
};
use bizdesk_states::{StateCtx, Time};
use egui::{Button, ComboBox, TextEdit, Ui};
use ustr::Ustr;

use super::{Notice, ResourcePageState};
use crate::utils::files::{self, Delivery};

pub fn render_toolbar(state_ctx: &mut StateCtx, schema: &ResourceSchema, ui: &mut Ui) {
    ui.horizontal_wrapped(|ui| {
        ui.heading(schema.title.as_str());
        ui.separator();

        render_search(state_ctx, ui);
        render_column_menu(state_ctx.state_mut::<ResourceTableState>(), ui);
        render_page_size(state_ctx.state_mut::<ResourceTableState>(), ui);
        ui.separator();

        let loading = state_ctx.state::<ResourceListCompute>().is_loading();
        if ui
            .add_enabled(!loading, Button::new("🔄 Refresh"))
            .clicked()
        {
            state_ctx.enqueue_command::<RefreshResourceCommand>();
        }
        if !schema.read_only && ui.button("➕ New").clicked() {
            state_ctx
                .state_mut::<ResourcePageState>()
                .open_create(schema);
        }
        if ui.button("⬇ Export CSV").clicked() {
            export_csv(state_ctx);
        }
        if ui.button("🖨 Print").clicked() {
            print_view(state_ctx);
        }
    });
}

fn render_search(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let page = state_ctx.state_mut::<ResourcePageState>();
    let mut changed = ui
        .add(
            TextEdit::singleline(&mut page.search_text)
                .hint_text("Search...")
                .desired_width(200.0),
        )
        .changed();
    if !page.search_text.is_empty() && ui.small_button("✕").clicked() {
        page.search_text.clear();
        changed = true;
    }

    if changed {
        let query = page.search_text.clone();
        state_ctx.update::<ResourceTableState>(|table| table.set_search(query));
    }
}

fn render_column_menu(table: &mut ResourceTableState, ui: &mut Ui) {
    ui.menu_button("☰ Columns", |ui| {
        let entries: Vec<(Ustr, Ustr, bool)> = table
            .columns()
            .iter()
            .filter(|column| !column.is_actions())
            .map(|column| {
                (
                    column.key,
                    column.label,
                    table.visibility().is_visible(&column.key),
                )
            })
            .collect();

        for (key, label, mut visible) in entries {
            if ui.checkbox(&mut visible, label.as_str()).changed() {
                table.toggle_column(&key);
            }
        }
        ui.separator();
        if ui.button("Show all").clicked() {
            table.show_all_columns();
        }
    });
}

fn render_page_size(table: &mut ResourceTableState, ui: &mut Ui) {
    let per_page = table.per_page();
    ComboBox::from_id_salt("page_size")
        .selected_text(format!("{per_page} / page"))
        .show_ui(ui, |ui| {
            for size in PAGE_SIZES {
                if ui
                    .selectable_label(size == per_page, format!("{size} / page"))
                    .clicked()
                {
                    table.set_per_page(size);
                }
            }
        });
}

fn export_csv(state_ctx: &mut StateCtx) {
    let now = state_ctx.state::<Time>().now();
    let table = state_ctx.state::<ResourceTableState>();
    let file_name = table.export_file_name(&now);
    let csv = table.export_csv();
    report(state_ctx, "Export", files::save_csv(&file_name, &csv));
}

fn print_view(state_ctx: &mut StateCtx) {
    let table = state_ctx.state::<ResourceTableState>();
    let file_name = format!("{}_print.html", table.resource());
    let html = table.print_html();
    report(state_ctx, "Printable view", files::show_printable(&file_name, &html));
}

fn report(state_ctx: &mut StateCtx, what: &str, result: Result<Delivery, String>) {
    let notice = match result {
        Ok(delivery) => delivery.notice(what).map(Notice::Info),
        Err(err) => {
            log::warn!("{what} failed: {err}");
            Some(Notice::Error(err))
        }
    };
    if notice.is_some() {
        state_ctx.state_mut::<ResourcePageState>().notice = notice;
    }
}
