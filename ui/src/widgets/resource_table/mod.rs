//! Generic resource page: toolbar, table, pagination and row dialogs.
//!
//! Everything is driven by the [`ResourceSchema`] of the open resource, so one
//! page serves every entry of the catalog.

mod modals;
mod pagination;
pub mod table;
mod toolbar;

use bizdesk_business::{
    FormDraft, MutationOutcome, Record, ResourceListCompute, ResourceSchema, ResourceTableState,
    ValidationErrors, catalog,
};
use bizdesk_states::{State, StateCtx};
use egui::{Frame, Margin, Stroke, Ui};
use ustr::Ustr;

use crate::utils::colors::{COLOR_GREEN, COLOR_RED, TABLE_BORDER_COLOR};
use table::RowAction;

/// UI-only state of the resource page. The table data itself lives in
/// [`ResourceTableState`].
#[derive(Debug, Clone, Default)]
pub struct ResourcePageState {
    /// Contents of the search box.
    pub search_text: String,
    pub dialog: Option<Dialog>,
    pub notice: Option<Notice>,
}

impl State for ResourcePageState {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    Edit {
        draft: FormDraft,
        errors: ValidationErrors,
    },
    ConfirmDelete {
        id: Ustr,
        label: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl ResourcePageState {
    pub fn open_create(&mut self, schema: &ResourceSchema) {
        self.dialog = Some(Dialog::Edit {
            draft: FormDraft::empty(schema),
            errors: ValidationErrors::default(),
        });
    }

    pub fn open_edit(&mut self, schema: &ResourceSchema, record: &Record) {
        self.dialog = Some(Dialog::Edit {
            draft: FormDraft::from_record(schema, record),
            errors: ValidationErrors::default(),
        });
    }

    /// Asks before deleting `record`. Rows without an id cannot be deleted.
    pub fn confirm_delete(&mut self, schema: &ResourceSchema, record: &Record) {
        let Some(id) = record.id() else {
            self.notice = Some(Notice::Error("this row has no id".to_owned()));
            return;
        };
        let label = schema
            .data_columns()
            .map(|column| record.field_text(&column.key))
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| id.to_string());
        self.dialog = Some(Dialog::ConfirmDelete { id, label });
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    /// Closes the dialog that produced `outcome` and reports it.
    pub fn finish(&mut self, outcome: &MutationOutcome) {
        self.dialog = None;
        self.notice = Some(Notice::Info(
            match outcome {
                MutationOutcome::Deleted(_) => "Record deleted",
                MutationOutcome::Saved(_) => "Record saved",
            }
            .to_owned(),
        ));
    }
}

/// Renders the page of the currently open resource.
pub fn resource_page(state_ctx: &mut StateCtx, ui: &mut Ui) {
    let resource = state_ctx.state::<ResourceTableState>().resource();
    let Some(schema) = catalog::find(&resource) else {
        ui.centered_and_justified(|ui| {
            ui.label("Pick a resource from the sidebar.");
        });
        return;
    };

    toolbar::render_toolbar(state_ctx, schema, ui);
    render_status(state_ctx, ui);
    ui.add_space(8.0);

    let table_height = (ui.available_height() - pagination::PAGINATION_HEIGHT).max(120.0);
    let action = Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ui.push_id(resource.as_str(), |ui| {
                table::render_table(
                    state_ctx.state::<ResourceTableState>(),
                    state_ctx.state::<ResourceListCompute>().is_loading(),
                    table_height,
                    ui,
                )
            })
            .inner
        })
        .inner;

    ui.add_space(8.0);
    pagination::render_pagination(state_ctx.state_mut::<ResourceTableState>(), ui);

    let page = state_ctx.state_mut::<ResourcePageState>();
    match action {
        Some(RowAction::Edit(record)) => page.open_edit(schema, &record),
        Some(RowAction::Delete(record)) => page.confirm_delete(schema, &record),
        None => {}
    }

    modals::render_dialog(state_ctx, schema, ui);
}

fn render_status(state_ctx: &StateCtx, ui: &mut Ui) {
    let list = state_ctx.state::<ResourceListCompute>();
    if list.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
    }
    if let Some(error) = list.error_message() {
        ui.colored_label(COLOR_RED, format!("Error: {error}"));
    }

    match &state_ctx.state::<ResourcePageState>().notice {
        Some(Notice::Info(text)) => {
            ui.colored_label(COLOR_GREEN, text);
        }
        Some(Notice::Error(text)) => {
            ui.colored_label(COLOR_RED, format!("Error: {text}"));
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn task(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn delete_confirmation_names_the_row() {
        let schema = catalog::find("tasks").unwrap();
        let mut page = ResourcePageState::default();
        page.confirm_delete(schema, &task(json!({ "id": 4, "title": "Ship it" })));
        assert_eq!(
            page.dialog,
            Some(Dialog::ConfirmDelete {
                id: Ustr::from("4"),
                label: "Ship it".to_owned(),
            })
        );
    }

    #[test]
    fn rows_without_id_are_not_deletable() {
        let schema = catalog::find("tasks").unwrap();
        let mut page = ResourcePageState::default();
        page.confirm_delete(schema, &task(json!({ "title": "Orphan" })));
        assert_eq!(page.dialog, None);
        assert!(matches!(page.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn finishing_closes_the_dialog() {
        let schema = catalog::find("notes").unwrap();
        let mut page = ResourcePageState::default();
        page.open_create(schema);
        page.finish(&MutationOutcome::Deleted(Ustr::from("1")));
        assert_eq!(page.dialog, None);
        assert_eq!(page.notice, Some(Notice::Info("Record deleted".to_owned())));
    }
}
