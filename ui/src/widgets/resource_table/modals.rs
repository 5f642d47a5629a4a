//! Edit/create form and delete confirmation dialogs.

use bizdesk_business::{
    DeleteRecordCommand, FieldKind, FieldValue, FormField, MutationCompute, MutationInput,
    MutationKind, MutationStatus, ResourceInput, ResourceSchema, SaveRecordCommand,
};
use bizdesk_states::StateCtx;
use egui::{Button, ComboBox, Grid, Id, RichText, TextEdit, Ui, Window};

use super::{Dialog, ResourcePageState};
use crate::utils::colors::{COLOR_AMBER, COLOR_RED};
use crate::utils::files;

const FIELD_WIDTH: f32 = 260.0;

pub fn render_dialog(state_ctx: &mut StateCtx, schema: &ResourceSchema, ui: &mut Ui) {
    match &state_ctx.state::<ResourcePageState>().dialog {
        Some(Dialog::Edit { .. }) => show_edit_modal(state_ctx, schema, ui),
        Some(Dialog::ConfirmDelete { .. }) => show_delete_modal(state_ctx, schema, ui),
        None => {}
    }
}

/// Error of the last failed mutation of one of `kinds`.
fn failure(mutation: &MutationCompute, kinds: &[MutationKind]) -> Option<String> {
    match &mutation.status {
        MutationStatus::Failed { kind, message } if kinds.contains(kind) => Some(message.clone()),
        _ => None,
    }
}

fn show_edit_modal(state_ctx: &mut StateCtx, schema: &ResourceSchema, ui: &mut Ui) {
    let mutation = state_ctx.state::<MutationCompute>();
    let in_flight = mutation.is_in_flight();
    let error = failure(mutation, &[MutationKind::Create, MutationKind::Update]);
    let params = state_ctx.state::<ResourceInput>().params.clone();

    let page = state_ctx.state_mut::<ResourcePageState>();
    let Some(Dialog::Edit { draft, errors }) = page.dialog.as_mut() else {
        return;
    };

    let title = if draft.is_new() {
        format!("New record - {}", schema.title)
    } else {
        format!("Edit record - {}", schema.title)
    };

    let mut open = true;
    let mut submit = false;
    let mut cancel = false;

    Window::new(title)
        .id(Id::new("record_form"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            if let Some(error) = &error {
                ui.colored_label(COLOR_RED, format!("Error: {error}"));
                ui.add_space(8.0);
            }

            Grid::new("record_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    for (field, value) in draft.entries_mut() {
                        let label = if field.required {
                            format!("{} *", field.label)
                        } else {
                            field.label.to_string()
                        };
                        ui.label(label);
                        ui.vertical(|ui| {
                            render_field(ui, field, value);
                            if let Some(message) = errors.for_field(&field.key) {
                                ui.colored_label(COLOR_RED, message);
                            }
                        });
                        ui.end_row();
                    }
                });

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!in_flight, Button::new("Save")).clicked() {
                    submit = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                if in_flight {
                    ui.spinner();
                    ui.label("Saving...");
                }
            });
        });

    let input = if submit {
        match MutationInput::save(params, draft) {
            Ok(input) => Some(input),
            Err(invalid) => {
                log::debug!("form rejected: {invalid}");
                *errors = invalid;
                None
            }
        }
    } else {
        None
    };

    if !open || cancel {
        page.close_dialog();
        state_ctx.state_mut::<MutationCompute>().clear();
        return;
    }

    if let Some(input) = input {
        state_ctx.add_state(input);
        state_ctx.enqueue_command::<SaveRecordCommand>();
    }
}

fn render_field(ui: &mut Ui, field: &FormField, value: &mut FieldValue) {
    match (&field.kind, value) {
        (_, FieldValue::Flag(flag)) => {
            ui.checkbox(flag, "");
        }
        (FieldKind::Textarea, FieldValue::Text(text)) => {
            ui.add(
                TextEdit::multiline(text)
                    .desired_rows(3)
                    .desired_width(FIELD_WIDTH),
            );
        }
        (FieldKind::Select(options), FieldValue::Text(text)) => {
            let selected = if text.is_empty() {
                "Select...".to_owned()
            } else {
                text.clone()
            };
            ComboBox::from_id_salt(field.key.as_str())
                .selected_text(selected)
                .width(FIELD_WIDTH)
                .show_ui(ui, |ui| {
                    ui.selectable_value(text, String::new(), "(none)");
                    for option in options {
                        ui.selectable_value(text, option.to_string(), option.as_str());
                    }
                });
        }
        (FieldKind::File, FieldValue::Text(text)) => {
            ui.horizontal(|ui| {
                ui.add(TextEdit::singleline(text).desired_width(FIELD_WIDTH - 90.0));
                if ui.button("Browse...").clicked()
                    && let Some(name) = files::pick_file_name()
                {
                    *text = name;
                }
            });
        }
        (kind, FieldValue::Text(text)) => {
            ui.add(
                TextEdit::singleline(text)
                    .hint_text(hint(kind))
                    .desired_width(FIELD_WIDTH),
            );
        }
    }
}

fn hint(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Date => "YYYY-MM-DD",
        FieldKind::Email => "name@example.com",
        FieldKind::Number => "0",
        _ => "",
    }
}

fn show_delete_modal(state_ctx: &mut StateCtx, schema: &ResourceSchema, ui: &mut Ui) {
    let mutation = state_ctx.state::<MutationCompute>();
    let in_flight = mutation.is_in_flight();
    let error = failure(mutation, &[MutationKind::Delete]);
    let params = state_ctx.state::<ResourceInput>().params.clone();

    let Some(Dialog::ConfirmDelete { id, label }) =
        state_ctx.state::<ResourcePageState>().dialog.clone()
    else {
        return;
    };

    let mut open = true;
    let mut confirm = false;
    let mut cancel = false;

    Window::new(format!("Delete record - {}", schema.title))
        .id(Id::new("delete_record"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .show(ui.ctx(), |ui| {
            if let Some(error) = &error {
                ui.colored_label(COLOR_RED, format!("Error: {error}"));
                ui.add_space(8.0);
            }

            ui.colored_label(COLOR_AMBER, "⚠ Warning");
            ui.add_space(4.0);
            ui.label(format!("Are you sure you want to delete '{label}'?"));
            ui.label("This action cannot be undone.");
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        !in_flight,
                        Button::new(RichText::new("Delete").color(COLOR_RED)),
                    )
                    .clicked()
                {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
                if in_flight {
                    ui.spinner();
                    ui.label("Deleting...");
                }
            });
        });

    if !open || cancel {
        state_ctx.state_mut::<ResourcePageState>().close_dialog();
        state_ctx.state_mut::<MutationCompute>().clear();
        return;
    }

    if confirm {
        state_ctx.add_state(MutationInput::delete(schema.name, params, id));
        state_ctx.enqueue_command::<DeleteRecordCommand>();
    }
}
