//! Resource navigation on the left.

use bizdesk_business::{ResourceSchema, ResourceTableState, catalog};
use bizdesk_states::StateCtx;
use egui::{RichText, ScrollArea, Ui};

/// Lists every catalog resource. Returns the one clicked this frame unless it
/// is already open.
pub fn render_sidebar(state_ctx: &StateCtx, ui: &mut Ui) -> Option<&'static ResourceSchema> {
    let current = state_ctx.state::<ResourceTableState>().resource();
    let mut chosen = None;

    ui.add_space(8.0);
    ui.heading("Bizdesk");
    ui.separator();

    ScrollArea::vertical().show(ui, |ui| {
        for schema in catalog::all() {
            let selected = schema.name == current;
            let mut text = RichText::new(schema.title.as_str());
            if schema.read_only {
                text = text.italics();
            }
            if ui.selectable_label(selected, text).clicked() && !selected {
                log::debug!("opening {}", schema.name);
                chosen = Some(schema);
            }
        }
    });

    chosen
}
