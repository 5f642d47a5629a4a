use bizdesk_business::{BusinessConfig, ListStatus, ResourceListCompute};
use bizdesk_states::StateCtx;
use egui::{Color32, Response, Ui};

use crate::utils::colors::{COLOR_AMBER, COLOR_GREEN, COLOR_RED};

/// Radius of the status indicator circle (in pixels)
const STATUS_DOT_RADIUS: f32 = 5.0;

/// Renders a single status dot with tooltip using a drawn circle
fn status_dot(ui: &mut Ui, tooltip_text: String, dot_color: Color32) -> Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(STATUS_DOT_RADIUS * 2.0, STATUS_DOT_RADIUS * 2.0),
        egui::Sense::hover(),
    );
    ui.painter()
        .circle(rect.center(), STATUS_DOT_RADIUS, dot_color, egui::Stroke::NONE);
    response.on_hover_text(tooltip_text)
}

/// Dot and caption for the state of the last collection load.
pub fn load_status(state_ctx: &StateCtx, ui: &mut Ui) -> Response {
    let base_url = state_ctx.state::<BusinessConfig>().api_base_url;
    let list = state_ctx.state::<ResourceListCompute>();

    let (color, caption) = match &list.status {
        ListStatus::Idle => (Color32::GRAY, "Idle".to_owned()),
        ListStatus::Loading => (COLOR_AMBER, "Loading".to_owned()),
        ListStatus::Loaded {
            records,
            fetched_at,
            ..
        } => (
            COLOR_GREEN,
            format!(
                "{} records at {}",
                records.len(),
                fetched_at.format("%H:%M:%S")
            ),
        ),
        ListStatus::Error(_) => (COLOR_RED, "Failed".to_owned()),
    };

    ui.horizontal(|ui| {
        status_dot(ui, format!("API: {base_url}"), color);
        ui.weak(caption);
    })
    .response
}
