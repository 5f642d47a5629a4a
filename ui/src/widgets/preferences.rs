//! Theme and sidebar color menu.

use bizdesk_business::{Preferences, Theme};
use bizdesk_states::StateCtx;
use egui::Ui;

pub fn preferences_menu(state_ctx: &mut StateCtx, ui: &mut Ui) {
    ui.menu_button("⚙ Preferences", |ui| {
        let prefs = state_ctx.state_mut::<Preferences>();

        ui.label("Theme");
        for theme in Theme::ALL {
            ui.radio_value(&mut prefs.theme, theme, theme.label());
        }

        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Sidebar color");
            ui.color_edit_button_srgb(&mut prefs.sidebar_color);
        });

        if ui.button("Reset").clicked() {
            *prefs = Preferences::default();
        }
    });
}

/// egui's equivalent of `theme`.
pub fn theme_preference(theme: Theme) -> egui::ThemePreference {
    match theme {
        Theme::Light => egui::ThemePreference::Light,
        Theme::Dark => egui::ThemePreference::Dark,
        Theme::System => egui::ThemePreference::System,
    }
}
