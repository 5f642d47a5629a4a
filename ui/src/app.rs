use std::time::Duration;

use bizdesk_business::{
    MutationCompute, PathParams, Preferences, ResourceListCompute, ResourceSchema, Theme,
    open_resource, reconcile,
};
use bizdesk_states::Time;

use crate::utils::colors;
use crate::{state::State, widgets};

/// How often to repaint while a request is in flight.
const PENDING_REPAINT: Duration = Duration::from_millis(100);

pub struct DashboardApp {
    state: State,
    /// Theme last pushed into egui.
    applied_theme: Option<Theme>,
}

impl DashboardApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self {
            state,
            applied_theme: None,
        }
    }

    /// Like [`DashboardApp::new`], restoring preferences saved by a previous run.
    pub fn with_storage(mut state: State, storage: Option<&dyn eframe::Storage>) -> Self {
        if let Some(saved) = storage.and_then(|storage| storage.get_string(Preferences::STORAGE_KEY))
        {
            state.ctx.add_state(Preferences::from_json(&saved));
        }
        Self::new(state)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Switches the page to `schema` and starts loading it.
    pub fn open(&mut self, schema: &ResourceSchema) {
        open_resource(&mut self.state.ctx, schema, PathParams::new());
        self.state
            .ctx
            .add_state(widgets::ResourcePageState::default());
    }

    /// One frame of the dashboard.
    pub fn ui(&mut self, ctx: &egui::Context) {
        // Sync Compute for render
        self.state.ctx.state_mut::<Time>().tick();
        self.state.ctx.sync_computes();
        if let Some(outcome) = reconcile(&mut self.state.ctx) {
            self.state
                .ctx
                .state_mut::<widgets::ResourcePageState>()
                .finish(&outcome);
        }

        let prefs = *self.state.ctx.state::<Preferences>();
        if self.applied_theme != Some(prefs.theme) {
            ctx.set_theme(widgets::theme_preference(prefs.theme));
            self.applied_theme = Some(prefs.theme);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                widgets::preferences_menu(&mut self.state.ctx, ui);
                ui.separator();
                widgets::load_status(&self.state.ctx, ui);
            });
        });

        let fill = colors::from_srgb(prefs.sidebar_color);
        let mut chosen = None;
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                ui.visuals_mut().override_text_color = Some(colors::text_on(fill));
                chosen = widgets::render_sidebar(&self.state.ctx, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            widgets::resource_page(&mut self.state.ctx, ui);
        });

        if let Some(schema) = chosen {
            self.open(schema);
        }

        // Run background jobs
        self.state.ctx.flush_commands();

        if self.state.ctx.state::<ResourceListCompute>().is_loading()
            || self.state.ctx.state::<MutationCompute>().is_in_flight()
        {
            ctx.request_repaint_after(PENDING_REPAINT);
        }
    }
}

impl eframe::App for DashboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = self.state.ctx.state::<Preferences>();
        storage.set_string(Preferences::STORAGE_KEY, prefs.to_json());
    }
}
