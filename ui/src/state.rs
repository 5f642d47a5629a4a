use bizdesk_business::{BusinessConfig, Preferences, install};
use bizdesk_states::{StateCtx, Time};

use crate::widgets::ResourcePageState;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl Default for State {
    fn default() -> Self {
        let config = BusinessConfig::from_env().unwrap_or_else(|err| {
            log::warn!("falling back to default config: {err}");
            BusinessConfig::default()
        });
        Self::with_config(config)
    }
}

impl State {
    pub fn with_config(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();

        ctx.add_state(Time::default());
        ctx.add_state(Preferences::default());
        ctx.add_state(ResourcePageState::default());
        install(&mut ctx, config);

        Self { ctx }
    }

    pub fn test(base_url: String) -> Self {
        Self::with_config(BusinessConfig::new(base_url))
    }
}
