mod load_status;
mod preferences;
pub mod resource_table;
mod sidebar;

pub use load_status::load_status;
pub use preferences::{preferences_menu, theme_preference};
pub use resource_table::{Dialog, Notice, ResourcePageState, resource_page};
pub use sidebar::render_sidebar;
