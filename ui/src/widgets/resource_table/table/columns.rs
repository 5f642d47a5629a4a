//! Column definitions for the resource table.

use bizdesk_business::Column;

pub const ACTIONS_WIDTH: f32 = 150.0;
pub const DATA_WIDTH: f32 = 160.0;
pub const MIN_DATA_WIDTH: f32 = 80.0;
pub const ROW_HEIGHT: f32 = 30.0;
pub const HEADER_HEIGHT: f32 = 28.0;

/// One layout column per visible schema column. Data columns are resizable
/// and clip their text; the actions column has a fixed width.
#[inline]
pub fn table_columns(columns: &[&Column]) -> Vec<egui_extras::Column> {
    columns
        .iter()
        .map(|column| {
            if column.is_actions() {
                egui_extras::Column::exact(ACTIONS_WIDTH)
            } else {
                egui_extras::Column::initial(DATA_WIDTH)
                    .at_least(MIN_DATA_WIDTH)
                    .resizable(true)
                    .clip(true)
            }
        })
        .collect()
}
