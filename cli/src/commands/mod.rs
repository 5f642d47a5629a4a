//! Command implementations for the Bizdesk CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod completions;
pub mod delete;
pub mod export;
pub mod list;
pub mod resources;

pub use completions::generate_completions;
pub use delete::run_delete;
pub use export::{Destination, run_export, run_print};
pub use list::run_list;
pub use resources::print_resources;

use anyhow::{Context as _, Result, bail};
use bizdesk_business::{PathParams, ResourceSchema, ResourceTableState, catalog};
use bizdesk_states::StateCtx;

use crate::cli::ViewArgs;
use crate::context::load_resource;

/// Looks `name` up in the catalog.
pub fn find_schema(name: &str) -> Result<&'static ResourceSchema> {
    catalog::find(name).with_context(|| {
        let known: Vec<&str> = catalog::all().iter().map(|schema| schema.name.as_str()).collect();
        format!("unknown resource `{name}` (known: {})", known.join(", "))
    })
}

pub fn path_params(pairs: &[(String, String)]) -> PathParams {
    pairs.iter().cloned().collect()
}

/// Loads the resource named in `view` and applies its search and column
/// selection to the table state.
pub async fn prepare_view(ctx: &mut StateCtx, view: &ViewArgs) -> Result<&'static ResourceSchema> {
    let schema = find_schema(&view.resource)?;
    let known: Vec<&str> = schema
        .data_columns()
        .map(|column| column.key.as_str())
        .collect();
    if let Some(unknown) = view
        .columns
        .iter()
        .find(|key| !known.contains(&key.as_str()))
    {
        bail!(
            "unknown column `{unknown}` for {} (columns: {})",
            schema.name,
            known.join(", ")
        );
    }

    load_resource(ctx, schema, path_params(&view.params)).await?;

    let search = view.search.clone().unwrap_or_default();
    let columns = view.columns.clone();
    ctx.update::<ResourceTableState>(|table| {
        table.set_search(search);
        if !columns.is_empty() {
            table.show_only_columns(&columns);
        }
    });
    Ok(schema)
}
