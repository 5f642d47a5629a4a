//! Business layer of the Bizdesk dashboard.
//!
//! A resource page is described by a [`ResourceSchema`] from the [`catalog`]:
//! its columns, its edit form and its REST endpoint. Everything else is generic:
//!
//! - [`RefreshResourceCommand`] loads the collection into [`ResourceListCompute`];
//! - [`ResourceTableState`] filters, paginates and hides columns on the client;
//! - [`DeleteRecordCommand`] and [`SaveRecordCommand`] mutate single rows;
//! - [`export`] turns the current view into CSV or a printable page.
//!
//! Front-ends call [`install`] once and then drive the [`StateCtx`].

pub mod api;
pub mod catalog;
mod commands;
mod config;
pub mod envelope;
mod error;
pub mod export;
mod form;
pub mod http;
mod preferences;
mod record;
mod schema;
mod table;

pub use commands::{
    DeleteRecordCommand, ListStatus, MutationCompute, MutationInput, MutationKind,
    MutationOutcome, MutationStatus, RefreshResourceCommand, ResourceInput, ResourceListCompute,
    SaveRecordCommand,
};
pub use config::{BusinessConfig, DEFAULT_API_BASE_URL, ENV_PREFIX};
pub use error::{ApiError, ApiResult, ConfigError};
pub use form::{FieldError, FieldValue, FormDraft, ValidationErrors};
pub use preferences::{Preferences, Theme};
pub use record::{Record, value_text};
pub use schema::{
    ACTIONS_COLUMN, Column, EndpointDescriptor, FieldKind, FormField, PathParams, ResourceSchema,
};
pub use table::{
    ColumnVisibility, DEFAULT_PAGE_SIZE, PAGE_SIZES, Paginator, ResourceTableState, SearchQuery,
};

use bizdesk_states::StateCtx;

/// Registers the config, every input/compute and every command.
pub fn install(ctx: &mut StateCtx, config: BusinessConfig) {
    ctx.add_state(config);
    ctx.add_state(ResourceInput::default());
    ctx.add_state(ResourceListCompute::default());
    ctx.add_state(MutationInput::default());
    ctx.add_state(MutationCompute::default());
    ctx.add_state(ResourceTableState::default());

    ctx.record_command(RefreshResourceCommand);
    ctx.record_command(DeleteRecordCommand);
    ctx.record_command(SaveRecordCommand);
}

/// Points the table and the loader at `schema`, resetting the table's view state.
pub fn open_resource(ctx: &mut StateCtx, schema: &ResourceSchema, params: PathParams) {
    let config = ctx.state::<BusinessConfig>().clone();
    ctx.add_state(ResourceTableState::new(schema, config.page_size));
    ctx.add_state(
        ResourceInput {
            resource: Some(schema.name),
            params,
        }
        .with_config_params(&config),
    );
    ctx.add_state(MutationCompute::default());
    ctx.dispatch::<RefreshResourceCommand>();
}

/// Applies a newly loaded collection or a finished mutation to the table. A
/// mutation also reloads the collection.
///
/// Call once per frame after [`StateCtx::sync_computes`]. Returns the applied
/// mutation outcome, if any.
pub fn reconcile(ctx: &mut StateCtx) -> Option<MutationOutcome> {
    let resource = ctx.state::<ResourceTableState>().resource();

    let list = ctx.state::<ResourceListCompute>();
    let loaded = list.generation();
    if list.is_for(&resource)
        && loaded.is_some()
        && loaded != ctx.state::<ResourceTableState>().loaded_generation()
    {
        let list = list.clone();
        ctx.update::<ResourceTableState>(|table| {
            table.sync_from(&list);
        });
    }

    let mutation = ctx.state::<MutationCompute>();
    if !matches!(mutation.status, MutationStatus::Done { .. }) {
        return None;
    }
    let for_this_table = mutation.resource == Some(resource);

    let mut outcome = None;
    ctx.update::<MutationCompute>(|mutation| outcome = mutation.take_outcome());
    let outcome = outcome.filter(|_| for_this_table)?;

    ctx.update::<ResourceTableState>(|table| table.apply_outcome(outcome.clone()));
    ctx.dispatch::<RefreshResourceCommand>();
    Some(outcome)
}
