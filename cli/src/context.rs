//! State context initialization and task management utilities.

use anyhow::{Result, bail};
use bizdesk_business::{
    BusinessConfig, ListStatus, PathParams, ResourceListCompute, ResourceSchema, open_resource,
    reconcile,
};
use bizdesk_states::{StateCtx, Time};
use tracing::instrument;

/// Initialize `StateCtx` with the business states and commands.
pub fn build_state_ctx(config: BusinessConfig) -> StateCtx {
    let mut ctx = StateCtx::new();
    ctx.add_state(Time::default());
    bizdesk_business::install(&mut ctx, config);
    ctx
}

/// Flush commands and await all spawned tasks.
#[instrument(skip_all, name = "flush")]
pub async fn flush_and_await(ctx: &mut StateCtx) {
    ctx.sync_computes();
    ctx.flush_commands();
    ctx.wait_idle().await;
}

/// Opens `schema` and waits until its collection is in the table state.
#[instrument(skip_all, name = "load", fields(resource = %schema.name))]
pub async fn load_resource(
    ctx: &mut StateCtx,
    schema: &ResourceSchema,
    params: PathParams,
) -> Result<()> {
    open_resource(ctx, schema, params);
    flush_and_await(ctx).await;
    reconcile(ctx);

    match &ctx.state::<ResourceListCompute>().status {
        ListStatus::Loaded { records, .. } => {
            tracing::debug!(rows = records.len(), "loaded {}", schema.name);
            Ok(())
        }
        ListStatus::Error(message) => bail!("could not load {}: {message}", schema.name),
        ListStatus::Idle | ListStatus::Loading => {
            bail!("loading {} did not complete", schema.name)
        }
    }
}
