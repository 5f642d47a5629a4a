//! `bizdesk delete`: confirm, then DELETE one record.

use std::io::IsTerminal as _;

use anyhow::{Context as _, Result, bail};
use bizdesk_business::{
    DeleteRecordCommand, MutationCompute, MutationInput, MutationStatus, PathParams,
};
use bizdesk_states::StateCtx;
use inquire::Confirm;
use tracing::instrument;
use ustr::Ustr;

use super::find_schema;
use crate::context::flush_and_await;
use crate::output::Output;

#[instrument(skip_all, name = "delete", fields(resource = %resource, id = %id))]
pub async fn run_delete(
    ctx: &mut StateCtx,
    resource: &str,
    id: &str,
    params: PathParams,
    yes: bool,
) -> Result<bool> {
    let out = Output::new();
    let schema = find_schema(resource)?;
    schema.ensure_writable()?;

    if !yes && !confirm(&format!("Delete {} `{id}`? This cannot be undone.", schema.title))? {
        out.dim("Cancelled.");
        return Ok(false);
    }

    ctx.add_state(MutationInput::delete(schema.name, params, Ustr::from(id)));
    ctx.enqueue_command::<DeleteRecordCommand>();
    flush_and_await(ctx).await;

    match &ctx.state::<MutationCompute>().status {
        MutationStatus::Done { .. } => {
            out.success(format!("Deleted {} {id}", schema.name));
            Ok(true)
        }
        MutationStatus::Failed { message, .. } => bail!("could not delete {id}: {message}"),
        MutationStatus::Idle | MutationStatus::InFlight(_) => bail!("delete did not complete"),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    if !std::io::stdin().is_terminal() {
        bail!("refusing to delete without --yes: stdin is not a terminal");
    }
    Confirm::new(prompt)
        .with_default(false)
        .prompt()
        .context("Failed to confirm")
}
