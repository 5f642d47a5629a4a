//! `bizdesk`: the resource tables of the dashboard from a terminal.

pub mod cli;
pub mod commands;
pub mod context;
pub mod output;
pub mod timing;

use anyhow::{Context as _, Result};
use bizdesk_business::BusinessConfig;
use ustr::Ustr;

use crate::cli::{Cli, Commands};
use crate::commands::path_params;
use crate::context::build_state_ctx;

/// Environment config with the command-line overrides applied.
pub fn configure(cli: &Cli) -> Result<BusinessConfig> {
    let mut config = BusinessConfig::from_env().context("Invalid BIZDESK_* environment")?;
    if let Some(base_url) = &cli.base_url {
        config.api_base_url = Ustr::from(base_url.trim_end_matches('/'));
    }
    if let Some(token) = &cli.token {
        config = config.with_auth_token(token.clone());
    }
    if let Some(user_id) = &cli.user_id {
        config = config.with_user_id(user_id.clone());
    }
    Ok(config)
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = configure(&cli)?;
    tracing::debug!(base_url = %config.api_base_url, "configured");
    let mut ctx = build_state_ctx(config);

    let result = match &cli.command {
        Commands::Resources => {
            commands::print_resources();
            Ok(())
        }
        Commands::List {
            view,
            page,
            per_page,
        } => commands::run_list(&mut ctx, view, *page, *per_page).await,
        Commands::Export { view, out } => commands::run_export(&mut ctx, view, out.clone())
            .await
            .map(drop),
        Commands::Print { view, out } => commands::run_print(&mut ctx, view, out.clone())
            .await
            .map(drop),
        Commands::Delete {
            resource,
            id,
            params,
            yes,
        } => commands::run_delete(&mut ctx, resource, id, path_params(params), *yes)
            .await
            .map(drop),
        Commands::Completions { shell } => {
            commands::generate_completions(*shell);
            Ok(())
        }
    };

    ctx.shutdown().await;
    result
}
