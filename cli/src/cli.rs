use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "bizdesk")]
#[command(about = "Terminal front-end for the Bizdesk resource tables", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend root, overrides BIZDESK_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Bearer token, overrides BIZDESK_AUTH_TOKEN
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Fills `{user_id}` in per-user endpoints, overrides BIZDESK_USER_ID
    #[arg(long, global = true)]
    pub user_id: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every resource the dashboard knows about
    Resources,
    /// Show one page of a resource table
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Page to show (1-based)
        #[arg(long, short = 'p', default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long)]
        per_page: Option<usize>,
    },
    /// Export the filtered rows as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file, `-` for stdout. Defaults to `<resource>_<timestamp>.csv`
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Write the printable HTML view of the filtered rows
    Print {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file, `-` for stdout. Defaults to `<resource>_print.html`
        #[arg(long, short = 'o')]
        out: Option<PathBuf>,
    },
    /// Delete one record by id
    Delete {
        /// Resource name, e.g. `invoices`
        resource: String,

        /// Record id
        id: String,

        /// Path parameter as `key=value`
        #[arg(long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// What to load and how to narrow it down.
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// Resource name, e.g. `invoices`
    pub resource: String,

    /// Case-insensitive filter over every field
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only these columns, comma separated
    #[arg(long, short = 'c', value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Path parameter as `key=value`
    #[arg(long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// Parses `key=value`.
pub fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), value.to_owned()))
        }
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}
