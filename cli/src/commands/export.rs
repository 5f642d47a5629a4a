//! `bizdesk export` and `bizdesk print`: the filtered rows as CSV or HTML.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bizdesk_business::ResourceTableState;
use bizdesk_states::{StateCtx, Time};
use tracing::instrument;

use super::prepare_view;
use crate::cli::ViewArgs;
use crate::output::Output;

/// Where an export is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

impl Destination {
    /// `-` means stdout; nothing means `default_name` in the working directory.
    pub fn resolve(out: Option<PathBuf>, default_name: String) -> Self {
        match out {
            Some(path) if path == Path::new("-") => Self::Stdout,
            Some(path) => Self::File(path),
            None => Self::File(PathBuf::from(default_name)),
        }
    }
}

#[instrument(skip_all, name = "export", fields(resource = %view.resource))]
pub async fn run_export(
    ctx: &mut StateCtx,
    view: &ViewArgs,
    out: Option<PathBuf>,
) -> Result<Destination> {
    prepare_view(ctx, view).await?;
    let now = ctx.state::<Time>().now();
    let table = ctx.state::<ResourceTableState>();
    let destination = Destination::resolve(out, table.export_file_name(&now));
    write_output(&destination, &table.export_csv(), table.filtered_len())?;
    Ok(destination)
}

#[instrument(skip_all, name = "print", fields(resource = %view.resource))]
pub async fn run_print(
    ctx: &mut StateCtx,
    view: &ViewArgs,
    out: Option<PathBuf>,
) -> Result<Destination> {
    prepare_view(ctx, view).await?;
    let table = ctx.state::<ResourceTableState>();
    let destination = Destination::resolve(out, format!("{}_print.html", table.resource()));
    write_output(&destination, &table.print_html(), table.filtered_len())?;
    Ok(destination)
}

fn write_output(destination: &Destination, contents: &str, rows: usize) -> Result<()> {
    // Status lines go to stderr so stdout only carries the document.
    let out = Output::stderr();
    match destination {
        Destination::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(contents.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
        Destination::File(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            out.success(format!("Wrote {rows} row(s) to {}", path.display()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_means_stdout() {
        assert_eq!(
            Destination::resolve(Some(PathBuf::from("-")), "x.csv".to_owned()),
            Destination::Stdout
        );
        assert_eq!(
            Destination::resolve(None, "x.csv".to_owned()),
            Destination::File(PathBuf::from("x.csv"))
        );
    }
}
