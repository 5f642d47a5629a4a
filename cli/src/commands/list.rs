//! `bizdesk list`: one page of a resource table.

use anyhow::Result;
use bizdesk_business::{Column, ResourceTableState};
use bizdesk_states::StateCtx;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::instrument;

use super::prepare_view;
use crate::cli::ViewArgs;
use crate::output::Output;

/// Longest cell shown before truncation.
const MAX_CELL_CHARS: usize = 32;

#[instrument(skip_all, name = "list", fields(resource = %view.resource, page = page))]
pub async fn run_list(
    ctx: &mut StateCtx,
    view: &ViewArgs,
    page: usize,
    per_page: Option<usize>,
) -> Result<()> {
    let out = Output::new();
    prepare_view(ctx, view).await?;

    ctx.update::<ResourceTableState>(|table| {
        if let Some(per_page) = per_page {
            table.set_per_page(per_page);
        }
        table.go_to_page(page);
    });

    let table = ctx.state::<ResourceTableState>();
    if page > table.current_page() && table.total_pages() > 0 {
        out.warning(format!(
            "page {page} is past the end, showing page {}",
            table.current_page()
        ));
    }

    out.header(table.title());
    if table.filtered_len() == 0 {
        out.dim("No records found");
    } else {
        out.print(render_page(table));
    }
    out.page_footer(
        table.current_page(),
        table.total_pages(),
        table.filtered_len(),
    );
    Ok(())
}

/// The current page as a rounded table of the visible data columns.
pub fn render_page(table: &ResourceTableState) -> String {
    let columns: Vec<&Column> = table
        .visible_columns()
        .into_iter()
        .filter(|column| !column.is_actions())
        .collect();

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|column| column.label.to_string()));
    for record in table.page_rows() {
        builder.push_record(
            columns
                .iter()
                .map(|column| truncate(&record.field_text(&column.key), MAX_CELL_CHARS)),
        );
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    rendered.to_string()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_owned()
    }
}
