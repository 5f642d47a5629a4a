//! `bizdesk resources`: the catalog as a table.

use bizdesk_business::catalog;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::output::Output;

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Access")]
    access: &'static str,
}

pub fn render_resources() -> String {
    let rows: Vec<ResourceRow> = catalog::all()
        .iter()
        .map(|schema| ResourceRow {
            name: schema.name.to_string(),
            title: schema.title.to_string(),
            endpoint: schema.endpoint.path.to_owned(),
            access: if schema.read_only {
                "read-only"
            } else {
                "read-write"
            },
        })
        .collect();

    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn print_resources() {
    let out = Output::new();
    out.print(render_resources());
    out.dim(format!("{} resource(s)", catalog::all().len()));
}
