//! Spreadsheet (CSV) export and the printable HTML view of a table.
//!
//! Both only include visible data columns; the actions column never leaves the
//! screen.

use chrono::{DateTime, Utc};

use crate::record::Record;
use crate::schema::Column;
use crate::table::ColumnVisibility;

fn exported_columns<'a>(columns: &'a [Column], visibility: &ColumnVisibility) -> Vec<&'a Column> {
    visibility
        .visible_columns(columns)
        .into_iter()
        .filter(|column| !column.is_actions())
        .collect()
}

fn csv_field(text: &str) -> String {
    if text.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_owned()
    }
}

fn csv_line(fields: impl Iterator<Item = String>) -> String {
    let mut line = fields.map(|field| csv_field(&field)).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

/// CSV with a header row of column labels, one line per row. No rows gives a
/// header-only document.
pub fn to_csv<'a>(
    columns: &[Column],
    visibility: &ColumnVisibility,
    rows: impl IntoIterator<Item = &'a Record>,
) -> String {
    let columns = exported_columns(columns, visibility);
    let mut out = csv_line(columns.iter().map(|column| column.label.to_string()));
    for row in rows {
        out.push_str(&csv_line(
            columns.iter().map(|column| row.field_text(&column.key)),
        ));
    }
    out
}

/// `<resource>_<YYYYmmdd_HHMMSS>.csv`
pub fn export_file_name(resource: &str, now: &DateTime<Utc>) -> String {
    format!("{resource}_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const PRINT_STYLE: &str = "body{font-family:sans-serif;margin:24px}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:6px 8px;text-align:left;font-size:12px}\
th{background:#f3f3f3}";

/// Standalone HTML document with the visible columns of `rows`. Opening it in
/// a browser brings up the print dialog.
pub fn print_html<'a>(
    title: &str,
    columns: &[Column],
    visibility: &ColumnVisibility,
    rows: impl IntoIterator<Item = &'a Record>,
) -> String {
    let columns = exported_columns(columns, visibility);
    let title = html_escape(title);

    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>{PRINT_STYLE}</style>\n</head>\n<body onload=\"window.print()\">\n<h1>{title}</h1>\n<table>\n<thead><tr>"
    );
    for column in &columns {
        html.push_str(&format!("<th>{}</th>", html_escape(&column.label)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for column in &columns {
            html.push_str(&format!("<td>{}</td>", html_escape(&row.field_text(&column.key))));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::schema::ACTIONS_COLUMN;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name"),
            Column::new("note", "Note"),
            Column::new("amount", "Amount"),
            Column::new(ACTIONS_COLUMN, "Actions"),
        ]
    }

    fn rows() -> Vec<Record> {
        [
            json!({ "id": 1, "name": "Acme, Inc.", "note": "said \"hi\"", "amount": 10 }),
            json!({ "id": 2, "name": "Globex", "note": "line\nbreak", "amount": 2.5 }),
        ]
        .into_iter()
        .filter_map(Record::from_value)
        .collect()
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let cols = columns();
        let csv = to_csv(&cols, &ColumnVisibility::new(&cols), &rows());
        assert_eq!(
            csv,
            "Name,Note,Amount\r\n\"Acme, Inc.\",\"said \"\"hi\"\"\",10\r\nGlobex,\"line\nbreak\",2.5\r\n"
        );
    }

    #[test]
    fn csv_skips_hidden_columns() {
        let cols = columns();
        let mut visibility = ColumnVisibility::new(&cols);
        visibility.toggle("note");
        let csv = to_csv(&cols, &visibility, &rows());
        assert!(csv.starts_with("Name,Amount\r\n"));
        assert!(!csv.contains("hi"));
    }

    #[test]
    fn zero_rows_is_header_only() {
        let cols = columns();
        let csv = to_csv(&cols, &ColumnVisibility::new(&cols), &[]);
        assert_eq!(csv, "Name,Note,Amount\r\n");
    }

    #[test]
    fn file_name_carries_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(export_file_name("invoices", &at), "invoices_20240309_140507.csv");
    }

    #[test]
    fn print_view_drops_actions_and_escapes() {
        let cols = columns();
        let mut rows = rows();
        rows[1].set("name", json!("<b>Globex</b>"));

        let html = print_html("Clients & Co", &cols, &ColumnVisibility::new(&cols), &rows);
        assert!(html.contains("<title>Clients &amp; Co</title>"));
        assert!(html.contains("<th>Name</th><th>Note</th><th>Amount</th></tr>"));
        assert!(!html.contains("Actions"));
        assert!(html.contains("&lt;b&gt;Globex&lt;/b&gt;"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn print_view_opens_the_print_dialog() {
        let cols = columns();
        let html = print_html("Invoices", &cols, &ColumnVisibility::new(&cols), &rows());
        assert!(html.contains("<body onload=\"window.print()\">"));
    }
}
