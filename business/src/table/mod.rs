//! Client-side view state of one resource table.
//!
//! The pipeline is fixed: collection -> search filter -> paginator -> visible
//! columns. Pagination always runs over the filtered rows, so the page count
//! follows the search box.

mod paginate;
mod search;
mod visibility;

pub use paginate::{PAGE_SIZES, Paginator};
pub use search::SearchQuery;
pub use visibility::ColumnVisibility;

use bizdesk_states::State;
use chrono::{DateTime, Utc};
use ustr::Ustr;

use crate::commands::{ListStatus, MutationOutcome, ResourceListCompute};
use crate::export;
use crate::record::Record;
use crate::schema::{Column, ResourceSchema};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub struct ResourceTableState {
    resource: Ustr,
    title: Ustr,
    columns: Vec<Column>,
    rows: Vec<Record>,
    visibility: ColumnVisibility,
    search: SearchQuery,
    paginator: Paginator,
    /// Generation of the last applied refresh.
    loaded_generation: Option<u64>,
    fetched_at: Option<DateTime<Utc>>,
}

impl State for ResourceTableState {}

impl Default for ResourceTableState {
    fn default() -> Self {
        Self {
            resource: Ustr::default(),
            title: Ustr::default(),
            columns: Vec::new(),
            rows: Vec::new(),
            visibility: ColumnVisibility::default(),
            search: SearchQuery::default(),
            paginator: Paginator::default(),
            loaded_generation: None,
            fetched_at: None,
        }
    }
}

impl ResourceTableState {
    /// Fresh state for `schema`: no rows, every column visible, page 1.
    pub fn new(schema: &ResourceSchema, per_page: usize) -> Self {
        Self {
            resource: schema.name,
            title: schema.title,
            columns: schema.columns.clone(),
            visibility: ColumnVisibility::new(&schema.columns),
            paginator: Paginator::new(per_page),
            ..Self::default()
        }
    }

    pub fn resource(&self) -> Ustr {
        self.resource
    }

    pub fn title(&self) -> Ustr {
        self.title
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn loaded_generation(&self) -> Option<u64> {
        self.loaded_generation
    }

    /// Replaces the whole collection.
    pub fn set_rows(&mut self, rows: Vec<Record>) {
        self.rows = rows;
        self.clamp_page();
    }

    /// Takes a newly loaded collection from `list` if it belongs to this table and
    /// was not applied yet. Returns whether anything changed.
    pub fn sync_from(&mut self, list: &ResourceListCompute) -> bool {
        if !list.is_for(&self.resource) {
            return false;
        }
        match &list.status {
            ListStatus::Loaded {
                records,
                fetched_at,
                generation,
            } if self.loaded_generation != Some(*generation) => {
                self.loaded_generation = Some(*generation);
                self.fetched_at = Some(*fetched_at);
                self.set_rows(records.clone());
                true
            }
            _ => false,
        }
    }

    pub fn search(&self) -> &SearchQuery {
        &self.search
    }

    /// New query; the view goes back to page 1.
    pub fn set_search(&mut self, query: impl Into<String>) {
        let query = SearchQuery::new(query);
        if query != self.search {
            self.search = query;
            self.paginator.first();
        }
    }

    pub fn filtered(&self) -> Vec<&Record> {
        self.search.filter(&self.rows)
    }

    pub fn filtered_len(&self) -> usize {
        self.rows.iter().filter(|row| self.search.matches(row)).count()
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&Record> {
        let filtered = self.filtered();
        let range = self.paginator.range(filtered.len());
        filtered[range].to_vec()
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn per_page(&self) -> usize {
        self.paginator.per_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered_len())
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.paginator.set_per_page(per_page);
    }

    pub fn next_page(&mut self) {
        let total = self.filtered_len();
        self.paginator.next(total);
    }

    pub fn prev_page(&mut self) {
        let total = self.filtered_len();
        self.paginator.prev(total);
    }

    pub fn first_page(&mut self) {
        self.paginator.first();
    }

    pub fn last_page(&mut self) {
        let total = self.filtered_len();
        self.paginator.last(total);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let total = self.filtered_len();
        self.paginator.go_to(page, total);
    }

    fn clamp_page(&mut self) {
        let total = self.filtered_len();
        self.paginator.clamp(total);
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn toggle_column(&mut self, key: &str) {
        self.visibility.toggle(key);
    }

    pub fn show_all_columns(&mut self) {
        self.visibility.show_all();
    }

    pub fn show_only_columns<S: AsRef<str>>(&mut self, keys: &[S]) {
        self.visibility.show_only(keys);
    }

    pub fn visible_columns(&self) -> Vec<&Column> {
        self.visibility.visible_columns(&self.columns)
    }

    /// Drops the row with `id`. Returns whether one was removed.
    pub fn remove_record(&mut self, id: &str) -> bool {
        let Some(index) = self.rows.iter().position(|row| row.has_id(id)) else {
            return false;
        };
        self.rows.remove(index);
        self.clamp_page();
        true
    }

    /// Merges `record` into the row with the same id, or appends it.
    pub fn upsert_record(&mut self, record: Record) {
        let index = record
            .id()
            .and_then(|id| self.rows.iter().position(|row| row.has_id(&id)));
        match index {
            Some(index) => self.rows[index].merge(record),
            None => self.rows.push(record),
        }
        self.clamp_page();
    }

    pub fn apply_outcome(&mut self, outcome: MutationOutcome) {
        match outcome {
            MutationOutcome::Deleted(id) => {
                self.remove_record(&id);
            }
            MutationOutcome::Saved(record) => self.upsert_record(record),
        }
    }

    /// CSV of every filtered row (not just the current page).
    pub fn export_csv(&self) -> String {
        export::to_csv(&self.columns, &self.visibility, self.filtered())
    }

    pub fn export_file_name(&self, now: &DateTime<Utc>) -> String {
        export::export_file_name(&self.resource, now)
    }

    /// Printable HTML of every filtered row.
    pub fn print_html(&self) -> String {
        export::print_html(&self.title, &self.columns, &self.visibility, self.filtered())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::catalog;

    fn numbered(count: usize) -> Vec<Record> {
        (1..=count)
            .filter_map(|n| {
                Record::from_value(json!({
                    "id": n,
                    "title": format!("Task {n}"),
                    "status": if n % 2 == 0 { "done" } else { "todo" },
                }))
            })
            .collect()
    }

    fn table(count: usize, per_page: usize) -> ResourceTableState {
        let mut table = ResourceTableState::new(catalog::find("tasks").unwrap(), per_page);
        table.set_rows(numbered(count));
        table
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter()
            .map(|row| row.id().map(|id| id.to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn twelve_rows_five_per_page() {
        let mut table = table(12, 5);
        assert_eq!(table.total_pages(), 3);
        assert_eq!(ids(&table.page_rows()), ["1", "2", "3", "4", "5"]);

        table.last_page();
        assert_eq!(table.current_page(), 3);
        assert_eq!(ids(&table.page_rows()), ["11", "12"]);
    }

    #[test]
    fn search_resets_page_and_paginates_filtered_rows() {
        let mut table = table(12, 5);
        table.go_to_page(3);

        table.set_search("DONE");
        assert_eq!(table.current_page(), 1);
        assert_eq!(table.filtered_len(), 6);
        assert_eq!(table.total_pages(), 2);
        assert_eq!(ids(&table.page_rows()), ["2", "4", "6", "8", "10"]);
    }

    #[test]
    fn no_match_gives_zero_pages_on_page_one() {
        let mut table = table(12, 5);
        table.set_search("nothing like this");
        assert!(table.page_rows().is_empty());
        assert_eq!(table.total_pages(), 0);
        assert_eq!(table.current_page(), 1);

        table.next_page();
        assert_eq!(table.current_page(), 1);
    }

    #[test]
    fn empty_search_is_the_whole_collection() {
        let mut table = table(7, 10);
        table.set_search("");
        assert_eq!(table.filtered_len(), 7);
    }

    #[test]
    fn delete_removes_exactly_one_row() {
        let mut table = table(12, 5);
        assert!(table.remove_record("4"));
        assert_eq!(table.rows().len(), 11);
        assert!(table.rows().iter().all(|row| !row.has_id("4")));
        assert!(!table.remove_record("4"));
        assert_eq!(table.rows().len(), 11);
    }

    #[test]
    fn delete_on_last_page_clamps() {
        let mut table = table(11, 5);
        table.last_page();
        assert_eq!(table.current_page(), 3);
        table.apply_outcome(MutationOutcome::Deleted(Ustr::from("11")));
        assert_eq!(table.current_page(), 2);
    }

    #[test]
    fn saved_records_merge_by_id_or_append() {
        let mut table = table(3, 5);
        let edited = Record::from_value(json!({ "id": "2", "status": "blocked" })).unwrap();
        table.apply_outcome(MutationOutcome::Saved(edited));
        assert_eq!(table.rows().len(), 3);
        assert_eq!(table.rows()[1].field_text("status"), "blocked");
        assert_eq!(table.rows()[1].field_text("title"), "Task 2");

        let created = Record::from_value(json!({ "id": 99, "title": "New" })).unwrap();
        table.apply_outcome(MutationOutcome::Saved(created));
        assert_eq!(table.rows().len(), 4);
    }

    #[test]
    fn sync_applies_each_load_once() {
        let mut table = ResourceTableState::new(catalog::find("tasks").unwrap(), 10);
        let list = ResourceListCompute {
            resource: Some(Ustr::from("tasks")),
            status: ListStatus::Loaded {
                records: numbered(3),
                fetched_at: Utc::now(),
                generation: 1,
            },
        };

        assert!(table.sync_from(&list));
        assert_eq!(table.rows().len(), 3);

        table.remove_record("1");
        assert!(!table.sync_from(&list));
        assert_eq!(table.rows().len(), 2);
    }

    #[test]
    fn sync_ignores_other_resources() {
        let mut table = ResourceTableState::new(catalog::find("tasks").unwrap(), 10);
        let list = ResourceListCompute {
            resource: Some(Ustr::from("notes")),
            status: ListStatus::Loaded {
                records: numbered(3),
                fetched_at: Utc::now(),
                generation: 1,
            },
        };
        assert!(!table.sync_from(&list));
        assert!(table.rows().is_empty());
    }

    #[test]
    fn export_uses_filtered_rows_and_visible_columns() {
        let mut table = table(4, 2);
        table.set_search("todo");
        table.toggle_column("assigned_to");
        table.toggle_column("priority");
        table.toggle_column("due_date");

        let csv = table.export_csv();
        assert_eq!(csv, "Title,Status\r\nTask 1,todo\r\nTask 3,todo\r\n");
    }

    #[test]
    fn export_of_empty_view_is_header_only() {
        let mut table = table(4, 2);
        table.set_search("zzz");
        assert_eq!(table.export_csv().lines().count(), 1);
    }

    #[test]
    fn toggling_twice_restores_columns() {
        let mut table = table(1, 5);
        let before = table.visibility().clone();
        table.toggle_column("status");
        table.toggle_column("status");
        assert_eq!(table.visibility(), &before);
    }
}
