use std::ops::Range;

/// Page-size choices offered by the UI and accepted by the CLI.
pub const PAGE_SIZES: [usize; 5] = [5, 10, 25, 50, 100];

/// One-based page cursor over a collection whose length is passed to each call.
///
/// Navigation is clamped to `[1, max(total_pages, 1)]`, so an empty collection
/// shows page 1 of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: usize,
    per_page: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(super::DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self {
            current_page: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Changes the page size and goes back to page 1.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.current_page = 1;
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }

    fn last_page(&self, total: usize) -> usize {
        self.total_pages(total).max(1)
    }

    /// Pulls the current page back into range after the collection shrank.
    pub fn clamp(&mut self, total: usize) {
        self.current_page = self.current_page.clamp(1, self.last_page(total));
    }

    /// Index range of the current page, empty when out of range.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.current_page - 1).saturating_mul(self.per_page).min(total);
        let end = start.saturating_add(self.per_page).min(total);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.range(rows.len())]
    }

    pub fn go_to(&mut self, page: usize, total: usize) {
        self.current_page = page.clamp(1, self.last_page(total));
    }

    pub fn next(&mut self, total: usize) {
        self.go_to(self.current_page.saturating_add(1), total);
    }

    pub fn prev(&mut self, total: usize) {
        self.go_to(self.current_page.saturating_sub(1), total);
    }

    pub fn first(&mut self) {
        self.current_page = 1;
    }

    pub fn last(&mut self, total: usize) {
        self.current_page = self.last_page(total);
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, total: usize) -> bool {
        self.current_page < self.total_pages(total)
    }
}
