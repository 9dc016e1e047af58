//! Search, filter, sort and paginate an investor's transactions.

use std::cell::OnceCell;

use super::{PageInfo, SortConfig, SortKey, TransactionRow};
use crate::constants::{FILTER_ALL, PAGE_WINDOW_SIZE, TRANSACTIONS_PAGE_SIZE};
use crate::investors::Portfolio;

/// Page numbers to show as buttons: at most five, centred on the current
/// page where possible.
pub fn page_window(current_page: usize, total_pages: usize) -> Vec<usize> {
    let count = total_pages.min(PAGE_WINDOW_SIZE);
    let first = if total_pages <= PAGE_WINDOW_SIZE || current_page <= 3 {
        1
    } else if current_page + 2 >= total_pages {
        total_pages + 1 - PAGE_WINDOW_SIZE
    } else {
        current_page - 2
    };
    (first..first + count).collect()
}

/// State of the transactions table on the investor detail view.
///
/// The filtered and sorted row order is computed on first read and reused
/// until the search text, type filter or sort changes.
#[derive(Debug, Clone)]
pub struct TransactionTable {
    rows: Vec<TransactionRow>,
    search: String,
    type_filter: String,
    sort: SortConfig,
    current_page: usize,
    page_size: usize,
    view: OnceCell<Vec<usize>>,
}

impl TransactionTable {
    pub fn new(rows: Vec<TransactionRow>) -> Self {
        Self {
            rows,
            search: String::new(),
            type_filter: FILTER_ALL.to_string(),
            sort: SortConfig::default(),
            current_page: 1,
            page_size: TRANSACTIONS_PAGE_SIZE,
            view: OnceCell::new(),
        }
    }

    pub fn from_portfolios(portfolios: &[Portfolio]) -> Self {
        Self::new(TransactionRow::flatten(portfolios))
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn type_filter(&self) -> &str {
        &self.type_filter
    }

    pub fn sort_config(&self) -> SortConfig {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Total number of transactions before filtering.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.current_page = 1;
        self.invalidate();
    }

    /// Exact transaction type, or `all`.
    pub fn set_type_filter(&mut self, txn_type: impl Into<String>) {
        self.type_filter = txn_type.into();
        self.current_page = 1;
        self.invalidate();
    }

    /// Column header click.
    pub fn request_sort(&mut self, key: SortKey) {
        self.set_sort(self.sort.toggled(key));
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        self.sort = sort;
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.view = OnceCell::new();
    }

    fn view(&self) -> &[usize] {
        self.view.get_or_init(|| {
            let needle = self.search.to_lowercase();
            let mut indices: Vec<usize> = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| needle.is_empty() || row.matches_search(&needle))
                .filter(|(_, row)| self.type_filter == FILTER_ALL || row.txn_type == self.type_filter)
                .map(|(i, _)| i)
                .collect();
            indices.sort_by(|&a, &b| self.sort.compare(&self.rows[a], &self.rows[b]));
            indices
        })
    }

    /// Filtered and sorted rows across all pages.
    pub fn filtered_rows(&self) -> Vec<&TransactionRow> {
        self.view().iter().map(|&i| &self.rows[i]).collect()
    }

    pub fn filtered_count(&self) -> usize {
        self.view().len()
    }

    pub fn total_pages(&self) -> usize {
        self.filtered_count().div_ceil(self.page_size)
    }

    pub fn current_page_rows(&self) -> Vec<&TransactionRow> {
        let start = (self.current_page - 1) * self.page_size;
        self.view()
            .iter()
            .skip(start)
            .take(self.page_size)
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Jumps to `page`, clamped to the available pages.
    pub fn go_to_page(&mut self, page: usize) {
        let last = self.total_pages().max(1);
        self.current_page = page.clamp(1, last);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    pub fn page_window(&self) -> Vec<usize> {
        page_window(self.current_page, self.total_pages())
    }

    pub fn page_info(&self) -> PageInfo {
        let total = self.filtered_count();
        let start = if total == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        };
        PageInfo {
            current_page: self.current_page,
            total_pages: self.total_pages(),
            start,
            end: (self.current_page * self.page_size).min(total),
            total,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_view_cached(&self) -> bool {
        self.view.get().is_some()
    }
}
