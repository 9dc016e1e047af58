//! Transactions table: flatten, search, filter, sort, paginate, export.

mod transactions_export;
mod transactions_model;
mod transactions_table;


pub use transactions_export::{export_filename, rows_to_csv, CSV_HEADERS};
pub use transactions_model::*;
pub use transactions_table::{page_window, TransactionTable};
