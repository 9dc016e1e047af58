//! CSV export of the filtered transaction list.

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;

use super::{TransactionRow, TransactionTable};
use crate::errors::{Error, Result};
use crate::utils::format_utils::format_display_date;

pub const CSV_HEADERS: [&str; 8] = [
    "Transaction ID",
    "Date",
    "Scheme",
    "AMC",
    "Type",
    "Amount",
    "NAV",
    "Units",
];

/// `transactions_<YYYY-MM-DD>.csv` for the given day.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("transactions_{}.csv", now.format("%Y-%m-%d"))
}

fn csv_record(row: &TransactionRow) -> [String; 8] {
    [
        row.txn_id.clone(),
        format_display_date(&row.txn_date),
        row.scheme_name.clone(),
        row.amc_name.clone(),
        row.txn_type.clone(),
        row.txn_amount.normalize().to_string(),
        row.nav_at_txn.normalize().to_string(),
        row.units.normalize().to_string(),
    ]
}

/// Header line unquoted, every data field quoted, lines joined by `\n`
/// without a trailing newline.
pub fn rows_to_csv<'a, I>(rows: I) -> Result<String>
where
    I: IntoIterator<Item = &'a TransactionRow>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    let mut count = 0usize;
    for row in rows {
        writer.write_record(csv_record(row))?;
        count += 1;
    }
    let body = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    let body = String::from_utf8(body).map_err(|e| Error::Export(e.to_string()))?;
    debug!("Serialized {} transactions to CSV", count);

    let mut content = CSV_HEADERS.join(",");
    if !body.is_empty() {
        content.push('\n');
        content.push_str(body.trim_end_matches('\n'));
    }
    Ok(content)
}

impl TransactionTable {
    /// Every filtered and sorted row, regardless of the current page.
    pub fn to_csv(&self) -> Result<String> {
        rows_to_csv(self.filtered_rows())
    }
}
