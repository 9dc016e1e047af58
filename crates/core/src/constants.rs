/// Rows per page in the transactions table
pub const TRANSACTIONS_PAGE_SIZE: usize = 20;

/// Maximum number of page-number buttons shown at once
pub const PAGE_WINDOW_SIZE: usize = 5;

/// One lakh in rupees
pub const LAKH: i64 = 100_000;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Investors onboarded within this many days count as new
pub const NEW_INVESTOR_WINDOW_DAYS: i64 = 30;

/// Gain/loss percentage below which an investor needs attention
pub const NEEDS_ATTENTION_THRESHOLD_PCT: i64 = -5;

/// Number of AMCs kept in the weightage breakdown
pub const TOP_AMC_LIMIT: usize = 10;

/// Number of AMCs shown on the investor detail view
pub const DETAIL_TOP_AMC_LIMIT: usize = 5;

/// Number of investors in the top and bottom performer lists
pub const PERFORMER_LIST_SIZE: usize = 5;

/// Key under which the signed-in user is persisted
pub const SESSION_STORAGE_KEY: &str = "mf360_user";

/// Filter value meaning "do not filter"
pub const FILTER_ALL: &str = "all";
