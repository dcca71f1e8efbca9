//! Display formatting for terminal output
//!
//! Record tables, detail views and small formatting helpers shared by the
//! reports.

pub mod record;
pub mod report;

pub use record::{format_category_list, format_record_date, format_record_details, format_record_table};
pub use report::{format_bar, format_percentage, truncate};
