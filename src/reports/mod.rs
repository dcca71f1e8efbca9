//! Aggregation engine and reports
//!
//! Pure functions over one owner's records: summary totals, category
//! breakdowns, time-bucketed trends and the filtered register. Nothing here
//! does I/O except the `export_csv` writers; every report is recomputed
//! from its input on each call.

pub mod breakdown;
pub mod months;
pub mod quality;
pub mod register;
pub mod summary;
pub mod trend;

pub use breakdown::{
    compute_category_breakdown, overview_pair, BreakdownKind, BreakdownReport, CategoryTotal,
};
pub use months::{available_months, MonthEntry, MonthsReport};
pub use quality::{count_unresolved, DataQuality};
pub use register::{
    distinct_categories, filter_by_category, filter_records, recent_records, FilterOutcome,
    RegisterReport,
};
pub use summary::{compute_summary, Summary};
pub use trend::{compute_time_series, TimeSeries, TrendPoint, TrendReport};
