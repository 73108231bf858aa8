//! Overdue bill collections: normalize bills from a read-only store,
//! filter and sort them, summarize the selection and export a PDF report.

pub mod bill;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod money;
pub mod pdf;
pub mod report;
pub mod source;

pub use bill::{project, Bill, Bucket, RawOverdueRecord, Stage};
pub use config::{Config, ReportSettings, SourceSettings};
pub use dashboard::{
    filter_bills, sort_bills, summarize, Dashboard, DashboardView, FilterState, LoadState,
    SortDirection, SortField, SortState, Summary,
};
pub use error::{OverdueError, Result};
pub use money::{format_amount, format_currency, parse_money, RawAmount};
pub use report::{export_report, ReportData};
pub use source::BillSource;
