pub mod address;
pub mod config;
pub mod dashboard;
mod env;
pub mod epochs;
pub mod log;
pub mod normalize;
mod performance;
pub mod report;
pub mod token_store;
pub mod units;

pub use address::{Address, ParseAddressError};
pub use config::{ConfigOverrides, DashboardConfig};
pub use dashboard::{DashboardApi, DashboardApiHttp, FetchError};
pub use epochs::EpochWindow;
pub use report::{build_report, render_report, Palette, ReportOptions, ValidatorReport};
