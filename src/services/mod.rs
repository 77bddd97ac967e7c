pub mod analysis;
pub mod providers;
pub mod report;
pub mod sentiment;

pub use report::ReportBuilder;
