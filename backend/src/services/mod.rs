//! Services running the shared pipeline over the loaded dataset

pub mod analytics;
pub mod reporting;

pub use analytics::AnalyticsService;
pub use reporting::ReportingService;
