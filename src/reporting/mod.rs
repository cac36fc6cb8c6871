pub mod aggregate;
pub mod formatter;
pub mod series;
pub mod summary;

pub use aggregate::{MismatchCounts, StatusCounts, TypeStatusCounts};
pub use summary::{ReportSummary, Trend, TypeBreakdown};
