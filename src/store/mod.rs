pub mod catalog;
pub mod loader;

pub use catalog::{ReportStore, StoredReport};
