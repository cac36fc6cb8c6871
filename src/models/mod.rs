pub mod mismatch;
pub mod report;

pub use mismatch::*;
pub use report::*;
