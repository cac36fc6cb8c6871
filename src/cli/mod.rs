pub mod commands;
pub mod serve;
pub mod summary;

pub use commands::{Cli, Commands};
