pub mod types;

pub use types::SpotcheckError;
