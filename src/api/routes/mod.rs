pub mod daybreaks;
pub mod health;
