pub mod config;
pub mod discount;
pub mod error;
pub mod telemetry;
