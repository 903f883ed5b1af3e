pub mod generator;
pub mod stats;

pub use generator::{format_minutes, generate_report};
