pub mod aggregate;
pub mod config;
pub mod csv;
pub mod discover;
pub mod display;
pub mod errors;
pub mod report;
pub mod runner;
pub mod types;
