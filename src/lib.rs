//! Penguin measurements dashboard: data layer, configuration and errors.
//!
//! The egui front-end lives in the `penguin-dash` binary; everything here is
//! UI-independent so it can be tested and reused by the sample generator.

pub mod config;
pub mod data;
pub mod error;

pub use error::DashError;
