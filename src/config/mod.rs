//! Configuration management for the league core
//!
//! This module handles configuration loading from environment variables,
//! validation, and default values.

pub mod app;
pub mod rating;

// Re-export commonly used types
pub use app::{validate_config, AppConfig, StorageSettings};
pub use rating::RatingSettings;
