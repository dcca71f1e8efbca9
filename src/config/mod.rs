//! Configuration module for expense-tracker
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Ordered field fallback chains for legacy documents

pub mod paths;
pub mod settings;

pub use paths::TrackerPaths;
pub use settings::Settings;
