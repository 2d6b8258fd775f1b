/// Database configuration and connection management
pub mod database;

/// Run plan loading from taskstock.toml
pub mod plan;
