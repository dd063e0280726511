//! Shared types, error model, and configuration for tooldb.
//!
//! This crate is the foundation depended on by all other tooldb crates.
//! It provides:
//! - [`ToolDbError`]: the unified error type
//! - Domain types ([`Tool`], [`Category`], [`TagSet`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, GithubConfig, ListSource, ListsConfig, OutputConfig, SearchConfig, SearchQuery,
    config_dir, config_file_path, init_config, init_config_at, load_config, load_config_from,
};
pub use error::{Result, ToolDbError};
pub use types::{
    Category, MAX_DESCRIPTION_CHARS, MIN_DESCRIPTION_CHARS, REPO_HOST, TagSet, Tool, truncate_chars,
};
