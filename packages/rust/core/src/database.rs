//! The JSON tool database written at the end of a run.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tooldb_shared::{Result, Tool, ToolDbError};
use tracing::info;

/// Format version of the database document.
pub const DATABASE_VERSION: &str = "1.0";

/// Which pipeline produced a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineKind {
    /// Repository search queries.
    Search,
    /// Curated markdown lists.
    Lists,
}

impl PipelineKind {
    fn description(self) -> &'static str {
        match self {
            PipelineKind::Search => "Developer tools database for conversational discovery",
            PipelineKind::Lists => "Developer tools database scraped from curated awesome lists",
        }
    }
}

/// The `metadata` object of the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseMetadata {
    pub version: String,
    pub tool_count: usize,
    pub min_stars: u64,
    pub description: String,
    pub pipeline: PipelineKind,
    pub generated_at: DateTime<Utc>,
    /// Curated lists that were processed (list pipeline only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

/// Root document: metadata plus ranked tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDatabase {
    pub metadata: DatabaseMetadata,
    pub tools: Vec<Tool>,
}

impl ToolDatabase {
    /// Wrap an already ranked tool list.
    pub fn new(pipeline: PipelineKind, min_stars: u64, tools: Vec<Tool>, sources: Vec<String>) -> Self {
        Self {
            metadata: DatabaseMetadata {
                version: DATABASE_VERSION.to_string(),
                tool_count: tools.len(),
                min_stars,
                description: pipeline.description().to_string(),
                pipeline,
                generated_at: Utc::now(),
                sources,
            },
            tools,
        }
    }
}

/// Write the database as pretty-printed JSON, creating parent directories.
pub fn write_database(db: &ToolDatabase, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ToolDbError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(db)
        .map_err(|e| ToolDbError::validation(format!("failed to serialize database: {e}")))?;
    std::fs::write(path, json).map_err(|e| ToolDbError::io(path, e))?;

    info!(path = %path.display(), tools = db.tools.len(), "database written");
    Ok(())
}
