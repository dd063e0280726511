//! Application configuration for tooldb.
//!
//! User config lives at `~/.tooldb/tooldb.toml`.
//! CLI flags override config file values, which override defaults. The
//! defaults alone reproduce the stock query set and source lists.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ToolDbError};
use crate::types::Category;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "tooldb.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".tooldb";

// ---------------------------------------------------------------------------
// Config structs (matching tooldb.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Query pipeline settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// List-scraping pipeline settings.
    #[serde(default)]
    pub lists: ListsConfig,

    /// Output artifact settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Override for the User-Agent header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[search]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Only repositories with more stars than this are requested.
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,

    /// Results requested per query (single page).
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Query → category pairs, run in order.
    #[serde(default = "default_queries")]
    pub queries: Vec<SearchQuery>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_stars: default_min_stars(),
            per_page: default_per_page(),
            queries: default_queries(),
        }
    }
}

/// `[[search.queries]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text GitHub search query, without the stars clause.
    pub query: String,
    /// Category assigned to every tool this query finds.
    pub category: Category,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, category: Category) -> Self {
        Self {
            query: query.into(),
            category,
        }
    }
}

fn default_min_stars() -> u64 {
    500
}
fn default_per_page() -> u32 {
    30
}

fn default_queries() -> Vec<SearchQuery> {
    use Category::*;
    vec![
        SearchQuery::new("topic:mcp-server", McpServer),
        SearchQuery::new("mcp server in:name,description", McpServer),
        SearchQuery::new("topic:cli-tool", CliTool),
        SearchQuery::new("cli tool developer in:description", CliTool),
        SearchQuery::new("terminal utility in:description", CliTool),
        SearchQuery::new("topic:macos-app", MacApp),
        SearchQuery::new("macos menu bar in:description", MacApp),
        SearchQuery::new("mac productivity in:description", MacApp),
        SearchQuery::new("topic:ai-tools", AiTooling),
        SearchQuery::new("llm developer tool in:description", AiTooling),
        SearchQuery::new("cursor ai in:description", AiTooling),
        SearchQuery::new("topic:developer-tools", DevTool),
        SearchQuery::new("developer productivity in:description", DevTool),
    ]
}

/// `[lists]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsConfig {
    /// Candidates with fewer stars than this are dropped.
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,

    /// Number of candidates between progress reports and courtesy pauses.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Length of the courtesy pause in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// Curated lists, processed in order. Earlier lists win duplicates.
    #[serde(default = "default_sources")]
    pub sources: Vec<ListSource>,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            min_stars: default_min_stars(),
            batch_size: default_batch_size(),
            pause_ms: default_pause_ms(),
            sources: default_sources(),
        }
    }
}

/// `[[lists.sources]]` entry: one markdown document inside a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSource {
    pub owner: String,
    pub repo: String,
    /// File path inside the repository.
    pub path: String,
    /// Category assigned to every tool found in this list.
    pub category: Category,
}

impl ListSource {
    pub fn new(owner: &str, repo: &str, path: &str, category: Category) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            path: path.into(),
            category,
        }
    }

    /// The `owner/repo` identifier recorded on each tool.
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn default_batch_size() -> usize {
    10
}
fn default_pause_ms() -> u64 {
    1000
}

fn default_sources() -> Vec<ListSource> {
    use Category::*;
    vec![
        ListSource::new("punkpeye", "awesome-mcp-servers", "README.md", McpServer),
        ListSource::new("agarrharr", "awesome-cli-apps", "readme.md", CliTool),
        ListSource::new("rothgar", "awesome-tuis", "README.md", CliTool),
        ListSource::new("jaywcjlove", "awesome-mac", "README.md", MacApp),
        ListSource::new("jamesmurdza", "awesome-ai-devtools", "README.md", AiTooling),
    ]
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the JSON database is written.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    /// Maximum number of tools kept after ranking.
    #[serde(default = "default_max_tools")]
    pub max_tools: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            max_tools: default_max_tools(),
        }
    }
}

fn default_output_path() -> PathBuf {
    PathBuf::from("tool-database.json")
}
fn default_max_tools() -> usize {
    100
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Reject values that would make a pipeline run meaningless.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.github.api_base).map_err(|e| {
            ToolDbError::config(format!("github.api_base '{}': {e}", self.github.api_base))
        })?;

        if self.search.min_stars == 0 || self.lists.min_stars == 0 {
            return Err(ToolDbError::config("min_stars must be greater than zero"));
        }
        if self.search.per_page == 0 || self.search.per_page > 100 {
            return Err(ToolDbError::config("search.per_page must be between 1 and 100"));
        }
        if self.lists.batch_size == 0 {
            return Err(ToolDbError::config("lists.batch_size must be greater than zero"));
        }
        if self.output.max_tools == 0 {
            return Err(ToolDbError::config("output.max_tools must be greater than zero"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.tooldb/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| ToolDbError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.tooldb/tooldb.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load and validate the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ToolDbError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| ToolDbError::config(format!("failed to parse {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let path = config_file_path()?;
    init_config_at(&path)?;
    Ok(path)
}

/// Write a default config file at `path`, creating parent directories.
pub fn init_config_at(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| ToolDbError::io(dir, e))?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ToolDbError::config(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ToolDbError::io(path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(())
}
