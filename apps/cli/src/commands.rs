//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tooldb_core::{ProgressReporter, ToolDatabase, run_lists_pipeline, run_search_pipeline, write_database};
use tooldb_github::{ClientOptions, GithubClient};
use tooldb_shared::{
    AppConfig, init_config, init_config_at, load_config, load_config_from, truncate_chars,
};
use tracing::info;

/// Number of tools listed in the closing summary.
const SUMMARY_TOP_N: usize = 15;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// tooldb: discover developer tools on GitHub.
#[derive(Parser)]
#[command(
    name = "tooldb",
    version,
    about = "Build a ranked JSON database of developer tools from GitHub.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.tooldb/tooldb.toml.
    #[arg(long, global = true, env = "TOOLDB_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the fixed GitHub search queries and write the database.
    Search {
        /// Output path (defaults to [output].path from config).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scrape the curated awesome lists and write the database.
    Lists {
        /// Output path (defaults to [output].path from config).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = ["tooldb", "tooldb_core", "tooldb_github", "tooldb_markdown", "tooldb_shared"]
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Search { output } => cmd_search(config_path, output).await,
        Command::Lists { output } => cmd_lists(config_path, output).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(config_path),
            ConfigAction::Show => cmd_config_show(config_path),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

fn build_client(config: &AppConfig) -> Result<GithubClient> {
    let opts = ClientOptions::try_from(&config.github)?;
    Ok(GithubClient::new(&opts)?)
}

// ---------------------------------------------------------------------------
// Pipelines
// ---------------------------------------------------------------------------

async fn cmd_search(config_path: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let client = build_client(&config)?;
    let output = output.unwrap_or_else(|| config.output.path.clone());

    print_banner("Tool Discovery Database Builder (search)");
    info!(queries = config.search.queries.len(), output = %output.display(), "running search pipeline");

    let reporter = CliProgress::new();
    let db = run_search_pipeline(&client, &config, &reporter).await;

    finish(&db, &output)
}

async fn cmd_lists(config_path: Option<&Path>, output: Option<PathBuf>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let client = build_client(&config)?;
    let output = output.unwrap_or_else(|| config.output.path.clone());

    print_banner("Tool Discovery Database Builder (awesome lists)");
    info!(sources = config.lists.sources.len(), output = %output.display(), "running list pipeline");

    let reporter = CliProgress::new();
    let db = run_lists_pipeline(&client, &config, &reporter).await;

    finish(&db, &output)
}

fn print_banner(title: &str) {
    let rule = "=".repeat(60);
    println!("{rule}");
    println!("{title}");
    println!("{rule}");
}

/// Write the database and print the closing summary.
fn finish(db: &ToolDatabase, output: &Path) -> Result<()> {
    write_database(db, output)?;

    println!();
    println!("Final database: {} tools", db.tools.len());
    println!("✓ Saved to {}", output.display());

    if !db.tools.is_empty() {
        println!();
        println!("Top {SUMMARY_TOP_N} tools by stars:");
        for tool in db.tools.iter().take(SUMMARY_TOP_N) {
            println!(
                "  {:>6} ★  {}: {}...",
                group_thousands(tool.stars),
                tool.name,
                truncate_chars(&tool.description, 60)
            );
        }
    }

    Ok(())
}

/// `65432` → `65,432`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter: a spinner for the current phase plus
/// one printed line per finished query or list.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        spinner.set_style(style);
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self { spinner }
    }

    fn line(&self, text: String) {
        self.spinner.suspend(|| println!("{text}"));
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn query_finished(&self, query: &str, found: usize, total_unique: usize) {
        self.line(format!("  Searching: {query}"));
        self.line(format!("    Found {found} tools, total unique: {total_unique}"));
    }

    fn list_extracted(&self, source: &str, candidates: usize, rejected: usize) {
        if candidates == 0 && rejected == 0 {
            self.line(format!("  {source}: unavailable or empty"));
        } else {
            self.line(format!("  {source}: {candidates} candidates ({rejected} links skipped)"));
        }
    }

    fn candidate_progress(&self, current: usize, total: usize, kept: usize) {
        self.spinner
            .set_message(format!("Checking stars [{current}/{total}] kept {kept}"));
    }

    fn done(&self, _db: &ToolDatabase) {
        self.spinner.finish_and_clear();
    }
}

// ---------------------------------------------------------------------------
// Config commands
// ---------------------------------------------------------------------------

fn cmd_config_init(config_path: Option<&Path>) -> Result<()> {
    let path = match config_path {
        Some(p) => {
            init_config_at(p)?;
            p.to_path_buf()
        }
        None => init_config()?,
    };
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
