//! Query pipeline: fixed search queries → tagged, deduplicated, ranked tools.

use std::collections::HashSet;

use tooldb_github::{RawRepo, RepoSource};
use tooldb_shared::{AppConfig, Category, MIN_DESCRIPTION_CHARS, SearchQuery, Tool};
use tracing::{info, instrument, warn};

use crate::database::{PipelineKind, ToolDatabase};
use crate::progress::ProgressReporter;
use crate::rank::rank_and_truncate;
use crate::tags::{SEARCH_TAG_CAP, generate_tags};

/// Run one search with the stars clause appended.
///
/// Never fails: transport or decoding errors are logged and yield no results,
/// so one bad query cannot abort a run.
pub async fn run_search<S: RepoSource>(
    source: &S,
    query: &str,
    min_stars: u64,
    per_page: u32,
) -> Vec<RawRepo> {
    let full_query = format!("{query} stars:>{min_stars}");
    match source.search_repositories(&full_query, per_page).await {
        Ok(items) => items,
        Err(e) => {
            warn!(query = %full_query, error = %e, "search failed, treating as no results");
            Vec::new()
        }
    }
}

/// Turn a search hit into a tool, or `None` for forks, bare descriptions and
/// repositories under the star floor.
pub fn tool_from_repo(repo: &RawRepo, category: Category, min_stars: u64) -> Option<Tool> {
    if repo.fork || repo.stargazers_count < min_stars {
        return None;
    }

    let description = repo.description.as_deref().unwrap_or_default();
    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        return None;
    }

    let tags = generate_tags(description, &repo.topics, category, SEARCH_TAG_CAP);
    Some(Tool::new(
        &repo.name,
        description,
        &repo.html_url,
        repo.stargazers_count,
        category,
        tags,
    ))
}

/// Search one query and convert its hits, keeping the source's order.
#[instrument(skip(source, query), fields(query = %query.query, category = %query.category))]
pub async fn search_category<S: RepoSource>(
    source: &S,
    query: &SearchQuery,
    min_stars: u64,
    per_page: u32,
) -> Vec<Tool> {
    run_search(source, &query.query, min_stars, per_page)
        .await
        .iter()
        .filter_map(|repo| tool_from_repo(repo, query.category, min_stars))
        .collect()
}

/// Run every configured query and build the ranked database.
#[instrument(skip_all, fields(queries = config.search.queries.len()))]
pub async fn run_search_pipeline<S: RepoSource>(
    source: &S,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> ToolDatabase {
    let search = &config.search;
    info!(min_stars = search.min_stars, "starting search pipeline");

    progress.phase("Searching GitHub");
    let mut all_tools: Vec<Tool> = Vec::new();
    let mut seen_urls: HashSet<String> = HashSet::new();

    for query in &search.queries {
        let tools = search_category(source, query, search.min_stars, search.per_page).await;
        let found = tools.len();

        for tool in tools {
            if seen_urls.insert(tool.url.clone()) {
                all_tools.push(tool);
            }
        }

        info!(query = %query.query, found, unique = all_tools.len(), "query finished");
        progress.query_finished(&query.query, found, all_tools.len());
    }

    progress.phase("Ranking");
    rank_and_truncate(&mut all_tools, config.output.max_tools);

    let db = ToolDatabase::new(PipelineKind::Search, search.min_stars, all_tools, Vec::new());
    info!(tools = db.tools.len(), "search pipeline complete");
    progress.done(&db);
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::SilentProgress;
    use crate::testing::{FakeSource, repo};

    fn config_with(queries: Vec<SearchQuery>) -> AppConfig {
        let mut config = AppConfig::default();
        config.search.queries = queries;
        config
    }

    #[test]
    fn forks_and_short_descriptions_are_skipped() {
        let mut fork = repo("forked", "o", 900, Some("A perfectly fine description"));
        fork.fork = true;
        assert!(tool_from_repo(&fork, Category::CliTool, 500).is_none());
        assert!(tool_from_repo(&repo("tiny", "o", 900, Some("too short")), Category::CliTool, 500).is_none());
        assert!(tool_from_repo(&repo("none", "o", 900, None), Category::CliTool, 500).is_none());
        assert!(tool_from_repo(&repo("ok", "o", 900, Some("ten chars!")), Category::CliTool, 500).is_some());
    }

    #[test]
    fn tool_carries_topics_and_category_tags() {
        let mut hit = repo("lazygit", "jesseduffield", 50000, Some("Simple terminal UI for git commands"));
        hit.topics = vec!["git-client".into(), "tui".into()];
        let tool = tool_from_repo(&hit, Category::CliTool, 500).unwrap();

        let tags: Vec<&str> = tool.tags.iter().collect();
        assert_eq!(tags, ["cli-tool", "git client", "tui", "cli", "git"]);
        assert_eq!(tool.url, "https://github.com/jesseduffield/lazygit");
        assert!(tool.source_list.is_none());
    }

    #[tokio::test]
    async fn query_gets_stars_clause() {
        let source = FakeSource::new().with_search("topic:cli-tool stars:>500", vec![]);
        let hits = run_search(&source, "topic:cli-tool", 500, 30).await;
        assert!(hits.is_empty());
        assert_eq!(source.calls(), ["search topic:cli-tool stars:>500 (30)"]);
    }

    #[tokio::test]
    async fn search_category_keeps_source_order() {
        let source = FakeSource::new().with_search(
            "topic:mcp-server stars:>500",
            vec![
                repo("b", "o", 3000, Some("Second most starred server")),
                repo("a", "o", 9000, Some("Most starred MCP server")),
            ],
        );
        let query = SearchQuery::new("topic:mcp-server", Category::McpServer);
        let tools = search_category(&source, &query, 500, 30).await;
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[tokio::test]
    async fn failing_query_does_not_stop_later_ones() {
        let source = FakeSource::new().with_search(
            "topic:developer-tools stars:>500",
            vec![repo("just", "casey", 20000, Some("Just a command runner"))],
        );
        let config = config_with(vec![
            SearchQuery::new("topic:broken", Category::CliTool),
            SearchQuery::new("topic:developer-tools", Category::DevTool),
        ]);

        let db = run_search_pipeline(&source, &config, &SilentProgress).await;
        assert_eq!(source.calls().len(), 2);
        assert_eq!(db.tools.len(), 1);
        assert_eq!(db.tools[0].name, "just");
        assert_eq!(db.metadata.tool_count, 1);
        assert_eq!(db.metadata.pipeline, PipelineKind::Search);
    }

    #[tokio::test]
    async fn duplicate_urls_keep_first_category() {
        let shared = repo("fzf", "junegunn", 65000, Some("A command-line fuzzy finder"));
        let source = FakeSource::new()
            .with_search("topic:cli-tool stars:>500", vec![shared.clone()])
            .with_search("terminal utility in:description stars:>500", vec![shared]);
        let config = config_with(vec![
            SearchQuery::new("topic:cli-tool", Category::CliTool),
            SearchQuery::new("terminal utility in:description", Category::DevTool),
        ]);

        let db = run_search_pipeline(&source, &config, &SilentProgress).await;
        assert_eq!(db.tools.len(), 1);
        assert_eq!(db.tools[0].category, Category::CliTool);
    }

    #[tokio::test]
    async fn output_is_ranked_and_capped() {
        let batch_a: Vec<RawRepo> = (0..80)
            .map(|i| repo(&format!("a{i}"), "o", 600 + i, Some("Tool from the first batch")))
            .collect();
        let batch_b: Vec<RawRepo> = (0..80)
            .map(|i| repo(&format!("b{i}"), "o", 5000 + i, Some("Tool from the second batch")))
            .collect();
        let source = FakeSource::new()
            .with_search("q1 stars:>500", batch_a)
            .with_search("q2 stars:>500", batch_b);
        let config = config_with(vec![
            SearchQuery::new("q1", Category::DevTool),
            SearchQuery::new("q2", Category::AiTooling),
        ]);

        let db = run_search_pipeline(&source, &config, &SilentProgress).await;
        assert_eq!(db.tools.len(), 100);
        assert!(db.tools.windows(2).all(|w| w[0].stars >= w[1].stars));
        assert_eq!(db.tools[0].name, "b79");

        let urls: HashSet<&str> = db.tools.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls.len(), db.tools.len());
        for tool in &db.tools {
            assert!(tool.tags.len() <= SEARCH_TAG_CAP);
            assert!(tool.tags.contains(tool.category.as_str()));
            assert!(tool.description.chars().count() <= 300);
        }
    }

    #[test]
    fn star_floor_is_inclusive() {
        let desc = Some("A repository near the floor");
        assert!(tool_from_repo(&repo("at", "o", 500, desc), Category::DevTool, 500).is_some());
        assert!(tool_from_repo(&repo("under", "o", 499, desc), Category::DevTool, 500).is_none());
    }

    #[tokio::test]
    async fn hits_below_min_stars_are_dropped() {
        let source = FakeSource::new().with_search(
            "q stars:>500",
            vec![
                repo("low", "o", 499, Some("Returned despite the stars clause")),
                repo("high", "o", 501, Some("Comfortably above the floor")),
            ],
        );
        let config = config_with(vec![SearchQuery::new("q", Category::CliTool)]);

        let db = run_search_pipeline(&source, &config, &SilentProgress).await;
        let names: Vec<&str> = db.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["high"]);
        assert!(db.tools.iter().all(|t| t.stars >= 500));
    }

    #[tokio::test]
    async fn every_query_failing_yields_empty_database() {
        let source = FakeSource::new();
        let db = run_search_pipeline(&source, &AppConfig::default(), &SilentProgress).await;
        assert!(db.tools.is_empty());
        assert_eq!(source.calls().len(), 13);
    }
}
