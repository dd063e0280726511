//! List-scraping pipeline: curated markdown lists → star-checked, ranked tools.
//!
//! 1. Fetch each list's raw markdown (contents lookup, then download)
//! 2. Extract candidates from bullet links
//! 3. Resolve identities, drop duplicates, look up stars
//! 4. Rank and truncate

use std::collections::HashSet;
use std::time::Duration;

use tooldb_github::{RepoId, RepoSource};
use tooldb_markdown::{Candidate, extract_candidates};
use tooldb_shared::{AppConfig, ListSource, ListsConfig, Tool};
use tracing::{debug, info, instrument, warn};

use crate::database::{PipelineKind, ToolDatabase};
use crate::progress::ProgressReporter;
use crate::rank::rank_and_truncate;
use crate::tags::{LIST_TAG_CAP, generate_tags};

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Fetch a list document as text, or `None` if it is unavailable.
///
/// A failed contents lookup, a missing `download_url`, a failed download and
/// undecodable bytes all count as unavailable.
#[instrument(skip_all, fields(list = %list.id(), path = %list.path))]
pub async fn fetch_list<S: RepoSource>(source: &S, list: &ListSource) -> Option<String> {
    let entry = match source.contents(&list.owner, &list.repo, &list.path).await {
        Ok(entry) => entry,
        Err(e) => {
            warn!(error = %e, "contents lookup failed");
            return None;
        }
    };

    let Some(download_url) = entry.download_url else {
        warn!("contents entry has no download_url");
        return None;
    };

    match source.download_text(&download_url).await {
        Ok(text) => Some(text),
        Err(e) => {
            warn!(%download_url, error = %e, "download failed");
            None
        }
    }
}

/// Current star count of a repository, or `None` if the lookup failed.
pub async fn lookup_stars<S: RepoSource>(source: &S, id: &RepoId) -> Option<u64> {
    match source.repository(&id.owner, &id.name).await {
        Ok(details) => Some(details.stargazers_count),
        Err(e) => {
            debug!(repo = %id, error = %e, "star lookup failed");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Enrichment
// ---------------------------------------------------------------------------

/// Resolve, deduplicate and star-check candidates in order.
///
/// The first candidate seen for a repository claims it, even if its own
/// lookup then fails or falls under the threshold.
#[instrument(skip_all, fields(candidates = candidates.len()))]
pub async fn enrich_candidates<S: RepoSource>(
    source: &S,
    candidates: &[Candidate],
    opts: &ListsConfig,
    progress: &dyn ProgressReporter,
) -> Vec<Tool> {
    let total = candidates.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut tools: Vec<Tool> = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        if let Some(tool) = enrich_one(source, candidate, opts.min_stars, &mut seen).await {
            tools.push(tool);
        }

        let processed = i + 1;
        if opts.batch_size > 0 && processed % opts.batch_size == 0 {
            info!(processed, total, kept = tools.len(), "enrichment progress");
            progress.candidate_progress(processed, total, tools.len());
            if opts.pause_ms > 0 {
                tokio::time::sleep(Duration::from_millis(opts.pause_ms)).await;
            }
        }
    }

    progress.candidate_progress(total, total, tools.len());
    tools
}

async fn enrich_one<S: RepoSource>(
    source: &S,
    candidate: &Candidate,
    min_stars: u64,
    seen: &mut HashSet<String>,
) -> Option<Tool> {
    let Some(id) = RepoId::from_url(&candidate.url) else {
        debug!(url = %candidate.url, "no repository identity, skipping");
        return None;
    };

    if !seen.insert(id.dedup_key()) {
        debug!(repo = %id, "duplicate repository, skipping");
        return None;
    }

    let stars = lookup_stars(source, &id).await?;
    if stars < min_stars {
        debug!(repo = %id, stars, min_stars, "below star threshold");
        return None;
    }

    let tags = generate_tags(&candidate.description, &[], candidate.category, LIST_TAG_CAP);
    Some(
        Tool::new(
            &candidate.name,
            &candidate.description,
            id.web_url(),
            stars,
            candidate.category,
            tags,
        )
        .with_source_list(&candidate.source_list),
    )
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Scrape every configured list and build the ranked database.
#[instrument(skip_all, fields(sources = config.lists.sources.len()))]
pub async fn run_lists_pipeline<S: RepoSource>(
    source: &S,
    config: &AppConfig,
    progress: &dyn ProgressReporter,
) -> ToolDatabase {
    let lists = &config.lists;
    info!(min_stars = lists.min_stars, "starting list pipeline");

    progress.phase("Fetching curated lists");
    let mut candidates: Vec<Candidate> = Vec::new();
    let mut processed_sources: Vec<String> = Vec::new();

    for list in &lists.sources {
        let id = list.id();
        processed_sources.push(id.clone());

        let Some(markdown) = fetch_list(source, list).await else {
            progress.list_extracted(&id, 0, 0);
            continue;
        };

        let extraction = extract_candidates(&markdown, &id, list.category);
        info!(
            list = %id,
            candidates = extraction.candidates.len(),
            rejected = extraction.rejected.len(),
            "list extracted"
        );
        for rejected in &extraction.rejected {
            debug!(list = %id, line = rejected.line, url = %rejected.url, reason = %rejected.reason, "entry rejected");
        }
        progress.list_extracted(&id, extraction.candidates.len(), extraction.rejected.len());
        candidates.extend(extraction.candidates);
    }

    progress.phase("Looking up star counts");
    let mut tools = enrich_candidates(source, &candidates, lists, progress).await;

    progress.phase("Ranking");
    rank_and_truncate(&mut tools, config.output.max_tools);

    let db = ToolDatabase::new(PipelineKind::Lists, lists.min_stars, tools, processed_sources);
    info!(tools = db.tools.len(), "list pipeline complete");
    progress.done(&db);
    db
}
