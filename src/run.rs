//! Run orchestration
//!
//! A `RunContext` is built once at the start of a run and passed by
//! reference to every stage; there is no global state.

use crate::config::{Credentials, Settings, Target};
use crate::fetch::{
    build_http_client, enrich, fetch_by_ids, fetch_listing, ConcurrentFetcher,
    HtmlCounterExtractor, RequestDescriptor,
};
use crate::gist::{normalize_all, parse_id_list, read_id_file};
use crate::output::{ResultAssembler, ResultSet};
use crate::Result;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Instant;

/// Everything a run shares between its stages
#[derive(Clone)]
pub struct RunContext {
    client: Client,
    authorization: String,
    settings: Settings,
    started: Instant,
    started_at: DateTime<Utc>,
}

impl RunContext {
    /// Builds the context, capturing the run start time
    ///
    /// # Returns
    ///
    /// * `Ok(RunContext)` - Ready to run
    /// * `Err(GistError)` - The HTTP client could not be built
    pub fn new(settings: Settings, credentials: &Credentials) -> Result<Self> {
        let started = Instant::now();
        let started_at = Utc::now();
        let client = build_http_client(&settings)?;

        Ok(Self {
            client,
            authorization: credentials.authorization(),
            settings,
            started,
            started_at,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fetcher sized by the configured worker count
    pub fn fetcher(&self) -> ConcurrentFetcher {
        ConcurrentFetcher::new(self.settings.workers)
    }

    /// Authorized GET against the REST API
    pub fn api_request(&self, url: &str) -> Result<RequestDescriptor> {
        RequestDescriptor::get(&self.client, url, Some(&self.authorization))
    }

    /// Unauthenticated GET of a public HTML page
    pub fn page_request(&self, url: &str) -> Result<RequestDescriptor> {
        RequestDescriptor::get(&self.client, url, None)
    }

    pub fn assembler(&self) -> ResultAssembler {
        ResultAssembler::new(self.started, self.started_at)
    }
}

/// Runs a complete retrieval
///
/// This will:
/// 1. Collect the raw items for the target (listing or ID list)
/// 2. Normalize every item into a record
/// 3. Optionally scrape star and fork counters
/// 4. Wrap the records with run metadata
///
/// # Arguments
///
/// * `ctx` - The run context
/// * `target` - Which gists to retrieve
/// * `with_counters` - Whether to scrape star and fork counts
///
/// # Example
///
/// ```no_run
/// use gistwatcher::config::{Credentials, Settings, Target};
/// use gistwatcher::run::{watch, RunContext};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::Token("ghp_example".to_string());
/// let ctx = RunContext::new(Settings::default(), &credentials)?;
/// let result = watch(&ctx, &Target::Own, false).await?;
/// println!("{} gists", result.total_items);
/// # Ok(())
/// # }
/// ```
pub async fn watch(ctx: &RunContext, target: &Target, with_counters: bool) -> Result<ResultSet> {
    let raw = match target {
        Target::Own | Target::User(_) => {
            let listing_url = target
                .listing_url(&ctx.settings.api_url)
                .unwrap_or_default();
            fetch_listing(ctx, &listing_url).await?
        }
        Target::Ids(list) => fetch_by_ids(ctx, &parse_id_list(list)).await?,
        Target::File(path) => {
            let ids = read_id_file(path)?;
            fetch_by_ids(ctx, &ids).await?
        }
    };

    let mut records = normalize_all(&raw);
    if with_counters {
        records = enrich(ctx, &raw, records, &HtmlCounterExtractor).await?;
    }

    tracing::info!(
        "Collected {} record(s), {} with errors",
        records.len(),
        records.iter().filter(|r| r.is_error()).count()
    );

    ctx.assembler().finish(records, raw.len())
}
