//! Star and fork enrichment of normalized records

use crate::fetch::fetcher::ResponseEnvelope;
use crate::fetch::scrape::CounterExtractor;
use crate::gist::{RawItem, ResultRecord};
use crate::run::RunContext;
use crate::Result;

/// Error text for a gist whose public page could not be fetched
pub const NOT_FOUND_MESSAGE: &str = "Error: Couldn't find gist.";

/// Builds the URL of a gist's stargazers page
pub fn stargazers_url(gist_url: &str, item: &RawItem) -> String {
    match item.owner_login() {
        Some(owner) => format!("{}{}/{}/stargazers", gist_url, owner, item.id),
        None => format!("{}{}/stargazers", gist_url, item.id),
    }
}

/// Scrapes star and fork counts for every record, in place
///
/// `raw` and `records` are parallel sequences. Records that already carry an
/// error are left untouched and not requested. Ordering never changes.
///
/// # Returns
///
/// * `Ok(records)` - The same records, with counters merged in
/// * `Err(GistError)` - A scrape request could not be built
pub async fn enrich(
    ctx: &RunContext,
    raw: &[RawItem],
    mut records: Vec<ResultRecord>,
    extractor: &dyn CounterExtractor,
) -> Result<Vec<ResultRecord>> {
    debug_assert_eq!(raw.len(), records.len());

    let targets: Vec<usize> = (0..records.len().min(raw.len()))
        .filter(|&i| !raw[i].is_error() && !records[i].is_error())
        .collect();

    let descriptors = targets
        .iter()
        .map(|&i| ctx.page_request(&stargazers_url(&ctx.settings().gist_url, &raw[i])))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Scraping counters for {} gist(s)", descriptors.len());

    let envelopes = ctx.fetcher().execute(descriptors).await;
    for (i, envelope) in targets.into_iter().zip(envelopes) {
        merge_counters(&mut records[i], &raw[i], envelope, extractor);
    }

    Ok(records)
}

fn merge_counters(
    record: &mut ResultRecord,
    raw: &RawItem,
    envelope: ResponseEnvelope,
    extractor: &dyn CounterExtractor,
) {
    match envelope.outcome {
        Ok(response) if response.is_success() => {
            let counters = extractor.extract_counters(&response.text());
            record.stars = counters.stars;
            record.forks = counters.forks;
        }
        _ => {
            tracing::warn!("Couldn't scrape {}", envelope.url);
            record.error = Some(NOT_FOUND_MESSAGE.to_string());
            record.id = raw.id.clone();
            record.stars = None;
            record.forks = None;
        }
    }
}
