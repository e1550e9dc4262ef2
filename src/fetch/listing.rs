//! Gist retrieval from the REST API
//!
//! Two ways of building the item list:
//! - Walking an account's paginated listing (`fetch_listing`)
//! - Fetching an explicit list of gist IDs (`fetch_by_ids`)
//!
//! Per-request failures never abort either path; they become error items.

use crate::fetch::fetcher::ResponseEnvelope;
use crate::fetch::pagination::{last_page, parse_link_header};
use crate::gist::RawItem;
use crate::run::RunContext;
use crate::{GistError, Result};
use reqwest::header::LINK;

/// Builds the URL of one listing page
pub fn page_url(listing_url: &str, page: u32, per_page: u32) -> String {
    format!("{}?page={}&per_page={}", listing_url, page, per_page)
}

/// Retrieves every gist of a listing, oldest first
///
/// # Flow
///
/// 1. Fetch page 1 and decode it (any failure here is fatal)
/// 2. Parse the `Link` header; no `last` relation means a single page
/// 3. Fetch pages 2..=last concurrently
/// 4. Concatenate in page order and reverse, since the API lists newest first
///
/// A remaining page that fails becomes a single error item carrying the
/// response body (or the transport error).
pub async fn fetch_listing(ctx: &RunContext, listing_url: &str) -> Result<Vec<RawItem>> {
    let per_page = ctx.settings().per_page;
    let fetcher = ctx.fetcher();

    let first_url = page_url(listing_url, 1, per_page);
    let first = fetcher
        .execute(vec![ctx.api_request(&first_url)?])
        .await
        .pop()
        .ok_or_else(|| GistError::FirstPageTransport {
            url: first_url.clone(),
            message: "no response collected".to_string(),
        })?;

    let response = first
        .outcome
        .map_err(|e| GistError::FirstPageTransport {
            url: first_url.clone(),
            message: e.to_string(),
        })?;

    if !response.is_success() {
        return Err(GistError::FirstPage {
            status: response.status.as_u16(),
            body: response.text(),
        });
    }

    let mut items: Vec<RawItem> =
        serde_json::from_slice(&response.body).map_err(|source| GistError::Decode {
            url: first_url.clone(),
            source,
        })?;

    let tokens = parse_link_header(response.header(LINK.as_str()).unwrap_or_default())?;
    let last = last_page(&tokens)?.unwrap_or(1);
    tracing::info!("Listing {} has {} page(s)", listing_url, last);

    if last > 1 {
        let descriptors = (2..=last)
            .map(|page| ctx.api_request(&page_url(listing_url, page, per_page)))
            .collect::<Result<Vec<_>>>()?;

        for envelope in fetcher.execute(descriptors).await {
            items.extend(page_items(envelope));
        }
    }

    items.reverse();
    tracing::info!("Retrieved {} item(s) from {}", items.len(), listing_url);
    Ok(items)
}

/// Decodes one remaining listing page, or stands in an error item for it
fn page_items(envelope: ResponseEnvelope) -> Vec<RawItem> {
    let response = match envelope.outcome {
        Ok(response) => response,
        Err(e) => {
            return vec![RawItem::failed(
                String::new(),
                format!("{}: {}", envelope.url, e),
            )]
        }
    };

    if !response.is_success() {
        tracing::warn!(
            "Page {} returned HTTP {}",
            envelope.url,
            response.status.as_u16()
        );
        return vec![RawItem::failed(String::new(), response.text())];
    }

    match serde_json::from_slice::<Vec<RawItem>>(&response.body) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to decode page {}: {}", envelope.url, e);
            vec![RawItem::failed(
                String::new(),
                format!("{}: {}", envelope.url, e),
            )]
        }
    }
}

/// Retrieves the given gists, one request each, in input order
///
/// Empty identifiers (inputs that were neither a gist URL nor a raw ID) are
/// skipped without a request.
pub async fn fetch_by_ids(ctx: &RunContext, ids: &[String]) -> Result<Vec<RawItem>> {
    let ids: Vec<&String> = ids.iter().filter(|id| !id.is_empty()).collect();
    let api_url = &ctx.settings().api_url;

    let descriptors = ids
        .iter()
        .map(|id| ctx.api_request(&format!("{}gists/{}", api_url, id)))
        .collect::<Result<Vec<_>>>()?;

    tracing::info!("Fetching {} gist(s) by ID", descriptors.len());

    let items = ctx
        .fetcher()
        .execute(descriptors)
        .await
        .into_iter()
        .zip(ids)
        .map(|(envelope, id)| item_for_id(envelope, id))
        .collect();

    Ok(items)
}

fn item_for_id(envelope: ResponseEnvelope, id: &str) -> RawItem {
    match envelope.outcome {
        Ok(response) if response.is_success() => {
            serde_json::from_slice::<RawItem>(&response.body).unwrap_or_else(|e| {
                tracing::warn!("Failed to decode gist {}: {}", id, e);
                RawItem::failed(id, e.to_string())
            })
        }
        Ok(response) => {
            tracing::warn!("Gist {} returned HTTP {}", id, response.status.as_u16());
            RawItem::failed(id, response.text())
        }
        Err(e) => RawItem::failed(id, e.to_string()),
    }
}
