//! Fetch module for gist retrieval
//!
//! This module contains the network side of a run, including:
//! - Bounded-concurrency request fan-out with index correlation
//! - `Link` header pagination discovery
//! - Listing and ID-based gist retrieval
//! - Star/fork scraping of the public gist pages

mod enrich;
mod fetcher;
mod listing;
mod pagination;
mod scrape;

pub use enrich::{enrich, stargazers_url, NOT_FOUND_MESSAGE};
pub use fetcher::{
    build_http_client, execute_batch, ConcurrentFetcher, HttpResponse, RequestDescriptor,
    ResponseEnvelope, TransportError, DEFAULT_CONCURRENCY,
};
pub use listing::{fetch_by_ids, fetch_listing, page_url};
pub use pagination::{last_page, parse_link_header, PageToken, PaginationError, Relation};
pub use scrape::{CounterExtractor, Counters, HtmlCounterExtractor};
