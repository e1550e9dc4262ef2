//! Star and fork counter extraction from a gist's HTML page
//!
//! The counters are not exposed by the REST API, so they are read from the
//! page head actions of the public gist page. Markup changes must only ever
//! cost a counter, never the run.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ACTIONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ul.pagehead-actions").expect("actions selector is valid"));

static ENTRY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("entry selector is valid"));

static COUNT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".social-count").expect("count selector is valid"));

/// Counters scraped from one document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub stars: Option<u64>,
    pub forks: Option<u64>,
}

/// Extracts star and fork counters from an HTML document
pub trait CounterExtractor: Send + Sync {
    fn extract_counters(&self, document: &str) -> Counters;
}

/// Extractor for the gist page markup served by gist.github.com
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlCounterExtractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CounterKind {
    Star,
    Fork,
}

impl CounterExtractor for HtmlCounterExtractor {
    fn extract_counters(&self, document: &str) -> Counters {
        let html = Html::parse_document(document);
        let mut counters = Counters::default();

        for actions in html.select(&ACTIONS) {
            for entry in actions.select(&ENTRY) {
                let Some(kind) = classify_entry(&entry) else {
                    continue;
                };

                let count = entry.select(&COUNT).find_map(|c| {
                    let text = c.text().collect::<String>();
                    let parsed = parse_count(&text);
                    if parsed.is_none() {
                        tracing::debug!("Unparseable {:?} counter text: {:?}", kind, text.trim());
                    }
                    parsed
                });

                let slot = match kind {
                    CounterKind::Star => &mut counters.stars,
                    CounterKind::Fork => &mut counters.forks,
                };
                if slot.is_none() {
                    *slot = count;
                }
            }
        }

        counters
    }
}

/// Classifies a list entry by case-insensitive match on its text
fn classify_entry(entry: &ElementRef<'_>) -> Option<CounterKind> {
    let text = entry.text().collect::<String>().to_lowercase();

    if text.contains("star") {
        Some(CounterKind::Star)
    } else if text.contains("fork") {
        Some(CounterKind::Fork)
    } else {
        None
    }
}

/// Parses the leading number of a counter, e.g. `"  1,234 "` or `"42 stars"`
fn parse_count(text: &str) -> Option<u64> {
    text.split_whitespace()
        .next()?
        .replace(',', "")
        .parse::<u64>()
        .ok()
}
