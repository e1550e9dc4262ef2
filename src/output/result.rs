use crate::gist::{format_timestamp, ResultRecord};
use crate::{GistError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Final output of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    pub items: Vec<ResultRecord>,

    pub total_items: usize,

    /// Seconds spent on the run, truncated to milliseconds
    #[serde(rename = "expiration_time")]
    pub elapsed_seconds: f64,

    pub start_time: String,
}

/// Wraps records with run metadata
#[derive(Debug, Clone)]
pub struct ResultAssembler {
    started: Instant,
    start_time: String,
}

impl ResultAssembler {
    /// Creates an assembler for a run that started at the given moment
    pub fn new(started: Instant, started_at: DateTime<Utc>) -> Self {
        Self {
            started,
            start_time: format_timestamp(&started_at),
        }
    }

    /// Creates an assembler for a run starting now
    pub fn start_now() -> Self {
        Self::new(Instant::now(), Utc::now())
    }

    /// Builds the result set
    ///
    /// An empty record list is an error: it almost always means a wrong
    /// identifier or credential rather than an empty account.
    pub fn finish(self, items: Vec<ResultRecord>, total_items: usize) -> Result<ResultSet> {
        if items.is_empty() {
            return Err(GistError::NoItemsRetrieved);
        }

        Ok(ResultSet {
            items,
            total_items,
            elapsed_seconds: truncate_to_millis(self.started.elapsed()),
            start_time: self.start_time,
        })
    }
}

fn truncate_to_millis(elapsed: Duration) -> f64 {
    elapsed.as_millis() as f64 / 1000.0
}

/// Serializes a result set as one line of JSON
pub fn render_json(result: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string(result)?)
}
