//! Conversion of decoded gists into output records

use crate::gist::model::{RawItem, ResultRecord};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt::Display;
use std::sync::LazyLock;

/// Timestamp layout used for every rendered time, e.g. `20240131 09:05:00 UTC`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d %H:%M:%S %Z";

/// The named local zone, so `%Z` prints an abbreviation such as `JST`
///
/// `TZ` wins over the system setting. `None` when neither names a zone in
/// the tz database, in which case rendering falls back to the bare offset.
static LOCAL_ZONE: LazyLock<Option<Tz>> = LazyLock::new(|| {
    let name = std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .or_else(|| iana_time_zone::get_timezone().ok())?;

    let zone = parse_zone(&name);
    if zone.is_none() {
        tracing::debug!("Unknown time zone '{}', rendering offsets", name);
    }
    zone
});

fn parse_zone(name: &str) -> Option<Tz> {
    name.trim_start_matches(':').parse().ok()
}

/// Renders an instant in the local timezone
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    match *LOCAL_ZONE {
        Some(zone) => format_timestamp_in(instant, &zone),
        None => format_timestamp_in(instant, &Local),
    }
}

/// Renders an instant in the given timezone
pub fn format_timestamp_in<Tz>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}

/// Normalizes one item, rendering timestamps in local time
pub fn normalize(raw: &RawItem) -> ResultRecord {
    match *LOCAL_ZONE {
        Some(zone) => normalize_in(raw, &zone),
        None => normalize_in(raw, &Local),
    }
}

/// Normalizes one item, rendering timestamps in `tz`
///
/// Error items carry only their identifier and error text.
pub fn normalize_in<Tz>(raw: &RawItem, tz: &Tz) -> ResultRecord
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(error) = &raw.error {
        return ResultRecord {
            id: raw.id.clone(),
            error: Some(error.clone()),
            ..ResultRecord::default()
        };
    }

    ResultRecord {
        id: raw.id.clone(),
        title: raw.description.clone().filter(|d| !d.is_empty()),
        public: Some(raw.public),
        created_at: raw.created_at.map(|t| format_timestamp_in(&t, tz)),
        updated_at: raw.updated_at.map(|t| format_timestamp_in(&t, tz)),
        url: Some(raw.html_url.clone()).filter(|u| !u.is_empty()),
        comments: Some(raw.comments),
        stars: None,
        forks: None,
        error: None,
    }
}

/// Normalizes a whole listing, one record per item, order preserved
pub fn normalize_all(raw: &[RawItem]) -> Vec<ResultRecord> {
    raw.iter().map(normalize).collect()
}
