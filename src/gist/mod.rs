//! Gist data model
//!
//! This module contains:
//! - The decoded API representation of a gist (`RawItem`)
//! - The normalized output record (`ResultRecord`)
//! - Identifier extraction from URLs, lists and files

mod ids;
mod model;
mod normalize;

pub use ids::{extract_gist_id, parse_id_list, read_id_file, END_MARKER, GIST_HOST, GIST_ID_LEN};
pub use model::{Owner, RawItem, ResultRecord};
pub use normalize::{
    format_timestamp, format_timestamp_in, normalize, normalize_all, normalize_in,
    TIMESTAMP_FORMAT,
};
