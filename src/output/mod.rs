//! Output module for run results
//!
//! This module handles:
//! - Wrapping records with run metadata (start time, elapsed time, count)
//! - Rejecting runs that retrieved nothing
//! - Rendering the result as JSON

mod result;

pub use result::{render_json, ResultAssembler, ResultSet};
