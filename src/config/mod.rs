//! Configuration module for Gistwatcher
//!
//! This module handles the optional TOML settings file, credential
//! resolution, and target selection.
//!
//! # Example
//!
//! ```no_run
//! use gistwatcher::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Path::new("gistwatcher.toml")).unwrap();
//! println!("Requests in flight: {}", settings.workers);
//! ```

mod credentials;
mod parser;
mod types;
mod validation;

pub use credentials::{Credentials, NAME_ENV, PASS_ENV, TOKEN_ENV};
pub use parser::{load_settings, load_settings_or_default};
pub use types::{Settings, Target, DEFAULT_API_URL, DEFAULT_GIST_URL};
pub use validation::validate;
