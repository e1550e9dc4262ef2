//! Integration tests for gistwatcher
//!
//! These tests use wiremock to stand in for the GitHub API and gist pages.

mod common;
mod fetch_tests;
