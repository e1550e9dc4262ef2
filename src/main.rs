//! Gistwatcher main entry point
//!
//! This is the command-line interface for retrieving comments, stars and
//! forks of gists.

use anyhow::Context;
use clap::Parser;
use gistwatcher::config::{load_settings_or_default, Credentials, Target};
use gistwatcher::output::render_json;
use gistwatcher::run::{watch, RunContext};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Gistwatcher: get comments, stars and forks from own Gists
///
/// Reads either the full listing of an account or an explicit list of gist
/// IDs/URLs and prints one JSON document with the result.
#[derive(Parser, Debug)]
#[command(name = "gistwatcher")]
#[command(version)]
#[command(about = "Get comments, stars and forks from own Gists.", long_about = None)]
struct Cli {
    /// Login name of GitHub.
    #[arg(short, long)]
    name: Option<String>,

    /// Login password of GitHub.
    #[arg(short, long)]
    password: Option<String>,

    /// Access token of GitHub. If you have this, please use this instead of 'name' and 'password'.
    #[arg(short, long)]
    accesstoken: Option<String>,

    /// If you want to also retrieve the number of stars and forks, please use this.
    #[arg(short = 's', long)]
    getstars: bool,

    /// User name of Gist you want to get. If you want to retrieve a specific user's Gists, please use this.
    #[arg(long, visible_alias = "user", conflicts_with_all = ["url", "file"])]
    username: Option<String>,

    /// URL of Gists you want to retrieve. You can also use Gist's ID instead of URL.
    #[arg(short, long, conflicts_with = "file")]
    url: Option<String>,

    /// Filename including URLs of Gists you want to retrieve.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to an optional TOML settings file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!("Run failed: {:?}", e);
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the JSON result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("gistwatcher=warn,warn"),
            1 => EnvFilter::new("gistwatcher=info,warn"),
            2 => EnvFilter::new("gistwatcher=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Resolves configuration, runs the retrieval and renders the result
async fn run(cli: Cli) -> anyhow::Result<String> {
    let settings = load_settings_or_default(cli.config.as_deref())
        .context("Failed to load settings")?;

    let credentials = Credentials::resolve(cli.name, cli.password, cli.accesstoken)?;
    let target = Target::from_flags(cli.username, cli.url, cli.file);
    tracing::info!("Target: {:?}", target);

    let ctx = RunContext::new(settings, &credentials)?;
    let result = watch(&ctx, &target, cli.getstars).await?;

    Ok(render_json(&result)?)
}
