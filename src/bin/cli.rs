//! Estate notice CLI
//!
//! Runs the HTTP API, or performs one read operation and prints it as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use estate_notices::{
    api::{self, AppState},
    error::Result,
    models::{ApiConfig, Config, NoticeSummary},
    services::NoticeService,
};
use serde::Serialize;

/// Bankruptcy estate sale notices as JSON
#[derive(Parser, Debug)]
#[command(
    name = "estate-notices",
    version,
    about = "Court bankruptcy-estate sale notice API"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        /// Listen address (overrides api.bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print one listing page
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long)]
        limit: Option<usize>,

        /// Print one line per notice, e.g. "{date} {court} {title}"
        #[arg(long)]
        format: Option<String>,
    },

    /// Print the full content of one notice
    Detail {
        /// Numeric notice id (`seq_id`)
        id: String,
    },

    /// Search the first N listing pages
    Search {
        keyword: String,

        #[arg(long)]
        pages: Option<u32>,

        /// Print one line per match instead of JSON
        #[arg(long)]
        format: Option<String>,
    },

    /// Print per-court notice counts
    Stats {
        #[arg(long)]
        pages: Option<u32>,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging from the verbosity flag or the configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lines(notices: &[NoticeSummary], template: &str) {
    for notice in notices {
        println!("{}", notice.format(template));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match Config::load(&cli.config) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_env();
    init_logging(cli.verbose, &config.logging.level);

    if let Some(e) = load_error {
        log::warn!(
            "Using default configuration, could not load {}: {}",
            cli.config.display(),
            e
        );
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let service = NoticeService::from_config(&config)?;

    match cli.command {
        Command::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| config.api.bind.clone());
            log::info!("Upstream: {}", config.upstream.list_url());
            let state = Arc::new(AppState::new(&config, service));
            api::serve(state, &bind).await?;
        }

        Command::List {
            page,
            limit,
            format,
        } => {
            let (page, limit) = config.api.list_params(Some(page), limit)?;
            let result = service.list(page, limit).await?;
            match format {
                Some(template) => print_lines(&result.notices, &template),
                None => print_json(&result)?,
            }
        }

        Command::Detail { id } => {
            print_json(&service.detail(&id).await?)?;
        }

        Command::Search {
            keyword,
            pages,
            format,
        } => {
            let keyword = ApiConfig::keyword(Some(keyword.as_str()))?;
            let pages = config.api.page_count(pages)?;
            let result = service.search(keyword, pages).await;
            match format {
                Some(template) => print_lines(&result.matches, &template),
                None => print_json(&result)?,
            }
        }

        Command::Stats { pages } => {
            let pages = config.api.page_count(pages)?;
            print_json(&service.stats(pages).await)?;
        }

        Command::Validate => {
            log::info!("✓ Config OK ({})", cli.config.display());
        }
    }

    Ok(())
}
