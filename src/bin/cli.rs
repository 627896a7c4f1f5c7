//! NumInfo CLI
//!
//! Looks a phone number or identifier up against the configured API and
//! prints a summary, the raw JSON, and optionally a CSV export.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use numinfo::{
    error::Result,
    models::{Config, QueryStyle},
    pipeline::{self, LookupOptions},
    services::{self, Fetcher, RenderOptions},
    utils::mask_secret,
};

/// NumInfo - phone number and identifier lookup
#[derive(Parser, Debug)]
#[command(name = "numinfo", version, about = "Phone number and identifier lookup")]

struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up a search term (phone number / ID / keyword)
    Lookup {
        /// Search term
        term: String,

        /// Use canned mock data instead of calling the API
        #[arg(long)]
        mock: bool,

        /// HTTP timeout in seconds (1-30)
        #[arg(long)]
        timeout: Option<u64>,

        /// Override the API base URL
        #[arg(long)]
        base_url: Option<String>,

        /// API key (defaults to the API_KEY environment variable)
        #[arg(long)]
        key: Option<String>,

        /// Query parameter name carrying the key
        #[arg(long)]
        key_param: Option<String>,

        /// Query parameter name carrying the term
        #[arg(long)]
        term_param: Option<String>,

        /// Send the term as a single `number` parameter
        #[arg(long)]
        number_style: bool,

        /// Show the raw response keys instead of mapped fields
        #[arg(long)]
        no_auto_map: bool,

        /// Expand the unmapped fields section
        #[arg(long)]
        show_others: bool,

        /// Print one JSON document instead of the text summary
        #[arg(long)]
        json: bool,

        /// Write numinfo_<term>.csv
        #[arg(long)]
        export: bool,

        /// Directory for the CSV export (implies --export)
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Validate the effective configuration
    Validate,

    /// Show the effective configuration
    Info,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    config.apply_env();
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Lookup {
            term,
            mock,
            timeout,
            base_url,
            key,
            key_param,
            term_param,
            number_style,
            no_auto_map,
            show_others,
            json,
            export,
            export_dir,
        } => {
            if let Some(secs) = timeout {
                config.api.timeout_secs = secs;
            }
            if let Some(url) = base_url {
                config.api.base_url = url;
            }
            if let Some(key) = key {
                config.api.key = Some(key);
            }
            if let Some(param) = key_param {
                config.api.key_param = param;
            }
            if let Some(param) = term_param {
                config.api.term_param = param;
            }
            if number_style {
                config.api.query_style = QueryStyle::Number;
            }

            let export_dir = match export_dir {
                Some(dir) => Some(dir),
                None if export => Some(PathBuf::from(&config.output.export_dir)),
                None => None,
            };
            let options = LookupOptions {
                mock,
                auto_map: config.output.auto_map && !no_auto_map,
                export_dir,
            };

            let fetcher = Fetcher::new(&config.api)?;
            let report = pipeline::run_lookup(&config, &fetcher, &term, &options).await?;

            if json {
                println!("{}", services::render_json(&report)?);
            } else {
                println!(
                    "{}",
                    services::render_text(&report, &RenderOptions { show_others })
                );
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if config.api.query_style == QueryStyle::KeyTerm && config.api.key.is_none() {
                log::warn!("No API key configured; only --mock lookups will work");
            }
            println!("✓ Config OK");
        }

        Command::Info => {
            let mut shown = config.clone();
            shown.api.key = shown.api.key.as_deref().map(mask_secret);
            println!("Config file: {}", cli.config.display());
            print!("{}", toml::to_string_pretty(&shown)?);
        }
    }

    Ok(())
}
