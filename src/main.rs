use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use satchel::cli;
use satchel::config::ToolkitConfig;

#[derive(Parser)]
#[command(name = "satchel", about = "General-purpose utility toolkit", version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file path
    #[arg(long, env = "SATCHEL_CONFIG", default_value = "satchel.toml", global = true)]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SATCHEL_LOG", default_value = "warn", global = true)]
    log: String,
}

#[derive(Subcommand)]
enum Command {
    /// Key/value cache operations against the configured cache file.
    Cache {
        #[command(subcommand)]
        action: CacheCmd,
    },
    /// Translation catalog lookups.
    Locale {
        #[command(subcommand)]
        action: LocaleCmd,
    },
    /// CSV helpers.
    Csv {
        #[command(subcommand)]
        action: CsvCmd,
    },
    /// Path pattern tools.
    Path {
        #[command(subcommand)]
        action: PathCmd,
    },
}

#[derive(Subcommand)]
enum CacheCmd {
    /// Print the value stored under a key.
    Get {
        key: String,
        /// Key namespace
        #[arg(long)]
        ns: Option<String>,
    },
    /// Store a value (parsed as JSON when possible, string otherwise).
    Set {
        key: String,
        value: String,
        #[arg(long)]
        ns: Option<String>,
        /// Expire this entry after N seconds
        #[arg(long)]
        ttl: Option<u64>,
    },
    /// Remove a key.
    Del {
        key: String,
        #[arg(long)]
        ns: Option<String>,
    },
    /// List keys and value previews.
    List {
        #[arg(long)]
        ns: Option<String>,
    },
    /// Cache file stats (path, entry count, content fingerprint).
    Stats,
}

#[derive(Subcommand)]
enum LocaleCmd {
    /// Translate a key, with optional `{name}` parameters.
    Show {
        key: String,
        /// Locale to translate for (default: the configured locale)
        #[arg(long)]
        locale: Option<String>,
        /// name=value pairs substituted into the message
        #[arg(long = "param")]
        params: Vec<String>,
    },
    /// List loaded locales.
    List,
}

#[derive(Subcommand)]
enum CsvCmd {
    /// Parse a CSV file and render it as a table.
    View {
        file: PathBuf,
        /// Field separator
        #[arg(long, default_value = ",")]
        sep: char,
        /// Treat the first row as data, not headers
        #[arg(long)]
        no_headers: bool,
    },
}

#[derive(Subcommand)]
enum PathCmd {
    /// Check a concrete path against a pattern.
    Match { pattern: String, path: String },
    /// Suggest the nearest pattern to a path.
    Suggest {
        path: String,
        /// Candidate patterns
        patterns: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Init once, before any tracing calls.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&args.log)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .compact()
        .init();

    let config = ToolkitConfig::load(&args.config)?;

    match args.command {
        Command::Cache { action } => match action {
            CacheCmd::Get { key, ns } => cli::cache::cmd_get(&config, ns.as_deref(), &key)?,
            CacheCmd::Set { key, value, ns, ttl } => {
                cli::cache::cmd_set(&config, ns.as_deref(), &key, &value, ttl)?
            }
            CacheCmd::Del { key, ns } => cli::cache::cmd_del(&config, ns.as_deref(), &key)?,
            CacheCmd::List { ns } => cli::cache::cmd_list(&config, ns.as_deref())?,
            CacheCmd::Stats => cli::cache::cmd_stats(&config)?,
        },
        Command::Locale { action } => match action {
            LocaleCmd::Show { key, locale, params } => {
                cli::locale_show::cmd_show(&config, &key, locale.as_deref(), &params)?
            }
            LocaleCmd::List => cli::locale_show::cmd_list(&config)?,
        },
        Command::Csv { action } => match action {
            CsvCmd::View { file, sep, no_headers } => {
                cli::csv_view::cmd_view(&config, &file, sep, no_headers)?
            }
        },
        Command::Path { action } => match action {
            PathCmd::Match { pattern, path } => cli::path_tools::cmd_match(&pattern, &path)?,
            PathCmd::Suggest { path, patterns } => cli::path_tools::cmd_suggest(&path, &patterns)?,
        },
    }
    Ok(())
}
