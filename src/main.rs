//! Wordle Butler - CLI
//!
//! Constraint helper with a TUI, a one-shot filter and the n-gram proxy.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wordle_butler::{
    commands::{FilterOutcome, fetch_trend_table, parse_constraints, run_filter},
    interactive::{App, TOP_TRENDS, run_tui},
    logging::{self, LogTarget},
    output::{print_filter_outcome, print_trend_error, print_trend_table},
    proxy::{ProxyConfig, serve},
    trends::{DEFAULT_PROXY_URL, ProxyTrendSource, TrendFetcher, YearRange},
    wordlists::{DEFAULT_WORD_LIST_URL, WordSource},
};

/// Client-side request timeout for word list and trend lookups
const CLIENT_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Parser)]
#[command(
    name = "wordle_butler",
    about = "Filter Wordle candidates by green, yellow and gray letters and chart their usage",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word list: URL serving {"words": [...]} or a local file
    #[arg(short = 'w', long, global = true, env = "WORDLE_WORDS", default_value = DEFAULT_WORD_LIST_URL)]
    words: String,

    /// Base URL of the n-gram proxy
    #[arg(long, global = true, env = "WORDLE_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    proxy_url: String,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Filter the word list once and print the matches
    Filter {
        /// Known letters in place, e.g. "c...e" (blanks: . _ - ? or space)
        #[arg(short, long)]
        correct: Option<String>,

        /// Letters in the word but not at these positions, e.g. "..a.."
        #[arg(short = 'y', long)]
        wrong: Option<String>,

        /// Letters not in the word, e.g. "stl"
        #[arg(short = 'x', long)]
        excluded: Option<String>,

        /// Print at most this many matches
        #[arg(short, long)]
        limit: Option<usize>,

        /// Also fetch usage trends for the top matches through the proxy
        #[arg(short, long)]
        trends: bool,
    },

    /// Run the n-gram proxy service
    Serve(ProxyConfig),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let log_target = match (&command, cli.log_file.as_deref()) {
        (_, Some(path)) => LogTarget::File(path),
        (Commands::Play, None) => LogTarget::Disabled,
        (_, None) => LogTarget::Stderr,
    };
    logging::init(log_target)?;

    let source = WordSource::parse(&cli.words);

    match command {
        Commands::Play => run_play_command(source, &cli.proxy_url).await,
        Commands::Filter {
            correct,
            wrong,
            excluded,
            limit,
            trends,
        } => {
            let constraints =
                parse_constraints(correct.as_deref(), wrong.as_deref(), excluded.as_deref())
                    .context("invalid constraints")?;
            run_filter_command(source, &cli.proxy_url, constraints, limit, trends).await
        }
        Commands::Serve(config) => serve(config).await,
    }
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(CLIENT_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

async fn run_play_command(source: WordSource, proxy_url: &str) -> Result<()> {
    let client = http_client()?;
    let trends = ProxyTrendSource::with_client(client.clone(), proxy_url);
    let fetcher = TrendFetcher::new(Arc::new(trends), YearRange::default());

    info!(%source, proxy = proxy_url, "starting interactive mode");
    run_tui(App::new(fetcher), source, client).await
}

async fn run_filter_command(
    source: WordSource,
    proxy_url: &str,
    constraints: wordle_butler::core::Constraints,
    limit: Option<usize>,
    with_trends: bool,
) -> Result<()> {
    let client = http_client()?;
    let words = source
        .load(&client)
        .await
        .with_context(|| format!("could not load words from {source}"))?;

    let outcome = run_filter(&words, constraints, limit);
    print_filter_outcome(&outcome);

    let FilterOutcome::Matches(result) = outcome else {
        return Ok(());
    };
    if !with_trends || result.matches.is_empty() {
        return Ok(());
    }

    let top = &result.matches[..result.matches.len().min(TOP_TRENDS)];
    let trends = ProxyTrendSource::with_client(client, proxy_url);
    match fetch_trend_table(&trends, top, YearRange::default()).await {
        Ok(table) => print_trend_table(&table),
        Err(err) => print_trend_error(&err),
    }
    Ok(())
}
