use std::process::ExitCode;
use std::time::Duration;

use chrono::Local;
use clap::builder::RangedU64ValueParser;
use clap::{ArgGroup, Parser};
use scaruffi::output::{format_musicians, format_ratings};
use scaruffi::{info_time, ClientConfig, Result, Scaruffi};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Get musicians and ratings from scaruffi.com.
#[derive(Debug, Parser)]
#[command(version, about)]
#[command(group(ArgGroup::new("query").required(true).args(["musicians", "ratings"])))]
struct Args {
    /// Print debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Get the list of musicians
    #[arg(short, long)]
    musicians: bool,

    /// Get ratings for a decade (e.g. 1960 or 60)
    #[arg(short, long, value_name = "DECADE")]
    ratings: Option<u16>,

    /// Offset for paginated queries
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Limit for paginated queries
    #[arg(long, default_value_t = 20, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    limit: usize,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// Site to query
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start_time = Local::now();
    let res = run(&args).await;
    info_time!(start_time, "Full program time:");

    match res {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(kind = ?e.kind(), "request failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<String> {
    let mut config = ClientConfig::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    let site = Scaruffi::new(config)?;

    // The arg group guarantees exactly one of the two queries.
    match args.ratings {
        Some(decade) => {
            let ratings = site.get_ratings(decade).await?;
            Ok(format_ratings(&ratings))
        }
        None => {
            let musicians = site.get_musicians(args.offset, Some(args.limit)).await?;
            Ok(format_musicians(&musicians))
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}
