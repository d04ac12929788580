use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use tripscraper::{
    config::Config,
    dates::{most_recent_month, MonthRange, YearMonth},
    fetch, run,
};

/// First period the provider published under the current dataset layout.
const BACKFILL_START: YearMonth = YearMonth::new(2024, 1);

#[derive(Parser, Debug)]
#[command(
    name = "tripscraper",
    about = "Download and extract CitiBike NYC trip data archives"
)]
struct Args {
    /// Fetch every month from January 2024 through the most recent completed month
    #[arg(long)]
    backfill: bool,

    /// Fetch exactly this URL, bypassing date-based resolution (takes
    /// precedence over --backfill)
    #[arg(long)]
    url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let args = Args::parse();
    let cfg = Config::default();
    let client = Client::new();

    let urls: Vec<String> = if let Some(url) = args.url {
        vec![url]
    } else {
        let latest = most_recent_month(Utc::now().date_naive());
        if args.backfill {
            info!(start = %BACKFILL_START, end = %latest, "backfilling");
            MonthRange::new(BACKFILL_START, latest)
                .map(|period| fetch::urls::resolve_archive_url(&cfg.base_url, period))
                .collect()
        } else {
            vec![fetch::urls::resolve_archive_url(&cfg.base_url, latest)]
        }
    };

    let summary = run::process_all(&client, &cfg, &urls).await;
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "all done"
    );

    if let Some(code) = summary.first_failure_code {
        std::process::exit(code);
    }
    Ok(())
}
