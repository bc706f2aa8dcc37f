use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use eldorado_core::dedup::dedupe_for_report;
use eldorado_core::Result;
use eldorado_crawler::csv::save_csv;
use eldorado_crawler::fetch::today_yyyymmdd_kst;
use eldorado_crawler::{Crawler, Watcher};
use eldorado_web::{create_app, AppState, MemoryUserStore};

/// Duration in `1h15m30s` form; a bare number means seconds.
#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if c.is_whitespace() {
                continue;
            } else {
                let num: u64 = current_number
                    .parse()
                    .map_err(|_| format!("expected a number before '{}'", c))?;
                match c {
                    's' => total_seconds += num,
                    'm' => total_seconds += num * 60,
                    'h' => total_seconds += num * 3600,
                    'd' => total_seconds += num * 86400,
                    _ => return Err(format!("invalid duration unit: {}", c)),
                }
                current_number.clear();
            }
        }

        if !current_number.is_empty() {
            let num: u64 = current_number
                .parse()
                .map_err(|_| "invalid number in duration".to_string())?;
            total_seconds += num;
        } else if total_seconds == 0 {
            return Err("duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Naver news listing crawler and API server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the listing once and print the collected articles
    Fetch {
        /// Listing date as YYYYMMDD; today in KST when omitted
        date: Option<String>,
        /// Also save the deduplicated batch as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Dump raw HTML when the page yields nothing or the request fails
        #[arg(long)]
        debug: bool,
    },
    /// Poll the listing and report newly seen articles
    Watch {
        /// Listing date as YYYYMMDD; today in KST when omitted
        date: Option<String>,
        /// Poll interval (e.g. 60s, 5m, 1h15m30s)
        #[arg(long, default_value = "60s")]
        interval: HumanDuration,
        #[arg(long)]
        debug: bool,
    },
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

async fn fetch_once(date: Option<String>, csv: Option<PathBuf>, debug: bool) -> Result<()> {
    let crawler = Crawler::new()?;
    let records = crawler.fetch_titles(date.as_deref(), debug).await?;
    let unique = dedupe_for_report(records);

    let date_label = date.unwrap_or_else(today_yyyymmdd_kst);
    info!("📰 collected {} articles for date={}", unique.len(), date_label);
    for (i, record) in unique.iter().enumerate() {
        println!(
            "{:02}. {}  | {}  | {}",
            i + 1,
            record.title,
            record.press,
            record.time
        );
        println!("    {}", record.link);
    }

    if let Some(path) = csv {
        save_csv(&path, &unique)?;
        info!("💾 CSV saved to {}", path.display());
    }
    Ok(())
}

async fn serve(host: String, port: u16) -> Result<()> {
    let state = AppState::new(
        Arc::new(MemoryUserStore::new()),
        Arc::new(Crawler::new()?),
    );
    let app = create_app(state).await;

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 API server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch { date, csv, debug } => fetch_once(date, csv, debug).await,
        Commands::Watch {
            date,
            interval,
            debug,
        } => {
            let crawler = Crawler::new()?;
            let mut watcher = Watcher::new(crawler, interval.0)
                .with_date(date)
                .with_debug(debug);
            watcher.run().await
        }
        Commands::Serve { host, port } => serve(host, port).await,
    }
}
