use std::process;
use std::sync::Arc;

use clap::Parser;
use crawler::{CrawlConfig, CrawlError, DataSink, FetchError, Fetcher, LogSink, SinkError};

#[derive(Parser, Debug)]
#[clap(name = "crawler")]
struct Cli {
    /// Seed URL the crawl starts from.
    #[clap(short, long)]
    seed: String,

    /// Maximum number of URLs to admit.
    #[clap(short, long, default_value = "10")]
    cap: usize,

    /// Fetches allowed in flight at once. Defaults to the core count.
    #[clap(short, long)]
    width: Option<usize>,
}

struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let body = ureq::get(url)
            .call()
            .map_err(|err| FetchError(err.to_string()))?
            .into_string()
            .map_err(|err| FetchError(err.to_string()))?;
        Ok(body)
    }
}

struct StdoutLog;

impl LogSink for StdoutLog {
    fn log(&self, line: &str) -> Result<(), SinkError> {
        println!("{}", line);
        Ok(())
    }
}

struct StdoutData;

impl DataSink for StdoutData {
    fn record(&self, url: &str, snippet: &str) -> Result<(), SinkError> {
        println!("URL: {}\nContent: {}\n", url, snippet);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    // install global collector configured based on RUST_LOG env var.
    tracing_subscriber::fmt::init();

    let args = Cli::parse();
    let config = CrawlConfig {
        cap: args.cap,
        width: args.width.unwrap_or_else(num_cpus::get),
        ..CrawlConfig::default()
    };

    let result = crawler::crawl(
        &args.seed,
        config,
        Arc::new(HttpFetcher),
        Arc::new(StdoutLog),
        Arc::new(StdoutData),
        || println!("Status: Idle"),
    )
    .await;

    if let Err(err) = result {
        eprintln!("{}", err);
        let code = match err {
            CrawlError::InvalidArgument(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
