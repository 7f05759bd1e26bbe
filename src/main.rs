use anyhow::Result;
use clap::Parser;
use pydocs_scraper::{
    cli::Cli,
    config::Settings,
    crawl,
    fetch::HttpFetcher,
    output::control_output,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    if let Err(err) = run().await {
        error!(error = %err, "run failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    info!("scraper started");
    let cli = Cli::parse();
    info!(?cli, "command line arguments");

    // ─── 2) configure ────────────────────────────────────────────────
    let settings = Settings::from_env()?;
    let fetcher = HttpFetcher::new(&settings.http)?;
    if cli.clear_cache {
        fetcher.clear_cache()?;
    }

    // ─── 3) crawl & render ───────────────────────────────────────────
    let mode = cli.mode.as_str();
    if let Some(table) = crawl::run_mode(cli.mode, &fetcher, &settings).await? {
        control_output(&table, mode, cli.output, &settings.results_dir())?;
    }

    info!("scraper finished");
    Ok(())
}
