use clap::Parser;
use log::{error, info};
use pydocs_scraper::{
    ScrapingContext, cli::Cli, config::ScrapingConfig, logging::configure_logging,
    outputs::control_output, run_mode,
};

async fn run(cli: Cli, scraping_config: ScrapingConfig) -> anyhow::Result<()> {
    let results_dir = scraping_config.results_dir();
    let ctx = ScrapingContext::from_config(scraping_config)?;
    if cli.clear_cache {
        ctx.request_client.cache().clear().await?;
        info!("HTTP cache cleared");
    }

    if let Some(table) = run_mode(cli.mode, &ctx).await? {
        control_output(&table, cli.output, cli.mode, &results_dir)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let scraping_config = match ScrapingConfig::new() {
        Ok(scraping_config) => scraping_config,
        Err(e) => {
            eprintln!("Invalid configuration: {e:#}");
            std::process::exit(2);
        }
    };
    if let Err(e) = configure_logging(&scraping_config.logs_dir()) {
        eprintln!("Failed to set up logging: {e:#}");
        std::process::exit(2);
    }

    info!("Parser started");
    info!("Command line arguments: {cli:?}");
    if let Err(e) = run(cli, scraping_config).await {
        error!("Parser failed: {e:#}");
        std::process::exit(1);
    }
    info!("Parser finished");
}
