use std::fmt;

use clap::ValueEnum;
use log::info;

use crate::{
    ResultTable, download_scraper::DownloadScraper, pep_scraper::PepScraper,
    scraping_context::ScrapingContext, versions_scraper::VersionsScraper,
    whats_new_scraper::WhatsNewScraper,
};

/// What a single run scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Links, titles and editors of the "What's New" articles.
    WhatsNew,
    /// Documentation versions and their support status.
    LatestVersions,
    /// The A4 PDF documentation archive.
    Download,
    /// PEP status counts, checked against the PEP index.
    Pep,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::WhatsNew => "whats-new",
            Mode::LatestVersions => "latest-versions",
            Mode::Download => "download",
            Mode::Pep => "pep",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the scraper for `mode`. `None` means there is nothing to render.
pub async fn run_mode(mode: Mode, ctx: &ScrapingContext) -> anyhow::Result<Option<ResultTable>> {
    info!("Running {mode}");
    match mode {
        Mode::WhatsNew => WhatsNewScraper::from_context(ctx)?.scrape(ctx).await,
        Mode::LatestVersions => VersionsScraper::from_context(ctx)?.scrape(ctx).await,
        Mode::Download => {
            DownloadScraper::from_context(ctx)?.scrape(ctx).await?;
            Ok(None)
        }
        Mode::Pep => PepScraper::from_context(ctx).scrape(ctx).await,
    }
}
