use std::path::PathBuf;

use anyhow::Context;
use log::info;
use regex::Regex;
use url::Url;

use crate::{
    ScrapeError,
    locator::{Locator, required_attr},
    page::{Page, resolve_link},
    scraping_context::ScrapingContext,
};

/// Downloads the A4 PDF documentation archive linked from download.html.
pub struct DownloadScraper {
    pub url: Url,
    archive_regex: Regex,
}

impl DownloadScraper {
    pub fn new(url: Url) -> anyhow::Result<Self> {
        let archive_regex = Regex::new(r".+pdf-a4\.zip$")?;
        Ok(Self { url, archive_regex })
    }

    pub fn from_context(ctx: &ScrapingContext) -> anyhow::Result<Self> {
        let url = resolve_link(&ctx.scraping_config.main_doc_url, "download.html")?;
        Self::new(url)
    }

    /// Saves the archive into the downloads dir and returns its path, or
    /// `None` when the downloads page itself could not be loaded.
    pub async fn scrape(&self, ctx: &ScrapingContext) -> anyhow::Result<Option<PathBuf>> {
        let Some(page) = ctx.request_client.get_page(&self.url).await else {
            return Ok(None);
        };
        let archive_url = self.archive_url(&page)?;
        drop(page);

        let downloads_dir = ctx.scraping_config.downloads_dir();
        tokio::fs::create_dir_all(&downloads_dir)
            .await
            .with_context(|| format!("failed to create {}", downloads_dir.display()))?;
        let archive_path = downloads_dir.join(archive_file_name(&archive_url));

        let bytes = ctx
            .request_client
            .fetch_url_bytes(archive_url.as_str())
            .await?;
        tokio::fs::write(&archive_path, &bytes)
            .await
            .with_context(|| format!("failed to write {}", archive_path.display()))?;

        info!("Archive downloaded and saved: {}", archive_path.display());
        Ok(Some(archive_path))
    }

    pub fn archive_url(&self, page: &Page) -> Result<Url, ScrapeError> {
        let main = Locator::tag("div").attr("role", "main").find(page.root())?;
        let table = Locator::tag("table").attr("class", "docutils").find(main)?;
        let anchor = Locator::tag("a")
            .attr_pattern("href", self.archive_regex.clone())
            .find(table)?;
        page.resolve(required_attr(anchor, "href")?)
    }
}

/// Last path segment of the archive URL.
pub fn archive_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.zip")
        .to_string()
}
