use scraper::{ElementRef, Html};
use url::Url;

use crate::ScrapeError;

/// A fetched page: where it came from and its parsed tree. Lives only as long
/// as the scraper needs it.
pub struct Page {
    pub url: Url,
    pub document: Html,
}

impl Page {
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            document: Html::parse_document(body),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.document.root_element()
    }

    /// Resolves a link found on this page to an absolute URL.
    pub fn resolve(&self, href: &str) -> Result<Url, ScrapeError> {
        resolve_link(&self.url, href)
    }
}

pub fn resolve_link(base: &Url, href: &str) -> Result<Url, ScrapeError> {
    base.join(href).map_err(|source| ScrapeError::InvalidUrl {
        href: href.to_string(),
        base: base.to_string(),
        source,
    })
}
