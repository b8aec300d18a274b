use regex::Regex;
use url::Url;

use crate::{
    ResultTable, ScrapeError,
    locator::{Locator, required_attr},
    page::Page,
    scraping_context::ScrapingContext,
    text_manipulators::extract_text,
};

pub const HEADER: [&str; 3] = ["Documentation link", "Version", "Status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionStatusRecord {
    pub url: Url,
    pub version: String,
    pub status: String,
}

pub struct VersionTextParser {
    // Matches sidebar entries like "Python 3.13 (stable)".
    version_regex: Regex,
}

impl VersionTextParser {
    pub fn new() -> anyhow::Result<Self> {
        let version_regex = Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)")?;
        Ok(Self { version_regex })
    }

    /// `(version, status)`; text that doesn't look like a version entry is
    /// kept whole as the version, with an empty status.
    pub fn parse(&self, text: &str) -> (String, String) {
        match self.version_regex.captures(text) {
            Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
            None => (text.to_string(), String::new()),
        }
    }
}

/// Reads the "All versions" list from the documentation sidebar.
pub struct VersionsScraper {
    pub url: Url,
    parser: VersionTextParser,
}

impl VersionsScraper {
    pub fn new(url: Url) -> anyhow::Result<Self> {
        Ok(Self {
            url,
            parser: VersionTextParser::new()?,
        })
    }

    pub fn from_context(ctx: &ScrapingContext) -> anyhow::Result<Self> {
        Self::new(ctx.scraping_config.main_doc_url.clone())
    }

    pub async fn scrape(&self, ctx: &ScrapingContext) -> anyhow::Result<Option<ResultTable>> {
        let Some(page) = ctx.request_client.get_page(&self.url).await else {
            return Ok(None);
        };
        let mut table = ResultTable::new(&HEADER);
        for record in self.parse_versions(&page)? {
            table.push_row(vec![record.url.to_string(), record.version, record.status]);
        }
        Ok(Some(table))
    }

    pub fn parse_versions(&self, page: &Page) -> Result<Vec<VersionStatusRecord>, ScrapeError> {
        let sidebar = Locator::tag("div")
            .attr("class", "sphinxsidebarwrapper")
            .find(page.root())?;
        let versions_list = Locator::tag("ul")
            .find_all(sidebar)
            .into_iter()
            .find(|ul| extract_text(*ul).contains("All versions"))
            .ok_or(ScrapeError::VersionsListNotFound)?;

        Locator::tag("a")
            .find_all(versions_list)
            .into_iter()
            .map(|anchor| -> Result<VersionStatusRecord, ScrapeError> {
                let url = page.resolve(required_attr(anchor, "href")?)?;
                let (version, status) = self.parser.parse(&extract_text(anchor));
                Ok(VersionStatusRecord {
                    url,
                    version,
                    status,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: &str = r#"
        <html><body>
        <div class="sphinxsidebar"><div class="sphinxsidebarwrapper">
          <h3>Download</h3>
          <ul><li><a href="download.html">Download these documents</a></li></ul>
          <ul>
            <li><a href="https://docs.python.org/3.14/">Python 3.14 (in development)</a></li>
            <li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li>
            <li><a href="https://docs.python.org/3.8/">Python 3.8 (EOL)</a></li>
            <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
          </ul>
        </div></div>
        </body></html>
    "#;

    fn docs_url() -> Url {
        Url::parse("https://docs.python.org/3/").unwrap()
    }

    #[test]
    fn test_version_text() {
        let parser = VersionTextParser::new().unwrap();
        assert_eq!(
            parser.parse("Python 3.13 (stable)"),
            ("3.13".to_string(), "stable".to_string())
        );
        assert_eq!(
            parser.parse("Python 3.14 (in development)"),
            ("3.14".to_string(), "in development".to_string())
        );
        assert_eq!(
            parser.parse("All versions"),
            ("All versions".to_string(), String::new())
        );
    }

    #[test]
    fn test_parse_versions_in_source_order() {
        let scraper = VersionsScraper::new(docs_url()).unwrap();
        let records = scraper
            .parse_versions(&Page::parse(docs_url(), ROOT))
            .unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[0].version, "3.14");
        assert_eq!(records[0].status, "in development");
        assert_eq!(records[2].url.as_str(), "https://docs.python.org/3.8/");
        assert_eq!(records[3].version, "All versions");
        assert_eq!(records[3].status, "");
    }

    #[test]
    fn test_missing_versions_list() {
        let scraper = VersionsScraper::new(docs_url()).unwrap();
        let page = Page::parse(
            docs_url(),
            r#"<div class="sphinxsidebarwrapper"><ul><li>Download</li></ul></div>"#,
        );
        assert!(matches!(
            scraper.parse_versions(&page),
            Err(ScrapeError::VersionsListNotFound)
        ));
    }
}
