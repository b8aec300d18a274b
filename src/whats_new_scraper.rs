use log::{info, warn};
use url::Url;

use crate::{
    ResultTable, ScrapeError,
    locator::{Locator, required_attr},
    page::{Page, resolve_link},
    scraping_context::ScrapingContext,
    text_manipulators::{extract_text, normalize_whitespace},
    utils::progress_bar,
};

pub const HEADER: [&str; 3] = ["Article link", "Title", "Editor, Author"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsNewRecord {
    pub url: Url,
    pub title: String,
    pub editors: String,
}

/// Collects the "What's New in Python X.Y" articles linked from the
/// whatsnew index.
#[derive(Debug)]
pub struct WhatsNewScraper {
    pub url: Url,
}

impl WhatsNewScraper {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn from_context(ctx: &ScrapingContext) -> Result<Self, ScrapeError> {
        let url = resolve_link(&ctx.scraping_config.main_doc_url, "whatsnew/")?;
        Ok(Self::new(url))
    }

    pub async fn scrape(&self, ctx: &ScrapingContext) -> anyhow::Result<Option<ResultTable>> {
        let Some(index) = ctx.request_client.get_page(&self.url).await else {
            return Ok(None);
        };
        let article_links = article_links(&index)?;
        drop(index);
        info!("Found {} what's new articles", article_links.len());

        let mut table = ResultTable::new(&HEADER);
        let pb = progress_bar(article_links.len(), "What's new");
        for link in article_links {
            pb.inc(1);
            let Some(article) = ctx.request_client.get_page(&link).await else {
                warn!("Skipping article {link}");
                continue;
            };
            let record = parse_article(&article)?;
            table.push_row(vec![record.url.to_string(), record.title, record.editors]);
        }
        pb.finish_and_clear();
        Ok(Some(table))
    }
}

/// Absolute links to every per-version article, in index order.
pub fn article_links(index: &Page) -> Result<Vec<Url>, ScrapeError> {
    let section = Locator::tag("section")
        .attr("id", "what-s-new-in-python")
        .find(index.root())?;
    let toc = Locator::tag("div")
        .attr("class", "toctree-wrapper compound")
        .find(section)?;
    Locator::tag("li")
        .attr("class", "toctree-l1")
        .find_all(toc)
        .into_iter()
        .map(|item| -> Result<Url, ScrapeError> {
            let anchor = Locator::tag("a").find(item)?;
            index.resolve(required_attr(anchor, "href")?)
        })
        .collect()
}

pub fn parse_article(article: &Page) -> Result<WhatsNewRecord, ScrapeError> {
    let h1 = Locator::tag("h1").find(article.root())?;
    let dl = Locator::tag("dl").find(article.root())?;
    Ok(WhatsNewRecord {
        url: article.url.clone(),
        title: extract_text(h1),
        editors: normalize_whitespace(&extract_text(dl)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body><div role="main">
        <section id="what-s-new-in-python">
          <h1>What's New in Python</h1>
          <div class="toctree-wrapper compound">
            <ul>
              <li class="toctree-l1"><a class="reference internal" href="3.13.html">What's New In Python 3.13</a>
                <ul><li class="toctree-l2"><a href="3.13.html#summary">Summary</a></li></ul>
              </li>
              <li class="toctree-l1"><a class="reference internal" href="3.12.html">What's New In Python 3.12</a></li>
            </ul>
          </div>
        </section>
        </div></body></html>
    "#;

    const ARTICLE: &str = r#"
        <html><body>
          <section id="what-s-new-in-python-3-12">
            <h1>What's New In Python 3.12</h1>
            <dl class="field-list simple">
              <dt class="field-odd">Editor<span class="colon">:</span></dt>
              <dd class="field-odd"><p>Adam Turner</p>
              </dd>
            </dl>
            <dl><dt>ignored</dt></dl>
          </section>
        </body></html>
    "#;

    #[test]
    fn test_article_links_are_absolute_and_ordered() {
        let index = Page::parse(
            Url::parse("https://docs.python.org/3/whatsnew/").unwrap(),
            INDEX,
        );
        let links = article_links(&index).unwrap();
        assert_eq!(
            links.iter().map(Url::as_str).collect::<Vec<_>>(),
            vec![
                "https://docs.python.org/3/whatsnew/3.13.html",
                "https://docs.python.org/3/whatsnew/3.12.html",
            ]
        );
    }

    #[test]
    fn test_index_without_section_fails() {
        let index = Page::parse(
            Url::parse("https://docs.python.org/3/whatsnew/").unwrap(),
            "<html><body><div class=\"toctree-wrapper compound\"></div></body></html>",
        );
        assert!(matches!(
            article_links(&index),
            Err(ScrapeError::MissingElement { .. })
        ));
    }

    #[test]
    fn test_parse_article() {
        let article = Page::parse(
            Url::parse("https://docs.python.org/3/whatsnew/3.12.html").unwrap(),
            ARTICLE,
        );
        let record = parse_article(&article).unwrap();
        assert_eq!(record.title, "What's New In Python 3.12");
        assert_eq!(record.editors, "Editor: Adam Turner");
    }
}
