use log::{info, warn};
use scraper::ElementRef;
use url::Url;

use crate::{
    ResultTable, ScrapeError,
    config::ExpectedStatusMap,
    locator::{Locator, required_attr},
    page::Page,
    scraping_context::ScrapingContext,
    status_check::{LogReporter, MismatchReporter, check_status},
    text_manipulators::extract_text,
    utils::progress_bar,
};

pub const HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL: &str = "Total";
/// Counted in the total, never listed.
pub const APRIL_FOOL: &str = "April Fool!";

/// One row of the PEP index: the status letter and the PEP's own page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PepIndexEntry {
    pub code: String,
    pub url: Url,
}

/// Status frequencies in order of first appearance.
#[derive(Debug, Default, Clone)]
pub struct StatusCounter {
    counts: Vec<(String, usize)>,
}

impl StatusCounter {
    pub fn add(&mut self, status: &str) {
        match self.counts.iter_mut().find(|(seen, _)| seen == status) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((status.to_string(), 1)),
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn into_table(self) -> ResultTable {
        let total = self.total();
        let mut table = ResultTable::new(&HEADER);
        for (status, count) in self.counts {
            if status != APRIL_FOOL {
                table.push_row(vec![status, count.to_string()]);
            }
        }
        table.push_row(vec![TOTAL.to_string(), total.to_string()]);
        table
    }
}

/// Counts PEP statuses as stated on each PEP's own page.
#[derive(Debug)]
pub struct PepScraper {
    pub url: Url,
}

impl PepScraper {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn from_context(ctx: &ScrapingContext) -> Self {
        Self::new(ctx.scraping_config.pep_url.clone())
    }

    pub async fn scrape(&self, ctx: &ScrapingContext) -> anyhow::Result<Option<ResultTable>> {
        self.scrape_with_reporter(ctx, &ctx.expected_statuses, &mut LogReporter)
            .await
    }

    pub async fn scrape_with_reporter(
        &self,
        ctx: &ScrapingContext,
        expected: &ExpectedStatusMap,
        reporter: &mut dyn MismatchReporter,
    ) -> anyhow::Result<Option<ResultTable>> {
        let Some(index) = ctx.request_client.get_page(&self.url).await else {
            return Ok(None);
        };
        let entries = index_entries(&index)?;
        drop(index);
        info!("Found {} PEPs in the index", entries.len());

        let mut counter = StatusCounter::default();
        let pb = progress_bar(entries.len(), "PEPs");
        for entry in entries {
            pb.inc(1);
            let Some(pep_page) = ctx.request_client.get_page(&entry.url).await else {
                warn!("Skipping PEP {}", entry.url);
                continue;
            };
            let status = page_status(&pep_page)?;
            counter.add(&status);
            check_status(expected, &entry.code, &entry.url, &status, reporter);
        }
        pb.finish_and_clear();
        Ok(Some(counter.into_table()))
    }
}

/// Every numbered row of the index tables, in document order.
pub fn index_entries(index: &Page) -> Result<Vec<PepIndexEntry>, ScrapeError> {
    Locator::tag("td")
        .attr("class", "num")
        .find_all(index.root())
        .into_iter()
        .map(|num_cell| -> Result<PepIndexEntry, ScrapeError> {
            let status_cell = num_cell
                .prev_siblings()
                .filter_map(ElementRef::wrap)
                .find(|cell| cell.value().name() == "td")
                .ok_or_else(|| ScrapeError::MissingElement {
                    locator: "<td> before <td class=\"num\">".to_string(),
                    context: "<tr>".to_string(),
                })?;
            // The first letter is the PEP type, the rest its status letter.
            let code = extract_text(status_cell).trim().chars().skip(1).collect();
            let anchor = Locator::tag("a").attr("class", "reference").find(num_cell)?;
            Ok(PepIndexEntry {
                code,
                url: index.resolve(required_attr(anchor, "href")?)?,
            })
        })
        .collect()
}

/// The value next to the "Status" term of a PEP's header block.
pub fn page_status(pep_page: &Page) -> Result<String, ScrapeError> {
    let term = Locator::tag("dt").label("Status").find(pep_page.root())?;
    let value = term
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "dd")
        .ok_or_else(|| ScrapeError::MissingElement {
            locator: "<dd> after <dt>Status".to_string(),
            context: "<dl>".to_string(),
        })?;
    Ok(extract_text(value).trim().to_string())
}
