mod cache;
mod locator;
mod page;
mod ratelimit;
mod requests;
mod result_table;
mod scrape_error;
mod text_manipulators;
mod utils;

pub mod cli;
pub mod config;
pub mod download_scraper;
pub mod logging;
pub mod outputs;
pub mod pep_scraper;
pub mod modes;
pub mod scraping_context;
pub mod status_check;
pub mod versions_scraper;
pub mod whats_new_scraper;

pub use cache::HttpCache;
pub use locator::{AttrMatch, Locator, required_attr};
pub use page::Page;
pub use requests::RequestClient;
pub use result_table::ResultTable;
pub use scrape_error::ScrapeError;
pub use modes::{Mode, run_mode};
pub use scraping_context::ScrapingContext;
