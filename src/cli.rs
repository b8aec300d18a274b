use clap::Parser;

use crate::{modes::Mode, outputs::OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "pydocs_scraper")]
#[command(about = "Scrapes docs.python.org and peps.python.org into small reports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[arg(value_enum, help = "What to scrape")]
    pub mode: Mode,

    #[arg(short, long, help = "Clear the HTTP cache before scraping")]
    pub clear_cache: bool,

    #[arg(short, long, value_enum, help = "How to output the results")]
    pub output: Option<OutputFormat>,
}
