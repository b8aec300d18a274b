use crate::{
    cache::HttpCache,
    config::{ExpectedStatusMap, ScrapingConfig},
    requests::RequestClient,
};

/// Everything a scraper needs for one run: where to look, the shared cached
/// client and the PEP status expectations.
pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub expected_statuses: ExpectedStatusMap,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    pub fn from_config(scraping_config: ScrapingConfig) -> anyhow::Result<Self> {
        let request_client =
            RequestClient::new(HttpCache::new(scraping_config.cache_dir.clone()))?;
        Ok(ScrapingContext {
            scraping_config,
            expected_statuses: ExpectedStatusMap::python_defaults(),
            request_client,
        })
    }
}
