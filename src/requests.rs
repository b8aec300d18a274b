use anyhow::Context;
use log::{debug, error};
use reqwest::{Client, ClientBuilder, Response};
use url::Url;

use crate::{cache::HttpCache, page::Page, ratelimit::RateLimiter};

pub struct RequestClient {
    client: Client,
    rate_limiter: RateLimiter,
    cache: HttpCache,
}

impl RequestClient {
    pub fn new(cache: HttpCache) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        let rate_limiter = RateLimiter::new()?;
        Ok(Self {
            client,
            rate_limiter,
            cache,
        })
    }

    pub fn cache(&self) -> &HttpCache {
        &self.cache
    }

    /// Uncached GET that fails on any non-2xx status.
    pub async fn fetch_url_response(&self, url: &str) -> anyhow::Result<Response> {
        // Wait (non-blocking) until we're allowed to make a request according
        // to our self-imposed rate-limiting policy.
        self.rate_limiter.wait_until_ready().await;

        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response)
    }

    /// Page body, served from the cache when possible. Only successful
    /// responses are cached.
    pub async fn fetch_url_body(&self, url: &str) -> anyhow::Result<String> {
        if let Some(cached) = self.cache.get(url).await {
            return Ok(cached.body);
        }
        let response = self.fetch_url_response(url).await?;
        // The docs are UTF-8 whatever the headers claim.
        let bytes = response.bytes().await?;
        let body = String::from_utf8_lossy(&bytes).into_owned();
        if let Err(e) = self.cache.store(url, &body).await {
            debug!("Not caching {url}: {e:#}");
        }
        Ok(body)
    }

    /// Raw bytes, straight from the network.
    pub async fn fetch_url_bytes(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self
            .fetch_url_response(url)
            .await
            .with_context(|| format!("failed to download {url}"))?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fetch-or-skip: the parsed page, or `None` after logging why it could
    /// not be loaded. Callers skip the item and carry on.
    pub async fn get_page(&self, url: &Url) -> Option<Page> {
        match self.fetch_url_body(url.as_str()).await {
            Ok(body) => Some(Page::parse(url.clone(), &body)),
            Err(e) => {
                error!("Failed to load page {url}: {e:#}");
                None
            }
        }
    }
}
