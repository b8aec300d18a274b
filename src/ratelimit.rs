use anyhow::anyhow;
use governor::{
    Quota, RateLimiter as GovernorRateLimiter,
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use nonzero_ext::nonzero;
use std::{num::NonZeroU32, time::Duration};

// python.org is a shared public site; stay well below anything that looks
// like a crawl. Cached responses don't go through here.
const REQ_PER_SEC: NonZeroU32 = nonzero!(10u32);
// No two requests closer than this.
const MS_BETWEEN_REQ: Duration = Duration::from_millis(50);

type SpecificGovernorRateLimiter =
    GovernorRateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

pub struct RateLimiter {
    req_per_sec: SpecificGovernorRateLimiter,
    ms_between_req: SpecificGovernorRateLimiter,
}

impl RateLimiter {
    pub fn new() -> anyhow::Result<Self> {
        // Limit to X total req/sec on average.
        let req_per_sec = GovernorRateLimiter::direct(Quota::per_second(REQ_PER_SEC));

        // Limit to one request every Y ms.
        let between = Quota::with_period(MS_BETWEEN_REQ)
            .ok_or_else(|| anyhow!("request spacing must be non-zero"))?;
        let ms_between_req = GovernorRateLimiter::direct(between);

        Ok(RateLimiter {
            req_per_sec,
            ms_between_req,
        })
    }

    pub async fn wait_until_ready(&self) {
        // Requests are issued one at a time, so the order only matters for
        // the first burst: the per-second quota is checked first, the
        // spacing second.
        self.req_per_sec.until_ready().await;
        self.ms_between_req.until_ready().await;
    }
}
