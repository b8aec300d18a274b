use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};
use url::Url;

pub const MAIN_DOC_URL: &str = "https://docs.python.org/3/";
pub const PEP_URL: &str = "https://peps.python.org/";

const ENV_PREFIX: &str = "PYDOCS_";

/// The env vars that can override the scraping defaults, all prefixed with
/// `PYDOCS_`.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapingEnv {
    main_doc_url: Option<String>,
    pep_url: Option<String>,
    base_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub main_doc_url: Url,
    pub pep_url: Url,
    pub base_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl ScrapingConfig {
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        Self::from_env(scraping_env)
    }

    pub fn from_env(scraping_env: ScrapingEnv) -> anyhow::Result<Self> {
        let base_dir = match scraping_env.base_dir {
            Some(base_dir) => base_dir,
            None => std::env::current_dir().context("failed to read working directory")?,
        };
        let cache_dir = scraping_env
            .cache_dir
            .unwrap_or_else(|| base_dir.join(".http_cache"));
        Ok(Self {
            main_doc_url: parse_url(scraping_env.main_doc_url.as_deref().unwrap_or(MAIN_DOC_URL))?,
            pep_url: parse_url(scraping_env.pep_url.as_deref().unwrap_or(PEP_URL))?,
            base_dir,
            cache_dir,
        })
    }

    /// Config rooted at `base_dir` that scrapes the given sites instead of the
    /// real ones.
    pub fn for_sites(main_doc_url: &str, pep_url: &str, base_dir: &Path) -> anyhow::Result<Self> {
        Self::from_env(ScrapingEnv {
            main_doc_url: Some(main_doc_url.to_string()),
            pep_url: Some(pep_url.to_string()),
            base_dir: Some(base_dir.to_path_buf()),
            cache_dir: None,
        })
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.base_dir.join("downloads")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.base_dir.join("results")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }
}

fn parse_url(raw: &str) -> anyhow::Result<Url> {
    Url::parse(raw).with_context(|| format!("invalid url in config: {raw}"))
}

/// Statuses a PEP may carry for each status letter of the PEP index.
#[derive(Debug, Clone, Default)]
pub struct ExpectedStatusMap {
    statuses: HashMap<String, Vec<String>>,
}

impl ExpectedStatusMap {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [&'a str])>) -> Self {
        let statuses = entries
            .into_iter()
            .map(|(code, allowed)| {
                (
                    code.to_string(),
                    allowed.iter().map(|status| status.to_string()).collect(),
                )
            })
            .collect();
        Self { statuses }
    }

    /// What peps.python.org currently uses. The empty code is a PEP without a
    /// status letter, i.e. a draft or an active informational PEP.
    pub fn python_defaults() -> Self {
        Self::new([
            ("A", &["Active", "Accepted"][..]),
            ("D", &["Deferred"][..]),
            ("F", &["Final"][..]),
            ("P", &["Provisional"][..]),
            ("R", &["Rejected"][..]),
            ("S", &["Superseded"][..]),
            ("W", &["Withdrawn"][..]),
            ("", &["Draft", "Active"][..]),
        ])
    }

    pub fn allowed(&self, code: &str) -> Option<&[String]> {
        self.statuses.get(code).map(Vec::as_slice)
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
