use thiserror::Error;

/// Structural failures: the upstream markup no longer matches what the
/// scrapers expect. Any of these aborts the current run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("parser error: no element matching {locator} in {context}")]
    MissingElement { locator: String, context: String },

    #[error("parser error: <{tag}> has no `{attr}` attribute")]
    MissingAttribute { tag: String, attr: String },

    #[error("parser error: sidebar has no \"All versions\" list")]
    VersionsListNotFound,

    #[error("could not resolve link {href:?} against {base}")]
    InvalidUrl {
        href: String,
        base: String,
        #[source]
        source: url::ParseError,
    },
}
