use thiserror::Error;

/// Raised by a [`crate::Fetcher`] that could not retrieve a payload.
///
/// Fetch failures are per-identifier: they are logged and absorbed, the
/// crawl carries on.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct FetchError(pub String);

/// Raised by a log or data sink. Sink failures are fatal to the session.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("sink failed: {0}")]
pub struct SinkError(pub String);

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Sink(#[from] SinkError),
    #[error("crawl cancelled")]
    Cancelled,
}
