//! Bounded concurrent fetcher.
//!
//! Drains a frontier of identifiers breadth-first with a width-bounded pool
//! of fetch tasks, records a bounded digest per identifier, and discovers
//! further identifiers inside each payload up to a global cap. Termination
//! is quiescence-based: the session ends once the frontier is empty and no
//! fetch is in flight.

pub mod extract;

mod error;
mod session;

pub use error::{CrawlError, FetchError, SinkError};
pub use session::{crawl, CrawlConfig, DataSink, Fetcher, LogSink};
