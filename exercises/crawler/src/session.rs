//! Crawl session state and the admission/draining discipline.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tokio::time;

use crate::error::{CrawlError, FetchError, SinkError};
use crate::extract;

/// Characters of payload retained per identifier.
const SNIPPET_CHARS: usize = 100;

/// Retrieves the payload behind an identifier. May block on I/O; the
/// session runs it on the blocking pool.
pub trait Fetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Receives progress lines (`crawled ...`, `error ...`, `forced shutdown`,
/// `done total=...`). A sink error aborts the session.
pub trait LogSink: Send + Sync + 'static {
    fn log(&self, line: &str) -> Result<(), SinkError>;
}

/// Receives one digest record per successfully fetched identifier.
pub trait DataSink: Send + Sync + 'static {
    fn record(&self, url: &str, snippet: &str) -> Result<(), SinkError>;
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Hard ceiling on admitted identifiers.
    pub cap: usize,
    /// Number of fetches allowed in flight at once.
    pub width: usize,
    /// How long outstanding fetches get after admission stops.
    pub grace: Duration,
    /// Sleep between quiescence samples while the frontier is empty.
    pub poll: Duration,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig {
            cap: 10,
            width: 4,
            grace: Duration::from_secs(60),
            poll: Duration::from_millis(25),
        }
    }
}

enum Admission {
    Admitted,
    Duplicate,
    CapReached,
}

/// Shared state of one crawl. Created per `crawl` call, dropped at
/// quiescence.
struct Session {
    frontier: Mutex<VecDeque<String>>,
    visited: Mutex<HashSet<String>>,
    digest: Mutex<HashMap<String, String>>,
    active: AtomicUsize,
    running: AtomicBool,
    fatal: Mutex<Option<CrawlError>>,
    cap: usize,
}

impl Session {
    fn new(cap: usize) -> Session {
        Session {
            frontier: Mutex::new(VecDeque::new()),
            visited: Mutex::new(HashSet::new()),
            digest: Mutex::new(HashMap::new()),
            active: AtomicUsize::new(0),
            running: AtomicBool::new(false),
            fatal: Mutex::new(None),
            cap,
        }
    }

    /// Test-and-insert into the visited set under one lock so an identifier
    /// is accepted at most once and the cap is never overshot.
    async fn admit(&self, url: &str) -> Admission {
        let mut visited = self.visited.lock().await;
        if visited.contains(url) {
            return Admission::Duplicate;
        }
        if visited.len() >= self.cap {
            return Admission::CapReached;
        }
        visited.insert(url.to_owned());
        Admission::Admitted
    }

    /// Liberal enqueue used by extraction: skip identifiers already visited
    /// or observed while the cap is full, but leave the hard enforcement to
    /// admission.
    async fn offer(&self, url: &str) {
        let visited = self.visited.lock().await;
        if visited.len() < self.cap && !visited.contains(url) {
            self.frontier.lock().await.push_back(url.to_owned());
        }
    }

    /// Records the first fatal error; later ones are dropped.
    async fn record_fatal(&self, err: CrawlError) {
        let mut fatal = self.fatal.lock().await;
        if fatal.is_none() {
            *fatal = Some(err);
        }
    }

    async fn has_fatal(&self) -> bool {
        self.fatal.lock().await.is_some()
    }
}

/// Decrements the active-task counter on every exit path of a fetch task,
/// including cancellation.
struct ActiveGuard(Arc<Session>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Crawls the identifier graph breadth-first from `seed`.
///
/// Admission keeps draining the frontier until it observes quiescence (no
/// queued identifiers and no fetch in flight) or the cap is hit; outstanding
/// fetches then get the configured grace period before a forced shutdown.
/// `done` is invoked exactly once when the session goes idle. Per-identifier
/// fetch failures are logged and absorbed; the first sink failure aborts the
/// session and is returned.
pub async fn crawl<D>(
    seed: &str,
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    log_sink: Arc<dyn LogSink>,
    data_sink: Arc<dyn DataSink>,
    done: D,
) -> Result<(), CrawlError>
where
    D: FnOnce(),
{
    let seed = seed.trim();
    if seed.is_empty() {
        return Err(CrawlError::InvalidArgument("seed must not be empty".into()));
    }
    if config.cap == 0 {
        return Err(CrawlError::InvalidArgument("cap must be positive".into()));
    }
    if config.width == 0 {
        return Err(CrawlError::InvalidArgument("width must be positive".into()));
    }

    info!("crawl started, seed {} cap {} width {}", seed, config.cap, config.width);

    let session = Arc::new(Session::new(config.cap));
    session.running.store(true, Ordering::SeqCst);
    session.frontier.lock().await.push_back(seed.to_owned());

    let limiter = Arc::new(Semaphore::new(config.width));
    let mut tasks: JoinSet<()> = JoinSet::new();

    loop {
        if session.has_fatal().await {
            break;
        }
        // Sample the counter before popping: a task that finishes in
        // between has already pushed its discoveries, so an empty pop with
        // a zero pre-sample really is quiescence.
        let idle = session.active.load(Ordering::SeqCst) == 0;
        let next = session.frontier.lock().await.pop_front();
        let Some(url) = next else {
            if idle {
                break; // quiescence
            }
            time::sleep(config.poll).await;
            continue;
        };
        match session.admit(&url).await {
            Admission::Duplicate => continue,
            Admission::CapReached => {
                debug!("cap {} reached, admission stopped", config.cap);
                break;
            }
            Admission::Admitted => {}
        }
        let permit = match limiter.clone().acquire_owned().await {
            Ok(permit) => permit,
            Err(_) => {
                session.record_fatal(CrawlError::Cancelled).await;
                break;
            }
        };
        session.active.fetch_add(1, Ordering::SeqCst);
        tasks.spawn(fetch_task(
            session.clone(),
            url,
            fetcher.clone(),
            log_sink.clone(),
            data_sink.clone(),
            permit,
        ));
    }

    // Draining. Outstanding fetches get the grace period; a fatal sink
    // failure gets none.
    let grace = if session.has_fatal().await {
        Duration::ZERO
    } else {
        config.grace
    };
    let drained = time::timeout(grace, async {
        while tasks.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        tasks.abort_all();
        while tasks.join_next().await.is_some() {}
        warn!("grace period expired with fetches still in flight");
        if let Err(err) = log_sink.log("forced shutdown") {
            session.record_fatal(CrawlError::Sink(err)).await;
        }
    }

    let total = session.visited.lock().await.len();
    if let Err(err) = log_sink.log(&format!("done total={}", total)) {
        session.record_fatal(CrawlError::Sink(err)).await;
    }
    let was_running = session.running.swap(false, Ordering::SeqCst);
    debug_assert!(was_running, "session reached the terminal transition twice");
    done();
    info!("crawl finished, {} identifiers visited", total);

    let outcome = session.fatal.lock().await.take();
    match outcome {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

async fn fetch_task(
    session: Arc<Session>,
    url: String,
    fetcher: Arc<dyn Fetcher>,
    log_sink: Arc<dyn LogSink>,
    data_sink: Arc<dyn DataSink>,
    permit: OwnedSemaphorePermit,
) {
    let _permit = permit;
    let _guard = ActiveGuard(session.clone());

    let fetched = {
        let fetcher = fetcher.clone();
        let target = url.clone();
        tokio::task::spawn_blocking(move || fetcher.fetch(&target)).await
    };
    let payload = match fetched {
        Ok(Ok(payload)) => payload,
        Ok(Err(err)) => {
            debug!("fetch of {} failed: {}", url, err);
            if let Err(sink_err) = log_sink.log(&format!("error {} {}", url, err)) {
                session.record_fatal(CrawlError::Sink(sink_err)).await;
            }
            return;
        }
        // The blocking call was torn down underneath us during shutdown.
        Err(_) => return,
    };

    let snippet: String = payload.chars().take(SNIPPET_CHARS).collect();
    session.digest.lock().await.insert(url.clone(), snippet.clone());

    if let Err(err) = log_sink.log(&format!("crawled {} length={}", url, payload.len())) {
        session.record_fatal(CrawlError::Sink(err)).await;
        return;
    }
    if let Err(err) = data_sink.record(&url, &snippet) {
        session.record_fatal(CrawlError::Sink(err)).await;
        return;
    }

    for candidate in extract::candidate_urls(&payload) {
        session.offer(candidate).await;
    }
}
