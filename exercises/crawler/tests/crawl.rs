use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crawler::{CrawlConfig, CrawlError, DataSink, FetchError, Fetcher, LogSink, SinkError};

/// Fetcher scripted from a url -> payload map; unknown urls fail.
struct MapFetcher {
    pages: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    fn new(pages: &[(&str, &str)]) -> Arc<MapFetcher> {
        Arc::new(MapFetcher {
            pages: pages
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        })
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError(format!("no route to {}", url)))
    }
}

/// Every fetch yields a payload pointing at one identifier never seen before.
struct GeneratingFetcher {
    counter: AtomicUsize,
}

impl Fetcher for GeneratingFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("see http://fresh.example/{}", n))
    }
}

struct FailingFetcher;

impl Fetcher for FailingFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError("connection refused".into()))
    }
}

#[derive(Default)]
struct VecLog {
    lines: Mutex<Vec<String>>,
}

impl VecLog {
    fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    fn count_prefixed(&self, prefix: &str) -> usize {
        self.lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }
}

impl LogSink for VecLog {
    fn log(&self, line: &str) -> Result<(), SinkError> {
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// Fetcher whose payloads link each identifier to the next in a chain of
/// `limit` identifiers.
struct ChainFetcher {
    limit: usize,
}

impl Fetcher for ChainFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let index: usize = url
            .rsplit('/')
            .next()
            .unwrap()
            .parse()
            .expect("chain urls end in an index");
        if index + 1 < self.limit {
            Ok(format!("next http://chain.example/{}", index + 1))
        } else {
            Ok(String::new())
        }
    }
}

/// Instant for the seed, sleeps through the grace period for everything
/// else.
struct SleepyFetcher {
    nap: Duration,
}

impl Fetcher for SleepyFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        if url != "u0" {
            std::thread::sleep(self.nap);
        }
        if url == "u0" {
            Ok("http://u1 http://u2".to_string())
        } else {
            Ok(String::new())
        }
    }
}

/// Log sink that fails on its nth call and accepts every other one.
struct TrippingLog {
    calls: AtomicUsize,
    trip_at: usize,
}

impl LogSink for TrippingLog {
    fn log(&self, _line: &str) -> Result<(), SinkError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) + 1 == self.trip_at {
            Err(SinkError("log sink tripped".into()))
        } else {
            Ok(())
        }
    }
}

/// Log sink that rejects lines starting with a given prefix.
struct PrefixTrippingLog {
    trip_prefix: &'static str,
}

impl LogSink for PrefixTrippingLog {
    fn log(&self, line: &str) -> Result<(), SinkError> {
        if line.starts_with(self.trip_prefix) {
            Err(SinkError(format!("refused {:?}", line)))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
struct MapData {
    records: Mutex<HashMap<String, String>>,
}

impl MapData {
    fn keys(&self) -> HashSet<String> {
        self.records.lock().unwrap().keys().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl DataSink for MapData {
    fn record(&self, url: &str, snippet: &str) -> Result<(), SinkError> {
        self.records
            .lock()
            .unwrap()
            .insert(url.to_string(), snippet.to_string());
        Ok(())
    }
}

fn test_config(cap: usize) -> CrawlConfig {
    CrawlConfig {
        cap,
        width: 4,
        grace: Duration::from_secs(5),
        poll: Duration::from_millis(5),
    }
}

fn done_counter() -> (Arc<AtomicUsize>, impl FnOnce()) {
    let counter = Arc::new(AtomicUsize::new(0));
    let handle = counter.clone();
    (counter, move || {
        handle.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test]
async fn cap_stops_admission() {
    let fetcher = MapFetcher::new(&[
        ("u0", "http://u1 http://u2"),
        ("http://u1", "http://u2 http://u3"),
        ("http://u2", ""),
        ("http://u3", ""),
    ]);
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    crawler::crawl(
        "u0",
        test_config(3),
        fetcher.clone(),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    let expected: HashSet<String> = ["u0", "http://u1", "http://u2"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(data.keys(), expected);
    assert_eq!(data.len(), 3);
    assert_eq!(log.count_prefixed("crawled "), 3);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lone_seed_terminates_quiescent() {
    let fetcher = MapFetcher::new(&[("u0", "")]);
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    crawler::crawl(
        "u0",
        test_config(10),
        fetcher.clone(),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    assert_eq!(data.keys(), HashSet::from(["u0".to_string()]));
    assert_eq!(log.count_prefixed("crawled "), 1);
    assert_eq!(log.count_prefixed("done total=1"), 1);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_failure_is_absorbed() {
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    crawler::crawl(
        "u0",
        test_config(10),
        Arc::new(FailingFetcher),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    assert_eq!(data.len(), 0);
    assert_eq!(log.count_prefixed("error u0 "), 1);
    assert_eq!(log.count_prefixed("done total=1"), 1);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fresh_identifiers_fill_the_cap_exactly() {
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (_done_calls, done) = done_counter();

    crawler::crawl(
        "http://seed.example",
        test_config(5),
        Arc::new(GeneratingFetcher {
            counter: AtomicUsize::new(0),
        }),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    assert_eq!(data.len(), 5);
    assert_eq!(log.count_prefixed("crawled "), 5);
    assert_eq!(log.count_prefixed("done total=5"), 1);
}

#[tokio::test]
async fn identifiers_are_never_fetched_twice() {
    // u0 and u1 point at each other; each may be enqueued repeatedly but
    // admitted once.
    let fetcher = MapFetcher::new(&[
        ("http://u0", "http://u1 http://u0"),
        ("http://u1", "http://u0 http://u1"),
    ]);
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (_done_calls, done) = done_counter();

    crawler::crawl(
        "http://u0",
        test_config(10),
        fetcher.clone(),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    let calls = fetcher.calls.lock().unwrap().clone();
    let unique: HashSet<_> = calls.iter().collect();
    assert_eq!(calls.len(), unique.len(), "refetched: {:?}", calls);
    assert_eq!(data.len(), 2);
}

#[tokio::test]
async fn sink_failure_aborts_but_still_reaches_done() {
    let fetcher = MapFetcher::new(&[
        ("u0", "http://u1"),
        ("http://u1", "http://u2"),
        ("http://u2", "http://u3"),
        ("http://u3", ""),
    ]);
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    let result = crawler::crawl(
        "u0",
        test_config(10),
        fetcher,
        Arc::new(TrippingLog {
            calls: AtomicUsize::new(0),
            trip_at: 2,
        }),
        data,
        done,
    )
    .await;

    assert!(matches!(result, Err(CrawlError::Sink(_))), "{:?}", result);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn deep_chain_is_fully_drained() {
    // Each fetch finishes just as the frontier empties, so the admission
    // loop keeps observing an empty queue with work still in flight; every
    // link must still be admitted before the session goes quiescent.
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    crawler::crawl(
        "http://chain.example/0",
        CrawlConfig {
            poll: Duration::ZERO,
            ..test_config(500)
        },
        Arc::new(ChainFetcher { limit: 200 }),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    assert_eq!(data.len(), 200);
    assert_eq!(log.count_prefixed("crawled "), 200);
    assert_eq!(log.count_prefixed("done total=200"), 1);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn grace_expiry_forces_shutdown() {
    // Cap 2: u1 is admitted while still asleep in its fetch, then u2's
    // admission hits the cap and stops the loop with u1 in flight. The
    // tiny grace period expires long before u1 wakes.
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    crawler::crawl(
        "u0",
        CrawlConfig {
            grace: Duration::from_millis(50),
            ..test_config(2)
        },
        Arc::new(SleepyFetcher {
            nap: Duration::from_secs(2),
        }),
        log.clone(),
        data.clone(),
        done,
    )
    .await
    .unwrap();

    assert_eq!(log.count_prefixed("forced shutdown"), 1);
    assert_eq!(log.count_prefixed("done total=2"), 1);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn teardown_log_failure_still_surfaces() {
    let fetcher = MapFetcher::new(&[("u0", "")]);
    let (done_calls, done) = done_counter();

    let result = crawler::crawl(
        "u0",
        test_config(10),
        fetcher,
        Arc::new(PrefixTrippingLog {
            trip_prefix: "done total",
        }),
        Arc::new(MapData::default()),
        done,
    )
    .await;

    assert!(matches!(result, Err(CrawlError::Sink(_))), "{:?}", result);
    assert_eq!(done_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_seed_is_rejected_before_any_session_starts() {
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());
    let (done_calls, done) = done_counter();

    let result = crawler::crawl(
        "   ",
        test_config(10),
        Arc::new(FailingFetcher),
        log.clone(),
        data,
        done,
    )
    .await;

    assert!(matches!(result, Err(CrawlError::InvalidArgument(_))));
    assert!(log.lines().is_empty());
    assert_eq!(done_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn zero_cap_and_zero_width_are_rejected() {
    let data = Arc::new(MapData::default());
    let result = crawler::crawl(
        "u0",
        CrawlConfig {
            cap: 0,
            ..test_config(1)
        },
        Arc::new(FailingFetcher),
        Arc::new(VecLog::default()),
        data.clone(),
        || {},
    )
    .await;
    assert!(matches!(result, Err(CrawlError::InvalidArgument(_))));

    let result = crawler::crawl(
        "u0",
        CrawlConfig {
            width: 0,
            ..test_config(1)
        },
        Arc::new(FailingFetcher),
        Arc::new(VecLog::default()),
        data,
        || {},
    )
    .await;
    assert!(matches!(result, Err(CrawlError::InvalidArgument(_))));
}

#[tokio::test]
async fn digest_is_bounded_to_one_hundred_chars() {
    let long_payload = "x".repeat(300);
    let fetcher = MapFetcher::new(&[("u0", long_payload.as_str())]);
    let log = Arc::new(VecLog::default());
    let data = Arc::new(MapData::default());

    crawler::crawl("u0", test_config(1), fetcher, log.clone(), data.clone(), || {})
        .await
        .unwrap();

    let records = data.records.lock().unwrap();
    assert_eq!(records["u0"].chars().count(), 100);
    assert_eq!(log.count_prefixed("crawled u0 length=300"), 1);
}
