//! Interleaved sequence printer.
//!
//! Three cooperating workers emit the sequence `0 1 0 2 0 3 ... 0 n` to a
//! shared sink: one worker owns the separator, one the odd numbers, one the
//! even numbers. No worker ever emits two consecutive items; the ordering is
//! enforced purely by permit hand-off between the three.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Raised by a sink implementation that could not accept an emission.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("sink failed: {0}")]
pub struct SinkError(pub String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrintError {
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// A worker was cancelled while blocked on a permit.
    #[error("printing cancelled")]
    Cancelled,
}

/// Receives the emissions of the three workers.
///
/// Implementations are called with no permit held, so they may block; a
/// returned error aborts the run and surfaces from [`run`].
pub trait SeqSink: Send + Sync + 'static {
    fn emit_sep(&self) -> Result<(), SinkError>;
    fn emit_odd(&self, n: u32) -> Result<(), SinkError>;
    fn emit_even(&self, n: u32) -> Result<(), SinkError>;
}

/// Emits `0 1 0 2 ... 0 n` to `sink` using three workers.
///
/// The separator permit starts at one, the odd and even permits at zero.
/// After each separator the owner grants the permit of whichever number
/// worker is next; each number worker grants the separator permit back.
/// Completion is guaranteed for every `n`; the first sink error is returned
/// after the peer workers have been aborted.
pub async fn run<S: SeqSink>(n: u32, sink: Arc<S>) -> Result<(), PrintError> {
    let sep = Arc::new(Semaphore::new(1));
    let odd = Arc::new(Semaphore::new(0));
    let even = Arc::new(Semaphore::new(0));

    let mut workers: JoinSet<Result<(), PrintError>> = JoinSet::new();

    {
        let (sep, odd, even) = (sep.clone(), odd.clone(), even.clone());
        let sink = sink.clone();
        workers.spawn(async move {
            for i in 0..=n {
                acquire(&sep).await?;
                sink.emit_sep()?;
                if i < n {
                    // Grant the worker that owns the next number in line.
                    if i % 2 == 0 {
                        odd.add_permits(1);
                    } else {
                        even.add_permits(1);
                    }
                }
            }
            Ok(())
        });
    }

    {
        let (sep, odd) = (sep.clone(), odd.clone());
        let sink = sink.clone();
        workers.spawn(async move {
            for i in (1..=n).step_by(2) {
                acquire(&odd).await?;
                sink.emit_odd(i)?;
                sep.add_permits(1);
            }
            Ok(())
        });
    }

    {
        let sink = sink.clone();
        workers.spawn(async move {
            for i in (2..=n).step_by(2) {
                acquire(&even).await?;
                sink.emit_even(i)?;
                sep.add_permits(1);
            }
            Ok(())
        });
    }

    let mut first_failure = Ok(());
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                // Keep the first failure; peers blocked on a permit would
                // otherwise never make progress again.
                first_failure = first_failure.and(Err(err));
                workers.abort_all();
            }
            // A peer aborted mid-acquire joins as cancelled.
            Err(join_err) if join_err.is_cancelled() => {}
            Err(_) => {
                first_failure = first_failure.and(Err(PrintError::Cancelled));
                workers.abort_all();
            }
        }
    }
    first_failure
}

/// Takes one unit from `sem`, consuming it rather than returning it on drop.
async fn acquire(sem: &Semaphore) -> Result<(), PrintError> {
    match sem.acquire().await {
        Ok(permit) => {
            permit.forget();
            Ok(())
        }
        Err(_) => Err(PrintError::Cancelled),
    }
}

/// Sink that prints every emission to stdout without separators or newlines,
/// matching the exercise's expected console output.
pub struct StdoutSink;

impl SeqSink for StdoutSink {
    fn emit_sep(&self) -> Result<(), SinkError> {
        print!("0");
        Ok(())
    }

    fn emit_odd(&self, n: u32) -> Result<(), SinkError> {
        print!("{}", n);
        Ok(())
    }

    fn emit_even(&self, n: u32) -> Result<(), SinkError> {
        print!("{}", n);
        Ok(())
    }
}
