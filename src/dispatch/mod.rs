//! The dispatch thread: the single consumer of the record queue and the only code that ever
//! touches a sink after registration.
//!
//! It blocks on whichever comes first: a queued message, or one of three self-rearming
//! tickers (flush, rotate, delete). Records are written to every sink in registration order
//! and their buffers go back to the pool. When every sender is gone the channel still yields
//! the messages already queued, so the loop drains them before it exits and hands the sinks
//! back to whoever joins it.

use crate::error::Error;
use crate::internal;
use crate::pool::{BufferPool, Encoded};
use crate::sink::{Sink, SinkRegistry};
use crossbeam_channel::{Receiver, never, select, tick};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Thread name, visible in debuggers and panic messages.
pub const THREAD_NAME: &str = "sinklog-dispatch";

/// Periods of the three maintenance tickers. A zero period disables that ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub flush: Duration,
    pub rotate: Duration,
    pub delete: Duration,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            flush: Duration::from_secs(1),
            rotate: Duration::from_secs(10),
            delete: Duration::from_secs(3600),
        }
    }
}

/// What producers put on the queue.
pub(crate) enum Message {
    Record(Encoded),
    /// Late registration; travels the queue so it is ordered against records.
    Register(Box<dyn Sink>),
}

fn ticker(period: Duration) -> Receiver<Instant> {
    if period.is_zero() {
        never()
    } else {
        tick(period)
    }
}

/// Starts the dispatch thread. Joining the handle is the shutdown-complete signal.
pub(crate) fn spawn(
    rx: Receiver<Message>,
    registry: SinkRegistry,
    pool: Arc<BufferPool>,
    intervals: Intervals,
) -> Result<JoinHandle<SinkRegistry>, Error> {
    let handle = thread::Builder::new()
        .name(THREAD_NAME.to_string())
        .spawn(move || run(&rx, registry, &pool, intervals))?;
    Ok(handle)
}

/// Runs until the queue is closed and drained.
pub(crate) fn run(
    rx: &Receiver<Message>,
    mut registry: SinkRegistry,
    pool: &BufferPool,
    intervals: Intervals,
) -> SinkRegistry {
    internal::debug(
        "DISPATCH",
        &format!(
            "Started with {} sinks (flush={:?}, rotate={:?}, delete={:?})",
            registry.len(),
            intervals.flush,
            intervals.rotate,
            intervals.delete
        ),
    );

    let flush = ticker(intervals.flush);
    let rotate = ticker(intervals.rotate);
    let delete = ticker(intervals.delete);
    let mut delivered: u64 = 0;

    loop {
        select! {
            recv(rx) -> msg => match msg {
                Ok(Message::Record(record)) => {
                    registry.write_all(&record);
                    pool.release(record);
                    delivered += 1;
                }
                Ok(Message::Register(sink)) => registry.push(sink),
                Err(_) => break,
            },
            recv(flush) -> _ => registry.flush_all(),
            recv(rotate) -> _ => registry.rotate_all(),
            recv(delete) -> _ => registry.delete_all(),
        }
    }

    internal::debug(
        "DISPATCH",
        &format!("Queue closed and drained after {delivered} records"),
    );
    registry
}
