//! Background article fetching.
//!
//! The worker owns the article source and runs on its own thread. Requests
//! come in over one channel and every request produces exactly one
//! [`FetchCompletion`] on the other, which the event loop feeds back to the
//! controller.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;

use crate::domain::Article;
use crate::errors::{SwipeError, SwipeResult};
use crate::sources::ArticleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: u64,
    pub count: usize,
}

#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: u64,
    pub result: SwipeResult<Vec<Article>>,
}

/// Hands a fetch off to whatever performs it
#[cfg_attr(test, mockall::automock)]
pub trait FetchDispatcher {
    fn dispatch(&self, request: FetchRequest) -> SwipeResult<()>;
}

pub struct FetchWorker {
    requests: mpsc::Sender<FetchRequest>,
}

impl FetchWorker {
    /// Spawn the worker thread. The thread exits once the worker is dropped
    /// or the completion receiver goes away.
    pub fn spawn(
        source: Box<dyn ArticleSource>,
    ) -> SwipeResult<(Self, mpsc::Receiver<FetchCompletion>)> {
        let (request_tx, request_rx) = mpsc::channel();
        let (completion_tx, completion_rx) = mpsc::channel();

        thread::Builder::new()
            .name("fetch-worker".to_string())
            .spawn(move || run(source, request_rx, completion_tx))?;

        Ok((
            Self {
                requests: request_tx,
            },
            completion_rx,
        ))
    }
}

impl FetchDispatcher for FetchWorker {
    fn dispatch(&self, request: FetchRequest) -> SwipeResult<()> {
        self.requests
            .send(request)
            .map_err(|_| SwipeError::WorkerUnavailable)
    }
}

fn run(
    source: Box<dyn ArticleSource>,
    requests: mpsc::Receiver<FetchRequest>,
    completions: mpsc::Sender<FetchCompletion>,
) {
    for request in requests {
        tracing::debug!(ticket = request.ticket, count = request.count, source = source.name(), "fetching page");
        let result = fetch_guarded(source.as_ref(), request.count);

        if let Err(e) = &result {
            tracing::warn!(ticket = request.ticket, error = %e, "fetch failed");
        }

        let completion = FetchCompletion {
            ticket: request.ticket,
            result,
        };
        if completions.send(completion).is_err() {
            tracing::debug!("completion receiver gone, stopping fetch worker");
            return;
        }
    }
}

/// A panicking source still yields a completion
fn fetch_guarded(source: &dyn ArticleSource, count: usize) -> SwipeResult<Vec<Article>> {
    match panic::catch_unwind(AssertUnwindSafe(|| source.fetch(count))) {
        Ok(result) => result,
        Err(_) => Err(SwipeError::Upstream(format!(
            "{} source panicked while fetching",
            source.name()
        ))),
    }
}
