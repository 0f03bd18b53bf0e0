use std::ops::Range;
use std::sync::mpsc;

use crate::config::{Config, DEFAULT_PAGE_SIZE, DEFAULT_PREFETCH_THRESHOLD};
use crate::domain::{navigation, render_window, Article, Direction};
use crate::services::fetch_worker::{FetchCompletion, FetchDispatcher, FetchRequest};
use crate::storage::SessionCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSettings {
    pub page_size: usize,
    pub prefetch_threshold: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            prefetch_threshold: DEFAULT_PREFETCH_THRESHOLD,
        }
    }
}

impl From<&Config> for FeedSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            prefetch_threshold: config.prefetch_threshold,
        }
    }
}

/// What the presentation layer should show for the current state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Nothing loaded yet, first page on its way
    InitialLoading,
    /// Nothing loaded and the last fetch failed
    InitialError(String),
    /// Fetches succeeded but returned no articles
    Empty,
    Browsing {
        loading_more: bool,
        load_more_error: Option<String>,
    },
}

/// Owns the feed: loaded articles, the cursor and the single outstanding
/// fetch. Fetches are dispatched asynchronously and their outcome is handed
/// back through [`FeedController::complete`].
pub struct FeedController<C: SessionCache, D: FetchDispatcher> {
    cache: C,
    dispatcher: D,
    settings: FeedSettings,
    items: Vec<Article>,
    cursor: usize,
    loading: bool,
    in_flight: Option<u64>,
    last_ticket: u64,
    error: Option<String>,
    is_initial_load: bool,
}

impl<C: SessionCache, D: FetchDispatcher> FeedController<C, D> {
    pub fn new(cache: C, dispatcher: D, settings: FeedSettings) -> Self {
        Self {
            cache,
            dispatcher,
            settings,
            items: Vec::new(),
            cursor: 0,
            loading: false,
            in_flight: None,
            last_ticket: 0,
            error: None,
            is_initial_load: true,
        }
    }

    /// Restore the cached feed, or request the first page when there is none
    pub fn initialize(&mut self) {
        if !self.items.is_empty() {
            tracing::debug!("feed already populated, skipping initialize");
            return;
        }

        match self.cache.load() {
            Ok(Some(items)) if !items.is_empty() => {
                tracing::info!(count = items.len(), "restored feed from session cache");
                self.items = items;
                self.cursor = 0;
                self.is_initial_load = false;
                self.loading = false;
                return;
            }
            Ok(_) => tracing::debug!("no cached feed"),
            Err(e) => tracing::warn!(error = %e, "could not restore cached feed"),
        }

        self.fetch_more();
    }

    /// Request the next page. Returns false when a fetch is already in
    /// flight or the request could not be dispatched.
    pub fn fetch_more(&mut self) -> bool {
        if let Some(ticket) = self.in_flight {
            tracing::trace!(ticket, "fetch already in flight");
            return false;
        }

        self.last_ticket += 1;
        let request = FetchRequest {
            ticket: self.last_ticket,
            count: self.settings.page_size,
        };

        self.in_flight = Some(request.ticket);
        self.loading = true;
        self.error = None;

        tracing::debug!(ticket = request.ticket, count = request.count, "dispatching fetch");
        if let Err(e) = self.dispatcher.dispatch(request) {
            tracing::error!(ticket = request.ticket, error = %e, "could not dispatch fetch");
            self.release();
            self.error = Some(e.to_string());
            return false;
        }

        true
    }

    /// Same as [`fetch_more`](Self::fetch_more), triggered by the user
    pub fn retry(&mut self) -> bool {
        tracing::info!("retrying fetch");
        self.fetch_more()
    }

    /// Apply the outcome of a dispatched fetch. A page is appended whole or
    /// not at all.
    pub fn complete(&mut self, completion: FetchCompletion) {
        if self.in_flight != Some(completion.ticket) {
            tracing::warn!(
                ticket = completion.ticket,
                in_flight = ?self.in_flight,
                "ignoring completion for unknown fetch"
            );
            return;
        }
        self.release();

        match completion.result {
            Ok(page) => {
                let received = page.len();
                self.items.extend(page);
                self.is_initial_load = false;
                tracing::debug!(received, total = self.items.len(), "page appended");

                self.persist();

                if received == 0 {
                    tracing::warn!("source returned an empty page, not prefetching");
                    return;
                }
                self.maybe_prefetch();
            }
            Err(e) => {
                if e.is_fetch_failure() {
                    tracing::warn!(ticket = completion.ticket, error = %e, "fetch failed");
                } else {
                    tracing::error!(ticket = completion.ticket, error = %e, "fetch failed unexpectedly");
                }
                self.error = Some(e.to_string());
            }
        }
    }

    /// Apply every completion already waiting on `completions`
    pub fn drain_completions(&mut self, completions: &mpsc::Receiver<FetchCompletion>) -> usize {
        let mut applied = 0;
        while let Ok(completion) = completions.try_recv() {
            self.complete(completion);
            applied += 1;
        }
        applied
    }

    /// Move the cursor one step. Returns whether it moved.
    pub fn advance(&mut self, direction: Direction) -> bool {
        let Some(cursor) = navigation::step(self.cursor, self.items.len(), direction) else {
            return false;
        };

        self.cursor = cursor;
        self.maybe_prefetch();
        true
    }

    /// Fetch ahead once the user is within the prefetch threshold of the end
    fn maybe_prefetch(&mut self) -> bool {
        if self.in_flight.is_some() {
            return false;
        }

        let remaining = self.items.len().saturating_sub(self.cursor);
        if remaining > self.settings.prefetch_threshold {
            return false;
        }

        tracing::debug!(remaining, cursor = self.cursor, "prefetch threshold reached");
        self.fetch_more()
    }

    fn release(&mut self) {
        self.in_flight = None;
        self.loading = false;
    }

    fn persist(&self) {
        if let Err(e) = self.cache.save(&self.items) {
            tracing::warn!(error = %e, "could not save feed to session cache");
        }
    }

    pub fn status(&self) -> FeedStatus {
        if self.items.is_empty() {
            return match (&self.error, self.loading || self.is_initial_load) {
                (Some(error), _) => FeedStatus::InitialError(error.clone()),
                (None, true) => FeedStatus::InitialLoading,
                (None, false) => FeedStatus::Empty,
            };
        }

        FeedStatus::Browsing {
            loading_more: self.loading,
            load_more_error: self.error.clone(),
        }
    }

    pub fn render_window(&self) -> Range<usize> {
        render_window(self.cursor, self.items.len())
    }

    /// The articles to materialize: previous, current and next
    pub fn window(&self) -> &[Article] {
        &self.items[self.render_window()]
    }

    pub fn current(&self) -> Option<&Article> {
        self.items.get(self.cursor)
    }

    /// Mutable access for the like toggle, which only touches `is_liked`
    pub fn article_mut(&mut self, id: i64) -> Option<&mut Article> {
        self.items.iter_mut().find(|a| a.id == id)
    }

    pub fn items(&self) -> &[Article] {
        &self.items
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_ticket(&self) -> Option<u64> {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_initial_load(&self) -> bool {
        self.is_initial_load
    }

    pub fn settings(&self) -> FeedSettings {
        self.settings
    }
}
