use crate::config::{Config, View, MISSING_KEY_STATUS};
use crate::lookback::{Lookback, LOOKBACKS};
use crate::perf::{compute, ShortSeriesPolicy};
use crate::render::{render, Card};
use crate::source::HistorySource;
use crate::Outcome;
use futures::future::join_all;
use futures::FutureExt;
use std::fmt::Display;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Showing the last applied grid.
    Idle,
    Loading,
}

/// What started a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    ViewChanged,
    Manual,
}

/// Handle for one refresh; only the latest ticket may change the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub view: View,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Rendered,
    Failed,
    /// A newer refresh was started; the result was dropped.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub view: View,
    pub generation: u64,
    pub status: String,
    pub cards: Vec<Card>,
}

/// The board: watch lists in, cards out, with a generation counter guarding the grid.
pub struct Dashboard<S> {
    config: Arc<Config>,
    source: S,
    lookbacks: Vec<Lookback>,
    policy: ShortSeriesPolicy,
    state: Mutex<Snapshot>,
}

impl<S: HistorySource> Dashboard<S> {
    pub fn new(config: Arc<Config>, source: S) -> Self {
        let status = if config.has_credential() {
            String::new()
        } else {
            MISSING_KEY_STATUS.to_string()
        };

        Self {
            config,
            source,
            lookbacks: LOOKBACKS.to_vec(),
            policy: ShortSeriesPolicy::default(),
            state: Mutex::new(Snapshot {
                phase: Phase::Idle,
                view: View::default(),
                generation: 0,
                status,
                cards: Vec::new(),
            }),
        }
    }

    pub fn with_policy(mut self, policy: ShortSeriesPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.lock().await.clone()
    }

    /// Start a refresh: bump the generation, clear the grid, enter `Loading`.
    pub async fn begin(&self, view: View, trigger: Trigger) -> Ticket {
        let mut state = self.state.lock().await;
        state.generation += 1;
        state.phase = Phase::Loading;
        state.view = view;
        state.status = "Fetching data…".to_string();
        state.cards.clear();

        log::debug!("Refresh #{} of {view} ({trigger:?})", state.generation);
        Ticket {
            generation: state.generation,
            view,
            trigger,
        }
    }

    /// Fetch and compute every item of `view` concurrently, waiting for all of them to settle.
    pub async fn fetch_batch(&self, view: View) -> Vec<Outcome> {
        let items = self.config.watchlist(view);
        let time = std::time::Instant::now();

        let outcomes = join_all(items.iter().map(|item| async move {
            let outcome = match self.source.history(&item.ticker).await {
                Ok(series) => compute(&series, &self.lookbacks, self.policy),
                Err(e) => Err(e),
            };
            if let Err(e) = &outcome {
                log::warn!("[{}] {} failed: {e}", item.ticker, item.name);
            }
            outcome
        }))
        .await;

        log::debug!(
            "{view}: {} of {} tickers succeeded. Elapsed time: {} ms",
            outcomes.iter().filter(|o| o.is_ok()).count(),
            outcomes.len(),
            time.elapsed().as_millis()
        );
        outcomes
    }

    /// Render `outcomes` into the grid if `ticket` is still the latest refresh.
    pub async fn apply(&self, ticket: &Ticket, outcomes: &[Outcome]) -> Applied {
        let mut state = self.state.lock().await;
        if ticket.generation != state.generation {
            log::warn!(
                "Dropping stale refresh #{} (current #{})",
                ticket.generation,
                state.generation
            );
            return Applied::Stale;
        }

        let items = self.config.watchlist(ticket.view);
        state.cards = render(items, outcomes, &self.lookbacks);
        state.status = format!("Updated: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
        state.phase = Phase::Idle;
        Applied::Rendered
    }

    /// Report a failure of the batch itself, if `ticket` is still the latest refresh.
    pub async fn fail(&self, ticket: &Ticket, e: impl Display) -> Applied {
        let mut state = self.state.lock().await;
        if ticket.generation != state.generation {
            return Applied::Stale;
        }

        log::error!("Refresh #{} failed: {e}", ticket.generation);
        state.status = format!("Error: {e}");
        state.phase = Phase::Idle;
        Applied::Failed
    }

    /// `begin`, `fetch_batch`, then `apply`; a panic inside the batch is reported via `fail`.
    pub async fn refresh(&self, view: View, trigger: Trigger) -> Applied {
        let ticket = self.begin(view, trigger).await;

        match AssertUnwindSafe(self.fetch_batch(view)).catch_unwind().await {
            Ok(outcomes) => self.apply(&ticket, &outcomes).await,
            Err(panic) => {
                let msg = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unexpected failure".to_string());
                self.fail(&ticket, msg).await
            }
        }
    }
}
