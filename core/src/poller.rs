use std::{future::Future, time::Duration};

use chrono::Utc;
use kwatch_webclient::{Notifier, Submission, SubmissionSource};

use crate::error::*;
use crate::message;
use crate::tracker::{FirstSeenPolicy, StatusTracker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub first_seen: FirstSeenPolicy,
    /// Send "started" / "stopped" messages around the loop.
    pub lifecycle_messages: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10 * 60),
            first_seen: FirstSeenPolicy::default(),
            lifecycle_messages: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleReport {
    /// Nothing was observed; the cache is untouched.
    FetchFailed,
    Observed {
        submissions: usize,
        changes: usize,
        delivered: usize,
    },
}

/// Fetch-diff-notify loop for a single competition.
pub struct Poller<S, N> {
    competition: String,
    source: S,
    notifier: N,
    tracker: StatusTracker,
    cfg: PollerConfig,
}

impl<S, N> Poller<S, N>
where
    S: SubmissionSource,
    N: Notifier,
{
    pub fn new(competition: impl Into<String>, source: S, notifier: N, cfg: PollerConfig) -> Self {
        Self {
            competition: competition.into(),
            source,
            notifier,
            tracker: StatusTracker::new(cfg.first_seen),
            cfg,
        }
    }

    pub fn tracker(&self) -> &StatusTracker {
        &self.tracker
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// First cycle. Unlike later cycles, a rejected credential is fatal here.
    pub async fn start(&mut self) -> Result<CycleReport> {
        let fetched = self.source.list_submissions(&self.competition).await;
        if let Err(e) = &fetched {
            if e.is_auth_error() {
                bail!("Cannot access submissions of '{}': {}", self.competition, e);
            }
        }

        if self.cfg.lifecycle_messages {
            let msg = message::watcher_started(&self.competition, self.cfg.interval);
            self.deliver_logging_error(&msg).await;
        }

        Ok(match fetched {
            Ok(snapshot) => self.process(snapshot).await,
            Err(e) => self.fetch_failed(e),
        })
    }

    /// One fetch-diff-notify pass. Never fails; errors are logged.
    pub async fn run_cycle(&mut self) -> CycleReport {
        match self.source.list_submissions(&self.competition).await {
            Ok(snapshot) => self.process(snapshot).await,
            Err(e) => self.fetch_failed(e),
        }
    }

    /// Runs [`Self::start`], then a cycle per interval until `shutdown` resolves.
    pub async fn run_until<F>(mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let started = tokio::select! {
            res = self.start() => Some(res),
            _ = &mut shutdown => None,
        };
        match started {
            Some(res) => {
                res?;
            }
            None => {
                log::info!("Interrupted before the first fetch");
                return Ok(());
            }
        }

        loop {
            log::debug!("Sleeping {:?}", self.cfg.interval);
            let interrupted = tokio::select! {
                _ = tokio::time::sleep(self.cfg.interval) => false,
                _ = &mut shutdown => true,
            };
            if interrupted {
                break;
            }

            let interrupted = tokio::select! {
                _ = self.run_cycle() => false,
                _ = &mut shutdown => true,
            };
            if interrupted {
                break;
            }
        }

        log::info!("Interrupted; stopping watcher for '{}'", self.competition);
        if self.cfg.lifecycle_messages {
            let msg = message::watcher_stopped(&self.competition);
            self.deliver_logging_error(&msg).await;
        }
        Ok(())
    }

    async fn process(&mut self, snapshot: Vec<Submission>) -> CycleReport {
        let changes = self.tracker.observe(&snapshot);
        let now = Utc::now();

        let mut delivered = 0;
        for change in &changes {
            log::info!(
                "{} {}: {} -> {}",
                self.competition,
                change.submission.id,
                change
                    .previous
                    .as_ref()
                    .map_or("(new)".to_owned(), ToString::to_string),
                change.current(),
            );
            let msg = message::status_change(&self.competition, change, now);
            if self.deliver_logging_error(&msg).await {
                delivered += 1;
            }
        }

        log::info!(
            "Fetched {} submission(s), {} change(s), {} notified",
            snapshot.len(),
            changes.len(),
            delivered
        );
        CycleReport::Observed {
            submissions: snapshot.len(),
            changes: changes.len(),
            delivered,
        }
    }

    fn fetch_failed(&self, e: kwatch_webclient::Error) -> CycleReport {
        log::warn!(
            "Failed to fetch submissions of '{}': {}",
            self.competition,
            e
        );
        CycleReport::FetchFailed
    }

    async fn deliver_logging_error(&self, msg: &kwatch_webclient::Message) -> bool {
        match self.notifier.deliver(msg).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to deliver notification: {}", e);
                false
            }
        }
    }
}
