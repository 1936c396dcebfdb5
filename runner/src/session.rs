//! Session facade — spawns runs and applies completed reports to the store.
//!
//! Data flows one way: a run task produces a [`RunReport`] value, the session
//! merges it and emits an event for the host to redraw on. The run itself
//! holds no reference back to any UI state, and the update event fires at
//! most once per run, only on success.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::mpsc;

use rucop_types::RunReport;

use crate::config::RunnerConfig;
use crate::error::RunError;
use crate::store::ResultStore;
use crate::task;

/// Channel capacity for events flowing from run tasks to the subscriber.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// An event emitted by the session to its subscriber.
#[derive(Debug)]
pub enum SessionEvent {
    /// A run completed and its results were merged; redraw trigger.
    Updated {
        /// Files the completed run analyzed.
        files: usize,
    },
    /// A run failed before producing a report. On a parse failure the error
    /// carries the raw captured output for display.
    RunFailed(RunError),
}

/// Project-lifetime analysis state: the current merged store plus the
/// configuration every run is launched with.
///
/// Runs are independent background tasks; several may be in flight at once
/// and there is no cross-run mutual exclusion. Completion order determines
/// final state: two runs racing on the same path resolve to whichever
/// finishes last, a known limitation inherited from the merge contract. A
/// slow stale run can never regress paths it didn't analyze.
pub struct AnalysisSession {
    config: RunnerConfig,
    workdir: PathBuf,
    /// Swapped wholesale on merge - readers always see a fully-formed store.
    store: RwLock<Arc<ResultStore>>,
    event_tx: mpsc::Sender<SessionEvent>,
}

impl AnalysisSession {
    /// Create a session and the event stream its subscriber consumes.
    #[must_use]
    pub fn new(config: RunnerConfig, workdir: PathBuf) -> (Arc<Self>, mpsc::Receiver<SessionEvent>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let session = Arc::new(Self {
            config,
            workdir,
            store: RwLock::new(Arc::new(ResultStore::new())),
            event_tx,
        });
        (session, event_rx)
    }

    /// Current merged store. Cheap; safe to call from annotation queries on
    /// any thread while merges happen elsewhere.
    #[must_use]
    pub fn snapshot(&self) -> Arc<ResultStore> {
        Arc::clone(
            &self
                .store
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Launch an independent background run over `paths`.
    ///
    /// The returned handle can be awaited but doesn't have to be; dropping it
    /// detaches the run. There is no mid-run cancellation - abandoning a
    /// session lets in-flight runs finish against the old store.
    pub fn spawn_run(self: &Arc<Self>, paths: Vec<PathBuf>) -> tokio::task::JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            match task::run(&session.config, &session.workdir, &paths).await {
                Ok(report) => {
                    let files = report.len();
                    session.apply(&report);
                    let _ = session.event_tx.send(SessionEvent::Updated { files }).await;
                }
                Err(error) => {
                    tracing::warn!(error = %error, "analyzer run failed");
                    let _ = session.event_tx.send(SessionEvent::RunFailed(error)).await;
                }
            }
        })
    }

    /// Merge a completed report and atomically swap in the new store.
    fn apply(&self, report: &RunReport) {
        let mut guard = self.store.write().unwrap_or_else(PoisonError::into_inner);
        let merged = guard.merge(report);
        *guard = Arc::new(merged);
    }
}
