use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::index_store::IndexStore;
use crate::logging;
use crate::model::SearchRecord;
use crate::pager::Pager;
use crate::remote::BookmarkSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleState {
    Idle,
    Running,
    Stopping,
    Stopped,
}

struct Signal {
    stop: Mutex<bool>,
    wake: Condvar,
}

/// Owns the background timer loop: one refresh cycle immediately on start,
/// then one per interval until stopped. Cancellation is cooperative — the
/// stop flag is checked between waits and cycles, never mid-request — and
/// `stop` joins the thread, so a stopped scheduler can be discarded without
/// a second loop racing on the same store. A scheduler runs at most once;
/// reconfiguration builds a replacement instead of restarting this one.
pub struct RefreshScheduler {
    source: Arc<dyn BookmarkSource>,
    store: Arc<IndexStore>,
    interval: Duration,
    page_limit: u64,
    signal: Arc<Signal>,
    state: Arc<Mutex<ScheduleState>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    pub fn new(
        source: Arc<dyn BookmarkSource>,
        store: Arc<IndexStore>,
        interval: Duration,
        page_limit: u64,
    ) -> Self {
        Self {
            source,
            store,
            interval,
            page_limit,
            signal: Arc::new(Signal {
                stop: Mutex::new(false),
                wake: Condvar::new(),
            }),
            state: Arc::new(Mutex::new(ScheduleState::Idle)),
            handle: None,
        }
    }

    pub fn state(&self) -> ScheduleState {
        *lock_state(&self.state)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn start(&mut self) {
        {
            let mut state = lock_state(&self.state);
            if *state != ScheduleState::Idle {
                return;
            }
            *state = ScheduleState::Running;
        }

        let source = Arc::clone(&self.source);
        let store = Arc::clone(&self.store);
        let signal = Arc::clone(&self.signal);
        let state = Arc::clone(&self.state);
        let interval = self.interval;
        let page_limit = self.page_limit;

        self.handle = Some(std::thread::spawn(move || {
            run_refresh_cycle(source.as_ref(), &store, page_limit);
            loop {
                let stop = signal
                    .stop
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                let (stop, _) = signal
                    .wake
                    .wait_timeout_while(stop, interval, |stop| !*stop)
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if *stop {
                    break;
                }
                drop(stop);
                run_refresh_cycle(source.as_ref(), &store, page_limit);
            }
            *lock_state(&state) = ScheduleState::Stopped;
        }));
    }

    /// Idempotent. Signals the loop, then blocks until it has fully exited.
    pub fn stop(&mut self) {
        {
            let mut stop = self
                .signal
                .stop
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *stop = true;
        }
        {
            let mut state = lock_state(&self.state);
            if *state == ScheduleState::Running {
                *state = ScheduleState::Stopping;
            }
        }
        self.signal.wake.notify_all();

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        *lock_state(&self.state) = ScheduleState::Stopped;
    }

    /// Runs one cycle on the caller's thread, independent of the timer. May
    /// overlap a timer cycle; the store's atomic replace keeps that safe.
    pub fn refresh_now(&self) -> usize {
        run_refresh_cycle(self.source.as_ref(), &self.store, self.page_limit)
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One full fetch-all, transform, replace pass. A page failure terminates
/// pagination early and the partial batch still replaces the generation:
/// freshness wins over completeness. Never fails — the timer loop must
/// outlive any bad cycle.
pub fn run_refresh_cycle(source: &dyn BookmarkSource, store: &IndexStore, page_limit: u64) -> usize {
    let start = Instant::now();
    let batch: Vec<SearchRecord> = Pager::new(source, page_limit)
        .map(|raw| SearchRecord::from_raw(&raw))
        .collect();
    let count = batch.len();
    store.replace(batch);
    logging::info(&format!(
        "indexed {count} bookmarks [{} ms]",
        start.elapsed().as_millis()
    ));
    count
}

fn lock_state(state: &Mutex<ScheduleState>) -> std::sync::MutexGuard<'_, ScheduleState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
