// Keeps a location's query string in sync with an observable parameter mapping

use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Sleep};
use tracing::{debug, info};

use crate::core::constants::URL_DEBOUNCE_MS;
use crate::core::error::{ChartUrlError, Result};
use crate::core::live_chart::{ObservableUrl, ParamsChange};
use crate::core::location::LocationPort;
use crate::core::query::{query_params_to_str, QueryParams};

/// Pushes parameter changes to a location. A change made outside debounce
/// mode is pushed before the mutation that caused it returns. In debounce
/// mode pushes are coalesced until updates stop for the debounce window.
///
/// Binding spawns the debounce timer, so it must happen inside a tokio runtime.
pub struct UrlBinder {
    debounce: Duration,
    binding: Option<Binding>,
}

struct Binding {
    push: Arc<Mutex<PushState>>,
    unobserve: Box<dyn FnOnce() + Send>,
    timer: JoinHandle<()>,
}

// All pushes happen under this lock, so an immediate push and a firing
// timer never interleave.
struct PushState {
    active: bool,
    pending: Option<QueryParams>,
}

impl Default for UrlBinder {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlBinder {
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(URL_DEBOUNCE_MS))
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            binding: None,
        }
    }

    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    pub fn bind_to_window<S, L>(&mut self, source: Arc<S>, location: Arc<L>) -> Result<()>
    where
        S: ObservableUrl + ?Sized + 'static,
        L: LocationPort + ?Sized + 'static,
    {
        if self.binding.is_some() {
            return Err(ChartUrlError::AlreadyBound);
        }

        let push = Arc::new(Mutex::new(PushState {
            active: true,
            pending: None,
        }));
        let (restart_tx, restart_rx) = mpsc::unbounded_channel();
        let timer = tokio::spawn(run_debounce_timer(
            self.debounce,
            restart_rx,
            push.clone(),
            location.clone(),
        ));

        // Only later changes are pushed, not the state at bind time
        let listener_push = push.clone();
        let id = source.observe(Box::new(move |change: ParamsChange<'_>| {
            let mut state = lock(&listener_push);
            if !state.active {
                return;
            }
            if change.debounce {
                state.pending = Some(change.params.clone());
                // Restart the timer on every change; fails only once the timer is gone
                let _ = restart_tx.send(());
            } else {
                state.pending = None;
                replace_query(location.as_ref(), change.params);
            }
        }));

        self.binding = Some(Binding {
            push,
            unobserve: Box::new(move || {
                source.unobserve(id);
            }),
            timer,
        });

        info!("URL binder bound (debounce {:?})", self.debounce);
        Ok(())
    }

    /// Stops observing and drops any scheduled push. Unbinding an unbound
    /// binder does nothing.
    pub fn unbind_from_window(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        {
            let mut state = lock(&binding.push);
            state.active = false;
            state.pending = None;
        }
        (binding.unobserve)();
        binding.timer.abort();
        info!("URL binder unbound");
    }
}

impl Drop for UrlBinder {
    fn drop(&mut self) {
        self.unbind_from_window();
    }
}

fn lock(push: &Mutex<PushState>) -> MutexGuard<'_, PushState> {
    push.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn run_debounce_timer<L: LocationPort + ?Sized>(
    debounce: Duration,
    mut restart_rx: mpsc::UnboundedReceiver<()>,
    push: Arc<Mutex<PushState>>,
    location: Arc<L>,
) {
    let mut deadline: Option<Pin<Box<Sleep>>> = None;

    loop {
        tokio::select! {
            restart = restart_rx.recv() => {
                if restart.is_none() {
                    debug!("URL source dropped the binder, stopping timer");
                    break;
                }
                deadline = Some(Box::pin(sleep(debounce)));
            }
            _ = wait_deadline(&mut deadline) => {
                deadline = None;
                let mut state = lock(&push);
                // An immediate push since the last restart already took it
                if state.active {
                    if let Some(params) = state.pending.take() {
                        replace_query(location.as_ref(), &params);
                    }
                }
            }
        }
    }
}

async fn wait_deadline(deadline: &mut Option<Pin<Box<Sleep>>>) {
    match deadline {
        Some(timer) => timer.as_mut().await,
        None => std::future::pending().await,
    }
}

fn replace_query<L: LocationPort + ?Sized>(location: &L, params: &QueryParams) {
    let query = query_params_to_str(params);
    debug!("Replacing location query with {:?}", query);
    location.replace_query_str(&query);
}
