// Shared, observable chart state

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};
use tracing::debug;

use crate::core::chart::Chart;
use crate::core::query::QueryParams;

/// One change of the parameter mapping, as seen at the moment it happened.
#[derive(Debug, Clone, Copy)]
pub struct ParamsChange<'a> {
    pub params: &'a QueryParams,
    /// Debounce mode of the source when the change was made.
    pub debounce: bool,
}

/// Called synchronously, once per change, from inside the mutation that
/// caused it. Listeners must not call back into the source.
pub type ParamsListener = Box<dyn Fn(ParamsChange<'_>) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Something whose query parameters can be observed.
pub trait ObservableUrl: Send + Sync {
    /// The latest parameter mapping.
    fn params(&self) -> QueryParams;

    /// True while updates arrive at high frequency (e.g. timeline playback).
    fn debounce_mode(&self) -> bool;

    /// Registers a listener that fires only when the mapping actually differs.
    fn observe(&self, listener: ParamsListener) -> ListenerId;

    /// Returns false if `id` was not registered.
    fn unobserve(&self, id: ListenerId) -> bool;
}

struct ChartState {
    chart: Chart,
    params: QueryParams,
}

/// A `Chart` behind a lock. Every mutation goes through `update`, which
/// recomputes the parameters and notifies listeners if they changed.
pub struct LiveChart {
    state: RwLock<ChartState>,
    listeners: Mutex<Vec<(ListenerId, ParamsListener)>>,
    next_listener: AtomicU64,
}

impl LiveChart {
    pub fn new(chart: Chart) -> Self {
        let params = chart.params();
        Self {
            state: RwLock::new(ChartState { chart, params }),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Chart) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state.chart)
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut Chart) -> R) -> R {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let result = f(&mut state.chart);

        let params = state.chart.params();
        if params != state.params {
            state.params = params;
            let change = ParamsChange {
                params: &state.params,
                debounce: state.chart.debounce_mode,
            };
            debug!("Chart params changed: {:?} (debounce {})", change.params, change.debounce);

            // Notified under the state lock so listeners see changes in order
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            for (_, listener) in listeners.iter() {
                listener(change);
            }
        }

        result
    }

    pub fn params(&self) -> QueryParams {
        self.read_state(|state| state.params.clone())
    }

    pub fn debounce_mode(&self) -> bool {
        self.read(|chart| chart.debounce_mode)
    }

    fn read_state<R>(&self, f: impl FnOnce(&ChartState) -> R) -> R {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }
}

impl ObservableUrl for LiveChart {
    fn params(&self) -> QueryParams {
        LiveChart::params(self)
    }

    fn debounce_mode(&self) -> bool {
        LiveChart::debounce_mode(self)
    }

    fn observe(&self, listener: ParamsListener) -> ListenerId {
        let id = ListenerId(self.next_listener.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    fn unobserve(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }
}
