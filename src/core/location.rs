// Address-bar access behind a port, so binding works without a browser

use std::sync::{Mutex, PoisonError};

pub trait LocationPort: Send + Sync {
    fn query_str(&self) -> String;

    /// Replaces the query portion of the current history entry in place.
    fn replace_query_str(&self, query: &str);
}

#[derive(Debug, Default)]
struct LocationState {
    query: String,
    replacements: Vec<String>,
}

/// In-process location: holds the current query string and a log of every
/// replacement written to it.
#[derive(Debug, Default)]
pub struct MemoryLocation {
    state: Mutex<LocationState>,
}

impl MemoryLocation {
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(LocationState {
                query: initial_query.into(),
                replacements: Vec::new(),
            }),
        }
    }

    pub fn replacements(&self) -> Vec<String> {
        self.lock().replacements.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LocationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LocationPort for MemoryLocation {
    fn query_str(&self) -> String {
        self.lock().query.clone()
    }

    fn replace_query_str(&self, query: &str) {
        let mut state = self.lock();
        state.query = query.to_string();
        state.replacements.push(query.to_string());
    }
}
