//! The single search state store.

use std::sync::Arc;

use tokio::sync::watch;

use crate::data_definitions::search_state::SearchState;

/// Holds the current [`SearchState`] snapshot. Each `apply` replaces the
/// snapshot atomically and notifies subscribers.
#[derive(Debug, Clone)]
pub struct SearchStateStore {
    sender: Arc<watch::Sender<SearchState>>,
}

impl Default for SearchStateStore {
    fn default() -> Self {
        Self::new(SearchState::default())
    }
}

impl SearchStateStore {
    pub fn new(initial: SearchState) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender: Arc::new(sender) }
    }

    pub fn snapshot(&self) -> SearchState {
        self.sender.borrow().clone()
    }

    /// Runs `transition` on the current snapshot, stores its result and returns it.
    pub fn apply(&self, transition: impl FnOnce(&SearchState) -> SearchState) -> SearchState {
        let mut next = SearchState::default();
        self.sender.send_modify(|state| {
            *state = transition(state);
            next = state.clone();
        });
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.sender.subscribe()
    }
}
