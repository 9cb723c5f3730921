use std::sync::Arc;

use actix::Actor;

use crate::domain::{StaticWords, WordSource};
use crate::repos::{MemoryStore, Store};
use crate::services::{GameFlowService, RoomService};
use crate::state::app_state::AppState;
use crate::ws::{Hub, DEFAULT_OUTBOX_CAPACITY, DEFAULT_STALL_LIMIT};

/// Builder for creating AppState instances (used in both tests and main).
///
/// `build` starts the hub actor, so it must run inside an actix system.
pub struct StateBuilder {
    store: Option<Arc<dyn Store>>,
    words: Arc<dyn WordSource>,
    outbox_capacity: usize,
    stall_limit: u32,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            words: Arc::new(StaticWords),
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
            stall_limit: DEFAULT_STALL_LIMIT,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_words(mut self, words: Arc<dyn WordSource>) -> Self {
        self.words = words;
        self
    }

    pub fn with_outbox_capacity(mut self, capacity: usize) -> Self {
        self.outbox_capacity = capacity.max(1);
        self
    }

    /// Overflowing broadcasts in a row before the hub evicts a connection.
    pub fn with_stall_limit(mut self, limit: u32) -> Self {
        self.stall_limit = limit;
        self
    }

    /// Without an explicit store the state runs on a fresh `MemoryStore`.
    pub fn build(self) -> AppState {
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()) as Arc<dyn Store>);
        let rooms = RoomService::new(store.clone());
        let game_flow = GameFlowService::new(store.clone(), self.words);
        let hub = Hub::new(store.clone(), rooms.clone(), game_flow.clone())
            .with_stall_limit(self.stall_limit)
            .start();
        AppState::new(store, rooms, game_flow, hub, self.outbox_capacity)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
