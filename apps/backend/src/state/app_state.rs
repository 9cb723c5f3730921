use std::sync::Arc;

use actix::Addr;

use crate::repos::Store;
use crate::services::{GameFlowService, RoomService};
use crate::ws::Hub;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
    rooms: RoomService,
    game_flow: GameFlowService,
    hub: Addr<Hub>,
    /// Capacity of each new connection's outbox
    outbox_capacity: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        rooms: RoomService,
        game_flow: GameFlowService,
        hub: Addr<Hub>,
        outbox_capacity: usize,
    ) -> Self {
        Self {
            store,
            rooms,
            game_flow,
            hub,
            outbox_capacity,
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    pub fn rooms(&self) -> &RoomService {
        &self.rooms
    }

    pub fn game_flow(&self) -> &GameFlowService {
        &self.game_flow
    }

    pub fn hub(&self) -> &Addr<Hub> {
        &self.hub
    }

    pub fn outbox_capacity(&self) -> usize {
        self.outbox_capacity
    }
}
