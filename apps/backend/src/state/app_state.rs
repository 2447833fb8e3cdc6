use std::sync::Arc;

use crate::config::EngineConfig;
use crate::realtime::GameEventHub;
use crate::services::persistence::PersistenceLogger;
use crate::services::GameFlowService;

/// Shared engine resources, built once by `infra::state::build_state`.
#[derive(Clone)]
pub struct EngineState {
    pub flow: GameFlowService,
    /// Present when notifications go through the in-process hub.
    pub hub: Option<Arc<GameEventHub>>,
    pub persistence: Arc<dyn PersistenceLogger>,
}

impl EngineState {
    pub fn flow(&self) -> &GameFlowService {
        &self.flow
    }

    pub fn config(&self) -> &EngineConfig {
        self.flow.config()
    }

    pub fn hub(&self) -> Option<&Arc<GameEventHub>> {
        self.hub.as_ref()
    }
}
