use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::AppError;
use crate::realtime::GameEventHub;
use crate::services::notifications::NotificationChannel;
use crate::services::persistence::{NoopPersistence, PersistenceLogger, PersistenceQueue};
use crate::services::timeouts::{Scheduler, TokioScheduler};
use crate::services::GameFlowService;
use crate::state::app_state::EngineState;

enum Notifier {
    Hub,
    Custom(Arc<dyn NotificationChannel>),
}

/// Builder for [`EngineState`] (used in both tests and main).
///
/// Defaults: `EngineConfig::default()`, no-op persistence, the in-process
/// event hub and the tokio scheduler.
pub struct StateBuilder {
    config: EngineConfig,
    persistence: Arc<dyn PersistenceLogger>,
    notifier: Notifier,
    scheduler: Arc<dyn Scheduler>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            persistence: Arc::new(NoopPersistence),
            notifier: Notifier::Hub,
            scheduler: Arc::new(TokioScheduler),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Read `SPADES_*` overrides from the environment.
    pub fn with_env_config(mut self) -> Result<Self, AppError> {
        self.config = EngineConfig::from_env()?;
        Ok(self)
    }

    pub fn with_persistence(mut self, persistence: Arc<dyn PersistenceLogger>) -> Self {
        self.persistence = persistence;
        self
    }

    /// Replace the event hub with another channel.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationChannel>) -> Self {
        self.notifier = Notifier::Custom(notifier);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Provider for bot seats and auto-actions.
    pub fn with_provider(mut self, name: impl Into<String>) -> Self {
        self.config.provider = name.into();
        self
    }

    /// Must run inside a tokio runtime: the persistence worker is spawned here.
    pub async fn build(self) -> Result<EngineState, AppError> {
        self.config.validate()?;
        if crate::ai::by_name(&self.config.provider).is_none() {
            return Err(AppError::config(format!(
                "Unknown decision provider '{}'",
                self.config.provider
            )));
        }
        let queue = PersistenceQueue::spawn(self.persistence.clone());
        let (hub, notifier): (Option<Arc<GameEventHub>>, Arc<dyn NotificationChannel>) =
            match self.notifier {
                Notifier::Hub => {
                    let hub = Arc::new(GameEventHub::new());
                    (Some(hub.clone()), hub)
                }
                Notifier::Custom(n) => (None, n),
            };
        let flow = GameFlowService::new(self.config, queue, notifier, self.scheduler);
        Ok(EngineState {
            flow,
            hub,
            persistence: self.persistence,
        })
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
