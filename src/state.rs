use std::sync::Arc;

use crate::config::Config;
use crate::generator::{CampaignGenerator, RuleBasedGenerator};
use crate::sessions::SessionStore;

/// Shared application state injected into every handler.
///
/// The session store and the generator are constructed here rather than held
/// as globals, so tests can build isolated instances and swap the generator
/// for a deterministic fake.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub generator: Arc<dyn CampaignGenerator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_generator(config, Arc::new(RuleBasedGenerator))
    }

    pub fn with_generator(config: Config, generator: Arc<dyn CampaignGenerator>) -> Self {
        let sessions = Arc::new(SessionStore::new(config.session_idle()));
        Self {
            config: Arc::new(config),
            sessions,
            generator,
        }
    }
}
