use std::sync::Arc;

use crate::abf::DecisionClient;
use crate::config::Config;
use crate::resource::ResourceStore;

/// Application context containing shared dependencies.
///
/// Constructed once at startup and passed explicitly to every pipeline stage;
/// everything in here is immutable after init, so concurrent requests share it
/// without locking.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<ResourceStore>,
    pub decision_client: Arc<dyn DecisionClient>,
}

impl AppContext {
    pub fn new(
        config: Arc<Config>,
        store: Arc<ResourceStore>,
        decision_client: Arc<dyn DecisionClient>,
    ) -> Self {
        Self {
            config,
            store,
            decision_client,
        }
    }
}
