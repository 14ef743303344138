//! Engine-wide services shared by every brain in a world.

use ua_core::EngineConfig;
use ua_pool::ResourcePool;
use ua_query::QueryRegistry;
use ua_scoring::{CurveLibrary, InputRegistry};

use crate::ActionLibrary;

/// Provider tables, the scratch pool and the engine config.
///
/// Owned by the world and passed by reference into every brain update;
/// registration happens before the first tick.
pub struct Services {
    pub inputs:  InputRegistry,
    pub queries: QueryRegistry,
    pub curves:  CurveLibrary,
    pub actions: ActionLibrary,
    pub pool:    ResourcePool,
    pub config:  EngineConfig,
}

impl Services {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            inputs:  InputRegistry::new(config.missing_input_default),
            queries: QueryRegistry::new(),
            curves:  CurveLibrary::new(),
            actions: ActionLibrary::new(),
            pool:    ResourcePool::new(),
            config,
        }
    }
}

impl Default for Services {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
