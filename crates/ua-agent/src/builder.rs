//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use ua_agent::{AgentSpawn, AgentStoreBuilder};
//! use ua_core::Vec3;
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(AgentSpawn::at(Vec3::ZERO).tag("Guard"))
//!     .agents(3, |i| AgentSpawn::at(Vec3::new(i as f32 * 10.0, 0.0, 0.0)))
//!     .build();
//!
//! assert_eq!(store.len(), 4);
//! assert_eq!(rngs.len(), 4);
//! ```

use ua_core::{Rotator, Tag, TagSet, Vec3};

use crate::{AgentRngs, AgentStore};

/// Initial state for one agent.  Omitted fields default when loaded from
/// JSON, so `{"location": {...}}` is a valid spawn.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentSpawn {
    pub location: Vec3,
    pub rotation: Rotator,
    pub tags:     TagSet,
}

impl AgentSpawn {
    pub fn at(location: Vec3) -> Self {
        Self { location, ..Self::default() }
    }

    pub fn facing(mut self, rotation: Rotator) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn tag(mut self, tag: impl Into<Tag>) -> Self {
        self.tags.insert(tag);
        self
    }
}

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    seed:   u64,
    spawns: Vec<AgentSpawn>,
}

impl AgentStoreBuilder {
    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, spawns: Vec::new() }
    }

    /// Queue one agent.  Agents receive `AgentId`s in the order added.
    pub fn agent(mut self, spawn: AgentSpawn) -> Self {
        self.spawns.push(spawn);
        self
    }

    /// Queue `count` agents produced by `make(i)`.
    pub fn agents(mut self, count: usize, mut make: impl FnMut(usize) -> AgentSpawn) -> Self {
        self.spawns.extend((0..count).map(&mut make));
        self
    }

    /// Construct `AgentStore` and `AgentRngs` with one seeded RNG per agent.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::new();
        let mut rngs = AgentRngs::new(self.seed);
        for spawn in self.spawns {
            let handle = store.spawn(spawn);
            rngs.ensure(handle.id);
        }
        (store, rngs)
    }
}
