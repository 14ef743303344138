//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! A brain update needs `&mut AgentRng` for its own agent (tie-break and
//! jitter draws) while every provider holds `&AgentStore` for world reads.
//! Keeping RNGs in a separate `AgentRngs` struct lets both borrows coexist.
//!
//! # Slots and generations
//!
//! `AgentId` is a slot index.  Despawning frees the slot and bumps its
//! generation; the next spawn may reuse the slot.  [`AgentHandle`]s carry
//! the generation they were minted with, so a handle to a despawned agent
//! never resolves to whoever occupies the slot later.

use ua_core::{AgentHandle, AgentId, AgentRng, Rotator, TagSet, UaError, UaResult, Vec3};

use crate::AgentSpawn;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed: u64,
}

impl AgentRngs {
    pub(crate) fn new(seed: u64) -> Self {
        Self { inner: Vec::new(), seed }
    }

    /// Make sure a seeded RNG exists for `agent`'s slot.
    pub fn ensure(&mut self, agent: AgentId) {
        while self.inner.len() <= agent.index() {
            let next = AgentId(self.inner.len() as u32);
            self.inner.push(AgentRng::new(self.seed, next));
        }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        self.ensure(agent);
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `slots()` elements; the `AgentId` value is
/// the index into all of them.  Dead slots keep stale data until reused.
#[derive(Default)]
pub struct AgentStore {
    generation: Vec<u32>,
    alive:      Vec<bool>,
    location:   Vec<Vec3>,
    rotation:   Vec<Rotator>,
    tags:       Vec<TagSet>,
    free:       Vec<AgentId>,
    live:       usize,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Place a new agent, reusing the most recently freed slot if any.
    pub fn spawn(&mut self, spawn: AgentSpawn) -> AgentHandle {
        let id = match self.free.pop() {
            Some(id) => {
                let i = id.index();
                self.alive[i] = true;
                self.location[i] = spawn.location;
                self.rotation[i] = spawn.rotation;
                self.tags[i] = spawn.tags;
                id
            }
            None => {
                let id = AgentId(self.generation.len() as u32);
                self.generation.push(0);
                self.alive.push(true);
                self.location.push(spawn.location);
                self.rotation.push(spawn.rotation);
                self.tags.push(spawn.tags);
                id
            }
        };
        self.live += 1;
        AgentHandle::new(id, self.generation[id.index()])
    }

    /// Remove an agent.  Outstanding handles to it become stale.
    pub fn despawn(&mut self, agent: AgentId) -> UaResult<()> {
        if !self.is_alive(agent) {
            return Err(UaError::AgentNotFound(agent));
        }
        let i = agent.index();
        self.alive[i] = false;
        self.generation[i] = self.generation[i].wrapping_add(1);
        self.tags[i] = TagSet::new();
        self.free.push(agent);
        self.live -= 1;
        Ok(())
    }

    // ── Identity ──────────────────────────────────────────────────────────

    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// Current handle for a live agent.
    pub fn handle(&self, agent: AgentId) -> Option<AgentHandle> {
        self.is_alive(agent)
            .then(|| AgentHandle::new(agent, self.generation[agent.index()]))
    }

    /// Upgrade a weak handle.  `None` if the agent has been despawned.
    pub fn resolve(&self, handle: AgentHandle) -> Option<AgentId> {
        let i = handle.id.index();
        (self.is_alive(handle.id) && self.generation[i] == handle.generation).then_some(handle.id)
    }

    /// Number of slots ever allocated (live + free).
    pub fn slots(&self) -> usize {
        self.generation.len()
    }

    /// Number of live agents.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterator over live `AgentId`s in ascending slot order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| AgentId(i as u32))
    }

    // ── Spatial state ─────────────────────────────────────────────────────

    pub fn location(&self, agent: AgentId) -> Option<Vec3> {
        self.is_alive(agent).then(|| self.location[agent.index()])
    }

    pub fn rotation(&self, agent: AgentId) -> Option<Rotator> {
        self.is_alive(agent).then(|| self.rotation[agent.index()])
    }

    pub fn set_location(&mut self, agent: AgentId, location: Vec3) -> UaResult<()> {
        if !self.is_alive(agent) {
            return Err(UaError::AgentNotFound(agent));
        }
        self.location[agent.index()] = location;
        Ok(())
    }

    pub fn set_rotation(&mut self, agent: AgentId, rotation: Rotator) -> UaResult<()> {
        if !self.is_alive(agent) {
            return Err(UaError::AgentNotFound(agent));
        }
        self.rotation[agent.index()] = rotation;
        Ok(())
    }

    // ── Tags ──────────────────────────────────────────────────────────────

    pub fn tags(&self, agent: AgentId) -> Option<&TagSet> {
        self.is_alive(agent).then(|| &self.tags[agent.index()])
    }

    pub fn tags_mut(&mut self, agent: AgentId) -> Option<&mut TagSet> {
        if self.is_alive(agent) {
            Some(&mut self.tags[agent.index()])
        } else {
            None
        }
    }

    /// `false` for dead agents.
    pub fn has_all_tags(&self, agent: AgentId, required: &TagSet) -> bool {
        self.tags(agent).is_some_and(|t| t.has_all(required))
    }

    /// `false` for dead agents.
    pub fn has_any_tags(&self, agent: AgentId, tags: &TagSet) -> bool {
        self.tags(agent).is_some_and(|t| t.has_any(tags))
    }
}
