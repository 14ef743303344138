//! Action definitions and how brains assemble them.

use std::sync::Arc;

use ua_core::{Tag, TagSet};
use ua_query::Query;
use ua_scoring::Consideration;

use crate::{BrainError, BrainResult};

/// One selectable behaviour: what to run, how to score it, and when it is
/// allowed.
///
/// Definitions are configuration data, shared read-only (behind `Arc`) by
/// every brain that uses them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    /// Identity used in logs, diagnostics and the disable list.
    pub name: Tag,

    /// Action kind, looked up in the [`ActionLibrary`][crate::ActionLibrary].
    pub action: Tag,

    #[cfg_attr(feature = "serde", serde(default))]
    pub considerations: Vec<Consideration>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub queries: Vec<Query>,

    /// Starting value of the score product.
    #[cfg_attr(feature = "serde", serde(default = "default_weight"))]
    pub weight: f32,

    /// Lower values are evaluated first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub required_tags: TagSet,

    #[cfg_attr(feature = "serde", serde(default))]
    pub blocking_tags: TagSet,

    /// Score bonus while this action is running and its cooldown is positive.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inertia: f32,

    /// Seconds the inertia bonus lasts after the action starts.
    #[cfg_attr(feature = "serde", serde(default))]
    pub inertia_cooldown: f32,
}

#[cfg(feature = "serde")]
fn default_weight() -> f32 {
    1.0
}

impl ActionDefinition {
    /// A definition with weight 1, priority 0 and nothing else.
    pub fn new(name: impl Into<Tag>, action: impl Into<Tag>) -> Self {
        Self {
            name:             name.into(),
            action:           action.into(),
            considerations:   Vec::new(),
            queries:          Vec::new(),
            weight:           1.0,
            priority:         0,
            required_tags:    TagSet::new(),
            blocking_tags:    TagSet::new(),
            inertia:          0.0,
            inertia_cooldown: 0.0,
        }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn consider(mut self, consideration: Consideration) -> Self {
        self.considerations.push(consideration);
        self
    }

    pub fn query(mut self, query: Query) -> Self {
        self.queries.push(query);
        self
    }

    pub fn require(mut self, tag: impl Into<Tag>) -> Self {
        self.required_tags.insert(tag);
        self
    }

    pub fn block(mut self, tag: impl Into<Tag>) -> Self {
        self.blocking_tags.insert(tag);
        self
    }

    pub fn inertia(mut self, bonus: f32, cooldown_secs: f32) -> Self {
        self.inertia = bonus;
        self.inertia_cooldown = cooldown_secs;
        self
    }

    /// Reject values that would poison every score they touch.
    ///
    /// A zero weight is accepted; such definitions are skipped during
    /// eligibility instead.
    pub fn validate(&self) -> BrainResult<()> {
        let invalid = |reason: &str| BrainError::InvalidDefinition {
            name:   self.name.clone(),
            reason: reason.to_owned(),
        };
        if !(self.weight.is_finite() && self.weight >= 0.0) {
            return Err(invalid("weight must be finite and non-negative"));
        }
        if !(self.inertia.is_finite() && self.inertia >= 0.0) {
            return Err(invalid("inertia must be finite and non-negative"));
        }
        if !(self.inertia_cooldown.is_finite() && self.inertia_cooldown >= 0.0) {
            return Err(invalid("inertia_cooldown must be finite and non-negative"));
        }
        Ok(())
    }
}

/// A named bundle of definitions shared by many brains.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSet {
    pub name:    String,
    pub actions: Vec<Arc<ActionDefinition>>,
}

impl ActionSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), actions: Vec::new() }
    }

    pub fn with(mut self, definition: ActionDefinition) -> Self {
        self.actions.push(Arc::new(definition));
        self
    }
}

/// Everything one brain can choose from: shared sets plus its own
/// definitions.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BrainSpec {
    #[cfg_attr(feature = "serde", serde(default))]
    pub sets: Vec<Arc<ActionSet>>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub actions: Vec<Arc<ActionDefinition>>,
}

impl BrainSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_set(mut self, set: Arc<ActionSet>) -> Self {
        self.sets.push(set);
        self
    }

    pub fn with_action(mut self, definition: ActionDefinition) -> Self {
        self.actions.push(Arc::new(definition));
        self
    }

    /// Sets in order, then agent-specific definitions, stable-sorted by
    /// ascending priority.
    pub fn combined(&self) -> Vec<Arc<ActionDefinition>> {
        let mut all: Vec<Arc<ActionDefinition>> = self
            .sets
            .iter()
            .flat_map(|set| set.actions.iter().cloned())
            .chain(self.actions.iter().cloned())
            .collect();
        all.sort_by_key(|d| d.priority);
        all
    }
}
