//! The evaluation context: one fully bound point in the search space.

use crate::{AgentHandle, AgentId, Rotator, Vec3};

/// Free-form value for the custom context dimension.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CustomValue {
    Int(i64),
    Float(f32),
    Vector(Vec3),
}

impl CustomValue {
    /// Numeric view: ints widen, vectors report their length.
    pub fn as_f32(self) -> f32 {
        match self {
            CustomValue::Int(i)    => i as f32,
            CustomValue::Float(f)  => f,
            CustomValue::Vector(v) => v.length(),
        }
    }
}

/// The acting agent plus at most one value from each query dimension.
///
/// Contexts are produced by context generation, consumed by one scoring
/// pass, and handed to the winning action.  They are `Copy` and never
/// mutated after construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Context {
    pub self_agent: AgentId,
    /// Weak reference; may have expired by the time the context is scored.
    pub target:     Option<AgentHandle>,
    pub location:   Vec3,
    pub rotation:   Rotator,
    pub custom:     Option<CustomValue>,
}

impl Context {
    /// A context holding only the acting agent, with zero location/rotation.
    #[inline]
    pub fn for_self(agent: AgentId) -> Self {
        Self {
            self_agent: agent,
            target:     None,
            location:   Vec3::ZERO,
            rotation:   Rotator::ZERO,
            custom:     None,
        }
    }

    pub fn with_target(mut self, target: AgentHandle) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_location(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    pub fn with_rotation(mut self, rotation: Rotator) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_custom(mut self, custom: CustomValue) -> Self {
        self.custom = Some(custom);
        self
    }
}
