//! Named parameters for inputs and queries.
//!
//! Definitions carry [`Params`]: a map from parameter name to either a
//! literal or a reference to an input.  Before a provider is invoked the
//! map is *resolved* against the current [`Context`][crate::Context] into a
//! flat list of `(name, value)` pairs, which providers read through a
//! [`ParamValues`] view.
//!
//! Resolution is one level deep: an `Input` parameter is evaluated with no
//! parameters of its own.

use std::collections::BTreeMap;

use crate::Tag;

/// A literal value, or a forward reference to an input resolved lazily.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parameter {
    Literal(f32),
    Input(Tag),
}

impl From<f32> for Parameter {
    fn from(v: f32) -> Self {
        Parameter::Literal(v)
    }
}

/// Parameter map.  `BTreeMap` so iteration (and therefore resolution order
/// and query-cache keys) is deterministic.
pub type Params = BTreeMap<Tag, Parameter>;

/// Read-only view over resolved parameter values.
#[derive(Copy, Clone, Debug, Default)]
pub struct ParamValues<'a>(&'a [(Tag, f32)]);

impl<'a> ParamValues<'a> {
    pub const EMPTY: ParamValues<'static> = ParamValues(&[]);

    #[inline]
    pub fn new(values: &'a [(Tag, f32)]) -> Self {
        Self(values)
    }

    /// Value of parameter `name`, if it was supplied.
    pub fn get(&self, name: &str) -> Option<f32> {
        self.0
            .iter()
            .find(|(tag, _)| tag.as_str() == name)
            .map(|&(_, v)| v)
    }

    #[inline]
    pub fn get_or(&self, name: &str, default: f32) -> f32 {
        self.get(name).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Tag, f32)> {
        self.0.iter().map(|(t, v)| (t, *v))
    }

    pub fn as_slice(&self) -> &'a [(Tag, f32)] {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
