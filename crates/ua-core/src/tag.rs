//! Interned-ish string tags used to key providers, actions, parameters, and
//! gameplay tag membership.
//!
//! A `Tag` is an `Arc<str>`: cloning is a refcount bump, so definitions can
//! be shared across thousands of brains without copying strings.

use std::fmt;
use std::sync::Arc;

/// Hash map keyed by [`Tag`].  FxHash with the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub type TagMap<V> = rustc_hash::FxHashMap<Tag, V>;
#[cfg(not(feature = "fx-hash"))]
pub type TagMap<V> = std::collections::HashMap<Tag, V>;

/// Hash set of [`Tag`]s.  FxHash with the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub type TagHashSet = rustc_hash::FxHashSet<Tag>;
#[cfg(not(feature = "fx-hash"))]
pub type TagHashSet = std::collections::HashSet<Tag>;

// ── Tag ───────────────────────────────────────────────────────────────────────

/// A cheap-to-clone name such as `"Distance"`, `"Enemies"` or `"State.Stunned"`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub struct Tag(Arc<str>);

impl Tag {
    pub fn new(name: &str) -> Self {
        Tag(Arc::from(name))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag(Arc::from(s))
    }
}

impl From<Tag> for String {
    fn from(t: Tag) -> String {
        t.0.as_ref().to_owned()
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag({:?})", &*self.0)
    }
}

// ── TagSet ────────────────────────────────────────────────────────────────────

/// A small sorted, deduplicated set of tags.
///
/// Agents carry a handful of tags and actions gate on a handful more, so a
/// sorted `Vec` with binary search beats a hash set here.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Tag>", into = "Vec<Tag>"))]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert `tag`.  Returns `false` if it was already present.
    pub fn insert(&mut self, tag: impl Into<Tag>) -> bool {
        let tag = tag.into();
        match self.0.binary_search(&tag) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, tag);
                true
            }
        }
    }

    /// Remove `tag`.  Returns `false` if it was not present.
    pub fn remove(&mut self, tag: &Tag) -> bool {
        match self.0.binary_search(tag) {
            Ok(pos) => {
                self.0.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    #[inline]
    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.binary_search(tag).is_ok()
    }

    /// `true` if every tag in `required` is present.  Vacuously `true` for an
    /// empty `required`.
    pub fn has_all(&self, required: &TagSet) -> bool {
        required.0.iter().all(|t| self.contains(t))
    }

    /// `true` if at least one tag in `other` is present.  `false` for an
    /// empty `other`.
    pub fn has_any(&self, other: &TagSet) -> bool {
        other.0.iter().any(|t| self.contains(t))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut v: Vec<Tag> = iter.into_iter().map(Into::into).collect();
        v.sort();
        v.dedup();
        TagSet(v)
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(v: Vec<Tag>) -> Self {
        v.into_iter().collect()
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(s: TagSet) -> Vec<Tag> {
        s.0
    }
}
