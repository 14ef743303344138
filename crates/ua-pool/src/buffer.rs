//! Type-erased per-type free lists.

use std::any::Any;

// ── Trait object ──────────────────────────────────────────────────────────────

/// Type-erased interface for a free list of `Vec<T>` buffers.
///
/// The trait is sealed (only implementable inside this crate) via the private
/// `Sealed` supertrait, so every list in the pool is a [`TypedBufferList`]
/// and downcasts cannot fail for a matching `TypeId`.
pub trait BufferList: Send + 'static + sealed::Sealed {
    /// Number of idle buffers.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every idle buffer, releasing its memory.
    fn clear(&mut self);

    #[doc(hidden)]
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

mod sealed {
    pub trait Sealed {}
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Idle `Vec<T>` buffers, all empty with their capacity retained.
pub struct TypedBufferList<T: Send + 'static>(pub Vec<Vec<T>>);

impl<T: Send + 'static> TypedBufferList<T> {
    pub fn new() -> Self {
        Self(Vec::new())
    }
}

impl<T: Send + 'static> Default for TypedBufferList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> sealed::Sealed for TypedBufferList<T> {}

impl<T: Send + 'static> BufferList for TypedBufferList<T> {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn clear(&mut self) {
        self.0.clear();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
