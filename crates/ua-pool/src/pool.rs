//! `ResourcePool` and its scoped `Pooled<T>` guard.

use std::any::TypeId;
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::{BufferList, TypedBufferList};

/// Counters describing pool behaviour since construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers allocated because no idle buffer of that type existed.
    pub created: usize,
    /// Reservations served from an idle buffer.
    pub reused:  usize,
    /// Idle buffers currently held, across all types.
    pub idle:    usize,
}

/// Free lists of scratch `Vec`s keyed by element type.
///
/// Mutation points (reserve / release) are behind a `Mutex`, so a pool can
/// be shared by reference across brains.  Within one update the lock is held
/// only for the pop or push itself, never while the buffer is in use.
#[derive(Default)]
pub struct ResourcePool {
    lists:   Mutex<HashMap<TypeId, Box<dyn BufferList>>>,
    created: AtomicUsize,
    reused:  AtomicUsize,
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<TypeId, Box<dyn BufferList>>> {
        // A panic while holding the lock cannot leave a free list half
        // updated (push/pop are single operations), so poisoning is ignored.
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Borrow an empty `Vec<T>`.  It returns to the pool, cleared, when the
    /// guard drops, including on early return and unwinding.
    pub fn reserve<T: Send + 'static>(&self) -> Pooled<'_, T> {
        let idle = self
            .lock()
            .get_mut(&TypeId::of::<T>())
            .and_then(|list| list.as_any_mut().downcast_mut::<TypedBufferList<T>>())
            .and_then(|list| list.0.pop());

        let buf = match idle {
            Some(buf) => {
                self.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => {
                self.created.fetch_add(1, Ordering::Relaxed);
                tracing::trace!(ty = std::any::type_name::<T>(), "pool: allocating scratch buffer");
                Vec::new()
            }
        };
        Pooled { pool: self, buf: Some(buf) }
    }

    fn release<T: Send + 'static>(&self, mut buf: Vec<T>) {
        buf.clear();
        let mut lists = self.lock();
        let list = lists
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(TypedBufferList::<T>::new()));
        if let Some(list) = list.as_any_mut().downcast_mut::<TypedBufferList<T>>() {
            list.0.push(buf);
        }
    }

    /// Idle buffers of element type `T`.
    pub fn idle<T: Send + 'static>(&self) -> usize {
        self.lock().get(&TypeId::of::<T>()).map_or(0, |list| list.len())
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created.load(Ordering::Relaxed),
            reused:  self.reused.load(Ordering::Relaxed),
            idle:    self.lock().values().map(|list| list.len()).sum(),
        }
    }

    /// Drop every idle buffer.  Outstanding guards are unaffected and will
    /// return their buffers as usual.
    pub fn trim(&self) {
        for list in self.lock().values_mut() {
            list.clear();
        }
    }
}

// ── Pooled ────────────────────────────────────────────────────────────────────

/// A `Vec<T>` on loan from a [`ResourcePool`].
pub struct Pooled<'p, T: Send + 'static> {
    pool: &'p ResourcePool,
    buf:  Option<Vec<T>>,
}

impl<T: Send + 'static> Deref for Pooled<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        // `buf` is only taken in `drop`.
        self.buf.as_ref().unwrap_or_else(|| unreachable!("pooled buffer used after release"))
    }
}

impl<T: Send + 'static> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        self.buf.as_mut().unwrap_or_else(|| unreachable!("pooled buffer used after release"))
    }
}

impl<T: Send + 'static> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.release(buf);
        }
    }
}
