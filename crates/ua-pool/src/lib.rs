//! `ua-pool` — reusable scratch buffers lent to brains during evaluation.
//!
//! # Design
//!
//! A brain update needs a handful of short-lived lists: dimension values,
//! generated contexts, resolved parameters, scored candidates.  Allocating
//! them fresh every update would make allocation proportional to update
//! frequency.  Instead each `Vec<T>` is borrowed from a [`ResourcePool`]
//! and handed back (cleared, capacity intact) when its [`Pooled`] guard
//! drops.  Steady-state allocation is therefore bounded by the peak number
//! of buffers alive at once, not by how often brains run.
//!
//! Free lists are stored type-erased in a `HashMap<TypeId, Box<dyn …>>`,
//! one list per element type.
//!
//! # Usage
//!
//! ```rust
//! use ua_pool::ResourcePool;
//!
//! let pool = ResourcePool::new();
//! {
//!     let mut scratch = pool.reserve::<u32>();
//!     scratch.extend([1, 2, 3]);
//! } // returned to the pool here, cleared
//! let again = pool.reserve::<u32>();
//! assert!(again.is_empty());
//! assert_eq!(pool.stats().reused, 1);
//! ```

pub mod buffer;
pub mod pool;


pub use buffer::{BufferList, TypedBufferList};
pub use pool::{PoolStats, Pooled, ResourcePool};
