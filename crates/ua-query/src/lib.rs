//! `ua-query` — candidate values and the contexts built from them.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`provider`] | `Dimension`, `QueryResult`, `QueryProvider`, `FnQuery`,  |
//! |              | `QueryRegistry`                                          |
//! | [`cache`]    | `QueryCache` — per-agent, param-sensitive result reuse   |
//! | [`generate`] | `Query`, `generate_contexts` (Cartesian expansion)       |
//!
//! # Expansion
//!
//! Each query fills exactly one of four dimensions.  Queries feeding the
//! same dimension append (union).  The contexts are the Cartesian product of
//! the non-empty dimensions, in the nesting order
//!
//! ```text
//! for target   in targets      (or "none" if empty)
//!   for location in locations  (or zero)
//!     for rotation in rotations  (or zero)
//!       for custom in customs    (or "none")
//! ```
//!
//! so the same provider outputs always yield the same context sequence.
//! The engine does not cap the product; providers bound their own output.

pub mod cache;
pub mod generate;
pub mod provider;

#[cfg(test)]
mod tests;

pub use cache::QueryCache;
pub use generate::{Query, generate_contexts};
pub use provider::{Dimension, FnQuery, QueryProvider, QueryRegistry, QueryResult};
