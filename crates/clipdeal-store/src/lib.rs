//! # Clipdeal Store
//!
//! The persistent store is the sole shared mutable resource in the system.
//! Request handlers run in parallel, so every invariant that spans a write --
//! unique booth slugs, at most one LOI per offer, monotonic view counters --
//! is enforced here with unique indexes and increment-in-place primitives,
//! never with check-then-write logic in callers.

pub mod memory;
pub mod store;

pub use memory::InMemoryStore;
pub use store::MarketStore;
