//! Data access layer.
//!
//! The giveaway subsystem persists to a single flat JSON file rather than a
//! database: the whole collection is loaded on every access and rewritten on
//! every mutation. The store serializes writers behind one async mutex so
//! that interleaved interaction handlers and timer callbacks cannot lose
//! each other's updates.

pub mod store;

pub use store::GiveawayStore;
