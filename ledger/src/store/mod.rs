//! # World-State Storage
//!
//! Persistence for VELA, split the way the responsibilities split:
//!
//! - [`kv`] — the raw key-value collaborator: the [`WorldState`] trait the
//!   engine is written against, and [`SledStore`], the embedded sled
//!   implementation used by the node and the test suite.
//! - [`accounts`] — the account-shaped adapter over any [`WorldState`]:
//!   owns the JSON record codec and nothing else.
//!
//! The engine never touches sled types directly. Everything below the
//! [`WorldState`] seam — durability, concurrency control, iteration order —
//! is the store's own contract, not the ledger's.

pub mod accounts;
pub mod kv;

pub use accounts::{AccountScan, AccountStore};
pub use kv::{SledStore, StoreError, WorldState};
