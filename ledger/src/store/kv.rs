//! # Key-Value Collaborator
//!
//! The ledger's view of the world state: get a record, put a record, commit
//! a batch of records atomically, scan a key range. That's the whole
//! contract, captured in [`WorldState`], and the engine is generic over it.
//!
//! [`SledStore`] is the production implementation, built on sled's embedded
//! B+ trees. Account records live in a single named tree so the rest of the
//! database namespace stays free for whatever the deployment wants to put
//! next to it.
//!
//! ## Atomicity
//!
//! `put_all` is the one multi-key operation, and it is all-or-nothing: the
//! sled implementation maps it to a `Batch` applied in a single atomic step,
//! then flushes. A transfer's debit and credit go through here as one
//! write-set, so a half-applied transfer is not a state this store can
//! acknowledge.

use std::path::Path;

use sled::{Batch, Db, Tree};
use thiserror::Error;

use crate::config::ACCOUNTS_TREE;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by the world-state collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store itself failed (I/O, corruption, etc.).
    #[error("store backend error: {0}")]
    Backend(#[from] sled::Error),

    /// A stored record could not be encoded or decoded.
    #[error("record codec error: {0}")]
    Codec(String),
}

// ---------------------------------------------------------------------------
// WorldState
// ---------------------------------------------------------------------------

/// The external key-value collaborator the ledger engine runs against.
///
/// Implementations define their own durability and concurrency semantics;
/// the engine only assumes that an acknowledged `put` is visible to
/// subsequent `get`s and that [`put_all`](WorldState::put_all) commits its
/// entries atomically — either every entry lands or none does.
pub trait WorldState {
    /// The scan handle returned by [`range_scan`](WorldState::range_scan).
    /// Owns whatever resources the scan needs and releases them on drop,
    /// on every exit path.
    type Scan: Iterator<Item = Result<(Vec<u8>, Vec<u8>), StoreError>>;

    /// Reads the value at `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Writes `value` at `key`, overwriting any existing value.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Commits every entry in one atomic step. Later entries win on
    /// duplicate keys.
    fn put_all(&self, entries: &[(String, Vec<u8>)]) -> Result<(), StoreError>;

    /// Scans `[start, end)` in key order. An empty bound means unbounded on
    /// that side, so `range_scan("", "")` walks the entire keyspace.
    fn range_scan(&self, start: &str, end: &str) -> Result<Self::Scan, StoreError>;
}

// ---------------------------------------------------------------------------
// SledStore
// ---------------------------------------------------------------------------

/// Embedded world state backed by sled.
///
/// sled's trees support lock-free concurrent reads and serialized writes,
/// so a `SledStore` can be shared across threads behind an `Arc` without
/// extra synchronization. Concurrency control beyond that — two transfers
/// racing on the same account — is this layer's contract, not the engine's.
#[derive(Debug, Clone)]
pub struct SledStore {
    /// The underlying database handle.
    db: Db,
    /// Account records, keyed by account id (UTF-8).
    accounts: Tree,
}

impl SledStore {
    /// Opens (or creates) a store at the given filesystem path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = sled::open(path)?;
        Self::from_db(db)
    }

    /// Creates a temporary store that is discarded when dropped.
    ///
    /// Ideal for tests — no filesystem residue, no cleanup.
    pub fn open_temporary() -> Result<Self, StoreError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: Db) -> Result<Self, StoreError> {
        let accounts = db.open_tree(ACCOUNTS_TREE)?;
        Ok(Self { db, accounts })
    }

    /// Blocks until all pending writes are durable on disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }
}

impl WorldState for SledStore {
    type Scan = SledScan;

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.accounts.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.accounts.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn put_all(&self, entries: &[(String, Vec<u8>)]) -> Result<(), StoreError> {
        let mut batch = Batch::default();
        for (key, value) in entries {
            batch.insert(key.as_bytes(), value.as_slice());
        }
        self.accounts.apply_batch(batch)?;
        // Money moved; make it durable before acknowledging.
        self.db.flush()?;
        Ok(())
    }

    fn range_scan(&self, start: &str, end: &str) -> Result<Self::Scan, StoreError> {
        let start = start.as_bytes().to_vec();
        let end = end.as_bytes().to_vec();
        let inner = match (start.is_empty(), end.is_empty()) {
            (true, true) => self.accounts.iter(),
            (false, true) => self.accounts.range(start..),
            (true, false) => self.accounts.range(..end),
            (false, false) => self.accounts.range(start..end),
        };
        Ok(SledScan { inner })
    }
}

/// A live range scan over a [`SledStore`]. Dropping it releases the
/// underlying sled iterator, whichever way the caller exits.
pub struct SledScan {
    inner: sled::Iter,
}

impl Iterator for SledScan {
    type Item = Result<(Vec<u8>, Vec<u8>), StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok((key, value)) => Some(Ok((key.to_vec(), value.to_vec()))),
            Err(e) => Some(Err(StoreError::Backend(e))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
