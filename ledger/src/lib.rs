// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # VELA Ledger — Core Library
//!
//! A ledger-backed account registry with signature-authenticated value
//! transfer. Each account is an id, a balance, and an RSA public key;
//! anything that moves money or reveals a balance must arrive with a valid
//! signature over a canonical message both sides can rebuild byte-for-byte.
//!
//! ## Architecture
//!
//! The modules mirror the actual concerns of the system:
//!
//! - **account** — The persisted record and its wire-format field names.
//! - **message** — Canonical signed-message construction. Pure functions;
//!   the one place the wire format is written down.
//! - **crypto** — RSA PKCS#1 v1.5 / SHA-256 verification, plus the signing
//!   half for tooling and tests.
//! - **store** — The world-state collaborator seam (`WorldState`), its sled
//!   implementation, and the thin account adapter that owns the JSON codec.
//! - **engine** — The ledger operations: seed, create, query, authenticated
//!   balance, transfer, enumerate. The only module with opinions.
//! - **config** — Constants and the genesis seed table.
//!
//! ## Design Philosophy
//!
//! 1. The engine re-reads before it mutates — the store owns the truth.
//! 2. A transfer's debit and credit commit as one write-set or not at all.
//! 3. Verification failures deny the operation, loudly and diagnosably.
//! 4. If it touches money, it has tests. Plural.

pub mod account;
pub mod config;
pub mod crypto;
pub mod engine;
pub mod message;
pub mod store;

// Re-export the types callers actually wire together.
pub use account::Account;
pub use crypto::VerifyError;
pub use engine::{Ledger, LedgerError};
pub use store::{AccountStore, SledStore, StoreError, WorldState};
