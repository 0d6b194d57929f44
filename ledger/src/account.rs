//! The account record — one identity, one balance, one public key.
//!
//! Accounts are the only thing this ledger persists. Each one is a small
//! JSON object in the world state, keyed by its id. The engine re-reads the
//! record on every operation and never keeps a long-lived copy; the store
//! owns the truth, this struct is just a view of it.

use serde::{Deserialize, Serialize};

/// A ledger account.
///
/// The serialized field names (`account`, `balance`, `publickey`) are part
/// of the persisted record format shared with existing deployments — rename
/// them and every stored record becomes unreadable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier; doubles as the store key. Immutable once created.
    #[serde(rename = "account")]
    pub id: String,

    /// Current balance. Mutated only by transfers (and the genesis seed).
    /// The engine never lets a successful operation take this negative,
    /// but `createCoinAccount` writes whatever it is given — see the
    /// engine docs for why.
    pub balance: f64,

    /// Base64-encoded X.509 SubjectPublicKeyInfo RSA public key. Set at
    /// creation, trusted verbatim, never mutated.
    #[serde(rename = "publickey")]
    pub public_key: String,
}

impl Account {
    /// Builds an account from its three parts. No validation — callers that
    /// want balance or key checks do them before getting here.
    pub fn new(id: impl Into<String>, balance: f64, public_key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            balance,
            public_key: public_key.into(),
        }
    }
}
