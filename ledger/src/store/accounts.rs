//! Account-shaped access to the world state.
//!
//! [`AccountStore`] is a deliberately thin adapter: it owns the JSON record
//! codec and the mapping "account id = store key", and nothing else. No
//! balance rules, no signature checks — those belong to the engine. If you
//! find yourself adding an `if` about money to this file, stop.

use crate::account::Account;
use crate::store::kv::{StoreError, WorldState};

/// Adapter exposing typed account records over any [`WorldState`].
#[derive(Debug)]
pub struct AccountStore<S: WorldState> {
    state: S,
}

impl<S: WorldState> AccountStore<S> {
    /// Wraps a world-state collaborator.
    pub fn new(state: S) -> Self {
        Self { state }
    }

    /// Borrow the underlying collaborator (flush hooks, test inspection).
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Reads the account stored at `id`, or `None` if the id is absent.
    pub fn get(&self, id: &str) -> Result<Option<Account>, StoreError> {
        match self.state.get(id)? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Writes `account` under its id, overwriting any existing record.
    pub fn put(&self, account: &Account) -> Result<(), StoreError> {
        self.state.put(&account.id, &encode(account)?)
    }

    /// Writes two accounts in a single atomic commit — the transfer
    /// write-set. Either both records land or neither does.
    pub fn put_pair(&self, first: &Account, second: &Account) -> Result<(), StoreError> {
        self.state.put_all(&[
            (first.id.clone(), encode(first)?),
            (second.id.clone(), encode(second)?),
        ])
    }

    /// Starts a lazy scan over every stored account, in store key order.
    /// The scan's resources are released when the returned iterator drops.
    pub fn scan_all(&self) -> Result<AccountScan<S::Scan>, StoreError> {
        Ok(AccountScan {
            inner: self.state.range_scan("", "")?,
        })
    }
}

/// Lazy decoding iterator over a raw range scan.
pub struct AccountScan<I> {
    inner: I,
}

impl<I> Iterator for AccountScan<I>
where
    I: Iterator<Item = Result<(Vec<u8>, Vec<u8>), StoreError>>,
{
    type Item = Result<Account, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.inner.next()? {
            Ok((_key, value)) => Some(decode(&value)),
            Err(e) => Some(Err(e)),
        }
    }
}

fn encode(account: &Account) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(account).map_err(|e| StoreError::Codec(e.to_string()))
}

fn decode(bytes: &[u8]) -> Result<Account, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
}
