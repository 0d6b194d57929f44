//! # Account Ledger Engine
//!
//! The orchestrator: every externally-invokable operation lives here, built
//! from the three leaf components — the canonical [`message`] builder, the
//! [`crypto`] verifier, and the [`store`] adapter.
//!
//! ## Operation model
//!
//! Each method is one synchronous, non-suspending unit of work. The engine
//! keeps no state between operations and no long-lived account copies —
//! every operation re-reads the records it touches. Concurrency control,
//! durability, and retries are the collaborators' business: the store below,
//! the invocation runtime above. An operation runs to completion or to its
//! first unrecoverable error, and every error goes back to the caller.
//!
//! ## Authentication
//!
//! Balance queries and transfers are gated on an RSA signature over the
//! canonical message rebuilt from the request fields. A transfer checks the
//! *sender's* stored key only — crediting an account requires no consent
//! from its owner. When a check fails, the error deliberately echoes the
//! expected message, the received signature, and the key used: operators
//! wanted failed-authentication reports debuggable from the error alone.
//! Revisit that trade-off before pointing this at an audience you don't
//! trust with key material.

use thiserror::Error;

use crate::account::Account;
use crate::config::GENESIS_ACCOUNTS;
use crate::crypto::{self, VerifyError};
use crate::message;
use crate::store::{AccountStore, StoreError, WorldState};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Every way a ledger operation can fail. The caller can always tell
/// "account missing" from "bad signature" from "not enough money" from
/// "the store broke".
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The named account does not exist in the world state.
    #[error("account {0} does not exist")]
    NotFound(String),

    /// Transfers move strictly positive amounts; zero and negative are
    /// rejected before any record is read.
    #[error("transfer amount must be positive, got {0}")]
    InvalidAmount(f64),

    /// The signature check failed. Carries the cause plus the exact
    /// material the check ran against, for the audit trail.
    #[error(
        "signature verification failed: {cause} (message={message}, signature={signature}, publickey={public_key})"
    )]
    VerificationFailed {
        /// Which stage of verification failed.
        cause: VerifyError,
        /// The canonical message the signature was expected to cover.
        message: String,
        /// The signature as received.
        signature: String,
        /// The stored public key the check used.
        public_key: String,
    },

    /// The sender's balance does not cover the transfer.
    #[error("insufficient funds: {account} holds {balance}, tried to send {amount}")]
    InsufficientFunds {
        account: String,
        balance: f64,
        amount: f64,
    },

    /// The world-state collaborator failed.
    #[error("world state error: {0}")]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The account ledger, generic over its world-state collaborator.
#[derive(Debug)]
pub struct Ledger<S: WorldState> {
    accounts: AccountStore<S>,
}

impl<S: WorldState> Ledger<S> {
    /// Builds a ledger over the given world state.
    pub fn new(state: S) -> Self {
        Self {
            accounts: AccountStore::new(state),
        }
    }

    /// Borrow the account adapter (used by the node for flush hooks and by
    /// tests for direct state inspection).
    pub fn accounts(&self) -> &AccountStore<S> {
        &self.accounts
    }

    /// `initLedger` — writes the five bootstrap accounts, unconditionally
    /// overwriting those ids.
    ///
    /// Deployment-time only. The first write failure aborts the seed and is
    /// returned as-is; accounts already written stay written — no rollback
    /// is attempted, matching the store's per-put durability contract.
    pub fn init_ledger(&self) -> Result<(), LedgerError> {
        for seed in &GENESIS_ACCOUNTS {
            let account = Account::new(seed.id, seed.balance, seed.public_key);
            self.accounts.put(&account)?;
            tracing::info!(account = seed.id, balance = seed.balance, "seeded account");
        }
        Ok(())
    }

    /// `createCoinAccount` — writes a new account record verbatim.
    ///
    /// No signature, no balance-sign check, no key validation, and an
    /// existing record at `id` is silently overwritten. That is the
    /// deployed behavior this engine preserves; an authorization model for
    /// creation is an open question tracked in DESIGN.md, not something to
    /// bolt on here quietly.
    pub fn create_account(
        &self,
        id: &str,
        balance: f64,
        public_key: &str,
    ) -> Result<(), LedgerError> {
        self.accounts
            .put(&Account::new(id, balance, public_key))?;
        tracing::info!(account = id, balance, "account written");
        Ok(())
    }

    /// `queryCoinAccount` — returns the account at `id`, or `NotFound`.
    /// Unauthenticated; reveals the full record including the balance.
    pub fn query_account(&self, id: &str) -> Result<Account, LedgerError> {
        self.accounts
            .get(id)?
            .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    /// `getBalance` — authenticated balance query. No mutation on any path.
    ///
    /// Reads the account, rebuilds the canonical balance message from the
    /// request fields, and checks `signature` against the account's stored
    /// key before revealing the balance.
    pub fn get_balance(
        &self,
        request_id: i64,
        timestamp: &str,
        account: &str,
        nonce_key: &str,
        signature: &str,
    ) -> Result<f64, LedgerError> {
        let record = self.query_account(account)?;
        let expected = message::balance_message(request_id, timestamp, account, nonce_key);
        self.authenticate(&expected, signature, &record)?;
        Ok(record.balance)
    }

    /// `querySend` — authenticated transfer from `from` to `to`.
    ///
    /// The check order is part of the external contract:
    ///
    /// 1. `amount <= 0` → [`LedgerError::InvalidAmount`], before any read.
    /// 2. Read `from`, then `to` — `NotFound` names the missing account.
    /// 3. Verify the signature over the canonical transfer message against
    ///    the sender's stored key. The recipient is never authenticated.
    /// 4. `from.balance < amount` → [`LedgerError::InsufficientFunds`],
    ///    no writes.
    /// 5. Commit debit + credit as one atomic write-set.
    ///
    /// Returns the sender's post-transfer balance. Conservation holds on
    /// every success: the pair commit can't leave a debit without its
    /// credit.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        request_id: i64,
        timestamp: &str,
        from: &str,
        to: &str,
        amount: f64,
        nonce_key: &str,
        signature: &str,
    ) -> Result<f64, LedgerError> {
        if amount <= 0.0 {
            return Err(LedgerError::InvalidAmount(amount));
        }

        let mut sender = self.query_account(from)?;
        let mut recipient = self.query_account(to)?;

        let expected =
            message::transfer_message(request_id, timestamp, from, to, amount, nonce_key);
        self.authenticate(&expected, signature, &sender)?;

        if sender.balance < amount {
            return Err(LedgerError::InsufficientFunds {
                account: from.to_string(),
                balance: sender.balance,
                amount,
            });
        }

        sender.balance -= amount;
        recipient.balance += amount;
        self.accounts.put_pair(&sender, &recipient)?;

        tracing::info!(
            from,
            to,
            amount,
            sender_balance = sender.balance,
            "transfer committed"
        );
        Ok(sender.balance)
    }

    /// `queryAllCoinAccounts` — drains the store's range scan into a vector.
    ///
    /// Order is whatever the store iterates in — callers must not read
    /// meaning into it. The first iteration error aborts and is surfaced;
    /// the scan handle is dropped (and its resources released) on every
    /// exit path.
    pub fn query_all(&self) -> Result<Vec<Account>, LedgerError> {
        let mut all = Vec::new();
        for record in self.accounts.scan_all()? {
            all.push(record?);
        }
        Ok(all)
    }

    /// Runs the signature check and wraps a failure in the audit-bearing
    /// [`LedgerError::VerificationFailed`].
    fn authenticate(
        &self,
        expected_message: &str,
        signature: &str,
        record: &Account,
    ) -> Result<(), LedgerError> {
        crypto::verify(expected_message, signature, &record.public_key).map_err(|cause| {
            tracing::warn!(account = %record.id, cause = %cause, "signature rejected");
            LedgerError::VerificationFailed {
                cause,
                message: expected_message.to_string(),
                signature: signature.to_string(),
                public_key: record.public_key.clone(),
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
