//! End-to-end tests for the VELA ledger.
//!
//! These exercise the full operation surface against a real (temporary)
//! sled store with real RSA keys: seed, create, authenticated balance,
//! transfer, and enumeration, plus every documented denial path. They prove
//! the components compose: message construction, signing, verification,
//! the atomic pair commit, and the store round-trip.
//!
//! Each test stands alone with its own temporary store. RSA keygen is the
//! slow part, so the two test identities are generated once and shared.

use std::sync::OnceLock;

use rsa::{RsaPrivateKey, RsaPublicKey};

use vela_ledger::crypto::{encode_public_key, sign};
use vela_ledger::{Account, Ledger, LedgerError, SledStore, VerifyError};
use vela_ledger::{config::GENESIS_ACCOUNTS, message};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// A test identity: private key for signing, base64 SPKI for the record.
struct Identity {
    private: RsaPrivateKey,
    public_b64: String,
}

impl Identity {
    fn generate() -> Self {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("keygen");
        let public_b64 = encode_public_key(&RsaPublicKey::from(&private)).expect("spki encode");
        Self {
            private,
            public_b64,
        }
    }
}

fn alice() -> &'static Identity {
    static ALICE: OnceLock<Identity> = OnceLock::new();
    ALICE.get_or_init(Identity::generate)
}

fn bob() -> &'static Identity {
    static BOB: OnceLock<Identity> = OnceLock::new();
    BOB.get_or_init(Identity::generate)
}

/// A fresh ledger with `test1` (100, alice's key) and `test2` (200, bob's
/// key) — the canonical two-account fixture.
fn two_account_ledger() -> Ledger<SledStore> {
    let ledger = Ledger::new(SledStore::open_temporary().expect("temp store"));
    ledger
        .create_account("test1", 100.0, &alice().public_b64)
        .unwrap();
    ledger
        .create_account("test2", 200.0, &bob().public_b64)
        .unwrap();
    ledger
}

/// Signs a transfer the way a real client would: build the canonical
/// message from the fields, sign, send fields + signature.
fn signed_transfer(
    ledger: &Ledger<SledStore>,
    signer: &Identity,
    request_id: i64,
    timestamp: &str,
    from: &str,
    to: &str,
    amount: f64,
    nonce_key: &str,
) -> Result<f64, LedgerError> {
    let canonical = message::transfer_message(request_id, timestamp, from, to, amount, nonce_key);
    let signature = sign(&signer.private, &canonical).unwrap();
    ledger.transfer(request_id, timestamp, from, to, amount, nonce_key, &signature)
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

#[test]
fn seed_then_query_returns_exact_balances() {
    let ledger = Ledger::new(SledStore::open_temporary().unwrap());
    ledger.init_ledger().unwrap();

    for seed in &GENESIS_ACCOUNTS {
        let account = ledger.query_account(seed.id).unwrap();
        assert_eq!(account.id, seed.id);
        assert_eq!(account.balance, seed.balance);
    }
}

// ---------------------------------------------------------------------------
// The canonical scenario chain
// ---------------------------------------------------------------------------

#[test]
fn transfer_scenario_chain() {
    let ledger = two_account_ledger();

    // Valid 40-unit transfer: sender lands on 60, recipient on 240.
    let remaining = signed_transfer(&ledger, alice(), 1, "1596600828", "test1", "test2", 40.0, "n1")
        .expect("valid transfer");
    assert_eq!(remaining, 60.0);
    assert_eq!(ledger.query_account("test2").unwrap().balance, 240.0);

    // Overdraft attempt with a perfectly valid signature: denied, nothing
    // moves.
    match signed_transfer(&ledger, alice(), 2, "1596600900", "test1", "test2", 1000.0, "n2") {
        Err(LedgerError::InsufficientFunds {
            account,
            balance,
            amount,
        }) => {
            assert_eq!(account, "test1");
            assert_eq!(balance, 60.0);
            assert_eq!(amount, 1000.0);
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }
    assert_eq!(ledger.query_account("test1").unwrap().balance, 60.0);
    assert_eq!(ledger.query_account("test2").unwrap().balance, 240.0);

    // Balance query signed over a tampered timestamp: denied, balance
    // unchanged and unrevealed.
    let signed_over = message::balance_message(3, "1596600999", "test2", "n3");
    let signature = sign(&bob().private, &signed_over).unwrap();
    match ledger.get_balance(3, "1596601000", "test2", "n3", &signature) {
        Err(LedgerError::VerificationFailed {
            cause: VerifyError::Mismatch,
            ..
        }) => {}
        other => panic!("expected VerificationFailed, got {other:?}"),
    }
    assert_eq!(ledger.query_account("test2").unwrap().balance, 240.0);

    // Enumeration reflects the current state of exactly these accounts.
    let mut all = ledger.query_all().unwrap();
    all.sort_by(|a, b| a.id.cmp(&b.id));
    let summary: Vec<(String, f64)> = all.into_iter().map(|a| (a.id, a.balance)).collect();
    assert_eq!(
        summary,
        [("test1".to_string(), 60.0), ("test2".to_string(), 240.0)]
    );
}

// ---------------------------------------------------------------------------
// Conservation
// ---------------------------------------------------------------------------

#[test]
fn transfers_conserve_total_balance() {
    let ledger = two_account_ledger();
    let total_before = 100.0 + 200.0;

    for (i, amount) in [12.5, 30.0, 0.25].into_iter().enumerate() {
        signed_transfer(
            &ledger,
            alice(),
            i as i64,
            "ts",
            "test1",
            "test2",
            amount,
            "nk",
        )
        .expect("valid transfer");

        let a = ledger.query_account("test1").unwrap().balance;
        let b = ledger.query_account("test2").unwrap().balance;
        assert_eq!(a + b, total_before, "conservation broken at step {i}");
    }
}

// ---------------------------------------------------------------------------
// Authentication gate
// ---------------------------------------------------------------------------

#[test]
fn transfer_signed_by_wrong_key_is_denied() {
    let ledger = two_account_ledger();

    // Bob signs a transfer out of alice's account. The message is
    // well-formed; the key is not alice's.
    match signed_transfer(&ledger, bob(), 1, "ts", "test1", "test2", 40.0, "nk") {
        Err(LedgerError::VerificationFailed {
            cause: VerifyError::Mismatch,
            ..
        }) => {}
        other => panic!("expected VerificationFailed, got {other:?}"),
    }
    assert_eq!(ledger.query_account("test1").unwrap().balance, 100.0);
    assert_eq!(ledger.query_account("test2").unwrap().balance, 200.0);
}

#[test]
fn transfer_with_any_field_changed_is_denied() {
    let ledger = two_account_ledger();

    // Sign one set of fields, submit another. Every divergent field must
    // break verification — that is the entire point of the canonical form.
    let canonical = message::transfer_message(1, "ts", "test1", "test2", 40.0, "nk");
    let signature = sign(&alice().private, &canonical).unwrap();

    let denied = [
        ledger.transfer(2, "ts", "test1", "test2", 40.0, "nk", &signature),
        ledger.transfer(1, "later", "test1", "test2", 40.0, "nk", &signature),
        ledger.transfer(1, "ts", "test1", "test2", 41.0, "nk", &signature),
        ledger.transfer(1, "ts", "test1", "test2", 40.0, "other", &signature),
    ];
    for result in denied {
        assert!(
            matches!(
                result,
                Err(LedgerError::VerificationFailed {
                    cause: VerifyError::Mismatch,
                    ..
                })
            ),
            "tampered request slipped through: {result:?}"
        );
    }
    assert_eq!(ledger.query_account("test1").unwrap().balance, 100.0);
}

#[test]
fn verification_failure_echoes_audit_material() {
    let ledger = two_account_ledger();

    let canonical = message::transfer_message(1, "ts", "test1", "test2", 40.0, "nk");
    let signature = sign(&bob().private, &canonical).unwrap();

    match ledger.transfer(1, "ts", "test1", "test2", 40.0, "nk", &signature) {
        Err(LedgerError::VerificationFailed {
            message,
            signature: echoed,
            public_key,
            ..
        }) => {
            // The report carries everything needed to reproduce the check:
            // the exact expected message, the signature as received, and
            // the key the engine used.
            assert_eq!(message, canonical);
            assert_eq!(echoed, signature);
            assert_eq!(public_key, alice().public_b64);
        }
        other => panic!("expected VerificationFailed, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Authenticated balance
// ---------------------------------------------------------------------------

#[test]
fn get_balance_with_valid_signature_reveals_balance() {
    let ledger = two_account_ledger();

    let canonical = message::balance_message(9, "1596600828", "test1", "nk");
    let signature = sign(&alice().private, &canonical).unwrap();
    let balance = ledger
        .get_balance(9, "1596600828", "test1", "nk", &signature)
        .expect("valid balance query");
    assert_eq!(balance, 100.0);

    // Reading reveals, never mutates.
    assert_eq!(ledger.query_account("test1").unwrap().balance, 100.0);
}

#[test]
fn get_balance_for_missing_account_is_not_found() {
    let ledger = two_account_ledger();
    match ledger.get_balance(1, "ts", "ghost", "nk", "sig") {
        Err(LedgerError::NotFound(id)) => assert_eq!(id, "ghost"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Creation and enumeration
// ---------------------------------------------------------------------------

#[test]
fn created_accounts_appear_in_enumeration_with_current_balances() {
    let ledger = Ledger::new(SledStore::open_temporary().unwrap());
    ledger.init_ledger().unwrap();
    ledger
        .create_account("extra", 42.0, &alice().public_b64)
        .unwrap();

    let all = ledger.query_all().unwrap();
    assert_eq!(all.len(), GENESIS_ACCOUNTS.len() + 1);

    let extra = all.iter().find(|a| a.id == "extra").expect("extra present");
    assert_eq!(extra.balance, 42.0);
    assert_eq!(extra.public_key, alice().public_b64);
}

#[test]
fn records_survive_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let ledger = Ledger::new(SledStore::open(dir.path()).unwrap());
        ledger
            .create_account("durable", 7.0, &alice().public_b64)
            .unwrap();
        ledger.accounts().state().flush().unwrap();
    }

    let ledger = Ledger::new(SledStore::open(dir.path()).unwrap());
    let account = ledger.query_account("durable").unwrap();
    assert_eq!(
        account,
        Account::new("durable", 7.0, alice().public_b64.clone())
    );
}
