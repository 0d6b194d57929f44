//! Canonical message construction — the exact bytes a caller must sign.
//!
//! Authentication in VELA is "sign the message we both derive": the client
//! builds one of these strings, signs it offline, and sends the fields plus
//! the signature; the engine rebuilds the same string from the fields and
//! verifies. Both sides must produce identical bytes for identical input,
//! every time, forever — these functions are pure and allocation-only.
//!
//! ## Format
//!
//! Fields are joined with `+` and interleaved with fixed lowercase labels:
//!
//! ```text
//! balance:  {request_id}+{timestamp}+account+{account}+{nonce_key}
//! transfer: {request_id}+{timestamp}+from+{from}+to+{to}+amount+{amount}+{nonce_key}
//! ```
//!
//! `{amount}` is the default `f64` display rendering (`40`, not `40.0`).
//!
//! ## Known ambiguity
//!
//! Field values are not escaped. An account id containing `+to+` can make a
//! balance message collide with a transfer-shaped one, and two different
//! argument sets can produce the same bytes. Existing signers depend on this
//! exact format, so it is reproduced as-is rather than fixed; treat ids and
//! nonce material containing `+` as hostile input at the boundary above this
//! crate.

/// Builds the canonical message for an authenticated balance query.
pub fn balance_message(request_id: i64, timestamp: &str, account: &str, nonce_key: &str) -> String {
    format!("{request_id}+{timestamp}+account+{account}+{nonce_key}")
}

/// Builds the canonical message for a transfer.
///
/// The signature over this message is checked against the *sender's* stored
/// public key — `to` is named in the message but never consulted for keys.
pub fn transfer_message(
    request_id: i64,
    timestamp: &str,
    from: &str,
    to: &str,
    amount: f64,
    nonce_key: &str,
) -> String {
    format!("{request_id}+{timestamp}+from+{from}+to+{to}+amount+{amount}+{nonce_key}")
}
