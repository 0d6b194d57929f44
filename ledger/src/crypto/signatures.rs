//! # Signature Verification
//!
//! RSA PKCS#1 v1.5 over a SHA-256 digest — the backbone of authentication
//! in VELA. Every balance query and every transfer is gated on one of these
//! checks.
//!
//! ## Why wrap the `rsa` crate at all?
//!
//! 1. A single place to audit every verification the ledger performs.
//! 2. One error taxonomy for the engine to report, instead of three crates'
//!    worth of error types leaking upward.
//! 3. The text-encoding conventions (standard padded base64, SPKI key
//!    container) live in exactly one file.
//!
//! ## Failure reporting
//!
//! Unlike most verifiers, this one is deliberately chatty about *why* a
//! check failed — encoding, key container, or the math itself. The engine
//! echoes the cause into its audit trail. The one thing a failure never
//! does is anything other than deny the operation.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rsa::pkcs8::{DecodePublicKey, EncodePublicKey};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Why a signature check failed. Each variant is a distinct, reportable
/// cause — the audit trail distinguishes "garbage input" from "wrong key".
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The signature text did not decode as standard base64.
    #[error("signature is not valid base64: {0}")]
    SignatureEncoding(String),

    /// The public-key text did not decode as standard base64.
    #[error("public key is not valid base64: {0}")]
    KeyEncoding(String),

    /// The decoded key bytes are not an RSA SubjectPublicKeyInfo container.
    #[error("public key is not a supported RSA key: {0}")]
    KeyFormat(String),

    /// Everything decoded, but the signature does not match the message
    /// under this key.
    #[error("signature does not match the message under this key")]
    Mismatch,
}

/// Verifies `signature_b64` over `message` under `public_key_b64`.
///
/// The message is digested with SHA-256 and the digest checked with RSA
/// PKCS#1 v1.5. Both the signature and the key are standard padded base64;
/// the key decodes to X.509 SubjectPublicKeyInfo DER.
///
/// # Errors
///
/// Returns the first failing stage as a [`VerifyError`]. Decode failures
/// are reported before any cryptography runs.
pub fn verify(message: &str, signature_b64: &str, public_key_b64: &str) -> Result<(), VerifyError> {
    let signature = STANDARD
        .decode(signature_b64)
        .map_err(|e| VerifyError::SignatureEncoding(e.to_string()))?;

    let public_key = decode_public_key(public_key_b64)?;

    let digest = Sha256::digest(message.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice(), &signature)
        .map_err(|_| VerifyError::Mismatch)
}

/// Decodes a base64 SubjectPublicKeyInfo string into an [`RsaPublicKey`].
///
/// Split out of [`verify`] so callers that only need the structural check
/// (is this even a key?) can do it without a message in hand.
pub fn decode_public_key(public_key_b64: &str) -> Result<RsaPublicKey, VerifyError> {
    let der = STANDARD
        .decode(public_key_b64)
        .map_err(|e| VerifyError::KeyEncoding(e.to_string()))?;

    RsaPublicKey::from_public_key_der(&der).map_err(|e| VerifyError::KeyFormat(e.to_string()))
}

/// Encodes an [`RsaPublicKey`] the way the ledger stores it: base64 over
/// SubjectPublicKeyInfo DER. The inverse of [`decode_public_key`].
pub fn encode_public_key(public_key: &RsaPublicKey) -> rsa::pkcs8::spki::Result<String> {
    let der = public_key.to_public_key_der()?;
    Ok(STANDARD.encode(der.as_bytes()))
}

/// Signs `message` with the ledger's scheme and returns the base64
/// signature.
///
/// The ledger itself never signs — verification is its whole job — but the
/// operator tooling and the test suite need to produce signatures the
/// verifier accepts, and keeping both halves in one file keeps them honest.
pub fn sign(private_key: &RsaPrivateKey, message: &str) -> rsa::Result<String> {
    let digest = Sha256::digest(message.as_bytes());
    let signature = private_key.sign(Pkcs1v15Sign::new::<Sha256>(), digest.as_slice())?;
    Ok(STANDARD.encode(signature))
}
