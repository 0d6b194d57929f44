//! # Cryptographic Plumbing for Ledger Authentication
//!
//! Everything signature-shaped in VELA flows through this module. There is
//! exactly one scheme: SHA-256 digest of the canonical message, RSA PKCS#1
//! v1.5 over the digest, base64 text encoding on both the signature and the
//! X.509 SubjectPublicKeyInfo key container. That combination is what every
//! deployed signer for this ledger produces, so it is what we verify.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. This is a thin, type-safe wrapper over the RustCrypto `rsa`
//! and `sha2` implementations. If you're tempted to optimize or "modernize"
//! the scheme, remember that every signature ever produced against this
//! ledger stops verifying the moment you do.

pub mod signatures;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use signatures::{decode_public_key, encode_public_key, sign, verify, VerifyError};
