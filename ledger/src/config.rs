//! # Ledger Configuration & Constants
//!
//! Every magic value in VELA lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! Most of these values are wire-facing: the signing scheme, the canonical
//! message delimiter, and the genesis table all have to match what external
//! signers and already-deployed ledgers expect. Changing them breaks every
//! signature ever produced against this ledger, so don't.

// ---------------------------------------------------------------------------
// Signing Scheme
// ---------------------------------------------------------------------------

/// RSA with PKCS#1 v1.5 padding — not the scheme we'd pick on a blank page,
/// but the scheme every deployed signer for this ledger already speaks.
/// Interop beats elegance here.
pub const SIGNING_ALGORITHM: &str = "RSA-PKCS1v15";

/// Messages are digested with SHA-256 before the RSA check. The verifier
/// hashes, then verifies the digest; signers must do the same.
pub const MESSAGE_DIGEST: &str = "SHA-256";

/// Text encoding for signatures and public keys crossing the API boundary.
/// Standard alphabet, padded — what `base64.StdEncoding` produces elsewhere.
pub const KEY_ENCODING: &str = "base64";

/// Canonical messages join their fields with this delimiter. Field values
/// are NOT escaped, so a value containing `+` can collide with a different
/// argument set. Known limitation, kept for compatibility with existing
/// signers — see `message` module docs.
pub const MESSAGE_DELIMITER: char = '+';

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Name of the sled tree holding account records. One tree, keyed by
/// account id, value = the JSON record.
pub const ACCOUNTS_TREE: &str = "accounts";

// ---------------------------------------------------------------------------
// Genesis Seed Table
// ---------------------------------------------------------------------------

/// A bootstrap account written by `initLedger`.
///
/// The public keys below are long-lived RSA keys belonging to the original
/// test identities. They are data, not secrets — treat them as fixtures.
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    /// Account identifier (store key).
    pub id: &'static str,
    /// Initial balance. Created out of nothing, by design — the one place
    /// the conservation invariant does not apply.
    pub balance: f64,
    /// Base64-encoded X.509 SubjectPublicKeyInfo (DER) RSA public key.
    pub public_key: &'static str,
}

/// The five bootstrap accounts seeded at deployment. Read-only; the engine
/// copies from this table and never writes back to it.
pub const GENESIS_ACCOUNTS: [SeedAccount; 5] = [
    SeedAccount {
        id: "test1",
        balance: 100.0,
        public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAtHXGVArjsMMKHoxDOpAlsX2GHcJY2OfLUWrKB5bu8iSrlK4iqml7TtsEbrWRqgdTKbZ65yAqPeDBAsWoo5ZMtsNXKf3OsmOace2moAHkDGDUvEOSDYcU0akKnCUD98dVcHyyEg8VyGwXlDFYwCoRGhj42uy9xdNV5XNdBW/5+ZLgKG/iJ36bI+FdhhdKAqXYf6ikPetU2jglXV7/k4V4CA1kK9omgCpBj3o46RE3AmTstu4I82NxnhsEM3n0rpzIvz6CMbQMof2oQDmvHAqT2fHML6EF7p3nfyRrf9z8w52vQitIs5X0Nve1cmsmhbUThm9+clu3XplYk1cERPJ3nwIDAQAB",
    },
    SeedAccount {
        id: "test2",
        balance: 200.0,
        public_key: "MIIBITANBgkqhkiG9w0BAQEFAAOCAQ4AMIIBCQKCAQB3Ubf3TEJDPtaJZdupbzIq7e4hZbkrjsrPVUtDdfMGEYaxtj60Idcj6MuVUjCmGXOYkk9LjFmJpS3pxaxmbIY6yxTpDsTL6kUcH5F/OJT7aDkiRQuMff6vvBFT2Zji0nV/LkC/exgNPU/ogceMiVaTRowjUnwIy3/obuqwCOphapZkruLbLUO/+hELfKKMVyoPY0jh6FTWxFx0tOCXGvOFKkhrAjyH/ZJkcI9bP0CliNEu7ttGpGgXKSrXCXIinSJgwgQhTCXR97dLJkLwf5cFaC+8j0Zr9ghvcYwLPYbQmaLjY+We/otplTgPslHNdf5gVNMrW5oK6BRsfGMcE6g/AgMBAAE=",
    },
    SeedAccount {
        id: "test3",
        balance: 300.0,
        public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA3XEVLekATXrNhnNnQRVgBkbw+Sv4rQyLyvHA6S3yxWBQFP3bvrsaCGjIO52OUuvOi8fIHIAU9gD0YrglE1ZDsgForFhtt4+N3/XI9J5pObj9kGz+Y/4Rh61MuimrOokESZUMEj6Q8IdtCVMFo18BxCZIa0CkXs28VIQL50OpDWmio9Xg4tmaBH2JX50WAQRvtagF2QS3JEQvJvQAvap+3KgWh/3332emzrVzOxjS35tEVov2aNha1uZgoc4+YULa3ljTx8igeS9Qj34suBIPmwUmo7qOVdemzmrfIg2RorBA7DauBUF+vY67Js31dZU/LEgrvuj27sd99JqOX6vntQIDAQAB",
    },
    SeedAccount {
        id: "test4",
        balance: 400.0,
        public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAlBt1zMfBpu+M5JmCza0WPSIE7T7J3ShWzQuIx1xI2lH4VEtXw9PFEq6rbL9WDQHMh8IfwIJDzZmMW8xSIiHqBNAz5dSgs9tKe7C6mLSaVkjtQ/W3ln3Z6ufCWWjwPFxsboKYU9SrNJuubAXCWQ/AYN8dd75os31f9badXkcb3BRxjsdSqGxGjlIm7r8EWQMJeEvdv6aLkSew6bweLiebkZrQiaHbjETN+aLJM5e6DG4Hld2Ya577//F1Dsf73RyrYzK6AzXUlgK0znr6OjkXrJCAbiCDUfQHsf8MRP4nVAfrCmbfn4TUnN4Usap4D3JpcAcIYM5AfINxUsTQx6nEOQIDAQAB",
    },
    SeedAccount {
        id: "test5",
        balance: 500.0,
        public_key: "MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEAzpB9ZPgGFiNv1K6jVqRMWJBV/3iYzIRB46EZ4pRxzPt5SFGuTDc3hfawx7WbsWwZyTwoBRUyPnL1iODLRn8Weo6Xy9X5hdMMmAoiZoIssyIhNsZhTCzteBz8CVTbSDUX00yhQjJZVkrTBkBHFllzljiY1+Ovpp0hlAAzmPs9kr0TPr61lCBU4D9IA4ibL8WqCunvt3eaOFNKXGy0sYwe9bXoqyNDWxil7etZEJLv/9igLYWuFGQvlAPabLvu7vi3V6DsLLli2SFVQZ+IHJxD7dI49rL1TqDWSU2+FepXn0ynFEGiUQ2Kd6o/RoHMTyxQG9eQK7ykCKM520rgZbtNbQIDAQAB",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_ids_are_distinct() {
        // If two seed accounts share an id, the later one silently wins the
        // overwrite and someone loses test money.
        for (i, a) in GENESIS_ACCOUNTS.iter().enumerate() {
            for b in &GENESIS_ACCOUNTS[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn genesis_balances_are_non_negative() {
        for seed in &GENESIS_ACCOUNTS {
            assert!(seed.balance >= 0.0, "{} seeded negative", seed.id);
        }
    }

    #[test]
    fn genesis_keys_decode_as_base64() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        for seed in &GENESIS_ACCOUNTS {
            let der = STANDARD
                .decode(seed.public_key)
                .unwrap_or_else(|e| panic!("{}: bad base64: {e}", seed.id));
            // SubjectPublicKeyInfo for a 2048-bit RSA key is ~294 bytes.
            assert!(der.len() > 200, "{}: implausibly short key", seed.id);
        }
    }
}
