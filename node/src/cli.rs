//! # CLI Interface
//!
//! Defines the command-line argument structure for `vela-node` using
//! `clap` derive. One subcommand per ledger operation, plus the
//! client-side utilities (`keygen`, `sign`) that produce the key material
//! and signatures the authenticated operations consume.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// VELA ledger node.
///
/// Routes named operations to the account ledger engine against a local
/// store. This binary stands in for the invocation runtime: arguments come
/// in parsed, one operation runs to completion, and the result or the
/// failure goes to stdout/stderr.
#[derive(Parser, Debug)]
#[command(
    name = "vela-node",
    about = "VELA signature-authenticated account ledger",
    version,
    propagate_version = true
)]
pub struct VelaNodeCli {
    /// Path to the data directory holding the ledger store.
    ///
    /// Created on first use if it does not exist.
    #[arg(
        long,
        short = 'd',
        env = "VELA_DATA_DIR",
        default_value = "vela-data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "VELA_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Operation to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands, one per ledger operation plus operator tooling.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the ledger with the five bootstrap accounts (overwrites them).
    Init,
    /// Create (or overwrite) an account. Unauthenticated by design.
    Create(CreateArgs),
    /// Read an account record. Unauthenticated.
    Query(QueryArgs),
    /// Authenticated balance query — requires a signature over the
    /// canonical balance message.
    Balance(BalanceArgs),
    /// Authenticated transfer — requires the sender's signature over the
    /// canonical transfer message.
    Send(SendArgs),
    /// List every account in the ledger.
    List,
    /// Generate an RSA keypair: PKCS#8 PEM private key to a file, base64
    /// SPKI public key to stdout.
    Keygen(KeygenArgs),
    /// Build and sign a canonical message with a local private key —
    /// the client half of the authentication handshake.
    Sign(SignArgs),
}

/// Arguments for `create`.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Account identifier (store key).
    #[arg(long)]
    pub id: String,

    /// Initial balance. Accepted verbatim — including negative values;
    /// see the engine docs before being surprised.
    #[arg(long)]
    pub balance: f64,

    /// Base64-encoded X.509 SubjectPublicKeyInfo RSA public key.
    #[arg(long)]
    pub public_key: String,
}

/// Arguments for `query`.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Account identifier to read.
    #[arg(long)]
    pub id: String,
}

/// Arguments for `balance`.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Request identifier — part of the signed message.
    #[arg(long)]
    pub request_id: i64,

    /// Request timestamp — part of the signed message, passed verbatim.
    #[arg(long)]
    pub timestamp: String,

    /// Account whose balance is being queried (and whose key verifies).
    #[arg(long)]
    pub account: String,

    /// Caller-chosen nonce material — part of the signed message.
    #[arg(long)]
    pub nonce_key: String,

    /// Base64 signature over the canonical balance message.
    #[arg(long)]
    pub signature: String,
}

/// Arguments for `send`.
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Request identifier — part of the signed message.
    #[arg(long)]
    pub request_id: i64,

    /// Request timestamp — part of the signed message, passed verbatim.
    #[arg(long)]
    pub timestamp: String,

    /// Sender account (debited; its key verifies the signature).
    #[arg(long)]
    pub from: String,

    /// Recipient account (credited; never authenticated).
    #[arg(long)]
    pub to: String,

    /// Amount to move. Must be strictly positive.
    #[arg(long)]
    pub amount: f64,

    /// Caller-chosen nonce material — part of the signed message.
    #[arg(long)]
    pub nonce_key: String,

    /// Base64 signature over the canonical transfer message.
    #[arg(long)]
    pub signature: String,
}

/// Arguments for `keygen`.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Where to write the PKCS#8 PEM private key.
    #[arg(long, default_value = "vela.key")]
    pub out: PathBuf,

    /// RSA modulus size in bits.
    #[arg(long, default_value_t = 2048)]
    pub bits: usize,
}

/// Arguments for `sign`.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the PKCS#8 PEM private key produced by `keygen`.
    #[arg(long)]
    pub key: PathBuf,

    /// Which canonical message to build and sign.
    #[command(subcommand)]
    pub op: SignOp,
}

/// The two signable message shapes.
#[derive(Subcommand, Debug)]
pub enum SignOp {
    /// Sign a balance-query message.
    Balance {
        #[arg(long)]
        request_id: i64,
        /// Defaults to the current unix time when omitted.
        #[arg(long)]
        timestamp: Option<String>,
        #[arg(long)]
        account: String,
        #[arg(long)]
        nonce_key: String,
    },
    /// Sign a transfer message.
    Transfer {
        #[arg(long)]
        request_id: i64,
        /// Defaults to the current unix time when omitted.
        #[arg(long)]
        timestamp: Option<String>,
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        nonce_key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        VelaNodeCli::command().debug_assert();
    }

    #[test]
    fn send_parses_all_fields() {
        let cli = VelaNodeCli::parse_from([
            "vela-node",
            "send",
            "--request-id",
            "7",
            "--timestamp",
            "1596600828",
            "--from",
            "test1",
            "--to",
            "test2",
            "--amount",
            "40",
            "--nonce-key",
            "n1",
            "--signature",
            "QUJD",
        ]);
        match cli.command {
            Commands::Send(args) => {
                assert_eq!(args.request_id, 7);
                assert_eq!(args.from, "test1");
                assert_eq!(args.amount, 40.0);
            }
            other => panic!("expected Send, got {other:?}"),
        }
    }
}
