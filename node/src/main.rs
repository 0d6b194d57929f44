// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # VELA Ledger Node
//!
//! Entry point for the `vela-node` binary. Parses CLI arguments,
//! initializes logging, opens the local store, and routes exactly one
//! ledger operation per invocation — the same contract the surrounding
//! invocation runtime would hold in a full deployment.
//!
//! Ledger operations: `init`, `create`, `query`, `balance`, `send`, `list`.
//! Client-side utilities: `keygen`, `sign` — these produce the key material
//! and signatures that the authenticated operations verify, and never touch
//! the store.
//!
//! Results print to stdout; logs go to stderr.

mod cli;
mod logging;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use rsa::pkcs8::{DecodePrivateKey, EncodePrivateKey, LineEnding};
use rsa::{RsaPrivateKey, RsaPublicKey};

use vela_ledger::config::GENESIS_ACCOUNTS;
use vela_ledger::crypto::{encode_public_key, sign};
use vela_ledger::message;
use vela_ledger::{Ledger, SledStore};

use cli::{Commands, SignOp, VelaNodeCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = VelaNodeCli::parse();
    logging::init_logging(
        "vela_node=info,vela_ledger=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Init => {
            let ledger = open_ledger(&cli.data_dir)?;
            ledger.init_ledger()?;
            ledger.accounts().state().flush()?;
            println!("Ledger seeded with {} accounts.", GENESIS_ACCOUNTS.len());
            Ok(())
        }

        Commands::Create(args) => {
            let ledger = open_ledger(&cli.data_dir)?;
            ledger.create_account(&args.id, args.balance, &args.public_key)?;
            ledger.accounts().state().flush()?;
            println!("Account {} written.", args.id);
            Ok(())
        }

        Commands::Query(args) => {
            let ledger = open_ledger(&cli.data_dir)?;
            let account = ledger.query_account(&args.id)?;
            println!("{}", serde_json::to_string_pretty(&account)?);
            Ok(())
        }

        Commands::Balance(args) => {
            let ledger = open_ledger(&cli.data_dir)?;
            let balance = ledger.get_balance(
                args.request_id,
                &args.timestamp,
                &args.account,
                &args.nonce_key,
                &args.signature,
            )?;
            println!("{balance}");
            Ok(())
        }

        Commands::Send(args) => {
            let ledger = open_ledger(&cli.data_dir)?;
            let remaining = ledger.transfer(
                args.request_id,
                &args.timestamp,
                &args.from,
                &args.to,
                args.amount,
                &args.nonce_key,
                &args.signature,
            )?;
            println!("{remaining}");
            Ok(())
        }

        Commands::List => {
            let ledger = open_ledger(&cli.data_dir)?;
            let all = ledger.query_all()?;
            println!("{}", serde_json::to_string_pretty(&all)?);
            Ok(())
        }

        Commands::Keygen(args) => keygen(&args),

        Commands::Sign(args) => sign_message(&args),
    }
}

/// Opens (or creates) the ledger store under `data_dir/db`.
fn open_ledger(data_dir: &Path) -> Result<Ledger<SledStore>> {
    let db_path = data_dir.join("db");
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("failed to create data directory: {}", db_path.display()))?;

    let store = SledStore::open(&db_path)
        .with_context(|| format!("failed to open store at {}", db_path.display()))?;
    tracing::debug!(path = %db_path.display(), "store opened");
    Ok(Ledger::new(store))
}

/// Generates an RSA keypair: PKCS#8 PEM private key to a file, base64 SPKI
/// public key to stdout — ready to paste into `create --public-key`.
fn keygen(args: &cli::KeygenArgs) -> Result<()> {
    tracing::info!(bits = args.bits, "generating RSA keypair");
    let private = RsaPrivateKey::new(&mut rand::thread_rng(), args.bits)
        .context("RSA key generation failed")?;

    let pem = private
        .to_pkcs8_pem(LineEnding::LF)
        .context("failed to encode private key as PKCS#8")?;
    std::fs::write(&args.out, pem.as_bytes())
        .with_context(|| format!("failed to write private key to {}", args.out.display()))?;

    // Restrict permissions on Unix.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&args.out, std::fs::Permissions::from_mode(0o600))?;
    }

    let public_b64 = encode_public_key(&RsaPublicKey::from(&private))
        .context("failed to encode public key")?;

    println!("Keypair generated.");
    println!("  Private key : {}", args.out.display());
    println!("  Public key  : {public_b64}");
    Ok(())
}

/// Builds the canonical message for the requested operation and signs it
/// with a local private key — the client half of the handshake.
fn sign_message(args: &cli::SignArgs) -> Result<()> {
    let pem = std::fs::read_to_string(&args.key)
        .with_context(|| format!("failed to read private key from {}", args.key.display()))?;
    let private = RsaPrivateKey::from_pkcs8_pem(&pem)
        .context("key file is not a PKCS#8 PEM private key")?;

    let canonical = match &args.op {
        SignOp::Balance {
            request_id,
            timestamp,
            account,
            nonce_key,
        } => message::balance_message(
            *request_id,
            &stamp(timestamp.as_deref()),
            account,
            nonce_key,
        ),
        SignOp::Transfer {
            request_id,
            timestamp,
            from,
            to,
            amount,
            nonce_key,
        } => message::transfer_message(
            *request_id,
            &stamp(timestamp.as_deref()),
            from,
            to,
            *amount,
            nonce_key,
        ),
    };

    let signature = sign(&private, &canonical).context("signing failed")?;

    println!("  Message   : {canonical}");
    println!("  Signature : {signature}");
    Ok(())
}

/// Uses the caller's timestamp verbatim, or stamps with the current unix
/// time. Whatever string is chosen here is the one that must be submitted
/// with the request — the engine rebuilds the message from it.
fn stamp(timestamp: Option<&str>) -> String {
    match timestamp {
        Some(t) => t.to_string(),
        None => chrono::Utc::now().timestamp().to_string(),
    }
}
