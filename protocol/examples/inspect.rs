//! Decode a transaction payload and print it as JSON.
//!
//! Pass a hex payload as the only argument, or nothing to inspect a freshly
//! built sample aggregate. Logging goes to stderr so stdout stays pure JSON.
//!
//! Run with:
//!   RUST_LOG=symbol_protocol=trace cargo run --example inspect -- <hex>
//!   LOG_FORMAT=json cargo run --example inspect

use anyhow::{bail, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use symbol_protocol::codec::BinarySerialization;
use symbol_protocol::config::MAINNET_EPOCH_ADJUSTMENT_SECS;
use symbol_protocol::crypto::{sha3_256, Hash256};
use symbol_protocol::identity::{Account, NamespaceId, NetworkType};
use symbol_protocol::transaction::{
    AggregateBody, AggregateKind, Cosignature, Deadline, EmbeddedTransaction, Message, Mosaic,
    TransactionBuilder, TransferBody,
};

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    /// "json" selects JSON lines; anything else is pretty.
    fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr).with_target(true))
                .init();
        }
    }

    tracing::debug!(?format, "logging initialized");
}

// ---------------------------------------------------------------------------
// Sample payload
// ---------------------------------------------------------------------------

/// A signed aggregate complete with one inner transfer and one cosignature.
fn sample_payload(codec: &BinarySerialization<'_>) -> Result<Vec<u8>> {
    let network = NetworkType::TestNet;
    let sender = Account::generate(network);
    let cosigner = Account::generate(network);

    let transfer = TransferBody {
        recipient: NamespaceId::from_name("alice")?.into(),
        mosaics: vec![Mosaic::new(NamespaceId::from_name("symbol.xym")?, 1_000_000)],
        message: Some(Message::plain("hello from inspect")),
    };
    let inner = EmbeddedTransaction::new(sender.public_key(), network, transfer);
    // Stand-in for the Merkle root: the inspector never submits the payload.
    let hash = Hash256::from_bytes(sha3_256(&codec.serialize_embedded(&inner)?));

    let unsigned = TransactionBuilder::new(
        network,
        AggregateBody {
            kind: AggregateKind::Complete,
            transactions_hash: hash,
            inner_transactions: vec![inner],
            cosignatures: vec![Cosignature::sign(&cosigner, &hash)],
        },
    )
    .max_fee(200_000)
    .deadline(
        Deadline::from_now(
            chrono::Duration::seconds(MAINNET_EPOCH_ADJUSTMENT_SECS),
            chrono::Duration::hours(2),
        )
        .context("system clock is before the network epoch")?,
    )
    .signer(sender.public_key())
    .build();

    let signature = sender.sign(&codec.serialize_unsigned(&unsigned)?);
    let tx = unsigned.with_signature(sender.public_key(), signature);
    Ok(codec.serialize(&tx)?)
}

fn main() -> Result<()> {
    let format = LogFormat::from_str_lossy(&std::env::var("LOG_FORMAT").unwrap_or_default());
    init_logging("info", format);

    let codec = BinarySerialization::new();
    let payload = match std::env::args().nth(1) {
        Some(text) => hex::decode(text.trim()).context("payload is not valid hex")?,
        None => {
            tracing::info!("no payload given, inspecting a sample aggregate");
            sample_payload(&codec)?
        }
    };

    let tx = match codec.deserialize(&payload) {
        Ok(tx) => tx,
        Err(err) => {
            tracing::error!(kind = ?err.kind(), "decode failed");
            bail!(err);
        }
    };
    tracing::info!(
        transaction_type = %tx.transaction_type(),
        size = payload.len(),
        signed = tx.is_signed(),
        "decoded transaction"
    );

    println!("{}", serde_json::to_string_pretty(&tx)?);
    Ok(())
}
