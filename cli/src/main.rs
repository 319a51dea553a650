//! StreamCodec CLI — inspect and produce the protocol's binary values.
//!
//! # Commands
//! ```
//! streamcodec encode-config   --stream-id <n> --amount-per-second <u256> [--start <ts>] [--duration <secs>]
//! streamcodec decode-config   <packed-u256>
//! streamcodec inspect-account <account-id>
//! streamcodec normalize-streams --receiver <account-id>:<packed-config> ...
//! streamcodec validate-metadata --family <family> --file <path.json> [--latest]
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use alloy_primitives::U256;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use streamcodec_core::{AccountId, StreamConfig};
use streamcodec_metadata::{
    AddressStreamsDocument, ListDocument, ProjectDocument, SubListDocument,
};
use streamcodec_receivers::{normalize_stream_receivers, StreamReceiver};

#[derive(Parser)]
#[command(
    name = "streamcodec",
    about = "Encode, decode, and validate value-streaming ledger payloads",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a stream configuration into its 256-bit on-ledger value
    #[command(name = "encode-config")]
    EncodeConfig {
        #[arg(long)]
        stream_id: u32,
        /// Per-second rate, already scaled by the protocol's 10^9 extra decimals
        #[arg(long)]
        amount_per_second: String,
        /// Unix start timestamp; 0 = ledger-assigned activation
        #[arg(long, default_value_t = 0)]
        start: u32,
        /// Duration in seconds; 0 = run until balance exhausted
        #[arg(long, default_value_t = 0)]
        duration: u32,
    },

    /// Unpack a 256-bit on-ledger value into its stream configuration
    #[command(name = "decode-config")]
    DecodeConfig {
        /// Packed config, decimal or 0x-prefixed hex
        packed: String,
    },

    /// Show an account id's driver and any embedded payload
    #[command(name = "inspect-account")]
    InspectAccount {
        /// Account id, decimal or 0x-prefixed hex
        account_id: String,
    },

    /// Validate and canonicalize a stream-receiver list
    #[command(name = "normalize-streams")]
    NormalizeStreams {
        /// Receiver as an accountId:packedConfig pair (decimal or 0x hex);
        /// repeat the flag once per receiver
        #[arg(long = "receiver", required = true)]
        receivers: Vec<String>,
    },

    /// Validate a metadata document against a family's schema chain
    #[command(name = "validate-metadata")]
    ValidateMetadata {
        #[arg(long)]
        family: Family,
        /// Path to the JSON document
        #[arg(long)]
        file: PathBuf,
        /// Validate against the newest schema version only (pre-persist check)
        #[arg(long)]
        latest: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Family {
    /// Address-driver stream metadata
    AddressStreams,
    /// Repo-driver project metadata
    Project,
    /// Nft-driver list/ecosystem metadata
    List,
    /// Immutable-splits sub-list metadata
    SubList,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::EncodeConfig {
            stream_id,
            amount_per_second,
            start,
            duration,
        } => {
            let amount = U256::from_str(&amount_per_second)
                .with_context(|| format!("invalid amount '{amount_per_second}'"))?;
            let config = StreamConfig {
                stream_id,
                amount_per_second: amount,
                start,
                duration_seconds: duration,
            };
            let packed = config.encode()?;
            println!("{packed}");
            println!("0x{packed:064x}");
        }

        Commands::DecodeConfig { packed } => {
            let raw = U256::from_str(&packed).with_context(|| format!("invalid value '{packed}'"))?;
            let config = StreamConfig::decode(raw)?;
            println!("streamId:        {}", config.stream_id);
            println!("amountPerSecond: {}", config.amount_per_second);
            println!(
                "start:           {}",
                sentinel(config.start, "ledger-assigned")
            );
            println!(
                "duration:        {}",
                sentinel(config.duration_seconds, "until balance exhausted")
            );
        }

        Commands::InspectAccount { account_id } => {
            let id: AccountId = account_id
                .parse()
                .with_context(|| format!("invalid account id '{account_id}'"))?;
            let driver = id.driver()?;
            println!("driver: {driver}");
            match driver {
                streamcodec_core::DriverTag::Address => {
                    println!("address: {}", id.to_address()?);
                }
                _ => {
                    if let Some(identity) = id.text_identifier() {
                        println!("linked identity: {identity}");
                    }
                }
            }
        }

        Commands::NormalizeStreams { receivers } => {
            let receivers = receivers
                .iter()
                .map(|arg| parse_stream_receiver(arg))
                .collect::<Result<Vec<_>>>()?;
            let normalized = normalize_stream_receivers(receivers)?;
            for receiver in normalized {
                println!("{} {}", receiver.account_id, receiver.config);
            }
        }

        Commands::ValidateMetadata {
            family,
            file,
            latest,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let value: serde_json::Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", file.display()))?;
            let version = validate(family, &value, latest)?;
            println!("ok: matched schema version {version}");
        }
    }
    Ok(())
}

fn parse_stream_receiver(arg: &str) -> Result<StreamReceiver> {
    let (id, config) = arg
        .split_once(':')
        .with_context(|| format!("'{arg}' is not an accountId:packedConfig pair"))?;
    Ok(StreamReceiver {
        account_id: id
            .parse()
            .with_context(|| format!("invalid account id '{id}'"))?,
        config: U256::from_str(config).with_context(|| format!("invalid config '{config}'"))?,
    })
}

fn sentinel(value: u32, meaning: &str) -> String {
    if value == 0 {
        format!("0 ({meaning})")
    } else {
        value.to_string()
    }
}

fn validate(family: Family, value: &serde_json::Value, latest: bool) -> Result<u32> {
    Ok(match family {
        Family::AddressStreams => {
            let doc = if latest {
                AddressStreamsDocument::parse_latest(value)?
            } else {
                AddressStreamsDocument::parse_any(value)?
            };
            match doc {
                AddressStreamsDocument::V1(_) => 1,
                AddressStreamsDocument::V2(_) => 2,
                AddressStreamsDocument::V3(_) => 3,
            }
        }
        Family::Project => {
            let doc = if latest {
                ProjectDocument::parse_latest(value)?
            } else {
                ProjectDocument::parse_any(value)?
            };
            match doc {
                ProjectDocument::V1(_) => 1,
                ProjectDocument::V2(_) => 2,
                ProjectDocument::V3(_) => 3,
            }
        }
        Family::List => {
            let doc = if latest {
                ListDocument::parse_latest(value)?
            } else {
                ListDocument::parse_any(value)?
            };
            match doc {
                ListDocument::V1(_) => 1,
                ListDocument::V2(_) => 2,
                ListDocument::V3(_) => 3,
                ListDocument::V4(_) => 4,
            }
        }
        Family::SubList => {
            let doc = if latest {
                SubListDocument::parse_latest(value)?
            } else {
                SubListDocument::parse_any(value)?
            };
            match doc {
                SubListDocument::V1(_) => 1,
                SubListDocument::V2(_) => 2,
            }
        }
    })
}
