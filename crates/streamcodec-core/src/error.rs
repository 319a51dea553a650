//! Error types for the StreamCodec validation pipeline.
//!
//! Every failure here is a deterministic, caller-recoverable validation
//! error carrying enough structured context to be surfaced verbatim to a
//! developer. Nothing is silently coerced, truncated, or defaulted.

use crate::account::DriverTag;
use thiserror::Error;

/// Errors from the stream-config and account-id codecs.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{field} out of range: got {value}, maximum is {max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        max: String,
    },

    #[error("amountPerSecond must be non-zero: a stream must move funds")]
    ZeroAmountPerSecond,

    #[error("rate {rate} per {interval_seconds}s rounds to zero at protocol precision")]
    UnroundableRate { rate: String, interval_seconds: u64 },

    #[error("interval must be at least one second")]
    ZeroInterval,

    #[error("arithmetic overflow while {context}")]
    ArithmeticOverflow { context: &'static str },

    #[error("unrecognized driver tag {tag}")]
    UnknownDriver { tag: u32 },

    #[error("account id {account_id}: reserved bits [223:160] must be zero")]
    ReservedBitsNonZero { account_id: String },

    #[error("wrong driver: expected {expected}, got {actual}")]
    WrongDriver {
        expected: DriverTag,
        actual: DriverTag,
    },

    #[error("invalid account id: {0}")]
    InvalidAccountId(String),
}

/// Errors from receiver-list normalization.
#[derive(Debug, Error)]
pub enum ReceiverError {
    #[error("too many {kind} receivers: got {actual}, maximum is {max}")]
    TooManyReceivers {
        kind: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("stream receivers with zero amountPerSecond: {}", account_ids.join(", "))]
    ZeroAmountReceivers { account_ids: Vec<String> },

    #[error("duplicate receiver account ids: {}", account_ids.join(", "))]
    DuplicateReceivers { account_ids: Vec<String> },

    #[error("receiver {account_id}: weight {weight} outside (0, {max}]")]
    WeightOutOfRange {
        account_id: String,
        weight: u32,
        max: u32,
    },

    #[error("receiver {account_id} is out of order: account ids must be strictly ascending")]
    OutOfOrder { account_id: String },

    #[error("splits weights sum to {actual}, expected exactly {expected}")]
    WrongTotalWeight { actual: u64, expected: u32 },

    #[error("failed to resolve receiver {receiver}: {reason}")]
    Resolution { receiver: String, reason: String },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Errors from the versioned metadata-document parser.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("{family} document matched no known schema version; newest (v{newest_version}) rejected it: {reason}")]
    NoVersionMatched {
        family: &'static str,
        newest_version: u32,
        reason: String,
    },

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
