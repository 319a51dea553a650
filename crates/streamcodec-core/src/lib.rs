//! # streamcodec-core
//!
//! Core types and codecs shared across all StreamCodec crates: the
//! fixed-width bit-packing codec for stream configurations, the
//! driver-tagged account-identifier codec, protocol-wide constants, and
//! the error types of the whole engine.
//!
//! Everything in this crate is a pure, synchronous mapping from input to
//! output or error — no I/O, no shared state, no wall-clock dependence.

pub mod account;
pub mod constants;
pub mod error;
pub mod stream_config;

pub use account::{AccountId, DriverTag};
pub use error::{CodecError, MetadataError, ReceiverError};
pub use stream_config::{amount_per_second_from_rate, StreamConfig};
