//! # streamcodec-receivers
//!
//! Validation and canonicalization of receiver lists, the exact shape
//! the remote ledger contract accepts: stream receivers (account id +
//! packed stream config) and splits receivers (account id + weight).
//!
//! Both pipelines share the same shape — validate, dedupe, sort — and
//! both reject the whole list on any violation, naming every offending
//! account id. The splits pipeline additionally resolves caller-supplied
//! receiver descriptions to account ids through the [`AccountIdResolver`]
//! collaborator; that is the only async seam, and the only place the
//! surrounding system's I/O touches this crate.

pub mod splits;
pub mod stream;

pub use splits::{
    normalize_splits_receivers, AccountIdResolver, NormalizedSplits, ProjectSource,
    SplitsEntry, SplitsReceiver, SplitsReceiverRef, WeightedSplitsRef,
};
pub use stream::{normalize_stream_receivers, StreamReceiver};
