//! # streamcodec-metadata
//!
//! The off-chain metadata document families and their backward-compatible
//! parser chains. Each account driver owns one document family; each
//! family is an ordered sequence of schema versions, newest first.
//!
//! Reading tries every version until one accepts (old documents never
//! stop parsing); writing validates against the newest version only, so
//! the engine can never persist a document it could not read back.
//! Versions are monotonically additive — no migration happens here, only
//! acceptance testing.

pub mod address;
pub mod common;
pub mod list;
pub mod parser;
pub mod project;
pub mod sub_list;

pub use address::AddressStreamsDocument;
pub use common::{AccountRef, SplitsEntryDoc};
pub use list::ListDocument;
pub use parser::{SchemaVersion, VersionChain};
pub use project::ProjectDocument;
pub use sub_list::SubListDocument;
