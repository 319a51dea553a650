//! Immutable-splits sub-list metadata: one frozen shard of a larger
//! recipient list, created when a list outgrows the on-ledger receiver
//! cap and is split into sub-lists.
//!
//! Two schema versions. V2 added the links to the parent list and the
//! root of the sub-list tree.

use serde::Deserialize;
use serde_json::Value;
use streamcodec_core::MetadataError;

use crate::common::{AccountRef, SplitsEntryDoc};
use crate::parser::{SchemaVersion, VersionChain};

/// The literal `"immutableSplits"` driver tag this family requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImmutableSplitsDriver {
    ImmutableSplits,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SubListV1 {
    pub driver: ImmutableSplitsDriver,
    pub describes: AccountRef,
    pub receivers: Vec<SplitsEntryDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SubListV2 {
    pub driver: ImmutableSplitsDriver,
    pub describes: AccountRef,
    pub receivers: Vec<SplitsEntryDoc>,
    /// The list this sub-list was split out of.
    pub parent: AccountRef,
    /// The root of the whole sub-list tree.
    pub root: AccountRef,
}

/// An immutable-splits sub-list document, tagged with the schema version
/// it satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubListDocument {
    V1(SubListV1),
    V2(SubListV2),
}

impl SubListDocument {
    pub fn chain() -> VersionChain<Self> {
        VersionChain::new(
            "immutable-splits-sub-list",
            vec![
                SchemaVersion {
                    version: 2,
                    parse: |v| SubListV2::deserialize(v).map(Self::V2),
                },
                SchemaVersion {
                    version: 1,
                    parse: |v| SubListV1::deserialize(v).map(Self::V1),
                },
            ],
        )
    }

    pub fn parse_any(input: &Value) -> Result<Self, MetadataError> {
        Self::chain().parse_any(input)
    }

    pub fn parse_latest(input: &Value) -> Result<Self, MetadataError> {
        Self::chain().parse_latest(input)
    }
}
