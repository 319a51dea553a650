//! Nft-driver list metadata: a curated list of funding recipients, or an
//! ecosystem built from one.
//!
//! Four schema versions — the longest chain of any family. V2 added the
//! optional description; V3 added the visibility flag; V4 added the list
//! kind tag that introduced ecosystems, plus an optional avatar.

use serde::Deserialize;
use serde_json::Value;
use streamcodec_core::MetadataError;

use crate::common::{AccountRef, SplitsEntryDoc};
use crate::parser::{SchemaVersion, VersionChain};
use crate::project::Avatar;

/// The literal `"nft"` driver tag this family requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NftDriver {
    Nft,
}

/// What kind of list this document describes, introduced in V4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    DripList,
    Ecosystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ListV1 {
    pub driver: NftDriver,
    pub describes: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
    pub projects: Vec<SplitsEntryDoc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ListV2 {
    pub driver: NftDriver,
    pub describes: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
    pub projects: Vec<SplitsEntryDoc>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ListV3 {
    pub driver: NftDriver,
    pub describes: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
    pub projects: Vec<SplitsEntryDoc>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ListV4 {
    pub driver: NftDriver,
    pub describes: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
    pub projects: Vec<SplitsEntryDoc>,
    #[serde(default)]
    pub description: Option<String>,
    pub is_visible: bool,
    #[serde(rename = "type")]
    pub kind: ListKind,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

/// An nft-driver list document, tagged with the schema version it
/// satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDocument {
    V1(ListV1),
    V2(ListV2),
    V3(ListV3),
    V4(ListV4),
}

impl ListDocument {
    pub fn chain() -> VersionChain<Self> {
        VersionChain::new(
            "nft-list",
            vec![
                SchemaVersion {
                    version: 4,
                    parse: |v| ListV4::deserialize(v).map(Self::V4),
                },
                SchemaVersion {
                    version: 3,
                    parse: |v| ListV3::deserialize(v).map(Self::V3),
                },
                SchemaVersion {
                    version: 2,
                    parse: |v| ListV2::deserialize(v).map(Self::V2),
                },
                SchemaVersion {
                    version: 1,
                    parse: |v| ListV1::deserialize(v).map(Self::V1),
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
