//! Address-driver stream metadata: the per-token stream configurations
//! an address-driver account has described off-chain.
//!
//! Three schema versions. V2 added the write timestamp and optional
//! per-stream names; V3 added the writing address and optional archival
//! flags. Versions are additive; old documents keep parsing forever.

use serde::Deserialize;
use serde_json::Value;
use streamcodec_core::MetadataError;

use crate::common::AccountRef;
use crate::parser::{SchemaVersion, VersionChain};

/// The literal `"address"` driver tag this family requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AddressDriver {
    Address,
}

/// One configured stream, V1 shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StreamV1 {
    pub id: String,
    /// Packed stream config as a decimal string, verbatim from the ledger.
    pub config: String,
    pub receiver: AccountRef,
}

/// One configured stream, V2 shape: V1 plus an optional display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StreamV2 {
    pub id: String,
    pub config: String,
    pub receiver: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
}

/// One configured stream, V3 shape: V2 plus an optional archival flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct StreamV3 {
    pub id: String,
    pub config: String,
    pub receiver: AccountRef,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub archived: Option<bool>,
}

/// The streams configured for one token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AssetConfig<S> {
    pub token_address: String,
    pub streams: Vec<S>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddressStreamsV1 {
    pub driver: AddressDriver,
    pub describes: AccountRef,
    pub asset_configs: Vec<AssetConfig<StreamV1>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddressStreamsV2 {
    pub driver: AddressDriver,
    pub describes: AccountRef,
    pub asset_configs: Vec<AssetConfig<StreamV2>>,
    /// Unix timestamp the document was written at.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AddressStreamsV3 {
    pub driver: AddressDriver,
    pub describes: AccountRef,
    pub asset_configs: Vec<AssetConfig<StreamV3>>,
    pub timestamp: u64,
    /// Checksummed address that signed the write.
    pub written_by_address: String,
}

/// An address-driver stream document, tagged with the schema version it
/// satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressStreamsDocument {
    V1(AddressStreamsV1),
    V2(AddressStreamsV2),
    V3(AddressStreamsV3),
}

impl AddressStreamsDocument {
    pub fn chain() -> VersionChain<Self> {
        VersionChain::new(
            "address-streams",
            vec![
                SchemaVersion {
                    version: 3,
                    parse: |v| AddressStreamsV3::deserialize(v).map(Self::V3),
                },
                SchemaVersion {
                    version: 2,
                    parse: |v| AddressStreamsV2::deserialize(v).map(Self::V2),
                },
                SchemaVersion {
                    version: 1,
                    parse: |v| AddressStreamsV1::deserialize(v).map(Self::V1),
                },
            ],
        )
    }

    /// Accept any known schema version, newest first.
    pub fn parse_any(input: &Value) -> Result<Self, MetadataError> {
        Self::chain().parse_any(input)
    }

    /// Accept the newest schema version only (pre-persist validation).
    pub fn parse_latest(input: &Value) -> Result<Self, MetadataError> {
        Self::chain().parse_latest(input)
    }
}
