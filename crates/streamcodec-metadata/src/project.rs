//! Repo-driver project metadata: a source-forge project's description
//! and its splits into maintainers and dependencies.
//!
//! Three schema versions. V2 added the emoji/color presentation fields;
//! V3 added the optional visibility flag and the optional tagged avatar
//! that supersedes the bare emoji for rendering.

use serde::Deserialize;
use serde_json::Value;
use streamcodec_core::MetadataError;

use crate::common::{AccountRef, SplitsEntryDoc};
use crate::parser::{SchemaVersion, VersionChain};

/// The literal `"repo"` driver tag this family requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepoDriver {
    Repo,
}

/// Where the project lives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectSourceDoc {
    /// Forge slug, e.g. "github".
    pub forge: String,
    pub owner_name: String,
    pub repo_name: String,
    pub url: String,
}

/// How the project splits incoming funds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectSplits {
    pub maintainers: Vec<SplitsEntryDoc>,
    pub dependencies: Vec<SplitsEntryDoc>,
}

/// V3's tagged avatar: either an emoji or a content-addressed image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Avatar {
    Emoji { emoji: String },
    Image { cid: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectV1 {
    pub driver: RepoDriver,
    pub describes: AccountRef,
    pub source: ProjectSourceDoc,
    pub splits: ProjectSplits,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectV2 {
    pub driver: RepoDriver,
    pub describes: AccountRef,
    pub source: ProjectSourceDoc,
    pub splits: ProjectSplits,
    pub emoji: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct ProjectV3 {
    pub driver: RepoDriver,
    pub describes: AccountRef,
    pub source: ProjectSourceDoc,
    pub splits: ProjectSplits,
    pub emoji: String,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_visible: Option<bool>,
    #[serde(default)]
    pub avatar: Option<Avatar>,
}

/// A repo-driver project document, tagged with the schema version it
/// satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectDocument {
    V1(ProjectV1),
    V2(ProjectV2),
    V3(ProjectV3),
}

impl ProjectDocument {
    pub fn chain() -> VersionChain<Self> {
        VersionChain::new(
            "repo-project",
            vec![
                SchemaVersion {
                    version: 3,
                    parse: |v| ProjectV3::deserialize(v).map(Self::V3),
                },
                SchemaVersion {
                    version: 2,
                    parse: |v| ProjectV2::deserialize(v).map(Self::V2),
                },
                SchemaVersion {
                    version: 1,
                    parse: |v| ProjectV1::deserialize(v).map(Self::V1),
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
