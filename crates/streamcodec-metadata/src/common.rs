//! Document shapes shared across every family.

use serde::{Deserialize, Serialize};

/// A reference to an account inside a document: its driver slug and its
/// 256-bit id rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct AccountRef {
    pub driver: String,
    pub account_id: String,
}

/// A weighted splits receiver as documents record it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct SplitsEntryDoc {
    pub account_id: String,
    pub weight: u32,
}
