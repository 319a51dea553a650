//! The generic newest-first version-chain parser.
//!
//! One [`VersionChain`] exists per document family. It is a stateless
//! chain-of-responsibility: `parse_any` walks the validators newest
//! first and returns the first success; `parse_latest` applies only the
//! newest validator and is used right before persisting a freshly built
//! document.

use serde_json::Value;
use streamcodec_core::MetadataError;

/// One schema version of a document family: its version number and a
/// validator that either accepts the input as that version or rejects
/// it with serde's reason.
pub struct SchemaVersion<D> {
    pub version: u32,
    pub parse: fn(&Value) -> Result<D, serde_json::Error>,
}

/// An ordered chain of schema validators for one document family,
/// newest version first.
pub struct VersionChain<D> {
    family: &'static str,
    versions: Vec<SchemaVersion<D>>,
}

impl<D> VersionChain<D> {
    /// Build a chain. `versions` must be non-empty and ordered newest
    /// first; both are programming errors of the family module, not of
    /// the caller, hence the asserts.
    pub fn new(family: &'static str, versions: Vec<SchemaVersion<D>>) -> Self {
        assert!(!versions.is_empty(), "{family}: empty version chain");
        assert!(
            versions.windows(2).all(|w| w[0].version > w[1].version),
            "{family}: versions must be ordered newest first"
        );
        Self { family, versions }
    }

    /// The document family this chain parses.
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// The newest schema version number in the chain.
    pub fn newest_version(&self) -> u32 {
        self.versions[0].version
    }

    /// Try every version, newest first, and return the first success.
    ///
    /// When every version rejects, the error carries the newest
    /// validator's rejection reason — the most likely intended version,
    /// so the most actionable diagnostic.
    pub fn parse_any(&self, input: &Value) -> Result<D, MetadataError> {
        let mut newest_reason = None;
        for version in &self.versions {
            match (version.parse)(input) {
                Ok(document) => return Ok(document),
                Err(reason) => {
                    if newest_reason.is_none() {
                        newest_reason = Some(reason.to_string());
                    }
                }
            }
        }
        Err(MetadataError::NoVersionMatched {
            family: self.family,
            newest_version: self.newest_version(),
            reason: newest_reason.unwrap_or_default(),
        })
    }

    /// Validate against the newest version only.
    ///
    /// Used exclusively before persisting a freshly constructed
    /// document; older versions exist purely for reading legacy data.
    pub fn parse_latest(&self, input: &Value) -> Result<D, MetadataError> {
        let newest = &self.versions[0];
        (newest.parse)(input).map_err(|reason| MetadataError::NoVersionMatched {
            family: self.family,
            newest_version: newest.version,
            reason: reason.to_string(),
        })
    }

    /// [`Self::parse_any`] over raw JSON text.
    pub fn parse_any_str(&self, input: &str) -> Result<D, MetadataError> {
        let value: Value = serde_json::from_str(input)?;
        self.parse_any(&value)
    }

    /// [`Self::parse_latest`] over raw JSON text.
    pub fn parse_latest_str(&self, input: &str) -> Result<D, MetadataError> {
        let value: Value = serde_json::from_str(input)?;
        self.parse_latest(&value)
    }
}
