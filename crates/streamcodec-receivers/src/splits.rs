//! Splits-receiver list normalization.
//!
//! Callers describe splits receivers before they are resolved to account
//! ids: a direct address, a project reference, a linked text identity, or
//! an already-known list/sub-list/ecosystem account id. The pipeline
//! resolves every description through the [`AccountIdResolver`]
//! collaborator, then validates and canonicalizes the list into the two
//! shapes the surrounding system needs — the on-ledger `(accountId,
//! weight)` pairs and a parallel metadata-shaped description list.

use std::fmt;

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Serialize;
use streamcodec_core::constants::{MAX_SPLITS_RECEIVERS, TOTAL_SPLITS_WEIGHT};
use streamcodec_core::{AccountId, ReceiverError};
use tracing::debug;

/// A source-forge project reference, resolvable to a repo-driver id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSource {
    /// Forge slug, e.g. "github".
    pub forge: String,
    pub owner_name: String,
    pub repo_name: String,
}

impl fmt::Display for ProjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.forge, self.owner_name, self.repo_name)
    }
}

/// A splits receiver as the caller describes it, before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitsReceiverRef {
    /// A plain address; resolves to an address-driver id.
    Address(Address),
    /// A source-forge project; resolves to a repo-driver id.
    Project(ProjectSource),
    /// A linked text identity; resolves to a repo-driver id with the
    /// identifier embedded in the payload bits.
    LinkedIdentity(String),
    /// An already-known nft-driver list id.
    DripList(AccountId),
    /// An already-known immutable-splits sub-list id.
    SubList(AccountId),
    /// An already-known ecosystem id.
    Ecosystem(AccountId),
}

impl fmt::Display for SplitsReceiverRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitsReceiverRef::Address(a) => write!(f, "address {a}"),
            SplitsReceiverRef::Project(p) => write!(f, "project {p}"),
            SplitsReceiverRef::LinkedIdentity(id) => write!(f, "linked identity {id}"),
            SplitsReceiverRef::DripList(id) => write!(f, "drip list {id}"),
            SplitsReceiverRef::SubList(id) => write!(f, "sub-list {id}"),
            SplitsReceiverRef::Ecosystem(id) => write!(f, "ecosystem {id}"),
        }
    }
}

/// A receiver description plus its share of the split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedSplitsRef {
    pub receiver: SplitsReceiverRef,
    /// Share of the split, out of [`TOTAL_SPLITS_WEIGHT`].
    pub weight: u32,
}

/// One entry of the on-ledger splits-receiver list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitsReceiver {
    pub account_id: AccountId,
    pub weight: u32,
}

/// The metadata-document shape of a resolved receiver: the original
/// description re-tagged with its resolved account id as a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SplitsEntry {
    Address {
        account_id: String,
        weight: u32,
    },
    Project {
        account_id: String,
        weight: u32,
        source: ProjectSource,
    },
    LinkedIdentity {
        account_id: String,
        weight: u32,
        identity: String,
    },
    DripList {
        account_id: String,
        weight: u32,
    },
    SubList {
        account_id: String,
        weight: u32,
    },
    Ecosystem {
        account_id: String,
        weight: u32,
    },
}

/// The external collaborator that resolves a receiver description to its
/// account id, typically by querying the respective driver contract.
/// Resolution is the only I/O in the splits pipeline; everything after it
/// is pure.
#[async_trait]
pub trait AccountIdResolver: Send + Sync {
    async fn resolve(&self, receiver: &SplitsReceiverRef) -> Result<AccountId, ReceiverError>;
}

/// The two outputs of splits normalization: the canonical on-ledger list
/// and the parallel metadata-shaped description list.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSplits {
    pub onchain: Vec<SplitsReceiver>,
    pub metadata: Vec<SplitsEntry>,
}

impl NormalizedSplits {
    fn empty() -> Self {
        Self {
            onchain: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

/// Resolve, validate, and canonicalize a splits-receiver list.
///
/// Pipeline: empty input short-circuits; the size cap is checked; every
/// description is resolved (any failure aborts the call); the resolved
/// pairs are sorted ascending by account id; a single walk checks each
/// weight against `(0, TOTAL_SPLITS_WEIGHT]`, enforces strictly ascending
/// account ids (catching duplicates), and accumulates the weight sum,
/// which must equal exactly [`TOTAL_SPLITS_WEIGHT`].
pub async fn normalize_splits_receivers<R>(
    receivers: Vec<WeightedSplitsRef>,
    resolver: &R,
) -> Result<NormalizedSplits, ReceiverError>
where
    R: AccountIdResolver + ?Sized,
{
    if receivers.is_empty() {
        return Ok(NormalizedSplits::empty());
    }
    if receivers.len() > MAX_SPLITS_RECEIVERS {
        return Err(ReceiverError::TooManyReceivers {
            kind: "splits",
            actual: receivers.len(),
            max: MAX_SPLITS_RECEIVERS,
        });
    }

    let mut resolved = Vec::with_capacity(receivers.len());
    for weighted in receivers {
        let account_id = resolver.resolve(&weighted.receiver).await?;
        resolved.push((account_id, weighted));
    }
    resolved.sort_by_key(|(account_id, _)| *account_id);

    let mut sum: u64 = 0;
    let mut previous: Option<AccountId> = None;
    for (account_id, weighted) in &resolved {
        if weighted.weight == 0 || weighted.weight > TOTAL_SPLITS_WEIGHT {
            return Err(ReceiverError::WeightOutOfRange {
                account_id: account_id.to_string(),
                weight: weighted.weight,
                max: TOTAL_SPLITS_WEIGHT,
            });
        }
        match previous {
            Some(prev) if *account_id == prev => {
                return Err(ReceiverError::DuplicateReceivers {
                    account_ids: vec![account_id.to_string()],
                });
            }
            Some(prev) if *account_id < prev => {
                return Err(ReceiverError::OutOfOrder {
                    account_id: account_id.to_string(),
                });
            }
            _ => {}
        }
        previous = Some(*account_id);
        sum += u64::from(weighted.weight);
    }
    if sum != u64::from(TOTAL_SPLITS_WEIGHT) {
        return Err(ReceiverError::WrongTotalWeight {
            actual: sum,
            expected: TOTAL_SPLITS_WEIGHT,
        });
    }

    let onchain: Vec<SplitsReceiver> = resolved
        .iter()
        .map(|(account_id, weighted)| SplitsReceiver {
            account_id: *account_id,
            weight: weighted.weight,
        })
        .collect();
    let metadata = resolved
        .into_iter()
        .map(|(account_id, weighted)| entry_for(account_id, weighted))
        .collect();

    debug!(count = onchain.len(), "normalized splits receiver list");
    Ok(NormalizedSplits { onchain, metadata })
}

fn entry_for(account_id: AccountId, weighted: WeightedSplitsRef) -> SplitsEntry {
    let account_id = account_id.to_string();
    let weight = weighted.weight;
    match weighted.receiver {
        SplitsReceiverRef::Address(_) => SplitsEntry::Address { account_id, weight },
        SplitsReceiverRef::Project(source) => SplitsEntry::Project {
            account_id,
            weight,
            source,
        },
        SplitsReceiverRef::LinkedIdentity(identity) => SplitsEntry::LinkedIdentity {
            account_id,
            weight,
            identity,
        },
        SplitsReceiverRef::DripList(_) => SplitsEntry::DripList { account_id, weight },
        SplitsReceiverRef::SubList(_) => SplitsEntry::SubList { account_id, weight },
        SplitsReceiverRef::Ecosystem(_) => SplitsEntry::Ecosystem { account_id, weight },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    /// Resolves known-id variants to their id, addresses to the address
    /// driver, and everything else to a deterministic repo-driver id.
    struct TestResolver;

    #[async_trait]
    impl AccountIdResolver for TestResolver {
        async fn resolve(&self, receiver: &SplitsReceiverRef) -> Result<AccountId, ReceiverError> {
            Ok(match receiver {
                SplitsReceiverRef::Address(a) => AccountId::from_address(*a),
                SplitsReceiverRef::Project(p) => AccountId::new(
                    (U256::from(3u8) << 224) | U256::from(p.repo_name.len() as u64),
                ),
                SplitsReceiverRef::LinkedIdentity(id) => AccountId::new(
                    (U256::from(3u8) << 224) | U256::from(id.len() as u64) | U256::from(1u8 << 7),
                ),
                SplitsReceiverRef::DripList(id)
                | SplitsReceiverRef::SubList(id)
                | SplitsReceiverRef::Ecosystem(id) => *id,
            })
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl AccountIdResolver for FailingResolver {
        async fn resolve(&self, receiver: &SplitsReceiverRef) -> Result<AccountId, ReceiverError> {
            Err(ReceiverError::Resolution {
                receiver: receiver.to_string(),
                reason: "driver contract unreachable".into(),
            })
        }
    }

    fn list_ref(id: u64, weight: u32) -> WeightedSplitsRef {
        WeightedSplitsRef {
            receiver: SplitsReceiverRef::DripList(AccountId::new(U256::from(id))),
            weight,
        }
    }

    #[tokio::test]
    async fn sorts_by_resolved_account_id() {
        let normalized = normalize_splits_receivers(
            vec![list_ref(5, 600_000), list_ref(2, 400_000)],
            &TestResolver,
        )
        .await
        .unwrap();
        assert_eq!(
            normalized.onchain,
            vec![
                SplitsReceiver {
                    account_id: AccountId::new(U256::from(2u8)),
                    weight: 400_000,
                },
                SplitsReceiver {
                    account_id: AccountId::new(U256::from(5u8)),
                    weight: 600_000,
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_short_circuits() {
        let normalized = normalize_splits_receivers(Vec::new(), &FailingResolver)
            .await
            .unwrap();
        assert!(normalized.onchain.is_empty());
        assert!(normalized.metadata.is_empty());
    }

    #[tokio::test]
    async fn rejects_oversized_list() {
        let receivers: Vec<_> = (0..201).map(|i| list_ref(i, 1)).collect();
        assert!(matches!(
            normalize_splits_receivers(receivers, &TestResolver).await,
            Err(ReceiverError::TooManyReceivers {
                kind: "splits",
                actual: 201,
                max: 200,
            })
        ));
    }

    #[tokio::test]
    async fn resolution_failure_aborts_the_call() {
        let err = normalize_splits_receivers(vec![list_ref(1, 1_000_000)], &FailingResolver)
            .await
            .unwrap_err();
        assert!(matches!(err, ReceiverError::Resolution { .. }));
    }

    #[tokio::test]
    async fn rejects_wrong_total_weight() {
        for (a, b) in [(600_000, 399_999), (600_000, 400_001)] {
            let err = normalize_splits_receivers(
                vec![list_ref(5, a), list_ref(2, b)],
                &TestResolver,
            )
            .await
            .unwrap_err();
            match err {
                ReceiverError::WrongTotalWeight { actual, expected } => {
                    assert_eq!(actual, u64::from(a) + u64::from(b));
                    assert_eq!(expected, 1_000_000);
                }
                other => panic!("expected WrongTotalWeight, got {other}"),
            }
        }
    }

    #[tokio::test]
    async fn rejects_zero_and_oversized_weights() {
        let err = normalize_splits_receivers(
            vec![list_ref(1, 0), list_ref(2, 1_000_000)],
            &TestResolver,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ReceiverError::WeightOutOfRange { weight: 0, .. }
        ));

        let err = normalize_splits_receivers(vec![list_ref(1, 1_000_001)], &TestResolver)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReceiverError::WeightOutOfRange {
                weight: 1_000_001,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn rejects_receivers_resolving_to_same_id() {
        let err = normalize_splits_receivers(
            vec![list_ref(7, 500_000), list_ref(7, 500_000)],
            &TestResolver,
        )
        .await
        .unwrap_err();
        match err {
            ReceiverError::DuplicateReceivers { account_ids } => {
                assert_eq!(account_ids, vec!["7".to_string()]);
            }
            other => panic!("expected DuplicateReceivers, got {other}"),
        }
    }

    #[tokio::test]
    async fn metadata_entries_mirror_input_variants() {
        let address: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let normalized = normalize_splits_receivers(
            vec![
                WeightedSplitsRef {
                    receiver: SplitsReceiverRef::Address(address),
                    weight: 250_000,
                },
                WeightedSplitsRef {
                    receiver: SplitsReceiverRef::Project(ProjectSource {
                        forge: "github".into(),
                        owner_name: "octo".into(),
                        repo_name: "engine".into(),
                    }),
                    weight: 250_000,
                },
                WeightedSplitsRef {
                    receiver: SplitsReceiverRef::LinkedIdentity("0000-0002-1825-0097".into()),
                    weight: 250_000,
                },
                WeightedSplitsRef {
                    receiver: SplitsReceiverRef::SubList(AccountId::new(
                        (U256::from(2u8) << 224) | U256::from(11u8),
                    )),
                    weight: 250_000,
                },
            ],
            &TestResolver,
        )
        .await
        .unwrap();

        assert_eq!(normalized.metadata.len(), 4);
        // Parallel lists: metadata[i] carries onchain[i]'s id as a string.
        for (entry, receiver) in normalized.metadata.iter().zip(&normalized.onchain) {
            let id = match entry {
                SplitsEntry::Address { account_id, .. }
                | SplitsEntry::Project { account_id, .. }
                | SplitsEntry::LinkedIdentity { account_id, .. }
                | SplitsEntry::DripList { account_id, .. }
                | SplitsEntry::SubList { account_id, .. }
                | SplitsEntry::Ecosystem { account_id, .. } => account_id,
            };
            assert_eq!(id, &receiver.account_id.to_string());
        }
        assert!(normalized
            .metadata
            .iter()
            .any(|e| matches!(e, SplitsEntry::Project { source, .. } if source.repo_name == "engine")));
        assert!(normalized
            .metadata
            .iter()
            .any(|e| matches!(e, SplitsEntry::LinkedIdentity { identity, .. } if identity == "0000-0002-1825-0097")));
    }

    #[test]
    fn splits_entry_serializes_with_type_tag() {
        let entry = SplitsEntry::Project {
            account_id: "42".into(),
            weight: 100,
            source: ProjectSource {
                forge: "github".into(),
                owner_name: "octo".into(),
                repo_name: "engine".into(),
            },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "project");
        assert_eq!(json["accountId"], "42");
        assert_eq!(json["source"]["ownerName"], "octo");
    }
}
