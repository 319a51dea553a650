//! Stream-receiver list normalization.
//!
//! The ledger contract requires the receiver list of a `setStreams`-style
//! call to be strictly ascending by account id, free of duplicates, at
//! most [`MAX_STREAM_RECEIVERS`] long, and free of zero-rate entries.
//! This pipeline takes the caller's list in any order and either produces
//! the canonical form or rejects the whole list with every offender named.

use alloy_primitives::U256;
use streamcodec_core::constants::MAX_STREAM_RECEIVERS;
use streamcodec_core::{AccountId, ReceiverError, StreamConfig};
use tracing::debug;

/// One entry of the on-ledger stream-receiver list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamReceiver {
    pub account_id: AccountId,
    /// Packed [`StreamConfig`], stored verbatim on the ledger.
    pub config: U256,
}

/// Validate and canonicalize a stream-receiver list.
///
/// Checks run in a fixed order and each failure aborts the whole call:
/// size, then zero-amount entries (all named at once), then duplicate
/// account ids (all named at once, regardless of differing configs).
/// On success, returns a new list sorted strictly ascending by account id.
pub fn normalize_stream_receivers(
    receivers: Vec<StreamReceiver>,
) -> Result<Vec<StreamReceiver>, ReceiverError> {
    if receivers.len() > MAX_STREAM_RECEIVERS {
        return Err(ReceiverError::TooManyReceivers {
            kind: "stream",
            actual: receivers.len(),
            max: MAX_STREAM_RECEIVERS,
        });
    }

    let mut zero_amount = Vec::new();
    for receiver in &receivers {
        let config = StreamConfig::decode(receiver.config);
        match config {
            Ok(_) => {}
            Err(streamcodec_core::CodecError::ZeroAmountPerSecond) => {
                zero_amount.push(receiver.account_id.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }
    if !zero_amount.is_empty() {
        return Err(ReceiverError::ZeroAmountReceivers {
            account_ids: zero_amount,
        });
    }

    // Any repeated account id is an error, even with differing configs.
    let mut sorted = receivers;
    sorted.sort_unstable_by_key(|r| r.account_id);
    let mut duplicates: Vec<String> = Vec::new();
    for pair in sorted.windows(2) {
        if pair[0].account_id == pair[1].account_id {
            let id = pair[0].account_id.to_string();
            if duplicates.last() != Some(&id) {
                duplicates.push(id);
            }
        }
    }
    if !duplicates.is_empty() {
        return Err(ReceiverError::DuplicateReceivers {
            account_ids: duplicates,
        });
    }

    debug!(count = sorted.len(), "normalized stream receiver list");
    Ok(sorted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receiver(id: u64, amount: u64) -> StreamReceiver {
        let config = StreamConfig {
            stream_id: 0,
            amount_per_second: U256::from(amount),
            start: 0,
            duration_seconds: 0,
        };
        StreamReceiver {
            account_id: AccountId::new(U256::from(id)),
            // Zero-amount configs cannot be produced through encode();
            // pack by hand the way a corrupted upstream would.
            config: if amount == 0 {
                U256::ZERO
            } else {
                config.encode().unwrap()
            },
        }
    }

    #[test]
    fn sorts_ascending_by_account_id() {
        let normalized =
            normalize_stream_receivers(vec![receiver(9, 1), receiver(2, 1), receiver(5, 1)])
                .unwrap();
        let ids: Vec<_> = normalized.iter().map(|r| r.account_id.raw().to::<u64>()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn order_independent() {
        let a = normalize_stream_receivers(vec![receiver(3, 7), receiver(1, 7), receiver(2, 7)])
            .unwrap();
        let b = normalize_stream_receivers(vec![receiver(2, 7), receiver(3, 7), receiver(1, 7)])
            .unwrap();
        let c = normalize_stream_receivers(vec![receiver(1, 7), receiver(2, 7), receiver(3, 7)])
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn rejects_oversized_list() {
        let receivers: Vec<_> = (0..101).map(|i| receiver(i, 1)).collect();
        assert!(matches!(
            normalize_stream_receivers(receivers),
            Err(ReceiverError::TooManyReceivers {
                kind: "stream",
                actual: 101,
                max: 100,
            })
        ));
    }

    #[test]
    fn accepts_list_at_max_size() {
        let receivers: Vec<_> = (0..100).map(|i| receiver(i, 1)).collect();
        assert_eq!(normalize_stream_receivers(receivers).unwrap().len(), 100);
    }

    #[test]
    fn rejects_zero_amount_naming_every_offender() {
        let err = normalize_stream_receivers(vec![
            receiver(1, 5),
            receiver(2, 0),
            receiver(3, 0),
        ])
        .unwrap_err();
        match err {
            ReceiverError::ZeroAmountReceivers { account_ids } => {
                assert_eq!(account_ids, vec!["2".to_string(), "3".to_string()]);
            }
            other => panic!("expected ZeroAmountReceivers, got {other}"),
        }
    }

    #[test]
    fn rejects_duplicates_even_with_different_configs() {
        let err = normalize_stream_receivers(vec![
            receiver(1, 5),
            receiver(1, 6),
            receiver(2, 5),
        ])
        .unwrap_err();
        match err {
            ReceiverError::DuplicateReceivers { account_ids } => {
                assert_eq!(account_ids, vec!["1".to_string()]);
            }
            other => panic!("expected DuplicateReceivers, got {other}"),
        }
    }

    #[test]
    fn names_every_duplicate_once() {
        let err = normalize_stream_receivers(vec![
            receiver(4, 1),
            receiver(4, 1),
            receiver(4, 1),
            receiver(7, 1),
            receiver(7, 2),
        ])
        .unwrap_err();
        match err {
            ReceiverError::DuplicateReceivers { account_ids } => {
                assert_eq!(account_ids, vec!["4".to_string(), "7".to_string()]);
            }
            other => panic!("expected DuplicateReceivers, got {other}"),
        }
    }

    #[test]
    fn empty_list_is_valid() {
        assert_eq!(normalize_stream_receivers(Vec::new()).unwrap(), Vec::new());
    }
}
