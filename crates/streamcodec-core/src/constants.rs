//! Protocol-wide numeric constants.
//!
//! These are bit-exact mirrors of the values the remote ledger contract
//! is deployed with. Changing any of them desynchronizes the codec from
//! the ledger and corrupts funds routing.

use alloy_primitives::U256;

/// Length of one accounting cycle in seconds (1 week). Streamed amounts
/// are settled per cycle.
pub const CYCLE_SECONDS: u32 = 604_800;

/// Maximum number of stream receivers a single account may configure.
pub const MAX_STREAM_RECEIVERS: usize = 100;

/// Maximum number of splits receivers a single account may configure.
pub const MAX_SPLITS_RECEIVERS: usize = 200;

/// The weight of a splits-receiver list must sum to exactly this value;
/// each receiver's share is `weight / TOTAL_SPLITS_WEIGHT`.
pub const TOTAL_SPLITS_WEIGHT: u32 = 1_000_000;

/// Per-second stream rates carry this many extra decimal digits of
/// precision beyond the token's own decimals.
pub const AMT_PER_SEC_EXTRA_DECIMALS: u8 = 9;

/// `10^AMT_PER_SEC_EXTRA_DECIMALS`, as a 256-bit value.
pub const AMT_PER_SEC_MULTIPLIER: U256 = U256::from_limbs([1_000_000_000, 0, 0, 0]);
