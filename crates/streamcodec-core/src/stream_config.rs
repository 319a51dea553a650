//! The fixed-width bit-packing codec for stream configurations.
//!
//! A stream configuration is four unsigned fields packed into a single
//! 256-bit word the remote ledger contract interprets verbatim:
//!
//! ```text
//! MSB                                                             LSB
//! | streamId (32b) | amountPerSecond (160b) | start (32b) | duration (32b) |
//!   [255:224]        [223:64]                 [63:32]       [31:0]
//! ```
//!
//! Both directions validate: `encode` rejects out-of-range fields and
//! `decode` re-checks the same bounds, so corrupted upstream data can
//! never round-trip into a "valid" configuration.

use alloy_primitives::U256;

use crate::constants::{AMT_PER_SEC_EXTRA_DECIMALS, AMT_PER_SEC_MULTIPLIER, CYCLE_SECONDS};
use crate::error::CodecError;

/// Largest representable per-second amount: `2^160 - 1`.
pub const MAX_AMOUNT_PER_SECOND: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xFFFF_FFFF, 0]);

const AMOUNT_SHIFT: usize = 64;
const START_SHIFT: usize = 32;
const STREAM_ID_SHIFT: usize = 224;

/// A single stream's on-ledger configuration.
///
/// `start == 0` means "use the ledger-assigned activation time";
/// `duration_seconds == 0` means "run until the balance is exhausted".
/// The codec packs both sentinels verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamConfig {
    /// Caller-chosen stream identifier, opaque to the ledger.
    pub stream_id: u32,
    /// Tokens streamed per second, scaled by `10^9` beyond the token's
    /// own decimals. Must be non-zero: a stream must move funds.
    pub amount_per_second: U256,
    /// Unix timestamp at which streaming starts, or the zero sentinel.
    pub start: u32,
    /// How long the stream runs, or the zero sentinel.
    pub duration_seconds: u32,
}

impl StreamConfig {
    /// Pack this configuration into its 256-bit on-ledger representation.
    ///
    /// The three `u32` fields are range-enforced by their type; only
    /// `amount_per_second` needs a runtime bound check.
    pub fn encode(&self) -> Result<U256, CodecError> {
        validate_amount(self.amount_per_second)?;
        Ok((U256::from(self.stream_id) << STREAM_ID_SHIFT)
            | (self.amount_per_second << AMOUNT_SHIFT)
            | (U256::from(self.start) << START_SHIFT)
            | U256::from(self.duration_seconds))
    }

    /// Unpack a 256-bit on-ledger value into a structured configuration.
    ///
    /// The decoded fields are re-validated with the same bounds `encode`
    /// uses; a packed value is never trusted to already be in range.
    pub fn decode(packed: U256) -> Result<Self, CodecError> {
        let config = Self {
            stream_id: (packed >> STREAM_ID_SHIFT).to::<u32>(),
            amount_per_second: (packed >> AMOUNT_SHIFT) & MAX_AMOUNT_PER_SECOND,
            start: ((packed >> START_SHIFT) & U256::from(u32::MAX)).to::<u32>(),
            duration_seconds: (packed & U256::from(u32::MAX)).to::<u32>(),
        };
        validate_amount(config.amount_per_second)?;
        Ok(config)
    }
}

fn validate_amount(amount: U256) -> Result<(), CodecError> {
    if amount.is_zero() {
        return Err(CodecError::ZeroAmountPerSecond);
    }
    if amount > MAX_AMOUNT_PER_SECOND {
        return Err(CodecError::OutOfRange {
            field: "amountPerSecond",
            value: amount.to_string(),
            max: MAX_AMOUNT_PER_SECOND.to_string(),
        });
    }
    Ok(())
}

/// Convert a human-specified stream rate into the ledger's per-second unit.
///
/// `rate` is in the token's smallest unit per `interval_seconds` (e.g.
/// wei per day). The result carries [`AMT_PER_SEC_EXTRA_DECIMALS`] extra
/// decimals of precision: `rate * 10^(token_decimals + 9) / interval`.
///
/// Rates so small that less than one smallest-token-unit would settle per
/// accounting cycle are rejected as unroundable rather than silently
/// truncated to a dust stream.
pub fn amount_per_second_from_rate(
    rate: U256,
    token_decimals: u8,
    interval_seconds: u64,
) -> Result<U256, CodecError> {
    if interval_seconds == 0 {
        return Err(CodecError::ZeroInterval);
    }

    let exp = U256::from(token_decimals as u64 + AMT_PER_SEC_EXTRA_DECIMALS as u64);
    let scale = U256::from(10)
        .checked_pow(exp)
        .ok_or(CodecError::ArithmeticOverflow {
            context: "computing the precision scale",
        })?;
    let scaled = rate
        .checked_mul(scale)
        .ok_or(CodecError::ArithmeticOverflow {
            context: "scaling the rate",
        })?;
    let amount = scaled / U256::from(interval_seconds);

    // At least one smallest-token-unit must settle per cycle once the
    // extra precision digits are removed.
    let per_cycle = amount
        .checked_mul(U256::from(CYCLE_SECONDS))
        .ok_or(CodecError::ArithmeticOverflow {
            context: "computing the per-cycle amount",
        })?
        / AMT_PER_SEC_MULTIPLIER;
    if per_cycle.is_zero() {
        return Err(CodecError::UnroundableRate {
            rate: rate.to_string(),
            interval_seconds,
        });
    }

    validate_amount(amount)?;
    Ok(amount)
}
