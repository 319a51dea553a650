//! Driver-tagged account identifiers.
//!
//! An account identifier is an opaque 256-bit value whose top 32 bits
//! name the driver that derived it and whose remaining 224 bits are
//! driver-specific payload:
//!
//! ```text
//! | driverTag (32b) | payload (224b)                                  |
//!   [255:224]         [223:0]
//! ```
//!
//! Two drivers embed recoverable payloads. The address driver stores a
//! 160-bit address in the low bits with the 64 bits above it reserved as
//! zero. The repo driver's linked-identity sub-pattern stores a short
//! printable identifier as UTF-8, right-padded with zero bytes, in the
//! low 216 bits.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};

use crate::error::CodecError;

/// Which sub-protocol derived an account identifier.
///
/// The discriminant is the exact 32-bit tag the ledger uses; dispatch on
/// account-id kind always matches exhaustively over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum DriverTag {
    Address = 0,
    Nft = 1,
    ImmutableSplits = 2,
    Repo = 3,
    RepoSubAccount = 4,
}

impl DriverTag {
    /// The 32-bit encoding stored in an account id's top bits.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for DriverTag {
    type Error = CodecError;

    fn try_from(tag: u32) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(DriverTag::Address),
            1 => Ok(DriverTag::Nft),
            2 => Ok(DriverTag::ImmutableSplits),
            3 => Ok(DriverTag::Repo),
            4 => Ok(DriverTag::RepoSubAccount),
            other => Err(CodecError::UnknownDriver { tag: other }),
        }
    }
}

impl fmt::Display for DriverTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DriverTag::Address => "address",
            DriverTag::Nft => "nft",
            DriverTag::ImmutableSplits => "immutable-splits",
            DriverTag::Repo => "repo",
            DriverTag::RepoSubAccount => "repo-sub-account",
        };
        write!(f, "{s}")
    }
}

const DRIVER_SHIFT: usize = 224;

/// Bits [223:160] — must be zero in an address-driver id.
const RESERVED_MASK: U256 = U256::from_limbs([0, 0, 0xFFFF_FFFF_0000_0000, 0x0000_0000_FFFF_FFFF]);

/// Bits [159:0] — the embedded address.
const ADDRESS_MASK: U256 = U256::from_limbs([u64::MAX, u64::MAX, 0xFFFF_FFFF, 0]);

/// Bits [215:0] — the embedded 27-byte text payload.
const TEXT_MASK: U256 = U256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0x00FF_FFFF]);

/// A 256-bit account identifier, self-describing its driver in its top
/// 32 bits. Ordered and hashable so receiver lists can be sorted and
/// deduplicated by identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(U256);

impl AccountId {
    /// Wrap a raw 256-bit value without interpreting it.
    pub const fn new(raw: U256) -> Self {
        Self(raw)
    }

    /// The raw 256-bit value.
    pub const fn raw(self) -> U256 {
        self.0
    }

    /// Build the address-driver id for an address: tag 0, reserved bits
    /// zero, address in the low 160 bits.
    pub fn from_address(address: Address) -> Self {
        Self(U256::from_be_slice(address.as_slice()))
    }

    /// The driver that derived this id, from the top 32 bits.
    pub fn driver(self) -> Result<DriverTag, CodecError> {
        DriverTag::try_from((self.0 >> DRIVER_SHIFT).to::<u32>())
    }

    /// Extract the embedded address of an address-driver id.
    ///
    /// Fails unless the driver tag is `address` and the 64 reserved bits
    /// above the address are all zero.
    pub fn to_address(self) -> Result<Address, CodecError> {
        match self.driver()? {
            DriverTag::Address => {}
            actual => {
                return Err(CodecError::WrongDriver {
                    expected: DriverTag::Address,
                    actual,
                })
            }
        }
        if !(self.0 & RESERVED_MASK).is_zero() {
            return Err(CodecError::ReservedBitsNonZero {
                account_id: self.to_string(),
            });
        }
        let bytes = (self.0 & ADDRESS_MASK).to_be_bytes::<32>();
        Ok(Address::from_slice(&bytes[12..]))
    }

    /// Try to read the low 216 bits as an embedded text identifier.
    ///
    /// The payload is rendered as 27 big-endian bytes, trailing zero
    /// padding is trimmed, and the result must decode as UTF-8 and match
    /// the checksummed fixed-length numeric-identifier pattern. A
    /// non-match returns `None` rather than an error — callers use this
    /// to probabilistically classify an id, not to validate it.
    pub fn text_identifier(self) -> Option<String> {
        let bytes = (self.0 & TEXT_MASK).to_be_bytes::<32>();
        let payload = &bytes[5..];
        let end = payload.iter().rposition(|&b| b != 0)? + 1;
        let text = std::str::from_utf8(&payload[..end]).ok()?;
        is_checksummed_identifier(text).then(|| text.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl FromStr for AccountId {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, CodecError> {
        U256::from_str(s)
            .map(Self)
            .map_err(|e| CodecError::InvalidAccountId(e.to_string()))
    }
}

impl From<U256> for AccountId {
    fn from(raw: U256) -> Self {
        Self(raw)
    }
}

/// Check the fixed-length dashed numeric-identifier pattern with its
/// trailing ISO 7064 mod 11-2 check digit: `dddd-dddd-dddd-dddC`, where
/// `C` is a digit or `X`, computed over the 15 leading digits.
fn is_checksummed_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 19 {
        return false;
    }

    let mut payload = [0u8; 16];
    let mut n = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if i == 4 || i == 9 || i == 14 {
            if b != b'-' {
                return false;
            }
            continue;
        }
        payload[n] = b;
        n += 1;
    }

    let mut total: u32 = 0;
    for &b in &payload[..15] {
        if !b.is_ascii_digit() {
            return false;
        }
        total = (total + u32::from(b - b'0')) * 2;
    }
    let check = (12 - total % 11) % 11;
    let expected = if check == 10 { b'X' } else { b'0' + check as u8 };
    payload[15] == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: u32, payload: U256) -> AccountId {
        AccountId::new((U256::from(tag) << 224) | payload)
    }

    #[test]
    fn driver_tag_roundtrip() {
        for tag in [
            DriverTag::Address,
            DriverTag::Nft,
            DriverTag::ImmutableSplits,
            DriverTag::Repo,
            DriverTag::RepoSubAccount,
        ] {
            assert_eq!(DriverTag::try_from(tag.as_u32()).unwrap(), tag);
        }
        assert!(matches!(
            DriverTag::try_from(5),
            Err(CodecError::UnknownDriver { tag: 5 })
        ));
    }

    #[test]
    fn unknown_driver_in_account_id() {
        let id = tagged(7, U256::ZERO);
        assert!(matches!(id.driver(), Err(CodecError::UnknownDriver { tag: 7 })));
    }

    #[test]
    fn address_roundtrip() {
        let address: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let id = AccountId::from_address(address);
        assert_eq!(id.driver().unwrap(), DriverTag::Address);
        assert_eq!(id.to_address().unwrap(), address);
    }

    #[test]
    fn reserved_bits_must_be_zero() {
        let address: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let raw = AccountId::from_address(address).raw();
        for bit in [160usize, 191, 223] {
            let id = AccountId::new(raw | (U256::from(1u8) << bit));
            assert!(matches!(
                id.to_address(),
                Err(CodecError::ReservedBitsNonZero { .. })
            ));
        }
    }

    #[test]
    fn to_address_requires_address_driver() {
        let id = tagged(DriverTag::Nft.as_u32(), U256::from(42u8));
        assert!(matches!(
            id.to_address(),
            Err(CodecError::WrongDriver {
                expected: DriverTag::Address,
                actual: DriverTag::Nft,
            })
        ));
    }

    fn text_id(tag: DriverTag, text: &str) -> AccountId {
        // UTF-8 bytes right-padded with zeros into the low 27 bytes.
        let mut bytes = [0u8; 32];
        bytes[5..5 + text.len()].copy_from_slice(text.as_bytes());
        tagged(tag.as_u32(), U256::from_be_bytes(bytes))
    }

    #[test]
    fn text_identifier_with_valid_checksum() {
        let id = text_id(DriverTag::Repo, "0000-0002-1825-0097");
        assert_eq!(id.text_identifier().as_deref(), Some("0000-0002-1825-0097"));
    }

    #[test]
    fn text_identifier_with_x_check_digit() {
        let id = text_id(DriverTag::Repo, "0000-0002-1694-233X");
        assert_eq!(id.text_identifier().as_deref(), Some("0000-0002-1694-233X"));
    }

    #[test]
    fn text_identifier_rejects_bad_checksum() {
        assert_eq!(
            text_id(DriverTag::Repo, "0000-0002-1825-0098").text_identifier(),
            None
        );
    }

    #[test]
    fn text_identifier_rejects_malformed() {
        for bad in ["", "not-an-identifier", "0000000218250097", "0000-0002-1825-009"] {
            assert_eq!(text_id(DriverTag::Repo, bad).text_identifier(), None);
        }
        // All-zero payload trims to nothing.
        assert_eq!(tagged(3, U256::ZERO).text_identifier(), None);
    }

    #[test]
    fn account_id_display_parse_roundtrip() {
        let id = tagged(3, U256::from(12345u32));
        let parsed: AccountId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn account_ids_order_by_raw_value() {
        let a = AccountId::new(U256::from(2u8));
        let b = AccountId::new(U256::from(5u8));
        assert!(a < b);
    }
}
