//! Voter identities.

use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

const ADDRESS_LEN: usize = 20;
const HRP: &str = "ballot";

/// Opaque 20-byte identity of a ballot participant.
///
/// Printed as Bech32m (`ballot1...`); parsing also takes `0x`-prefixed hex.
/// Identities derived from a key use the first 20 bytes of
/// `blake3(ed25519_pubkey)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn from_public_key(pubkey: &[u8; 32]) -> Self {
        let digest = blake3::hash(pubkey);
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&digest.as_bytes()[..ADDRESS_LEN]);
        Self(out)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    fn parse_bech32(s: &str) -> Result<Self, TypesError> {
        let (hrp, data) =
            bech32::decode(s).map_err(|e| TypesError::Bech32Error(e.to_string()))?;
        if hrp.to_lowercase() != HRP {
            return Err(TypesError::InvalidAddressFormat(format!(
                "unexpected prefix '{}'",
                hrp
            )));
        }
        Self::try_from(data.as_slice())
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = TypesError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        <[u8; ADDRESS_LEN]>::try_from(slice)
            .map(Self)
            .map_err(|_| TypesError::InvalidAddressLength(slice.len()))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            return Self::try_from(hex::decode(digits)?.as_slice());
        }
        let bech32_prefix = s.get(..HRP.len() + 1);
        if bech32_prefix.is_some_and(|p| p.eq_ignore_ascii_case("ballot1")) {
            return Self::parse_bech32(s);
        }
        Err(TypesError::InvalidAddressFormat(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hrp = bech32::Hrp::parse_unchecked(HRP);
        let encoded = bech32::encode::<bech32::Bech32m>(hrp, &self.0).map_err(|_| fmt::Error)?;
        f.write_str(&encoded)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:#x})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bech32_display_parses_back() {
        let addr = Address::from_bytes(std::array::from_fn(|i| (i * 7) as u8));
        let shown = addr.to_string();
        assert!(shown.starts_with("ballot1"));
        assert_eq!(shown.parse::<Address>(), Ok(addr));
    }

    #[test]
    fn test_uppercase_bech32_accepted() {
        let addr = Address::from_bytes([9u8; 20]);
        let upper = addr.to_string().to_uppercase();
        assert!(upper.starts_with("BALLOT1"));
        assert_eq!(upper.parse::<Address>(), Ok(addr));
    }

    #[test]
    fn test_hex_forms() {
        let addr: Address = "0x00000000000000000000000000000000000000ab".parse().unwrap();
        assert_eq!(addr.as_bytes()[19], 0xab);
        assert_eq!(format!("{:#x}", addr), "0x00000000000000000000000000000000000000ab");
        assert_eq!(format!("{:x}", addr), "00000000000000000000000000000000000000ab");
        assert_eq!(format!("{:?}", addr), "Address(0x00000000000000000000000000000000000000ab)");
    }

    #[test]
    fn test_key_derivation() {
        let a = Address::from_public_key(&[42u8; 32]);
        assert!(!a.is_zero());
        assert_eq!(a, Address::from_public_key(&[42u8; 32]));
        assert_ne!(a, Address::from_public_key(&[43u8; 32]));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!("alice".parse::<Address>(), Err(TypesError::InvalidAddressFormat(_))));
        assert_eq!("0x1234".parse::<Address>(), Err(TypesError::InvalidAddressLength(2)));
        assert!(matches!("0xzz".parse::<Address>(), Err(TypesError::InvalidHex(_))));
        assert!(matches!("ballot1qqqq".parse::<Address>(), Err(TypesError::Bech32Error(_))));
    }

    #[test]
    fn test_other_prefix_rejected() {
        let hrp = bech32::Hrp::parse_unchecked("other");
        let foreign = bech32::encode::<bech32::Bech32m>(hrp, &[1u8; 20]).unwrap();
        // Not routed to the bech32 path at all
        assert!(foreign.parse::<Address>().is_err());
        assert!(Address::parse_bech32(&foreign).is_err());
    }

    #[test]
    fn test_default_is_zero() {
        assert!(Address::default().is_zero());
        assert!(Address::from_bytes([0u8; 20]) < Address::from_bytes([1u8; 20]));
    }
}
