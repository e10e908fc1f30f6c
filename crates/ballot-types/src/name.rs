use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// Fixed-width proposal label.
///
/// Stored as 32 bytes: UTF-8 text followed by zero padding. The last byte
/// is always zero, so the text holds at most 31 bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    pub const LEN: usize = 32;
    /// Longest label that still leaves room for the terminator.
    pub const MAX_TEXT_LEN: usize = Self::LEN - 1;

    /// Encode a label, rejecting anything longer than 31 bytes.
    ///
    /// A zero byte would end the label early, so labels may not contain one.
    pub fn new(text: &str) -> Result<Self, TypesError> {
        let raw = text.as_bytes();
        if raw.len() > Self::MAX_TEXT_LEN {
            return Err(TypesError::NameTooLong {
                max: Self::MAX_TEXT_LEN,
                actual: raw.len(),
            });
        }
        if let Some(pos) = raw.iter().position(|&b| b == 0) {
            return Err(TypesError::NulInName(pos));
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    /// Decode a 32-byte tag. The tag must be null-terminated and the text
    /// before the first zero byte must be valid UTF-8.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, TypesError> {
        if bytes[Self::LEN - 1] != 0 {
            return Err(TypesError::UnterminatedName);
        }
        let end = text_end(&bytes);
        std::str::from_utf8(&bytes[..end]).map_err(|_| TypesError::InvalidNameEncoding)?;
        // Normalize anything after the terminator.
        let mut normalized = [0u8; 32];
        normalized[..end].copy_from_slice(&bytes[..end]);
        Ok(Self(normalized))
    }

    /// Decode from a `0x`-prefixed 64-digit hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(digits)?;
        let bytes: [u8; 32] = raw
            .as_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidNameLength(raw.len()))?;
        Self::from_bytes(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The label text without padding.
    pub fn as_str(&self) -> &str {
        let end = text_end(&self.0);
        // Both constructors validate the prefix as UTF-8.
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// Full 32-byte encoding as `0x` hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

fn text_end(bytes: &[u8; 32]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({:?})", self.as_str())
    }
}

impl FromStr for ProposalName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for ProposalName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ProposalName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
