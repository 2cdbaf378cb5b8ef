//! Unique identifiers for vector bases
//!
//! Bases are URL-safe base64 without padding, so they never contain the
//! `.` delimiter or the `!` terminator.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use uuid::Uuid;

/// A 128-bit unique identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid(Uuid);

impl Guid {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Base64 encoding of the first `byte_count` bytes, or of all 16 bytes
    /// when `None`. Counts above 16 encode the full value.
    pub fn to_base64(&self, byte_count: Option<usize>) -> String {
        let bytes = self.0.as_bytes();
        let count = byte_count.map_or(bytes.len(), |n| n.min(bytes.len()));
        URL_SAFE_NO_PAD.encode(&bytes[..count])
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for Guid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_lengths() {
        let guid = Guid::new();
        assert_eq!(guid.to_base64(Some(12)).len(), 16);
        assert_eq!(guid.to_base64(None).len(), 22);
        assert_eq!(guid.to_base64(Some(64)).len(), 22);
    }

    #[test]
    fn test_alphabet_is_url_safe() {
        for _ in 0..32 {
            let encoded = Guid::new().to_base64(None);
            assert!(encoded
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    #[test]
    fn test_truncation_is_prefix_stable() {
        let guid = Guid::from_uuid(Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef));
        assert_eq!(guid.to_base64(Some(12)), "ASNFZ4mrze8BI0Vn");
        assert!(guid.to_base64(None).starts_with("ASNFZ4mrze8BI0Vn"));
    }

    #[test]
    fn test_fresh_guids_differ() {
        assert_ne!(Guid::new(), Guid::new());
    }
}
