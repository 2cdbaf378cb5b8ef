//! The correlation vector value type
//!
//! An immutable base followed by one atomic extension counter. The counter is
//! the only shared mutable state; everything else is fixed at construction.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::version::CorrelationVectorVersion;
use super::{DELIMITER, MAX_EXTENSION, TERMINATOR};
use crate::guid::Guid;

/// A hierarchical identifier correlating events across service calls.
///
/// Serialized as `base.extension`, where `base` may itself contain earlier
/// dotted stages. A trailing `!` marks a terminated vector that must not be
/// derived from or incremented.
///
/// Any number of threads may share one instance and call
/// [`increment`](Self::increment) concurrently.
#[derive(Debug)]
pub struct CorrelationVector {
    base: String,
    extension: AtomicU32,
    version: CorrelationVectorVersion,
    immutable: bool,
}

impl CorrelationVector {
    /// Create a new V1 root vector.
    ///
    /// Use this only when the inbound message carried no vector.
    pub fn new() -> Self {
        Self::with_version(CorrelationVectorVersion::V1)
    }

    /// Create a new root vector of the given version.
    pub fn with_version(version: CorrelationVectorVersion) -> Self {
        let base = Guid::new().to_base64(Some(version.uuid_bytes()));
        Self::from_parts(base, 0, version)
    }

    /// Create a new V2 root vector whose base is derived from `uuid`.
    pub fn from_uuid(uuid: Uuid) -> Self {
        let mut base = Guid::from_uuid(uuid).to_base64(None);
        base.truncate(CorrelationVectorVersion::V2.base_length());
        Self::from_parts(base, 0, CorrelationVectorVersion::V2)
    }

    pub(crate) fn from_parts(base: String, extension: u32, version: CorrelationVectorVersion) -> Self {
        Self {
            base,
            extension: AtomicU32::new(extension),
            version,
            immutable: false,
        }
    }

    pub(crate) fn terminated(base: String, extension: u32, version: CorrelationVectorVersion) -> Self {
        Self {
            immutable: true,
            ..Self::from_parts(base, extension, version)
        }
    }

    /// Serialized value: `base.extension`, plus `!` when terminated.
    pub fn value(&self) -> String {
        self.render(self.extension())
    }

    /// Advance the extension by one and return the new value.
    ///
    /// Saturates instead of advancing when the next value would exceed the
    /// version's maximum length or the extension ceiling; the unchanged
    /// current value is returned. Terminated vectors never advance.
    ///
    /// Lock-free: concurrent callers each observe a distinct new value.
    pub fn increment(&self) -> String {
        if self.immutable {
            return self.value();
        }

        let mut snapshot = self.extension.load(Ordering::Acquire);
        loop {
            if snapshot >= MAX_EXTENSION {
                return self.render(snapshot);
            }
            let next = snapshot + 1;
            if self.is_oversized(next) {
                return self.render(snapshot);
            }
            match self.extension.compare_exchange_weak(
                snapshot,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return self.render(next),
                Err(current) => snapshot = current,
            }
        }
    }

    /// True when `increment` can no longer advance.
    ///
    /// A vector whose base already fills the version's length budget, such
    /// as one extended from a maximum-length value, is saturated from the
    /// start.
    pub fn is_saturated(&self) -> bool {
        let current = self.extension();
        self.immutable || current >= MAX_EXTENSION || self.is_oversized(current + 1)
    }

    pub fn version(&self) -> CorrelationVectorVersion {
        self.version
    }

    /// Everything before the final extension.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Current extension snapshot.
    pub fn extension(&self) -> u32 {
        self.extension.load(Ordering::Acquire)
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    fn is_oversized(&self, extension: u32) -> bool {
        self.base.len() + 1 + digit_count(extension) > self.version.max_length()
    }

    fn render(&self, extension: u32) -> String {
        let mut value = format!("{}{}{}", self.base, DELIMITER, extension);
        if self.immutable {
            value.push(TERMINATOR);
        }
        value
    }
}

fn digit_count(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

impl Default for CorrelationVector {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CorrelationVector {
    /// Independent copy holding a snapshot of the current extension.
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            extension: AtomicU32::new(self.extension()),
            version: self.version,
            immutable: self.immutable,
        }
    }
}

impl PartialEq for CorrelationVector {
    /// Equal when bases match and current extensions match. The two
    /// extensions are read independently, not as one atomic pair.
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.extension() == other.extension()
    }
}

impl Eq for CorrelationVector {}

impl fmt::Display for CorrelationVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for CorrelationVector {
    type Err = Infallible;

    /// Lenient: malformed input yields a fresh root vector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for CorrelationVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value())
    }
}

impl<'de> Deserialize<'de> for CorrelationVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
