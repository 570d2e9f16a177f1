//! Opaque document identifiers.
//!
//! # Responsibility
//! - Validate identifier syntax before any lookup touches storage.
//! - Generate new identifiers for created records.
//!
//! # Invariants
//! - A `DocId` is always exactly 24 lowercase hex characters.
//! - Validation is purely syntactic; existence is never checked here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Write};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

static DOC_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid doc id regex"));

/// Returns whether `value` is a well-formed document identifier.
pub fn is_valid_id(value: &str) -> bool {
    DOC_ID_RE.is_match(value)
}

/// Validated identifier of a stored note, folder or tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Parses a caller-supplied identifier, normalizing hex case.
    ///
    /// Returns `None` when the value is not a well-formed identifier.
    pub fn parse(value: &str) -> Option<Self> {
        if is_valid_id(value) {
            Some(Self(value.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Generates a new identifier.
    ///
    /// Layout: 4-byte big-endian unix seconds followed by 8 random bytes, so
    /// ids sort roughly by creation time.
    pub fn generate() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32)
            .unwrap_or(0);
        let random = Uuid::new_v4();

        let mut encoded = String::with_capacity(24);
        for byte in seconds
            .to_be_bytes()
            .iter()
            .chain(random.as_bytes()[..8].iter())
        {
            let _ = write!(encoded, "{byte:02x}");
        }
        Self(encoded)
    }

    /// Wraps an identifier read back from storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
