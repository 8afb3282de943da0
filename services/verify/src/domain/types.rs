use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Length of a canonical code: 32 hex digits in 8-4-4-4-12 groups.
pub const CODE_LEN: usize = 36;

/// Canonical product authenticity code printed on packaging.
///
/// Comparison is case-insensitive because the value is held as a UUID;
/// `Display` always renders the lowercase hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductCode(Uuid);

impl ProductCode {
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a canonical product code")]
pub struct InvalidProductCode;

impl FromStr for ProductCode {
    type Err = InvalidProductCode;

    /// Accepts only the 36-character hyphenated form (any letter case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != CODE_LEN {
            return Err(InvalidProductCode);
        }
        Uuid::try_parse(s).map(Self).map_err(|_| InvalidProductCode)
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl From<Uuid> for ProductCode {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Registry entry for one issued code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub code: ProductCode,
    pub batch_id: String,
    pub activated_at: Option<DateTime<Utc>>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

impl CodeRecord {
    /// `Some` once the code has been activated and checked at least once.
    pub fn into_activated(self) -> Option<ActivatedCode> {
        Some(ActivatedCode {
            code: self.code,
            batch_id: self.batch_id,
            activated_at: self.activated_at?,
            last_checked_at: self.last_checked_at?,
        })
    }
}

/// View of an activated code; both timestamps are guaranteed present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedCode {
    pub code: ProductCode,
    pub batch_id: String,
    pub activated_at: DateTime<Utc>,
    pub last_checked_at: DateTime<Utc>,
}

/// Outcome of a conditional activation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationResult {
    /// This call flipped the code from unactivated to activated.
    Activated(ActivatedCode),
    /// The code had been activated before this call.
    AlreadyActivated(ActivatedCode),
    NotFound,
}
