use serde::Serialize;

use crate::domain::types::ActivatedCode;

/// Outcome of one verification attempt. Every request yields exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No canonical code could be extracted from the input.
    Invalid,
    /// Well-formed code that is not in the registry.
    Unknown,
    FirstActivation(ActivatedCode),
    AlreadyUsed(ActivatedCode),
    /// Storage failed; says nothing about the product.
    SystemError,
}

/// Wire name of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    Valid,
    Used,
    Invalid,
    Unknown,
    Error,
}

impl VerdictStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Used => "used",
            Self::Invalid => "invalid",
            Self::Unknown => "unknown",
            Self::Error => "error",
        }
    }
}

impl Verdict {
    pub fn status(&self) -> VerdictStatus {
        match self {
            Self::FirstActivation(_) => VerdictStatus::Valid,
            Self::AlreadyUsed(_) => VerdictStatus::Used,
            Self::Invalid => VerdictStatus::Invalid,
            Self::Unknown => VerdictStatus::Unknown,
            Self::SystemError => VerdictStatus::Error,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::FirstActivation(_) => {
                "Genuine product. This code has been verified and is now activated."
            }
            Self::AlreadyUsed(_) => {
                "This code was already used. It was activated by an earlier verification."
            }
            Self::Invalid => "No valid product code was found. Please scan the code again.",
            Self::Unknown => "This code is not registered. The product could not be verified.",
            Self::SystemError => {
                "Verification is temporarily unavailable. Please try again later."
            }
        }
    }

    pub fn activated(&self) -> Option<&ActivatedCode> {
        match self {
            Self::FirstActivation(code) | Self::AlreadyUsed(code) => Some(code),
            Self::Invalid | Self::Unknown | Self::SystemError => None,
        }
    }
}
