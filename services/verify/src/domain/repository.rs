#![allow(async_fn_in_trait)]

use crate::domain::types::{ActivationResult, CodeRecord, ProductCode};
use crate::error::VerifyServiceError;

/// Registry of issued product codes and their verification state.
///
/// Every storage failure is reported as `VerifyServiceError`; "not found" is
/// never an error.
pub trait CodeRegistry: Send + Sync {
    /// Exact-match lookup without side effects.
    async fn find_by_code(&self, code: ProductCode)
    -> Result<Option<CodeRecord>, VerifyServiceError>;

    /// Record a check at the current time. Affects nothing if the code is absent
    /// or a later check time is already stored.
    async fn mark_checked(&self, code: ProductCode) -> Result<(), VerifyServiceError>;

    /// Set `activated_at` only if it is unset, as one atomic storage operation.
    /// Of concurrent callers on the same unactivated code exactly one gets `Activated`.
    async fn try_activate(&self, code: ProductCode)
    -> Result<ActivationResult, VerifyServiceError>;
}
