use tracing::{debug, error, info};

use crate::domain::repository::CodeRegistry;
use crate::domain::types::{ActivationResult, ProductCode};
use crate::domain::verdict::Verdict;
use crate::error::VerifyServiceError;
use crate::usecase::extract::extract_with_strategy;

pub struct VerifyCodeUseCase<R: CodeRegistry> {
    pub registry: R,
}

impl<R: CodeRegistry> VerifyCodeUseCase<R> {
    /// Verify a raw scanner input (bare code, URL, or text with a `code=` fragment).
    ///
    /// Inputs without an extractable code never reach the registry.
    pub async fn execute(&self, raw: &str) -> Verdict {
        let Some((code, strategy)) = extract_with_strategy(raw) else {
            debug!(input_len = raw.len(), "no product code in input");
            return Verdict::Invalid;
        };
        debug!(%code, ?strategy, "extracted product code");
        self.verify_code(code).await
    }

    /// Verify an already canonical code.
    pub async fn verify_code(&self, code: ProductCode) -> Verdict {
        match self.transition(code).await {
            Ok(verdict) => verdict,
            Err(e) => {
                error!(%code, error = ?e, kind = e.kind(), "verification failed");
                Verdict::SystemError
            }
        }
    }

    async fn transition(&self, code: ProductCode) -> Result<Verdict, VerifyServiceError> {
        // 1. Existence check → Unknown if absent
        if self.registry.find_by_code(code).await?.is_none() {
            return Ok(Verdict::Unknown);
        }

        // 2. Every lookup that finds a record is recorded, activated or not
        self.registry.mark_checked(code).await?;

        // 3. Conditional activation decides between first use and repeat
        let verdict = match self.registry.try_activate(code).await? {
            ActivationResult::Activated(activated) => {
                info!(%code, batch_id = %activated.batch_id, "product code activated");
                Verdict::FirstActivation(activated)
            }
            ActivationResult::AlreadyActivated(activated) => Verdict::AlreadyUsed(activated),
            ActivationResult::NotFound => Verdict::Unknown,
        };
        Ok(verdict)
    }
}
