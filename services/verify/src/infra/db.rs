use std::sync::Arc;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    sea_query::{Expr, Func, SimpleExpr},
};

use veritag_verify_schema::product_codes;

use crate::domain::repository::CodeRegistry;
use crate::domain::types::{ActivatedCode, ActivationResult, CodeRecord, ProductCode};
use crate::error::VerifyServiceError;

// ── Product code registry ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCodeRegistry {
    pub db: Arc<DatabaseConnection>,
}

impl CodeRegistry for DbCodeRegistry {
    async fn find_by_code(
        &self,
        code: ProductCode,
    ) -> Result<Option<CodeRecord>, VerifyServiceError> {
        let model = product_codes::Entity::find_by_id(code.as_uuid())
            .one(self.db.as_ref())
            .await
            .context("find product code")?;
        Ok(model.map(record_from_model))
    }

    async fn mark_checked(&self, code: ProductCode) -> Result<(), VerifyServiceError> {
        let now = Utc::now();
        // Guarded so a worker with a lagging clock cannot move the check time backwards.
        product_codes::Entity::update_many()
            .col_expr(product_codes::Column::LastCheckedAt, Expr::value(now))
            .filter(product_codes::Column::Code.eq(code.as_uuid()))
            .filter(
                Condition::any()
                    .add(product_codes::Column::LastCheckedAt.is_null())
                    .add(product_codes::Column::LastCheckedAt.lt(now)),
            )
            .exec(self.db.as_ref())
            .await
            .context("mark product code checked")?;
        Ok(())
    }

    async fn try_activate(
        &self,
        code: ProductCode,
    ) -> Result<ActivationResult, VerifyServiceError> {
        let now = Utc::now();
        // Single conditional UPDATE: the `activated_at IS NULL` guard is what serializes
        // concurrent activations. activated_at takes the check time recorded just before,
        // keeping last_checked_at >= activated_at.
        let updated = product_codes::Entity::update_many()
            .col_expr(product_codes::Column::ActivatedAt, checked_at_or(now))
            .col_expr(product_codes::Column::LastCheckedAt, checked_at_or(now))
            .filter(product_codes::Column::Code.eq(code.as_uuid()))
            .filter(product_codes::Column::ActivatedAt.is_null())
            .exec_with_returning(self.db.as_ref())
            .await
            .context("activate product code")?;

        if let Some(model) = updated.into_iter().next() {
            return Ok(ActivationResult::Activated(activated_from_model(model)?));
        }

        let existing = product_codes::Entity::find_by_id(code.as_uuid())
            .one(self.db.as_ref())
            .await
            .context("load activated product code")?;
        match existing {
            Some(model) => Ok(ActivationResult::AlreadyActivated(activated_from_model(
                model,
            )?)),
            None => Ok(ActivationResult::NotFound),
        }
    }
}

/// `COALESCE(last_checked_at, now)`
fn checked_at_or(now: DateTime<Utc>) -> SimpleExpr {
    Func::coalesce([
        Expr::col(product_codes::Column::LastCheckedAt).into(),
        Expr::value(now),
    ])
    .into()
}

fn record_from_model(model: product_codes::Model) -> CodeRecord {
    CodeRecord {
        code: model.code.into(),
        batch_id: model.batch_id,
        activated_at: model.activated_at,
        last_checked_at: model.last_checked_at,
    }
}

fn activated_from_model(model: product_codes::Model) -> Result<ActivatedCode, VerifyServiceError> {
    let code = model.code;
    let activated = record_from_model(model)
        .into_activated()
        .with_context(|| format!("product code {code} is missing activation timestamps"))?;
    Ok(activated)
}
