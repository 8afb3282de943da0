use sea_orm::entity::prelude::*;

/// Issued product authenticity code.
/// Rows are provisioned externally; the verify service only updates the two timestamps.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: Uuid,
    pub batch_id: String,
    /// First successful verification. Set once, never reset.
    pub activated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub last_checked_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
