use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductCodes::Code)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductCodes::BatchId).string().not_null())
                    .col(ColumnDef::new(ProductCodes::ActivatedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ProductCodes::LastCheckedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // Batch lookups are done by the provisioning side (recalls, reporting).
        manager
            .create_index(
                Index::create()
                    .table(ProductCodes::Table)
                    .col(ProductCodes::BatchId)
                    .name("idx_product_codes_batch_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProductCodes {
    Table,
    Code,
    BatchId,
    ActivatedAt,
    LastCheckedAt,
}
