use sea_orm_migration::prelude::*;

use veritag_verify_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
