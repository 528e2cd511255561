//! `cargo run -p migration -- up` applies the taskboard schema to `DATABASE_URL`

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
