use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_tasks::Tasks;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminders::Table)
                    .if_not_exists()
                    .col(pk_auto(Reminders::Id))
                    .col(integer(Reminders::TaskId))
                    .col(timestamp_with_time_zone(Reminders::RemindAt))
                    .col(boolean(Reminders::IsNotified).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reminders_task_id")
                            .from(Reminders::Table, Reminders::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the pending-reminder poll
        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_pending")
                    .table(Reminders::Table)
                    .col(Reminders::IsNotified)
                    .col(Reminders::RemindAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminders_task_id")
                    .table(Reminders::Table)
                    .col(Reminders::TaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reminders::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Reminders {
    Table,
    Id,
    TaskId,
    RemindAt,
    IsNotified,
}
