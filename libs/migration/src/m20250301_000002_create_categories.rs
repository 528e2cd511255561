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
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(pk_auto(Categories::Id))
                    .col(string_len_uniq(Categories::Name, 100))
                    .col(string_len(Categories::Color, 7).default("#000000"))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TaskCategories::Table)
                    .if_not_exists()
                    .col(integer(TaskCategories::TaskId))
                    .col(integer(TaskCategories::CategoryId))
                    .primary_key(
                        Index::create()
                            .col(TaskCategories::TaskId)
                            .col(TaskCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_categories_task_id")
                            .from(TaskCategories::Table, TaskCategories::TaskId)
                            .to(Tasks::Table, Tasks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_task_categories_category_id")
                            .from(TaskCategories::Table, TaskCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_task_categories_category_id")
                    .table(TaskCategories::Table)
                    .col(TaskCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TaskCategories::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Color,
}

#[derive(DeriveIden)]
enum TaskCategories {
    Table,
    TaskId,
    CategoryId,
}
