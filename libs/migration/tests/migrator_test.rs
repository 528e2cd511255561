use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

async fn memory_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1);
    Database::connect(opt).await.unwrap()
}

#[tokio::test]
async fn test_up_creates_all_tables() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    let manager = sea_orm_migration::SchemaManager::new(&db);
    for table in [
        "tasks",
        "categories",
        "task_categories",
        "tags",
        "task_tags",
        "reminders",
    ] {
        assert!(manager.has_table(table).await.unwrap(), "missing {table}");
    }
}

#[tokio::test]
async fn test_down_drops_everything() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    let manager = sea_orm_migration::SchemaManager::new(&db);
    assert!(!manager.has_table("tasks").await.unwrap());
    assert!(!manager.has_table("reminders").await.unwrap());
}

#[tokio::test]
async fn test_defaults_are_applied_by_schema() {
    let db = memory_db().await;
    Migrator::up(&db, None).await.unwrap();

    db.execute_unprepared("INSERT INTO tasks (title) VALUES ('plain')")
        .await
        .unwrap();
    db.execute_unprepared("INSERT INTO categories (name) VALUES ('Work')")
        .await
        .unwrap();

    let task = db
        .query_one_raw(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT priority, status, progress FROM tasks",
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.try_get_by_index::<i32>(0).unwrap(), 3);
    assert_eq!(task.try_get_by_index::<String>(1).unwrap(), "pending");
    assert_eq!(task.try_get_by_index::<i32>(2).unwrap(), 0);

    let category = db
        .query_one_raw(sea_orm::Statement::from_string(
            db.get_database_backend(),
            "SELECT color FROM categories",
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(category.try_get_by_index::<String>(0).unwrap(), "#000000");
}
