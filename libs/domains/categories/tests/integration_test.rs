//! Category service against a migrated in-memory SQLite database

use domain_categories::*;
use domain_tasks::{CreateTask, SqlTaskRepository, TaskService};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

struct Fixture {
    _db: TestDatabase,
    categories: CategoryService<SqlCategoryRepository>,
    tasks: TaskService<SqlTaskRepository>,
}

async fn setup() -> Fixture {
    let db = TestDatabase::new().await;
    Fixture {
        categories: CategoryService::new(SqlCategoryRepository::new(db.connection())),
        tasks: TaskService::new(SqlTaskRepository::new(db.connection())),
        _db: db,
    }
}

#[tokio::test]
async fn test_category_crud() {
    let fx = setup().await;
    let builder = TestDataBuilder::from_test_name("test_category_crud");

    let created = fx
        .categories
        .create_category(CreateCategory::named(builder.name("cat", "work")))
        .await
        .unwrap();
    assert_eq!(created.color, "#000000");

    let fetched = assert_some(
        fx.categories.get_category(created.id).await.unwrap(),
        "category",
    );
    assert_eq!(fetched, created);

    let updated = fx
        .categories
        .update_category(
            created.id,
            UpdateCategory {
                color: Some("#FF8800".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.color, "#FF8800");
    assert_eq!(updated.name, created.name);

    assert_eq!(fx.categories.list_categories().await.unwrap().len(), 1);

    assert!(fx.categories.delete_category(created.id).await.unwrap());
    assert!(!fx.categories.delete_category(created.id).await.unwrap());
    assert!(fx.categories.get_category(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_conflict() {
    let fx = setup().await;

    fx.categories
        .create_category(CreateCategory::named("Work"))
        .await
        .unwrap();
    let result = fx
        .categories
        .create_category(CreateCategory::named("Work"))
        .await;
    assert!(matches!(result, Err(CategoryError::DuplicateName(_))));

    let home = fx
        .categories
        .create_category(CreateCategory::named("Home"))
        .await
        .unwrap();
    let result = fx
        .categories
        .update_category(
            home.id,
            UpdateCategory {
                name: Some("Work".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(CategoryError::DuplicateName(_))));
}

#[tokio::test]
async fn test_assign_is_idempotent() {
    let fx = setup().await;

    let category = fx
        .categories
        .create_category(CreateCategory::named("Work"))
        .await
        .unwrap();
    let task = fx
        .tasks
        .create_task(CreateTask::titled("file taxes"))
        .await
        .unwrap();

    assert!(fx.categories.assign_to_task(category.id, task.id).await.unwrap());
    assert!(fx.categories.assign_to_task(category.id, task.id).await.unwrap());

    let tasks = fx
        .categories
        .get_tasks_by_category(category.id)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, task.id);

    assert!(
        fx.categories
            .unassign_from_task(category.id, task.id)
            .await
            .unwrap()
    );
    assert!(
        fx.categories
            .unassign_from_task(category.id, task.id)
            .await
            .unwrap()
    );
    assert!(
        fx.categories
            .get_tasks_by_category(category.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_concurrent_assigns_keep_one_link() {
    let fx = setup().await;

    let category = fx
        .categories
        .create_category(CreateCategory::named("Home"))
        .await
        .unwrap();
    let task = fx
        .tasks
        .create_task(CreateTask::titled("fix sink"))
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        fx.categories.assign_to_task(category.id, task.id),
        fx.categories.assign_to_task(category.id, task.id)
    );
    assert!(a.unwrap());
    assert!(b.unwrap());

    let tasks = fx
        .categories
        .get_tasks_by_category(category.id)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
}

#[tokio::test]
async fn test_assign_requires_both_sides() {
    let fx = setup().await;

    let category = fx
        .categories
        .create_category(CreateCategory::named("Work"))
        .await
        .unwrap();
    let task = fx.tasks.create_task(CreateTask::titled("t")).await.unwrap();

    assert!(!fx.categories.assign_to_task(category.id, 9999).await.unwrap());
    assert!(!fx.categories.assign_to_task(9999, task.id).await.unwrap());
    assert!(!fx.categories.unassign_from_task(9999, task.id).await.unwrap());
}

#[tokio::test]
async fn test_unknown_category_has_no_tasks() {
    let fx = setup().await;
    assert!(fx.categories.get_tasks_by_category(404).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_links_cascade_with_task_and_category() {
    let fx = setup().await;

    let keep = fx
        .categories
        .create_category(CreateCategory::named("Keep"))
        .await
        .unwrap();
    let dropped = fx
        .categories
        .create_category(CreateCategory::named("Drop"))
        .await
        .unwrap();
    let task_a = fx.tasks.create_task(CreateTask::titled("a")).await.unwrap();
    let task_b = fx.tasks.create_task(CreateTask::titled("b")).await.unwrap();

    for category in [keep.id, dropped.id] {
        for task in [task_a.id, task_b.id] {
            fx.categories.assign_to_task(category, task).await.unwrap();
        }
    }

    assert!(fx.tasks.delete_task(task_a.id).await.unwrap());
    let remaining = fx.categories.get_tasks_by_category(keep.id).await.unwrap();
    let ids: Vec<i32> = remaining.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![task_b.id]);

    // the task survives its category
    assert!(fx.categories.delete_category(dropped.id).await.unwrap());
    assert!(fx.tasks.get_task(task_b.id).await.unwrap().is_some());
}
