//! Tag service against a migrated in-memory SQLite database

use domain_tags::*;
use domain_tasks::{CreateTask, SqlTaskRepository, TaskService};
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

async fn setup() -> (
    TestDatabase,
    TagService<SqlTagRepository>,
    TaskService<SqlTaskRepository>,
) {
    let db = TestDatabase::new().await;
    let tags = TagService::new(SqlTagRepository::new(db.connection()));
    let tasks = TaskService::new(SqlTaskRepository::new(db.connection()));
    (db, tags, tasks)
}

#[tokio::test]
async fn test_tag_crud_and_rename() {
    let (_db, tags, _tasks) = setup().await;
    let builder = TestDataBuilder::from_test_name("test_tag_crud_and_rename");

    let tag = tags
        .create_tag(CreateTag::named(builder.name("tag", "urgent")))
        .await
        .unwrap();
    let fetched = assert_some(tags.get_tag(tag.id).await.unwrap(), "tag");
    assert_eq!(fetched, tag);

    let renamed = tags
        .update_tag(
            tag.id,
            UpdateTag {
                name: "blocked".into(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "blocked");

    // renaming to its own name is allowed
    assert!(
        tags.update_tag(
            tag.id,
            UpdateTag {
                name: "blocked".into()
            }
        )
        .await
        .unwrap()
        .is_some()
    );

    assert!(
        tags.update_tag(9999, UpdateTag { name: "x".into() })
            .await
            .unwrap()
            .is_none()
    );

    assert!(tags.delete_tag(tag.id).await.unwrap());
    assert!(tags.list_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_tag_name() {
    let (_db, tags, _tasks) = setup().await;

    tags.create_tag(CreateTag::named("urgent")).await.unwrap();
    let result = tags.create_tag(CreateTag::named("urgent")).await;
    assert!(matches!(result, Err(TagError::DuplicateName(_))));
}

#[tokio::test]
async fn test_tagging_is_idempotent_and_checks_existence() {
    let (_db, tags, tasks) = setup().await;

    let tag = tags.create_tag(CreateTag::named("urgent")).await.unwrap();
    let first = tasks.create_task(CreateTask::titled("one")).await.unwrap();
    let second = tasks.create_task(CreateTask::titled("two")).await.unwrap();

    assert!(tags.assign_to_task(tag.id, first.id).await.unwrap());
    assert!(tags.assign_to_task(tag.id, first.id).await.unwrap());
    assert!(tags.assign_to_task(tag.id, second.id).await.unwrap());

    let tagged = tags.get_tasks_by_tag(tag.id).await.unwrap();
    let ids: Vec<i32> = tagged.iter().map(|t| t.id).collect();
    assert_same_ids(&ids, &[first.id, second.id], "tagged tasks");

    assert!(!tags.assign_to_task(tag.id, 9999).await.unwrap());
    assert!(!tags.unassign_from_task(9999, first.id).await.unwrap());

    assert!(tags.unassign_from_task(tag.id, first.id).await.unwrap());
    assert!(tags.unassign_from_task(tag.id, first.id).await.unwrap());
    assert_eq!(tags.get_tasks_by_tag(tag.id).await.unwrap().len(), 1);

    assert!(tags.get_tasks_by_tag(9999).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_tagging_keeps_one_link() {
    let (_db, tags, tasks) = setup().await;

    let tag = tags.create_tag(CreateTag::named("errand")).await.unwrap();
    let task = tasks.create_task(CreateTask::titled("groceries")).await.unwrap();

    let (a, b) = tokio::join!(
        tags.assign_to_task(tag.id, task.id),
        tags.assign_to_task(tag.id, task.id)
    );
    assert!(a.unwrap());
    assert!(b.unwrap());
    assert_eq!(tags.get_tasks_by_tag(tag.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_deleting_tag_keeps_tasks() {
    let (_db, tags, tasks) = setup().await;

    let tag = tags.create_tag(CreateTag::named("temp")).await.unwrap();
    let task = tasks.create_task(CreateTask::titled("stay")).await.unwrap();
    tags.assign_to_task(tag.id, task.id).await.unwrap();

    assert!(tags.delete_tag(tag.id).await.unwrap());
    assert!(tasks.get_task(task.id).await.unwrap().is_some());
}
