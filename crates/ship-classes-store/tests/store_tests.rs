use std::sync::Arc;

use ship_classes::{ClassStore, NullSink, StoreError};
use ship_classes_store::SqliteClassStore;

fn create_store() -> SqliteClassStore {
    SqliteClassStore::open_in_memory(Arc::new(NullSink)).unwrap()
}

#[tokio::test]
async fn created_classes_are_listed_by_slug() {
    let store = create_store();

    let tee = store
        .create("Acme - Tee", "Tee class", "printify-7-abc")
        .await
        .unwrap();
    store
        .create("Acme - Mug", "Mug class", "printify-7-def")
        .await
        .unwrap();

    let classes = store.list().await.unwrap();
    assert_eq!(classes.len(), 2);

    let stored = classes.get("printify-7-abc").unwrap();
    assert_eq!(stored.id, tee.id);
    assert_eq!(stored.name, "Acme - Tee");
    assert_eq!(stored.description, "Tee class");
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let store = create_store();
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_slug_is_rejected() {
    let store = create_store();

    store
        .create("Acme - Tee", "first", "printify-7-abc")
        .await
        .unwrap();
    let error = store
        .create("Other Name", "second", "printify-7-abc")
        .await
        .unwrap_err();

    assert!(matches!(error, StoreError::DuplicateSlug(slug) if slug == "printify-7-abc"));
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn update_rewrites_fields_in_place() {
    let store = create_store();

    let created = store
        .create("Old Name", "old description", "printify-7-abc")
        .await
        .unwrap();
    let updated = store
        .update(created.id, "New Name", "new description", "printify-7-abc")
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.description, "new description");

    let classes = store.list().await.unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes.get("printify-7-abc").unwrap().name, "New Name");
}

#[tokio::test]
async fn update_of_missing_id_is_not_found() {
    let store = create_store();
    let error = store
        .update(999, "Name", "description", "slug")
        .await
        .unwrap_err();
    assert!(matches!(error, StoreError::NotFound(999)));
}

#[tokio::test]
async fn delete_removes_the_record() {
    let store = create_store();

    let created = store
        .create("Acme - Tee", "desc", "printify-7-abc")
        .await
        .unwrap();
    store.delete(created.id).await.unwrap();

    assert!(store.list().await.unwrap().is_empty());
    assert!(matches!(
        store.delete(created.id).await.unwrap_err(),
        StoreError::NotFound(_)
    ));
}

#[tokio::test]
async fn ids_keep_increasing_after_delete() {
    let store = create_store();

    let first = store.create("A", "", "a").await.unwrap();
    store.delete(first.id).await.unwrap();
    let second = store.create("B", "", "b").await.unwrap();

    assert!(second.id > first.id);
}
