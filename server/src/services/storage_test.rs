use super::*;

fn scratch_root() -> PathBuf {
    std::env::temp_dir().join(format!("recipe-storage-test-{}", uuid::Uuid::new_v4()))
}

// =============================================================================
// FsObjectStore
// =============================================================================

#[tokio::test]
async fn fs_store_put_get_round_trip_creates_directories() {
    let root = scratch_root();
    let store = FsObjectStore::new(&root);

    store.put("recipe-manager/abc-pie.jpg", b"pie bytes").await.unwrap();
    assert_eq!(store.get("recipe-manager/abc-pie.jpg").await.unwrap(), b"pie bytes");
    assert!(root.join("recipe-manager").join("abc-pie.jpg").is_file());

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn fs_store_put_replaces_existing_object() {
    let root = scratch_root();
    let store = FsObjectStore::new(&root);

    store.put("recipe-manager/a.png", b"one").await.unwrap();
    store.put("recipe-manager/a.png", b"two").await.unwrap();
    assert_eq!(store.get("recipe-manager/a.png").await.unwrap(), b"two");

    let mut entries = tokio::fs::read_dir(root.join("recipe-manager")).await.unwrap();
    let mut count = 0;
    while entries.next_entry().await.unwrap().is_some() {
        count += 1;
    }
    assert_eq!(count, 1, "temp files must not be left behind");

    let _ = tokio::fs::remove_dir_all(&root).await;
}

#[tokio::test]
async fn fs_store_missing_object_is_not_found() {
    let store = FsObjectStore::new(scratch_root());
    let err = store.get("recipe-manager/missing.jpg").await.unwrap_err();
    assert!(matches!(err, ObjectStoreError::NotFound(key) if key == "recipe-manager/missing.jpg"));
}

#[tokio::test]
async fn fs_store_delete_is_idempotent() {
    let root = scratch_root();
    let store = FsObjectStore::new(&root);

    store.put("recipe-manager/x.gif", b"x").await.unwrap();
    store.delete("recipe-manager/x.gif").await.unwrap();
    store.delete("recipe-manager/x.gif").await.unwrap();
    assert!(matches!(store.get("recipe-manager/x.gif").await, Err(ObjectStoreError::NotFound(_))));

    let _ = tokio::fs::remove_dir_all(&root).await;
}

// =============================================================================
// MemoryObjectStore
// =============================================================================

#[tokio::test]
async fn memory_store_behaves_like_fs_store() {
    let store = MemoryObjectStore::default();
    store.put("recipe-manager/k", b"v").await.unwrap();
    assert_eq!(store.get("recipe-manager/k").await.unwrap(), b"v");
    store.delete("recipe-manager/k").await.unwrap();
    store.delete("recipe-manager/k").await.unwrap();
    assert!(matches!(store.get("recipe-manager/k").await, Err(ObjectStoreError::NotFound(_))));
}

// =============================================================================
// inline_image_type
// =============================================================================

#[test]
fn raster_images_are_inline() {
    assert_eq!(inline_image_type("recipe-manager/a.JPG"), Some("image/jpeg"));
    assert_eq!(inline_image_type("recipe-manager/a.jpeg"), Some("image/jpeg"));
    assert_eq!(inline_image_type("recipe-manager/a.png"), Some("image/png"));
    assert_eq!(inline_image_type("recipe-manager/a.webp"), Some("image/webp"));
}

#[test]
fn svg_and_unknown_extensions_are_not_inline() {
    assert_eq!(inline_image_type("recipe-manager/logo.svg"), None);
    assert_eq!(inline_image_type("recipe-manager/logo.SVG"), None);
    assert_eq!(inline_image_type("recipe-manager/page.html"), None);
    assert_eq!(inline_image_type("recipe-manager/readme"), None);
    assert_eq!(inline_image_type("recipe-manager/data.bin"), None);
}
