use super::*;
use crate::state::test_helpers;

// =============================================================================
// status mapping
// =============================================================================

#[test]
fn storage_denials_map_to_statuses() {
    assert_eq!(storage_denied_to_status(StorageDenied::InvalidKey("..".to_owned())), StatusCode::BAD_REQUEST);
    assert_eq!(storage_denied_to_status(StorageDenied::Undeclared("other/x".to_owned())), StatusCode::FORBIDDEN);
    assert_eq!(
        storage_denied_to_status(StorageDenied::Unauthenticated {
            key: "recipe-manager/x".to_owned(),
            action: StorageAction::Write,
        }),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        storage_denied_to_status(StorageDenied::Forbidden {
            key: "recipe-manager/x".to_owned(),
            action: StorageAction::Delete,
        }),
        StatusCode::FORBIDDEN
    );
}

#[test]
fn missing_object_is_not_found() {
    let err = ObjectStoreError::NotFound("recipe-manager/x".to_owned());
    assert_eq!(object_store_error_to_status(err), StatusCode::NOT_FOUND);
}

// =============================================================================
// HTTP
// =============================================================================

#[tokio::test]
async fn guest_can_read_recipe_images() {
    let state = test_helpers::test_app_state();
    state.objects.put("recipe-manager/abc-pie.png", b"png bytes").await.unwrap();
    let base = test_helpers::spawn_api(state).await;

    let res = reqwest::get(format!("{base}/api/storage/recipe-manager/abc-pie.png")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert_eq!(
        res.headers().get(reqwest::header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    assert_eq!(
        res.headers().get(reqwest::header::X_CONTENT_TYPE_OPTIONS).and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
    assert!(res.headers().get(reqwest::header::CONTENT_DISPOSITION).is_none());
    assert_eq!(res.bytes().await.unwrap().as_ref(), b"png bytes");
}

#[tokio::test]
async fn svg_objects_are_served_as_attachments() {
    let state = test_helpers::test_app_state();
    state
        .objects
        .put("recipe-manager/x.svg", b"<svg><script>alert(1)</script></svg>")
        .await
        .unwrap();
    let base = test_helpers::spawn_api(state).await;

    let res = reqwest::get(format!("{base}/api/storage/recipe-manager/x.svg")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let header = |name: reqwest::header::HeaderName| {
        res.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };
    assert_eq!(header(reqwest::header::CONTENT_TYPE).as_deref(), Some("application/octet-stream"));
    assert_eq!(header(reqwest::header::CONTENT_DISPOSITION).as_deref(), Some("attachment"));
    assert_eq!(header(reqwest::header::X_CONTENT_TYPE_OPTIONS).as_deref(), Some("nosniff"));
}

#[tokio::test]
async fn guest_read_of_missing_object_is_not_found() {
    let base = test_helpers::spawn_api(test_helpers::test_app_state()).await;
    let res = reqwest::get(format!("{base}/api/storage/recipe-manager/nothing.jpg")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn guest_cannot_write_or_delete() {
    let state = test_helpers::test_app_state();
    state.objects.put("recipe-manager/keep.jpg", b"keep").await.unwrap();
    let objects = state.objects.clone();
    let base = test_helpers::spawn_api(state).await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{base}/api/storage/recipe-manager/new.jpg"))
        .body(b"data".to_vec())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);

    let res = client
        .delete(format!("{base}/api/storage/recipe-manager/keep.jpg"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);

    assert_eq!(objects.get("recipe-manager/keep.jpg").await.unwrap(), b"keep");
    assert!(objects.get("recipe-manager/new.jpg").await.is_err());
}

#[tokio::test]
async fn keys_outside_declared_prefix_are_forbidden() {
    let base = test_helpers::spawn_api(test_helpers::test_app_state()).await;
    let res = reqwest::get(format!("{base}/api/storage/other/secret.txt")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_keys_are_bad_requests() {
    let base = test_helpers::spawn_api(test_helpers::test_app_state()).await;
    let res = reqwest::get(format!("{base}/api/storage/recipe-manager/a%5Cb.jpg")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
}
