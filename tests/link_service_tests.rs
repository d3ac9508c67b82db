//! LinkService 集成测试

use std::sync::Arc;

use golinks::config::DatabaseConfig;
use golinks::errors::GoLinksError;
use golinks::services::{LinkInput, LinkService};
use golinks::storage::StorageFactory;
use golinks::utils::validation::LinkValidationError;
use tempfile::TempDir;

async fn create_service() -> (TempDir, Arc<LinkService>) {
    let temp_dir = TempDir::new().expect("创建临时目录失败");
    let db_path = temp_dir.path().join("service_test.db");
    let storage = StorageFactory::create(&DatabaseConfig {
        path: db_path.to_string_lossy().to_string(),
    })
    .await
    .expect("创建存储失败");
    (temp_dir, Arc::new(LinkService::new(storage)))
}

#[tokio::test]
async fn test_create_returns_stored_link() {
    let (_dir, service) = create_service().await;

    let link = service
        .create_link(LinkInput::new(" g ", "https://google.com "))
        .await
        .unwrap();
    assert_eq!(link.path, "g");
    assert_eq!(link.url, "https://google.com");

    let resolved = service.resolve("g").await.unwrap();
    assert_eq!(resolved, link);
}

#[tokio::test]
async fn test_invalid_input_never_reaches_storage() {
    let (_dir, service) = create_service().await;

    let err = service
        .create_link(LinkInput::new("go", "https://google.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GoLinksError::Validation(LinkValidationError::ReservedPath(_))
    ));

    let err = service
        .create_link(LinkInput::new("g", "mailto:someone@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, GoLinksError::Validation(_)));

    assert!(service.list_links(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_order_validate_then_exists() {
    let (_dir, service) = create_service().await;

    // 无效输入 + 不存在的 id：先报验证错误
    let err = service
        .update_link(5, LinkInput::new("", "https://x.example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, GoLinksError::Validation(_)));

    // 有效输入 + 不存在的 id：报未找到
    let err = service
        .update_link(5, LinkInput::new("x", "https://x.example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, GoLinksError::LinkNotFound(_)));
}

#[tokio::test]
async fn test_update_to_own_path_is_allowed() {
    let (_dir, service) = create_service().await;
    let link = service
        .create_link(LinkInput::new("docs", "https://docs.example.com"))
        .await
        .unwrap();

    let updated = service
        .update_link(link.id, LinkInput::new("docs", "https://docs.example.com/v2"))
        .await
        .unwrap();
    assert_eq!(updated.id, link.id);
    assert_eq!(
        service.resolve("docs").await.unwrap().url,
        "https://docs.example.com/v2"
    );
}

#[tokio::test]
async fn test_list_with_search() {
    let (_dir, service) = create_service().await;
    for (path, url) in [
        ("docs", "https://docs.example.com"),
        ("jira", "https://tracker.example.com"),
        ("mail", "https://mail.google.com"),
    ] {
        service.create_link(LinkInput::new(path, url)).await.unwrap();
    }

    let all = service.list_links(None).await.unwrap();
    assert_eq!(all.len(), 3);

    let hits = service.list_links(Some("TRACKER")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "jira");

    assert!(service.list_links(Some("nothing")).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let (_dir, service) = create_service().await;
    let err = service.delete_link(1).await.unwrap_err();
    assert!(matches!(err, GoLinksError::LinkNotFound(_)));
    assert_eq!(err.http_status().as_u16(), 404);
}
