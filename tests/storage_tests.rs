//! SQLite 存储层集成测试

use std::sync::Arc;

use golinks::config::DatabaseConfig;
use golinks::errors::GoLinksError;
use golinks::storage::{SeaOrmStorage, StorageFactory};
use tempfile::TempDir;

// =============================================================================
// 测试辅助
// =============================================================================

async fn create_storage() -> (TempDir, Arc<SeaOrmStorage>) {
    let temp_dir = TempDir::new().expect("创建临时目录失败");
    let db_path = temp_dir.path().join("storage_test.db");
    let storage = StorageFactory::create(&DatabaseConfig {
        path: db_path.to_string_lossy().to_string(),
    })
    .await
    .expect("创建存储失败");
    (temp_dir, storage)
}

// =============================================================================
// 基本 CRUD
// =============================================================================

#[tokio::test]
async fn test_create_and_lookup() {
    let (_dir, storage) = create_storage().await;

    let id = storage.create("g", "https://google.com").await.unwrap();
    assert!(id > 0);

    let link = storage.get_by_path("g").await.unwrap();
    assert_eq!(link.id, id);
    assert_eq!(link.url, "https://google.com");

    let by_id = storage.get_by_id(id).await.unwrap();
    assert_eq!(by_id, link);
    assert!(storage.exists(id).await.unwrap());
    assert_eq!(storage.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_lookup_is_case_sensitive() {
    let (_dir, storage) = create_storage().await;
    storage.create("docs", "https://docs.example.com").await.unwrap();

    let result = storage.get_by_path("DOCS").await;
    assert!(matches!(result, Err(GoLinksError::LinkNotFound(_))));
}

#[tokio::test]
async fn test_missing_rows_are_not_found() {
    let (_dir, storage) = create_storage().await;

    assert!(matches!(
        storage.get_by_path("nothing").await,
        Err(GoLinksError::LinkNotFound(_))
    ));
    assert!(matches!(
        storage.get_by_id(42).await,
        Err(GoLinksError::LinkNotFound(_))
    ));
    assert!(!storage.exists(42).await.unwrap());
    assert!(matches!(
        storage.delete(42).await,
        Err(GoLinksError::LinkNotFound(_))
    ));
}

#[tokio::test]
async fn test_get_all_ordered_by_path() {
    let (_dir, storage) = create_storage().await;
    storage.create("zeta", "https://z.example.com").await.unwrap();
    storage.create("alpha", "https://a.example.com").await.unwrap();
    storage.create("mid", "https://m.example.com").await.unwrap();

    let paths: Vec<String> = storage
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.path)
        .collect();
    assert_eq!(paths, vec!["alpha", "mid", "zeta"]);
}

#[tokio::test]
async fn test_update_in_place_keeps_id() {
    let (_dir, storage) = create_storage().await;
    let id = storage.create("gh", "https://github.com").await.unwrap();

    storage
        .update(id, "code", "https://gitlab.com")
        .await
        .unwrap();

    let link = storage.get_by_id(id).await.unwrap();
    assert_eq!(link.path, "code");
    assert_eq!(link.url, "https://gitlab.com");
    assert!(storage.get_by_path("gh").await.is_err());
}

#[tokio::test]
async fn test_update_missing_id_is_noop() {
    let (_dir, storage) = create_storage().await;
    storage.update(99, "ghost", "https://example.com").await.unwrap();
    assert_eq!(storage.count().await.unwrap(), 0);
}

// =============================================================================
// 唯一约束
// =============================================================================

#[tokio::test]
async fn test_duplicate_create_conflicts_and_keeps_original() {
    let (_dir, storage) = create_storage().await;
    storage.create("g", "https://google.com").await.unwrap();

    let err = storage.create("g", "https://bing.com").await.unwrap_err();
    assert!(matches!(err, GoLinksError::LinkAlreadyExists(_)));
    assert_eq!(err.message(), "A link with path 'g' already exists");

    let link = storage.get_by_path("g").await.unwrap();
    assert_eq!(link.url, "https://google.com");
}

#[tokio::test]
async fn test_update_collision_leaves_both_rows() {
    let (_dir, storage) = create_storage().await;
    let a = storage.create("a", "https://a.example.com").await.unwrap();
    let b = storage.create("b", "https://b.example.com").await.unwrap();

    let err = storage
        .update(b, "a", "https://other.example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, GoLinksError::LinkAlreadyExists(_)));

    assert_eq!(storage.get_by_id(a).await.unwrap().url, "https://a.example.com");
    let row_b = storage.get_by_id(b).await.unwrap();
    assert_eq!(row_b.path, "b");
    assert_eq!(row_b.url, "https://b.example.com");
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let (_dir, storage) = create_storage().await;
    let first = storage.create("one", "https://1.example.com").await.unwrap();
    let second = storage.create("two", "https://2.example.com").await.unwrap();
    storage.delete(second).await.unwrap();

    let third = storage.create("three", "https://3.example.com").await.unwrap();
    assert!(third > second);
    assert!(second > first);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_same_path_creates() {
    let (_dir, storage) = create_storage().await;

    let s1 = storage.clone();
    let s2 = storage.clone();
    let (r1, r2) = tokio::join!(
        tokio::spawn(async move { s1.create("race", "https://one.example.com").await }),
        tokio::spawn(async move { s2.create("race", "https://two.example.com").await }),
    );
    let results = [r1.unwrap(), r2.unwrap()];

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(GoLinksError::LinkAlreadyExists(_))))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(storage.count().await.unwrap(), 1);
}

// =============================================================================
// 持久化
// =============================================================================

#[tokio::test]
async fn test_data_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        path: temp_dir
            .path()
            .join("nested")
            .join("links.db")
            .to_string_lossy()
            .to_string(),
    };

    {
        let storage = StorageFactory::create(&config).await.unwrap();
        storage.create("keep", "https://keep.example.com").await.unwrap();
        storage.close().await.unwrap();
    }

    let storage = StorageFactory::create(&config).await.unwrap();
    let link = storage.get_by_path("keep").await.unwrap();
    assert_eq!(link.url, "https://keep.example.com");
}
