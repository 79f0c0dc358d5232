use chrono::{Local, TimeZone};
use seo_blog_generator::store::{PostStore, StoreError};

#[tokio::test]
async fn creates_directory_and_writes_content() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PostStore::new(tmp.path().join("nested").join("posts"));
    let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 1).unwrap();

    let path = store
        .save_at("wireless earbuds", "# hello", at)
        .await
        .unwrap();
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "wireless_earbuds_20261019_090001.md"
    );
    assert_eq!(path.parent().unwrap(), store.dir());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hello");
}

#[tokio::test]
async fn same_second_repeats_overwrite_without_error() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PostStore::new(tmp.path());
    let at = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 1).unwrap();

    let first = store.save_at("rust", "one", at).await.unwrap();
    let second = store.save_at("rust", "two", at).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(std::fs::read_to_string(&second).unwrap(), "two");
}

#[tokio::test]
async fn different_seconds_give_distinct_files() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PostStore::new(tmp.path());
    let a = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 1).unwrap();
    let b = Local.with_ymd_and_hms(2026, 10, 19, 9, 0, 2).unwrap();

    let first = store.save_at("rust", "one", a).await.unwrap();
    let second = store.save_at("rust", "two", b).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 2);
}

#[tokio::test]
async fn unwritable_directory_is_an_io_error() {
    let tmp = tempfile::tempdir().unwrap();
    let blocker = tmp.path().join("file");
    std::fs::write(&blocker, "x").unwrap();
    let store = PostStore::new(&blocker);

    let err = store.save("rust", "content").await.unwrap_err();
    assert!(matches!(err, StoreError::CreateDir { .. }), "{err:?}");
}

#[tokio::test]
async fn keyword_with_separators_stays_inside_the_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let store = PostStore::new(tmp.path());
    let path = store.save("../escape/attempt", "x").await.unwrap();
    assert_eq!(path.parent().unwrap(), tmp.path());
}
