use crate::db::migration;
use anketo_test_helpers::{SqliteDb, TestDb};
use test_log::test;
use url::Url;

#[test(tokio::test)]
async fn test_migrations_run_once() {
    let db = SqliteDb::new().unwrap();
    let url = Url::parse(&db.db_uri()).unwrap();

    let versions = migration(&url).await.unwrap();
    assert_eq!(versions.len(), 1);

    // a second run has nothing left to apply
    let versions = migration(&url).await.unwrap();
    assert!(versions.is_empty());
}
