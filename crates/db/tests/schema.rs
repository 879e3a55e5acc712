//! Migration bookkeeping as reported by the health endpoint.

use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_applied_version_matches_embedded_migrations(pool: PgPool) {
    let expected = sitedesk_db::expected_schema_version();
    assert!(expected.is_some());

    let applied = sitedesk_db::applied_schema_version(&pool).await.unwrap();
    assert_eq!(applied, expected);
}

#[sqlx::test(migrations = false)]
async fn test_unmigrated_database_has_no_version(pool: PgPool) {
    let applied = sitedesk_db::applied_schema_version(&pool).await.unwrap();
    assert_eq!(applied, None);

    sitedesk_db::run_migrations(&pool).await.unwrap();
    let applied = sitedesk_db::applied_schema_version(&pool).await.unwrap();
    assert_eq!(applied, sitedesk_db::expected_schema_version());
}
