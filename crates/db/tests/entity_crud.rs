//! Integration tests for the reference-data repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create, update, list and delete for each resource
//! - Case-insensitive unique constraints
//! - RESTRICT foreign keys blocking deletes

use assert_matches::assert_matches;
use sitedesk_core::milestone::Milestone;
use sitedesk_core::pagination::PageRequest;
use sitedesk_core::project_status::ProjectStatus;
use sitedesk_db::models::client::{CreateClient, UpdateClient};
use sitedesk_db::models::officer::CreateOfficer;
use sitedesk_db::models::project::CreateProject;
use sitedesk_db::models::supply_item::CreateSupplyItem;
use sitedesk_db::models::vendor::{CreateVendor, UpdateVendor};
use sitedesk_db::repositories::{ClientRepo, OfficerRepo, ProjectRepo, SupplyItemRepo, VendorRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_client(name: &str, email: &str) -> CreateClient {
    CreateClient {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        address: None,
        company: None,
    }
}

fn new_vendor(name: &str) -> CreateVendor {
    CreateVendor {
        name: name.to_string(),
        contact_person: None,
        email: None,
        phone: None,
        address: None,
    }
}

fn new_project(name: &str, client_id: i64, officer_id: Option<i64>) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: None,
        location: None,
        client_id,
        officer_id,
        start_date: None,
        end_date: None,
        budget: None,
        status: None,
        milestone: None,
    }
}

fn first_page() -> PageRequest {
    PageRequest { page: 1, limit: 10 }
}

fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505") => {
            db.constraint().map(str::to_string)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_create_trims_and_updates(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("  PT Maju Jaya ", "info@maju.co.id"))
        .await
        .unwrap();
    assert_eq!(client.name, "PT Maju Jaya");

    let updated = ClientRepo::update(
        &pool,
        client.id,
        &UpdateClient {
            id: client.id,
            name: None,
            email: None,
            phone: Some(Some("021-555".into())),
            address: None,
            company: None,
        },
    )
    .await
    .unwrap()
    .expect("client should exist");
    assert_eq!(updated.name, "PT Maju Jaya");
    assert_eq!(updated.phone.as_deref(), Some("021-555"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_email_unique_ignores_case(pool: PgPool) {
    ClientRepo::create(&pool, &new_client("A", "owner@example.com"))
        .await
        .unwrap();
    let err = ClientRepo::create(&pool, &new_client("B", "Owner@Example.COM"))
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err).as_deref(), Some("uq_clients_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_client_returns_none(pool: PgPool) {
    let result = ClientRepo::update(
        &pool,
        9999,
        &UpdateClient {
            id: 9999,
            name: Some("Ghost".into()),
            email: None,
            phone: None,
            address: None,
            company: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_list_search_and_count(pool: PgPool) {
    for (name, email) in [
        ("Bangun Persada", "a@example.com"),
        ("Karya Bangun", "b@example.com"),
        ("Sinar Abadi", "c@example.com"),
    ] {
        ClientRepo::create(&pool, &new_client(name, email))
            .await
            .unwrap();
    }

    let (rows, total) = ClientRepo::list(&pool, Some("bangun"), &first_page())
        .await
        .unwrap();
    assert_eq!(total, 2);
    assert_eq!(rows.len(), 2);

    let (rows, total) = ClientRepo::list(&pool, None, &PageRequest { page: 2, limit: 2 })
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_client_with_project_cannot_be_deleted(pool: PgPool) {
    let client = ClientRepo::create(&pool, &new_client("Owner", "owner@example.com"))
        .await
        .unwrap();
    ProjectRepo::create(
        &pool,
        &new_project("Ruko Bekasi", client.id, None),
        Milestone::INITIAL,
        0,
        ProjectStatus::DEFAULT,
    )
    .await
    .unwrap();

    let dependents = ClientRepo::count_dependents(&pool, client.id).await.unwrap();
    assert_eq!(dependents, vec![("project", 1)]);

    let err = ClientRepo::delete(&pool, client.id).await.unwrap_err();
    assert_matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"));
}

// ---------------------------------------------------------------------------
// Officers, vendors, supply items
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_officer_detail_counts_projects(pool: PgPool) {
    let officer = OfficerRepo::create(
        &pool,
        &CreateOfficer {
            name: "Rina".into(),
            email: "rina@example.com".into(),
            phone: None,
            position: Some("Site Manager".into()),
        },
    )
    .await
    .unwrap();
    let client = ClientRepo::create(&pool, &new_client("Owner", "owner@example.com"))
        .await
        .unwrap();
    ProjectRepo::create(
        &pool,
        &new_project("Gudang", client.id, Some(officer.id)),
        Milestone::INITIAL,
        0,
        ProjectStatus::DEFAULT,
    )
    .await
    .unwrap();

    let detail = OfficerRepo::find_detail(&pool, officer.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(detail.project_count, 1);
    assert_eq!(detail.form_count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vendor_rename_conflicts_case_insensitively(pool: PgPool) {
    VendorRepo::create(&pool, &new_vendor("CV Sumber Makmur"))
        .await
        .unwrap();
    let other = VendorRepo::create(&pool, &new_vendor("UD Baja Ringan"))
        .await
        .unwrap();

    let err = VendorRepo::update(
        &pool,
        other.id,
        &UpdateVendor {
            id: other.id,
            name: Some("cv sumber makmur".into()),
            contact_person: None,
            email: None,
            phone: None,
            address: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(unique_violation(&err).as_deref(), Some("uq_vendors_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_supply_item_count_existing(pool: PgPool) {
    let semen = SupplyItemRepo::create(
        &pool,
        &CreateSupplyItem {
            name: "Semen 50kg".into(),
            unit: "sak".into(),
            category: Some("Material".into()),
            unit_price: Some(65_000),
            description: None,
        },
    )
    .await
    .unwrap();

    let found = SupplyItemRepo::count_existing(&pool, &[semen.id, semen.id + 100])
        .await
        .unwrap();
    assert_eq!(found, 1);

    assert!(SupplyItemRepo::delete(&pool, semen.id).await.unwrap());
    assert!(!SupplyItemRepo::delete(&pool, semen.id).await.unwrap());
}
