//! Integration tests for request forms: numbering, lines, and cascades.

use sitedesk_core::forms::{FormStatus, FormType};
use sitedesk_core::milestone::Milestone;
use sitedesk_core::pagination::PageRequest;
use sitedesk_core::project_status::ProjectStatus;
use sitedesk_db::models::client::CreateClient;
use sitedesk_db::models::form::{CreateForm, CreateFormItem, UpdateForm};
use sitedesk_db::models::officer::CreateOfficer;
use sitedesk_db::models::project::CreateProject;
use sitedesk_db::models::supply_item::CreateSupplyItem;
use sitedesk_db::repositories::{
    ClientRepo, DashboardRepo, FormFilter, FormRepo, OfficerRepo, ProjectRepo, SupplyItemRepo,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

struct Fixture {
    project_id: i64,
    officer_id: i64,
    items: Vec<i64>,
}

async fn seed(pool: &PgPool) -> Fixture {
    let client = ClientRepo::create(
        pool,
        &CreateClient {
            name: "PT Graha".into(),
            email: "graha@example.com".into(),
            phone: None,
            address: None,
            company: None,
        },
    )
    .await
    .unwrap();
    let officer = OfficerRepo::create(
        pool,
        &CreateOfficer {
            name: "Dewi".into(),
            email: "dewi@example.com".into(),
            phone: None,
            position: None,
        },
    )
    .await
    .unwrap();
    let project = ProjectRepo::create(
        pool,
        &CreateProject {
            name: "Gudang Cikarang".into(),
            description: None,
            location: Some("Cikarang".into()),
            client_id: client.id,
            officer_id: Some(officer.id),
            start_date: None,
            end_date: None,
            budget: None,
            status: None,
            milestone: None,
        },
        Milestone::INITIAL,
        0,
        ProjectStatus::DEFAULT,
    )
    .await
    .unwrap();

    let mut items = Vec::new();
    for (name, unit) in [("Semen 50kg", "sak"), ("Besi 10mm", "batang"), ("Pasir", "m3")] {
        let item = SupplyItemRepo::create(
            pool,
            &CreateSupplyItem {
                name: name.into(),
                unit: unit.into(),
                category: None,
                unit_price: None,
                description: None,
            },
        )
        .await
        .unwrap();
        items.push(item.id);
    }

    Fixture {
        project_id: project.id,
        officer_id: officer.id,
        items,
    }
}

fn new_form(fx: &Fixture, lines: &[(i64, i32)]) -> CreateForm {
    CreateForm {
        project_id: fx.project_id,
        officer_id: fx.officer_id,
        vendor_id: None,
        form_type: "MATERIAL".into(),
        status: None,
        request_date: None,
        notes: None,
        items: lines
            .iter()
            .map(|&(supply_item_id, quantity)| CreateFormItem {
                supply_item_id,
                quantity,
                notes: None,
            })
            .collect(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_form_numbers_increment_per_year(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[0], 5)]);

    let first = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();
    let second = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();
    let next_year = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2027)
        .await
        .unwrap();

    assert_eq!(first.form_number, "FORM-2026-001");
    assert_eq!(second.form_number, "FORM-2026-002");
    assert_eq!(next_year.form_number, "FORM-2027-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_creates_get_distinct_numbers(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[0], 1)]);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        let input = input.clone();
        handles.push(tokio::spawn(async move {
            FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
                .await
                .unwrap()
                .form_number
        }));
    }

    let mut numbers = Vec::new();
    for handle in handles {
        numbers.push(handle.await.unwrap());
    }
    numbers.sort();
    let expected: Vec<String> = (1..=8).map(|n| format!("FORM-2026-{n:03}")).collect();
    assert_eq!(numbers, expected);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_insert_does_not_consume_number(pool: PgPool) {
    let fx = seed(&pool).await;

    // Unknown supply item fails the line insert and rolls the counter back.
    let bad = new_form(&fx, &[(fx.items[0] + 1000, 1)]);
    assert!(
        FormRepo::create(&pool, &bad, FormType::Material, FormStatus::Draft, 2026)
            .await
            .is_err()
    );

    let good = new_form(&fx, &[(fx.items[0], 1)]);
    let form = FormRepo::create(&pool, &good, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();
    assert_eq!(form.form_number, "FORM-2026-001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_detail_keeps_line_order_and_update_replaces_lines(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[2], 3), (fx.items[0], 10)]);
    let form = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();

    let detail = FormRepo::find_detail(&pool, form.id).await.unwrap().unwrap();
    let names: Vec<&str> = detail.items.iter().map(|i| i.item_name.as_str()).collect();
    assert_eq!(names, vec!["Pasir", "Semen 50kg"]);
    assert_eq!(detail.header.project_name, "Gudang Cikarang");
    assert_eq!(detail.header.officer_name, "Dewi");

    let updated = FormRepo::update(
        &pool,
        form.id,
        &UpdateForm {
            id: form.id,
            project_id: None,
            officer_id: None,
            vendor_id: None,
            form_type: None,
            status: None,
            request_date: None,
            notes: Some(Some("Kirim pagi".into())),
            items: Some(vec![CreateFormItem {
                supply_item_id: fx.items[1],
                quantity: 20,
                notes: None,
            }]),
        },
        None,
        Some(FormStatus::Submitted),
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.status, "SUBMITTED");
    assert_eq!(updated.form_number, form.form_number);

    let lines = FormRepo::list_items(&pool, form.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].item_name, "Besi 10mm");
    assert_eq!(lines[0].position, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_project(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[0], 1)]);
    FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();
    FormRepo::create(&pool, &input, FormType::Service, FormStatus::Approved, 2026)
        .await
        .unwrap();

    let page = PageRequest { page: 1, limit: 10 };
    let (rows, total) = FormRepo::list(
        &pool,
        &FormFilter {
            status: Some(FormStatus::Approved),
            ..Default::default()
        },
        &page,
    )
    .await
    .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].form.form_type, "SERVICE");
    assert_eq!(rows[0].item_count, 1);

    let (_, total) = FormRepo::list(
        &pool,
        &FormFilter {
            project_id: Some(fx.project_id + 1),
            ..Default::default()
        },
        &page,
    )
    .await
    .unwrap();
    assert_eq!(total, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_form_blocks_project_delete_and_lines_cascade(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[0], 1), (fx.items[1], 2)]);
    let form = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2026)
        .await
        .unwrap();

    let dependents = ProjectRepo::count_dependents(&pool, fx.project_id)
        .await
        .unwrap();
    assert_eq!(dependents, vec![("form", 1)]);
    assert!(ProjectRepo::delete(&pool, fx.project_id).await.is_err());

    assert!(FormRepo::delete(&pool, form.id).await.unwrap());
    let (lines,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM form_items WHERE form_id = $1")
        .bind(form.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(lines, 0);

    assert!(ProjectRepo::delete(&pool, fx.project_id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_year_ignores_session_time_zone(pool: PgPool) {
    let fx = seed(&pool).await;
    let input = new_form(&fx, &[(fx.items[0], 1)]);
    let form = FormRepo::create(&pool, &input, FormType::Material, FormStatus::Draft, 2025)
        .await
        .unwrap();
    // New Year's Eve in UTC, already January 1st in Jakarta.
    sqlx::query("UPDATE forms SET created_at = '2025-12-31 20:00:00+00' WHERE id = $1")
        .bind(form.id)
        .execute(&pool)
        .await
        .unwrap();

    let jakarta = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                sqlx::query("SET TIME ZONE 'Asia/Jakarta'").execute(conn).await?;
                Ok(())
            })
        })
        .connect_with((*pool.connect_options()).clone())
        .await
        .unwrap();

    let summary = DashboardRepo::summary(&jakarta, 2025).await.unwrap();
    assert_eq!(summary.forms_this_year, 1);
    let summary = DashboardRepo::summary(&jakarta, 2026).await.unwrap();
    assert_eq!(summary.forms_this_year, 0);
}
