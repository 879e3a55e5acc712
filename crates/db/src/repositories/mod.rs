//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Uniqueness and
//! referential rules are enforced by the schema; callers map the resulting
//! constraint violations.

pub mod client_repo;
pub mod dashboard_repo;
pub mod form_repo;
pub mod milestone_history_repo;
pub mod officer_repo;
pub mod project_repo;
pub mod supply_item_repo;
pub mod vendor_repo;

pub use client_repo::ClientRepo;
pub use dashboard_repo::DashboardRepo;
pub use form_repo::{FormFilter, FormRepo};
pub use milestone_history_repo::MilestoneHistoryRepo;
pub use officer_repo::OfficerRepo;
pub use project_repo::{MilestoneEdit, ProjectFilter, ProjectRepo};
pub use supply_item_repo::SupplyItemRepo;
pub use vendor_repo::VendorRepo;

/// Relation name and row count for each table that references a record.
pub type Dependents = Vec<(&'static str, i64)>;
