//! Request handlers, one module per resource.
//!
//! Each module provides `get` (single record by `?id=` or a filtered page),
//! `create`, `update` (target `id` in the body) and `delete` (`?id=`).
//! Handlers validate input, delegate to the repository in `sitedesk_db` and
//! map errors via [`AppError`].

pub mod client;
pub mod dashboard;
pub mod form;
pub mod health;
pub mod officer;
pub mod project;
pub mod supply_item;
pub mod vendor;

use sitedesk_core::deletion::check_deletion_safe;
use sitedesk_core::error::CoreError;
use sitedesk_core::types::DbId;
use sitedesk_db::repositories::Dependents;

use crate::error::AppError;

pub(crate) fn not_found(entity: &'static str, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity, id })
}

/// Refuse the delete while any dependent count is non-zero.
pub(crate) fn ensure_deletable(entity: &str, dependents: &Dependents) -> Result<(), AppError> {
    let check = check_deletion_safe(entity, dependents);
    if check.is_safe {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Conflict(check.message)))
    }
}
