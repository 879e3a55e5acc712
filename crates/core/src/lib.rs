//! Domain logic for the construction back-office service.
//!
//! Everything in this crate is pure: no database access, no HTTP. The `db`
//! and `api` crates call into it for the rules that must hold regardless of
//! which endpoint triggered a write.

pub mod deletion;
pub mod document;
pub mod error;
pub mod form_number;
pub mod forms;
pub mod milestone;
pub mod pagination;
pub mod project_status;
pub mod types;
pub mod uniqueness;
pub mod validation;
