//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO carrying the target `id`
//!
//! JSON field names are camelCase on the wire.

pub mod client;
pub mod dashboard;
pub mod form;
pub mod milestone_history;
pub mod officer;
pub mod patch;
pub mod project;
pub mod supply_item;
pub mod vendor;
