//! Human-readable messages for the unique constraints the schema enforces.
//!
//! Uniqueness is checked by the database (unique indexes named `uq_*`); the
//! API layer maps a violated constraint name to one of these messages.

/// `(constraint name, message)` for every application-visible unique index.
pub const UNIQUE_CONSTRAINTS: &[(&str, &str)] = &[
    ("uq_clients_email", "A client with this email already exists"),
    ("uq_officers_email", "An officer with this email already exists"),
    ("uq_vendors_name", "A vendor with this name already exists"),
    ("uq_supply_items_name", "A supply item with this name already exists"),
    ("uq_projects_name", "A project with this name already exists"),
    ("uq_forms_form_number", "A form with this number already exists"),
];

/// Message for a violated unique constraint, if it is one we know.
pub fn conflict_message(constraint: &str) -> Option<&'static str> {
    UNIQUE_CONSTRAINTS
        .iter()
        .find(|(name, _)| *name == constraint)
        .map(|(_, msg)| *msg)
}
