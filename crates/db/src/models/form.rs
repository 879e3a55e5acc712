//! Request form and form line models and DTOs.

use serde::{Deserialize, Serialize};
use sitedesk_core::document::{FormHeaderInput, FormLineInput};
use sitedesk_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

use crate::models::patch::{nullable, Nullable};

/// A row from the `forms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: DbId,
    pub form_number: String,
    pub project_id: DbId,
    pub officer_id: DbId,
    pub vendor_id: Option<DbId>,
    pub form_type: String,
    pub status: String,
    pub request_date: Date,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List row: a form with the names of what it references.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub form: Form,
    pub project_name: String,
    pub officer_name: String,
    pub vendor_name: Option<String>,
    pub item_count: i64,
}

/// Compact form reference embedded in project detail.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: DbId,
    pub form_number: String,
    pub form_type: String,
    pub status: String,
    pub request_date: Date,
}

/// A form line joined with its supply item.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormItemDetail {
    pub id: DbId,
    pub supply_item_id: DbId,
    pub position: i32,
    pub item_name: String,
    pub unit: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

/// Header columns for a form with its relations resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormHeader {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub form: Form,
    pub project_name: String,
    pub project_location: Option<String>,
    pub officer_name: String,
    pub vendor_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDetail {
    #[serde(flatten)]
    pub header: FormHeader,
    pub items: Vec<FormItemDetail>,
}

impl FormDetail {
    /// Inputs for [`sitedesk_core::document::build_form_document`].
    pub fn document_inputs(&self) -> (FormHeaderInput, Vec<FormLineInput>) {
        let form = &self.header.form;
        let header = FormHeaderInput {
            form_number: form.form_number.clone(),
            form_type: form.form_type.clone(),
            status: form.status.clone(),
            request_date: form.request_date,
            project_name: self.header.project_name.clone(),
            project_location: self.header.project_location.clone(),
            officer_name: self.header.officer_name.clone(),
            vendor_name: self.header.vendor_name.clone(),
            notes: form.notes.clone(),
        };
        let lines = self
            .items
            .iter()
            .map(|item| FormLineInput {
                item_name: item.item_name.clone(),
                unit: item.unit.clone(),
                quantity: item.quantity,
                notes: item.notes.clone(),
            })
            .collect();
        (header, lines)
    }
}

/// One requested line. `Serialize` is needed by the `length` rule on the
/// list that holds it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormItem {
    pub supply_item_id: DbId,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: i32,
    pub notes: Option<String>,
}

/// DTO for creating a form. The form number is assigned on insert.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateForm {
    pub project_id: DbId,
    pub officer_id: DbId,
    pub vendor_id: Option<DbId>,
    #[validate(custom(function = "sitedesk_core::validation::not_blank"))]
    pub form_type: String,
    pub status: Option<String>,
    pub request_date: Option<Date>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    #[validate(nested)]
    pub items: Vec<CreateFormItem>,
}

/// DTO for updating a form. When `items` is present it replaces every line.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForm {
    pub id: DbId,
    pub project_id: Option<DbId>,
    pub officer_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub vendor_id: Nullable<DbId>,
    pub form_type: Option<String>,
    pub status: Option<String>,
    pub request_date: Option<Date>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Nullable<String>,
    #[validate(length(min = 1, message = "must contain at least one item"))]
    #[validate(nested)]
    pub items: Option<Vec<CreateFormItem>>,
}

#[cfg(test)]
mod tests {
    use sitedesk_core::validation::validate_input;

    use super::*;

    fn create_form(items: Vec<CreateFormItem>) -> CreateForm {
        CreateForm {
            project_id: 1,
            officer_id: 2,
            vendor_id: None,
            form_type: "MATERIAL".into(),
            status: None,
            request_date: None,
            notes: None,
            items,
        }
    }

    fn line(quantity: i32) -> CreateFormItem {
        CreateFormItem {
            supply_item_id: 7,
            quantity,
            notes: None,
        }
    }

    #[test]
    fn create_form_with_lines_is_valid() {
        assert!(validate_input(&create_form(vec![line(3), line(1)])).is_ok());
    }

    #[test]
    fn create_form_without_lines_is_rejected() {
        let err = validate_input(&create_form(vec![])).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: items: must contain at least one item");
    }

    #[test]
    fn zero_quantity_reports_line_index() {
        let err = validate_input(&create_form(vec![line(2), line(0)])).unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: items[1].quantity: must be at least 1");
    }

    #[test]
    fn update_form_may_omit_lines_but_not_empty_them() {
        let mut update = UpdateForm {
            id: 1,
            project_id: None,
            officer_id: None,
            vendor_id: None,
            form_type: None,
            status: Some("SUBMITTED".into()),
            request_date: None,
            notes: None,
            items: None,
        };
        assert!(validate_input(&update).is_ok());

        update.items = Some(vec![]);
        assert!(validate_input(&update).is_err());
    }
}
