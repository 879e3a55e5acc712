//! Request form type and status codes with their display labels.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a request form asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormType {
    Material,
    Equipment,
    Service,
}

pub const ALL_FORM_TYPES: &[FormType] = &[FormType::Material, FormType::Equipment, FormType::Service];

impl FormType {
    pub fn as_str(self) -> &'static str {
        match self {
            FormType::Material => "MATERIAL",
            FormType::Equipment => "EQUIPMENT",
            FormType::Service => "SERVICE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormType::Material => "Permintaan Material",
            FormType::Equipment => "Permintaan Peralatan",
            FormType::Service => "Permintaan Jasa",
        }
    }

    pub fn parse(code: &str) -> Result<Self, CoreError> {
        let wanted = code.trim();
        ALL_FORM_TYPES
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = ALL_FORM_TYPES.iter().map(|t| t.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid form type '{wanted}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }
}

/// Approval state of a request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

pub const ALL_FORM_STATUSES: &[FormStatus] = &[
    FormStatus::Draft,
    FormStatus::Submitted,
    FormStatus::Approved,
    FormStatus::Rejected,
];

impl FormStatus {
    pub const DEFAULT: FormStatus = FormStatus::Draft;

    pub fn as_str(self) -> &'static str {
        match self {
            FormStatus::Draft => "DRAFT",
            FormStatus::Submitted => "SUBMITTED",
            FormStatus::Approved => "APPROVED",
            FormStatus::Rejected => "REJECTED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormStatus::Draft => "Draf",
            FormStatus::Submitted => "Diajukan",
            FormStatus::Approved => "Disetujui",
            FormStatus::Rejected => "Ditolak",
        }
    }

    pub fn parse(code: &str) -> Result<Self, CoreError> {
        let wanted = code.trim();
        ALL_FORM_STATUSES
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = ALL_FORM_STATUSES.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid form status '{wanted}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }

    pub fn parse_opt(code: Option<&str>) -> Result<Option<Self>, CoreError> {
        code.map(Self::parse).transpose()
    }
}

/// Display label for a stored form type code; unknown codes are shown as-is.
pub fn form_type_label(code: &str) -> String {
    FormType::parse(code)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

/// Display label for a stored form status code; unknown codes are shown as-is.
pub fn form_status_label(code: &str) -> String {
    FormStatus::parse(code)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}
