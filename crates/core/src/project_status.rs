//! Project lifecycle status codes and their display labels.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Project lifecycle status, stored as its upper-case code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Planning,
    Ongoing,
    OnHold,
    Finish,
    Cancelled,
}

/// All statuses in display order.
pub const ALL_PROJECT_STATUSES: &[ProjectStatus] = &[
    ProjectStatus::Planning,
    ProjectStatus::Ongoing,
    ProjectStatus::OnHold,
    ProjectStatus::Finish,
    ProjectStatus::Cancelled,
];

impl ProjectStatus {
    /// Status given to projects created without one.
    pub const DEFAULT: ProjectStatus = ProjectStatus::Planning;

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "PLANNING",
            ProjectStatus::Ongoing => "ONGOING",
            ProjectStatus::OnHold => "ON_HOLD",
            ProjectStatus::Finish => "FINISH",
            ProjectStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Planning => "Perencanaan",
            ProjectStatus::Ongoing => "Berjalan",
            ProjectStatus::OnHold => "Ditunda",
            ProjectStatus::Finish => "Selesai",
            ProjectStatus::Cancelled => "Dibatalkan",
        }
    }

    /// Parse a status code (trimmed, case-insensitive).
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        let wanted = code.trim();
        ALL_PROJECT_STATUSES
            .iter()
            .copied()
            .find(|s| s.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = ALL_PROJECT_STATUSES.iter().map(|s| s.as_str()).collect();
                CoreError::Validation(format!(
                    "Invalid project status '{wanted}'. Must be one of: {}",
                    valid.join(", ")
                ))
            })
    }

    /// Parse an optional status code, passing `None` through.
    pub fn parse_opt(code: Option<&str>) -> Result<Option<Self>, CoreError> {
        code.map(Self::parse).transpose()
    }
}

/// Display label for a stored status code; unknown codes are shown as-is.
pub fn status_label(code: &str) -> String {
    ProjectStatus::parse(code)
        .map(|s| s.label().to_string())
        .unwrap_or_else(|_| code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_parse() {
        for status in ALL_PROJECT_STATUSES {
            assert_eq!(ProjectStatus::parse(status.as_str()).unwrap(), *status);
        }
    }

    #[test]
    fn parse_accepts_lower_case() {
        assert_eq!(ProjectStatus::parse("on_hold").unwrap(), ProjectStatus::OnHold);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = ProjectStatus::parse("DONE").unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("FINISH"));
    }

    #[test]
    fn parse_opt_passes_none_through() {
        assert_eq!(ProjectStatus::parse_opt(None).unwrap(), None);
    }

    #[test]
    fn labels_for_unknown_codes_fall_back_to_code() {
        assert_eq!(status_label("FINISH"), "Selesai");
        assert_eq!(status_label("LEGACY"), "LEGACY");
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"ON_HOLD\""
        );
    }
}
