//! Delete guards for records that other rows still reference.

use serde::Serialize;

/// Result of checking whether a record can be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionCheck {
    /// Whether every dependent count is zero.
    pub is_safe: bool,
    /// Sum of all dependent rows.
    pub dependent_count: i64,
    /// Human-readable summary of the check.
    pub message: String,
}

/// Evaluate whether `entity` can be deleted given `(relation, count)` pairs,
/// e.g. `[("form", 2), ("project", 0)]`.
pub fn check_deletion_safe(entity: &str, dependents: &[(&str, i64)]) -> DeletionCheck {
    let blocking: Vec<String> = dependents
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(relation, count)| format!("{count} {relation}(s)"))
        .collect();
    let dependent_count = dependents.iter().map(|(_, c)| (*c).max(0)).sum();

    if blocking.is_empty() {
        DeletionCheck {
            is_safe: true,
            dependent_count: 0,
            message: "No dependents. Safe to delete.".to_string(),
        }
    } else {
        DeletionCheck {
            is_safe: false,
            dependent_count,
            message: format!(
                "Cannot delete {entity}: still referenced by {}",
                blocking.join(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_dependents_is_safe() {
        let check = check_deletion_safe("vendor", &[("form", 0), ("project", 0)]);
        assert!(check.is_safe);
        assert_eq!(check.dependent_count, 0);
    }

    #[test]
    fn any_dependent_blocks() {
        let check = check_deletion_safe("officer", &[("form", 2), ("project", 1)]);
        assert!(!check.is_safe);
        assert_eq!(check.dependent_count, 3);
        assert_eq!(
            check.message,
            "Cannot delete officer: still referenced by 2 form(s), 1 project(s)"
        );
    }

    #[test]
    fn zero_counts_are_left_out_of_the_message() {
        let check = check_deletion_safe("project", &[("form", 4), ("milestone", 0)]);
        assert_eq!(check.message, "Cannot delete project: still referenced by 4 form(s)");
    }
}
