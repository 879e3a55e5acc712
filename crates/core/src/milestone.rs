//! Project milestone state machine.
//!
//! A project's `milestone` drives two derived columns: `progress` is always
//! the milestone's weight, and `status` is pinned to `FINISH` once the
//! milestone is terminal or its weight reaches 100. All writes that touch
//! a milestone go through [`plan_transition`] or [`initial_state`] so the
//! derived columns cannot drift from the milestone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project_status::ProjectStatus;

/// Progress value that pins a project to [`ProjectStatus::Finish`].
pub const COMPLETE_PROGRESS: i16 = 100;

/// Construction milestones in build order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Milestone {
    Perencanaan,
    Persiapan,
    Pondasi,
    Struktur,
    Atap,
    Finishing,
    Selesai,
}

/// One row of the milestone table.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MilestoneRule {
    pub milestone: Milestone,
    pub code: &'static str,
    pub label: &'static str,
    pub weight: i16,
    pub terminal: bool,
}

/// The fixed weight table. Any milestone may follow any other; only the
/// derived fields depend on which row is entered.
pub const MILESTONE_TABLE: &[MilestoneRule] = &[
    MilestoneRule {
        milestone: Milestone::Perencanaan,
        code: "PERENCANAAN",
        label: "Perencanaan",
        weight: 0,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Persiapan,
        code: "PERSIAPAN",
        label: "Persiapan Lahan",
        weight: 10,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Pondasi,
        code: "PONDASI",
        label: "Pekerjaan Pondasi",
        weight: 25,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Struktur,
        code: "STRUKTUR",
        label: "Pekerjaan Struktur",
        weight: 45,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Atap,
        code: "ATAP",
        label: "Pekerjaan Atap",
        weight: 65,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Finishing,
        code: "FINISHING",
        label: "Finishing",
        weight: 85,
        terminal: false,
    },
    MilestoneRule {
        milestone: Milestone::Selesai,
        code: "SELESAI",
        label: "Selesai",
        weight: 100,
        terminal: true,
    },
];

impl Milestone {
    /// Milestone assigned to newly created projects.
    pub const INITIAL: Milestone = Milestone::Perencanaan;

    // Table rows are declared in variant order.
    fn rule(self) -> &'static MilestoneRule {
        &MILESTONE_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.rule().code
    }

    pub fn label(self) -> &'static str {
        self.rule().label
    }

    pub fn weight(self) -> i16 {
        self.rule().weight
    }

    pub fn is_terminal(self) -> bool {
        self.rule().terminal
    }

    /// Parse a milestone code (trimmed, case-insensitive).
    pub fn parse(code: &str) -> Result<Self, CoreError> {
        let wanted = code.trim();
        MILESTONE_TABLE
            .iter()
            .find(|r| r.code.eq_ignore_ascii_case(wanted))
            .map(|r| r.milestone)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid milestone '{wanted}'. Must be one of: {}",
                    valid_codes().join(", ")
                ))
            })
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weight for a milestone code, or `None` if the code is not in the table.
pub fn weight(code: &str) -> Option<i16> {
    Milestone::parse(code).ok().map(Milestone::weight)
}

/// All milestone codes in table order.
pub fn valid_codes() -> Vec<&'static str> {
    MILESTONE_TABLE.iter().map(|r| r.code).collect()
}

/// Status a project must carry given its milestone and a requested status.
///
/// Terminal milestones (or full weight) force `FINISH`; otherwise the request
/// passes through unchanged.
pub fn derive_status(
    milestone: Milestone,
    requested: Option<ProjectStatus>,
) -> Option<ProjectStatus> {
    if milestone.is_terminal() || milestone.weight() >= COMPLETE_PROGRESS {
        Some(ProjectStatus::Finish)
    } else {
        requested
    }
}

/// Derived columns for a freshly created project.
pub fn initial_state(
    milestone: Option<&str>,
    requested_status: Option<ProjectStatus>,
) -> Result<(Milestone, i16, ProjectStatus), CoreError> {
    let milestone = match milestone {
        Some(code) => Milestone::parse(code)?,
        None => Milestone::INITIAL,
    };
    let status = derive_status(milestone, requested_status).unwrap_or(ProjectStatus::DEFAULT);
    Ok((milestone, milestone.weight(), status))
}

/// Outcome of a milestone change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Requested milestone equals the stored one. No history row is written
    /// and progress is untouched; `status` is the status to store, if any.
    Unchanged { status: Option<ProjectStatus> },
    /// The milestone moves. `progress` and `status` are the derived values
    /// to store alongside `next`, and a history row records the move.
    Advance {
        previous: Milestone,
        next: Milestone,
        progress: i16,
        status: Option<ProjectStatus>,
    },
}

impl Transition {
    pub fn is_advance(&self) -> bool {
        matches!(self, Transition::Advance { .. })
    }

    /// Status to persist, if the transition sets one.
    pub fn status(&self) -> Option<ProjectStatus> {
        match *self {
            Transition::Unchanged { status } | Transition::Advance { status, .. } => status,
        }
    }
}

/// Plan the transition from `current` to `next`.
pub fn plan_transition(
    current: Milestone,
    next: Milestone,
    requested_status: Option<ProjectStatus>,
) -> Transition {
    if next == current {
        return Transition::Unchanged {
            status: derive_status(current, requested_status),
        };
    }

    Transition::Advance {
        previous: current,
        next,
        progress: next.weight(),
        status: derive_status(next, requested_status),
    }
}

/// Plan a transition from a requested milestone code.
///
/// Codes outside the table are rejected before anything is decided, so
/// callers run this ahead of any write.
pub fn request_transition(
    current: Milestone,
    requested: &str,
    requested_status: Option<ProjectStatus>,
) -> Result<Transition, CoreError> {
    let next = Milestone::parse(requested)?;
    Ok(plan_transition(current, next, requested_status))
}
