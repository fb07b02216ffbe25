use cs_core::{AssignmentSpec, AssignmentStyle};

use crate::report::Diagnostic;

/// Maps a flyer's 0-based position within the selection to a dataset row.
pub fn map_position(position: usize, style: AssignmentStyle, x: usize) -> usize {
    let x = x.max(1);
    match style {
        AssignmentStyle::Exact => position,
        AssignmentStyle::RepeatX => position / x,
        AssignmentStyle::ModulusX => position % x,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentPlan {
    pub style: AssignmentStyle,
    pub x: usize,
}

impl AssignmentPlan {
    /// Unknown styles fall back to `exact`, and an `x` that is not a positive
    /// integer falls back to 1. Both produce a warning, never an error.
    pub fn from_spec(spec: &AssignmentSpec) -> (Self, Vec<Diagnostic>) {
        let mut warnings = Vec::new();

        let style = AssignmentStyle::parse(&spec.style).unwrap_or_else(|| {
            warnings.push(Diagnostic::new(
                "ASSIGNMENT_STYLE_UNKNOWN",
                format!(
                    "Unknown flyer_assignment.style \"{}\"; using \"exact\".",
                    spec.style
                ),
            ));
            AssignmentStyle::Exact
        });

        let x = match spec.x.as_integer() {
            Some(value) if value > 0 => usize::try_from(value).unwrap_or(usize::MAX),
            _ => {
                warnings.push(Diagnostic::new(
                    "ASSIGNMENT_X_INVALID",
                    format!(
                        "flyer_assignment.x must be a positive integer, got \"{}\"; using 1.",
                        spec.x
                    ),
                ));
                1
            }
        };

        (Self { style, x }, warnings)
    }

    pub fn row_for(&self, position: usize) -> usize {
        map_position(position, self.style, self.x)
    }
}
