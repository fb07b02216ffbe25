use std::fmt;

/// A non-fatal condition surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FlyerMissing,
    RowOutOfRange,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            Self::FlyerMissing => "cut setting not found",
            Self::RowOutOfRange => "data row out of range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFlyer {
    pub token: String,
    pub row_index: usize,
    pub reason: SkipReason,
}

/// A field element that had to be added to a cut setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedField {
    pub token: String,
    pub field: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    pub selected: Vec<i64>,
    pub missing: Vec<i64>,
    pub applied: usize,
    pub skipped: Vec<SkippedFlyer>,
    pub created_fields: Vec<CreatedField>,
    pub placeholder_replacements: usize,
    pub warnings: Vec<Diagnostic>,
}

impl PatchReport {
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }
}
