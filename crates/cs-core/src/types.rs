use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::value::Scalar;

pub const DEFAULT_FLYER_PREFIX: &str = "F";
pub const DEFAULT_OUTPUT_BASE: &str = "STACK";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_OUTPUT_EXTENSION: &str = "lbrn2";
pub const DEFAULT_PLACEHOLDER: &str = "FLYID";

/// The fixed dataset schema, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CutField {
    MaxPower,
    QPulseWidth,
    Speed,
    Frequency,
    NumPasses,
}

impl CutField {
    pub const ALL: [CutField; 5] = [
        CutField::MaxPower,
        CutField::QPulseWidth,
        CutField::Speed,
        CutField::Frequency,
        CutField::NumPasses,
    ];

    /// Element name used inside a `CutSetting`.
    pub fn name(self) -> &'static str {
        match self {
            Self::MaxPower => "maxPower",
            Self::QPulseWidth => "QPulseWidth",
            Self::Speed => "speed",
            Self::Frequency => "frequency",
            Self::NumPasses => "numPasses",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Frequency | Self::NumPasses)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    pub max_power: Scalar,
    pub q_pulse_width: Scalar,
    pub speed: Scalar,
    pub frequency: Scalar,
    pub num_passes: Scalar,
}

impl DataRow {
    /// Builds a row from cells in schema order; missing cells are `Empty`.
    pub fn from_cells(cells: impl IntoIterator<Item = Scalar>) -> Self {
        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        Self {
            max_power: next(),
            q_pulse_width: next(),
            speed: next(),
            frequency: next(),
            num_passes: next(),
        }
    }

    pub fn get(&self, field: CutField) -> &Scalar {
        match field {
            CutField::MaxPower => &self.max_power,
            CutField::QPulseWidth => &self.q_pulse_width,
            CutField::Speed => &self.speed,
            CutField::Frequency => &self.frequency,
            CutField::NumPasses => &self.num_passes,
        }
    }

    pub fn is_blank(&self) -> bool {
        CutField::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<DataRow>,
}

impl Dataset {
    pub fn new(rows: Vec<DataRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<&DataRow> {
        self.rows.get(index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSpec {
    pub start: Scalar,
    #[serde(default)]
    pub end: Option<Scalar>,
    #[serde(default)]
    pub step: Option<Scalar>,
}

impl SelectionSpec {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        Self {
            start: Scalar::from(start),
            end: Some(Scalar::from(end)),
            step: Some(Scalar::from(step)),
        }
    }
}

impl Default for SelectionSpec {
    fn default() -> Self {
        Self::new(1, 25, 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentStyle {
    Exact,
    RepeatX,
    ModulusX,
}

impl AssignmentStyle {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "exact" => Some(Self::Exact),
            "repeat_x" => Some(Self::RepeatX),
            "modulus_x" => Some(Self::ModulusX),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::RepeatX => "repeat_x",
            Self::ModulusX => "modulus_x",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSpec {
    #[serde(default = "default_assignment_style")]
    pub style: String,
    #[serde(default = "default_assignment_x")]
    pub x: Scalar,
}

impl AssignmentSpec {
    pub fn new(style: AssignmentStyle, x: i64) -> Self {
        Self {
            style: style.name().to_string(),
            x: Scalar::from(x),
        }
    }
}

impl Default for AssignmentSpec {
    fn default() -> Self {
        Self::new(AssignmentStyle::Exact, 1)
    }
}

fn default_assignment_style() -> String {
    AssignmentStyle::Exact.name().to_string()
}

fn default_assignment_x() -> Scalar {
    Scalar::Number(1.0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderRule {
    pub old_text: String,
    pub new_text: String,
    pub case_insensitive: bool,
}

impl PlaceholderRule {
    pub fn new(old_text: impl Into<String>, new_text: impl Into<String>) -> Self {
        Self {
            old_text: old_text.into(),
            new_text: new_text.into(),
            case_insensitive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNamingSpec {
    pub output_dir: PathBuf,
    pub base_name: String,
    pub append_igsn: bool,
    pub append_id: bool,
    pub append_template: bool,
    pub append_timestamp: bool,
    pub overwrite: bool,
}

impl Default for OutputNamingSpec {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            base_name: DEFAULT_OUTPUT_BASE.to_string(),
            append_igsn: true,
            append_id: true,
            append_template: false,
            append_timestamp: true,
            overwrite: false,
        }
    }
}

/// Run-specific tokens consumed by output naming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingContext {
    pub run_id: String,
    pub template_path: Option<PathBuf>,
    pub igsn: Option<String>,
}
