use cs_core::{CutStackError, Scalar, SelectionSpec};
use cs_parser::XmlDocument;

use crate::resolver::{find_cut_setting, flyer_token};

/// Inclusive, ascending flyer index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlyerRange {
    pub low: i64,
    pub high: i64,
    pub step: i64,
}

impl FlyerRange {
    pub fn indices(&self) -> impl Iterator<Item = i64> {
        let high = self.high;
        let step = self.step;
        let mut current = Some(self.low);
        std::iter::from_fn(move || {
            let value = current.filter(|value| *value <= high)?;
            current = value.checked_add(step);
            Some(value)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlyerSelection {
    pub selected: Vec<i64>,
    pub missing: Vec<i64>,
}

fn coerce_bound(label: &str, value: &Scalar) -> Result<i64, CutStackError> {
    value.as_integer().ok_or_else(|| {
        CutStackError::new(
            "SELECTION_INVALID",
            format!(
                "flyer_selection.{} must be an integer, got {} \"{}\".",
                label,
                value.type_name(),
                value
            ),
        )
    })
}

pub fn resolve_range(spec: &SelectionSpec) -> Result<FlyerRange, CutStackError> {
    let start = coerce_bound("start", &spec.start)?;
    let end = match &spec.end {
        Some(end) => coerce_bound("end", end)?,
        None => start,
    };
    let step = match &spec.step {
        Some(step) => coerce_bound("step", step)?,
        None => 1,
    };

    let step = match step.unsigned_abs() {
        0 => 1,
        magnitude => i64::try_from(magnitude).unwrap_or(i64::MAX),
    };

    Ok(FlyerRange {
        low: start.min(end),
        high: start.max(end),
        step,
    })
}

pub fn select_flyers(
    document: &XmlDocument,
    spec: &SelectionSpec,
    prefix: &str,
) -> Result<FlyerSelection, CutStackError> {
    let range = resolve_range(spec)?;
    let mut selection = FlyerSelection::default();
    for index in range.indices() {
        if find_cut_setting(document, &flyer_token(prefix, index)).is_some() {
            selection.selected.push(index);
        } else {
            selection.missing.push(index);
        }
    }
    Ok(selection)
}

/// Counts contiguous flyers starting at `start`, stopping at the first gap.
pub fn count_sequential_flyers(document: &XmlDocument, prefix: &str, start: i64) -> usize {
    let mut count = 0usize;
    let mut next = Some(start);
    while let Some(index) = next {
        if find_cut_setting(document, &flyer_token(prefix, index)).is_none() {
            break;
        }
        count += 1;
        next = index.checked_add(1);
    }
    count
}
