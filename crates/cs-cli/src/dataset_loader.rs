use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use cs_core::{CutField, CutStackError, DataRow, Dataset, Scalar};
use csv::ReaderBuilder;

use crate::map_dataset_read;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads the parameter table. The first row is a header; columns A:E map to
/// the cut fields in schema order.
pub(crate) fn load_dataset(path: &Path) -> Result<Dataset, CutStackError> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = if extension == "csv" {
        read_csv_table(path)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_workbook_table(path)?
    } else {
        return Err(CutStackError::new(
            "DATASET_FORMAT",
            format!(
                "Unsupported dataset extension \"{}\" for {}; use .csv or a spreadsheet.",
                extension,
                path.display()
            ),
        ));
    };

    let dataset = dataset_from_table(table);
    if dataset.is_empty() {
        return Err(CutStackError::new(
            "DATASET_EMPTY",
            format!("No data rows below the header in {}", path.display()),
        ));
    }
    Ok(dataset)
}

pub(crate) fn dataset_from_table(table: Vec<Vec<Scalar>>) -> Dataset {
    Dataset::new(
        table
            .into_iter()
            .skip(1)
            .map(|cells| DataRow::from_cells(cells.into_iter().take(CutField::ALL.len())))
            .filter(|row| !row.is_blank())
            .collect(),
    )
}

fn read_csv_table(path: &Path) -> Result<Vec<Vec<Scalar>>, CutStackError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(map_dataset_read)?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record.map_err(map_dataset_read)?;
        table.push(record.iter().map(Scalar::from_cell_text).collect());
    }
    Ok(table)
}

fn read_workbook_table(path: &Path) -> Result<Vec<Vec<Scalar>>, CutStackError> {
    let mut workbook = open_workbook_auto(path).map_err(map_dataset_read)?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(CutStackError::new(
            "DATASET_EMPTY",
            format!("Workbook has no sheets: {}", path.display()),
        ));
    };
    let range = workbook.worksheet_range(&sheet).map_err(map_dataset_read)?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(scalar_from_cell).collect())
        .collect();
    Ok(pin_to_sheet_origin(range.start(), rows))
}

/// A worksheet range begins at its first used cell; pads leading rows and
/// columns back in so cells keep their absolute A1 positions.
fn pin_to_sheet_origin(start: Option<(u32, u32)>, rows: Vec<Vec<Scalar>>) -> Vec<Vec<Scalar>> {
    let (first_row, first_column) = start.unwrap_or((0, 0));
    let leading_rows = (0..first_row).map(|_| Vec::<Scalar>::new());
    let shifted = rows.into_iter().map(|cells| {
        std::iter::repeat(Scalar::Empty)
            .take(first_column as usize)
            .chain(cells)
            .collect::<Vec<_>>()
    });
    leading_rows.chain(shifted).collect()
}

fn scalar_from_cell(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Empty,
        Data::Int(value) => Scalar::Number(*value as f64),
        Data::Float(value) => Scalar::Number(*value),
        Data::Bool(value) => Scalar::Bool(*value),
        Data::String(text) => Scalar::from_cell_text(text),
        _ => Scalar::Text(cell.to_string()),
    }
}
