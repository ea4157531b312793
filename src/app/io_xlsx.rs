// Primitives for reading Excel visit files.

use log::debug;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use snafu::prelude::*;

use canvassing::RawVisitRow;

use crate::app::*;

pub fn read_visit_rows(
    path: &str,
    worksheet_name: Option<&str>,
) -> CanvassResult<Vec<RawVisitRow>> {
    let wrange = get_range(path, worksheet_name)?;
    let header = wrange.rows().next().context(EmptyExcelSnafu { path })?;
    debug!("read_visit_rows: header: {:?}", header);
    let header_names: Vec<Option<String>> = header
        .iter()
        .map(|dt| match dt {
            DataType::String(s) => Some(s.clone()),
            _ => None,
        })
        .collect();
    let columns = ColumnMap::from_header(&header_names)?;
    debug!("read_visit_rows: columns: {:?}", columns);

    let mut iter = wrange.rows();
    iter.next();
    let mut res: Vec<RawVisitRow> = Vec::new();
    for (idx, row) in iter.enumerate() {
        debug!("read_visit_rows: idx: {:?} row: {:?}", idx, row);
        let cell = |pos: Option<usize>| pos.and_then(|i| row.get(i));
        let raw = RawVisitRow {
            name: cell(Some(columns.name)).and_then(cell_text),
            first_names: cell(Some(columns.first_names)).and_then(cell_text),
            address: cell(Some(columns.address)).and_then(cell_text),
            family_id: cell(columns.family_id).and_then(cell_text),
            street: cell(columns.street).and_then(cell_text),
            lat: cell(Some(columns.lat)).and_then(cell_f64),
            lon: cell(Some(columns.lon)).and_then(cell_f64),
            status: cell(columns.status).and_then(cell_text),
            priority: cell(columns.priority).and_then(cell_bool),
            members: cell(columns.members).and_then(cell_i64),
        };
        res.push(raw);
    }
    Ok(res)
}

fn cell_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => Some(s.clone()),
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn cell_f64(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn cell_bool(cell: &DataType) -> Option<bool> {
    match cell {
        DataType::Bool(b) => Some(*b),
        DataType::Int(i) => Some(*i != 0),
        DataType::Float(f) => Some(*f != 0.0),
        DataType::String(s) => parse_bool(s),
        _ => None,
    }
}

fn cell_i64(cell: &DataType) -> Option<i64> {
    match cell {
        DataType::Int(i) => Some(*i),
        // Spreadsheets store integers as floats; anything non-integral or
        // non-finite is a failed coercion, not a count.
        DataType::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
        DataType::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Boolean labels found in the field files, both spreadsheet-style and French.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim() {
        "true" | "True" | "TRUE" | "VRAI" | "Oui" | "oui" | "1" => Some(true),
        "false" | "False" | "FALSE" | "FAUX" | "Non" | "non" | "0" => Some(false),
        _ => None,
    }
}

fn get_range(
    path: &str,
    worksheet_name_o: Option<&str>,
) -> CanvassResult<calamine::Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet_name_o);
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(worksheet_name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?;
        return Ok(wrange);
    }
    let all_worksheets = workbook.worksheets();
    match all_worksheets.as_slice() {
        [] => EmptyExcelSnafu { path }.fail(),
        [(_, wrange)] => Ok(wrange.clone()),
        [(first_name, wrange), ..] => {
            debug!(
                "get_range: several worksheets, using the first one {:?}",
                first_name
            );
            Ok(wrange.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_cells() {
        assert_eq!(cell_f64(&DataType::Float(45.12)), Some(45.12));
        assert_eq!(cell_f64(&DataType::String(" -12.83 ".to_string())), Some(-12.83));
        assert_eq!(cell_f64(&DataType::String("n/a".to_string())), None);
        assert_eq!(cell_f64(&DataType::Empty), None);

        assert_eq!(cell_bool(&DataType::Bool(true)), Some(true));
        assert_eq!(cell_bool(&DataType::String("VRAI".to_string())), Some(true));
        assert_eq!(cell_bool(&DataType::String("peut-être".to_string())), None);

        assert_eq!(cell_i64(&DataType::Float(4.0)), Some(4));
        assert_eq!(cell_i64(&DataType::Float(4.5)), None);
        assert_eq!(cell_i64(&DataType::Float(f64::NAN)), None);
        assert_eq!(cell_i64(&DataType::String("quatre".to_string())), None);

        assert_eq!(cell_text(&DataType::Empty), None);
        assert_eq!(
            cell_text(&DataType::String("Mroni Be".to_string())),
            Some("Mroni Be".to_string())
        );
    }
}
