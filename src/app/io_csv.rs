// Primitives for reading delimited visit files.

use log::debug;

use snafu::prelude::*;

use canvassing::RawVisitRow;

use crate::app::io_xlsx::parse_bool;
use crate::app::*;

pub fn read_visit_rows(path: &str) -> CanvassResult<Vec<RawVisitRow>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvOpenSnafu {})?;
    read_rows(rdr.into_records())
}

fn read_rows<R: std::io::Read>(
    mut records: csv::StringRecordsIntoIter<R>,
) -> CanvassResult<Vec<RawVisitRow>> {
    let header = match records.next() {
        Some(line_r) => line_r.context(CsvLineParseSnafu { lineno: 1usize })?,
        None => whatever!("Empty delimited file"),
    };
    let header_names: Vec<Option<String>> = header
        .iter()
        .map(|s| {
            if s.trim().is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        })
        .collect();
    let columns = ColumnMap::from_header(&header_names)?;
    debug!("read_rows: columns: {:?}", columns);

    let mut res: Vec<RawVisitRow> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        // The header occupies the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_rows: lineno: {:?} line: {:?}", lineno, line);
        let field = |pos: Option<usize>| -> Option<String> {
            pos.and_then(|i| line.get(i))
                .map(|s| s.to_string())
                .filter(|s| !s.is_empty())
        };
        let raw = RawVisitRow {
            name: field(Some(columns.name)),
            first_names: field(Some(columns.first_names)),
            address: field(Some(columns.address)),
            family_id: field(columns.family_id),
            street: field(columns.street),
            lat: field(Some(columns.lat)).and_then(|s| s.trim().parse::<f64>().ok()),
            lon: field(Some(columns.lon)).and_then(|s| s.trim().parse::<f64>().ok()),
            status: field(columns.status),
            priority: field(columns.priority).and_then(|s| parse_bool(&s)),
            members: field(columns.members).and_then(|s| s.trim().parse::<i64>().ok()),
        };
        res.push(raw);
    }
    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_of(content: &str) -> Vec<RawVisitRow> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());
        read_rows(rdr.into_records()).unwrap()
    }

    #[test]
    fn reads_full_rows() {
        let content = "\
Nom,Prénoms,Adresse,Famille_ID,Nom_rue,lat,lon,Visite,Prioritaire,Nombre_membres
Abdou,Ali,12 rue du marché,F-001,Mroni Be,-12.83,45.12,Visité,true,4
Bacar,Mariame,3 impasse des manguiers,F-002,,abc,45.13,,,
";
        let rows = rows_of(content);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lat, Some(-12.83));
        assert_eq!(rows[0].status, Some("Visité".to_string()));
        assert_eq!(rows[0].priority, Some(true));
        assert_eq!(rows[0].members, Some(4));
        // Empty and non-coercible fields come out as None.
        assert_eq!(rows[1].street, None);
        assert_eq!(rows[1].lat, None);
        assert_eq!(rows[1].status, None);
        assert_eq!(rows[1].members, None);
    }

    #[test]
    fn reads_minimal_header() {
        let content = "\
Nom,Prénoms,Adresse,lat,lon
Abdou,Ali,12 rue du marché,-12.83,45.12
";
        let rows = rows_of(content);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].family_id, None);
        assert_eq!(rows[0].lat, Some(-12.83));
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let content = "Nom,Prénoms,Adresse,lat\nAbdou,Ali,12 rue du marché,-12.83\n";
        let rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(content.as_bytes());
        let res = read_rows(rdr.into_records());
        assert!(matches!(res, Err(CanvassError::MissingColumn { .. })));
    }
}
