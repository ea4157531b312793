// CSV export of the filtered subset.

use std::io::Write;

use snafu::prelude::*;

use canvassing::HouseholdRecord;

use crate::app::*;

/// Download name for the filtered-family export.
pub const EXPORT_FILE_NAME: &str = "familles_filtrees.csv";

pub fn write_subset_csv(path: &str, subset: &[HouseholdRecord]) -> CanvassResult<()> {
    let mut wtr = csv::Writer::from_path(path).context(WritingExportSnafu { path })?;
    write_records(&mut wtr, subset, path)?;
    wtr.flush().context(WritingOutputSnafu { path })?;
    Ok(())
}

fn write_records<W: Write>(
    wtr: &mut csv::Writer<W>,
    subset: &[HouseholdRecord],
    path: &str,
) -> CanvassResult<()> {
    wtr.write_record([
        COL_NAME,
        COL_FIRST_NAMES,
        COL_ADDRESS,
        COL_FAMILY_ID,
        COL_STREET,
        COL_LAT,
        COL_LON,
        COL_STATUS,
        COL_PRIORITY,
        COL_MEMBERS,
    ])
    .context(WritingExportSnafu { path })?;
    for r in subset.iter() {
        let record = [
            r.name.clone(),
            r.first_names.clone(),
            r.address.clone(),
            r.family_id.clone(),
            r.street.clone(),
            r.lat.to_string(),
            r.lon.to_string(),
            r.status.label().to_string(),
            r.priority.to_string(),
            r.members.to_string(),
        ];
        wtr.write_record(&record).context(WritingExportSnafu { path })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvassing::VisitStatus;

    #[test]
    fn writes_header_and_rows() {
        let subset = vec![HouseholdRecord {
            name: "Abdou".to_string(),
            first_names: "Ali".to_string(),
            address: "12 rue du marché".to_string(),
            family_id: "F-001".to_string(),
            street: "Mroni Be".to_string(),
            lat: -12.83,
            lon: 45.12,
            status: VisitStatus::Visited,
            priority: true,
            members: 4,
        }];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_records(&mut wtr, &subset, "test").unwrap();
        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Nom,Prénoms,Adresse,Famille_ID,Nom_rue,lat,lon,Visite,Prioritaire,Nombre_membres"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Abdou,Ali,12 rue du marché,F-001,Mroni Be,-12.83,45.12,Visited,true,4"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_subset_still_writes_the_header() {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_records(&mut wtr, &[], "test").unwrap();
        let bytes = wtr.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
