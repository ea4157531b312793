use log::{info, warn};

use canvassing::*;
use snafu::{prelude::*, Snafu};

use std::collections::HashMap;
use std::fs;

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod export;
pub mod io_csv;
pub mod io_xlsx;
pub mod map_json;

/// The field file of the original dashboard, used when no path is given.
pub const DEFAULT_DATA_PATH: &str = "resultats_rues_mayotte.xlsx";

#[derive(Debug, Snafu)]
pub enum CanvassError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Workbook {path} has no usable worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Missing required column {name}"))]
    MissingColumn { name: String },
    #[snafu(display("Error opening delimited file"))]
    CsvOpen { source: csv::Error },
    #[snafu(display("Error parsing line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error reading source {path}"))]
    ReadingSource {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing output {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing export {path}"))]
    WritingExport { source: csv::Error, path: String },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type CanvassResult<T> = Result<T, CanvassError>;

// Column contract of the field spreadsheets.
pub const COL_NAME: &str = "Nom";
pub const COL_FIRST_NAMES: &str = "Prénoms";
pub const COL_ADDRESS: &str = "Adresse";
pub const COL_FAMILY_ID: &str = "Famille_ID";
pub const COL_STREET: &str = "Nom_rue";
pub const COL_LAT: &str = "lat";
pub const COL_LON: &str = "lon";
pub const COL_STATUS: &str = "Visite";
pub const COL_PRIORITY: &str = "Prioritaire";
pub const COL_MEMBERS: &str = "Nombre_membres";

/// Positions of the known columns in a source header.
///
/// The identity and coordinate columns are required; the rest falls back to
/// the documented defaults when the column is absent from the file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ColumnMap {
    pub name: usize,
    pub first_names: usize,
    pub address: usize,
    pub lat: usize,
    pub lon: usize,
    pub family_id: Option<usize>,
    pub street: Option<usize>,
    pub status: Option<usize>,
    pub priority: Option<usize>,
    pub members: Option<usize>,
}

impl ColumnMap {
    pub fn from_header(header: &[Option<String>]) -> CanvassResult<ColumnMap> {
        let positions: HashMap<String, usize> = header
            .iter()
            .enumerate()
            .filter_map(|(idx, x)| x.as_ref().map(|s| (s.trim().to_string(), idx)))
            .collect();
        let required = |name: &str| -> CanvassResult<usize> {
            positions
                .get(name)
                .cloned()
                .context(MissingColumnSnafu { name })
        };
        Ok(ColumnMap {
            name: required(COL_NAME)?,
            first_names: required(COL_FIRST_NAMES)?,
            address: required(COL_ADDRESS)?,
            lat: required(COL_LAT)?,
            lon: required(COL_LON)?,
            family_id: positions.get(COL_FAMILY_ID).cloned(),
            street: positions.get(COL_STREET).cloned(),
            status: positions.get(COL_STATUS).cloned(),
            priority: positions.get(COL_PRIORITY).cloned(),
            members: positions.get(COL_MEMBERS).cloned(),
        })
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SourceFormat {
    Xlsx,
    Csv,
}

impl SourceFormat {
    pub fn from_args(args: &Args) -> CanvassResult<SourceFormat> {
        match args.input_type.as_deref() {
            None | Some("xlsx") => Ok(SourceFormat::Xlsx),
            Some("csv") => Ok(SourceFormat::Csv),
            Some(x) => whatever!("Input type not implemented {:?}", x),
        }
    }
}

/// Memoized load keyed by the content digest of the source file.
///
/// The canonical set is derived once per source content and reused across
/// interactions; editing the file on disk invalidates the entry on the next
/// load call. A source that cannot be read at all is a fatal error, with no
/// partial result.
pub struct SourceCache {
    entry: Option<(String, CanonicalSet)>,
}

impl SourceCache {
    pub fn new() -> SourceCache {
        SourceCache { entry: None }
    }

    pub fn load(
        &mut self,
        path: &str,
        format: SourceFormat,
        worksheet_name: Option<&str>,
    ) -> CanvassResult<&CanonicalSet> {
        let bytes = fs::read(path).context(ReadingSourceSnafu { path })?;
        let digest = sha256::digest(bytes.as_slice());
        let fresh = matches!(&self.entry, Some((d, _)) if *d == digest);
        if !fresh {
            info!("load: reading source {} ({} bytes)", path, bytes.len());
            let rows = match format {
                SourceFormat::Xlsx => io_xlsx::read_visit_rows(path, worksheet_name)?,
                SourceFormat::Csv => io_csv::read_visit_rows(path)?,
            };
            let canonical = build_canonical(&rows);
            if canonical.dropped_rows > 0 {
                warn!(
                    "load: {} rows dropped for missing or non-numeric coordinates",
                    canonical.dropped_rows
                );
            }
            self.entry = Some((digest, canonical));
        }
        match &self.entry {
            Some((_, canonical)) => Ok(canonical),
            None => whatever!("load: cache cannot be empty after a load"),
        }
    }
}

fn criteria_from_args(args: &Args, records: &[HouseholdRecord]) -> FilterCriteria {
    let mut builder = CriteriaBuilder::new().priority_only(args.priority_only);
    if !args.neighborhood.is_empty() {
        builder = builder.neighborhoods(&args.neighborhood);
    }
    if !args.status.is_empty() {
        let statuses: Vec<VisitStatus> = args.status.iter().map(|s| VisitStatus::parse(s)).collect();
        builder = builder.statuses(&statuses);
    }
    if args.min_members.is_some() || args.max_members.is_some() {
        // A single bound is completed with the observed bound of the data.
        let (data_min, data_max) = member_bounds(records);
        let min = args.min_members.unwrap_or(data_min);
        let max = args.max_members.unwrap_or(data_max);
        builder = builder.members_between(min, max);
    }
    builder.build()
}

fn check_reference(path: &str, pretty: &str) -> CanvassResult<()> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let reference: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let pretty_reference = serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty {
        warn!("Found differences with the reference document");
        print_diff(pretty_reference.as_str(), pretty, "\n");
        whatever!("Difference detected between generated map document and reference")
    }
    Ok(())
}

pub fn run(args: &Args) -> CanvassResult<()> {
    let data_path = args
        .data
        .clone()
        .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
    let format = SourceFormat::from_args(args)?;

    let mut cache = SourceCache::new();
    let canonical = cache.load(&data_path, format, args.excel_worksheet_name.as_deref())?;

    let criteria = criteria_from_args(args, &canonical.records);
    info!("run: criteria: {:?}", criteria);

    let outcome = apply_criteria(&canonical.records, &criteria);
    info!(
        "run: {} households visible, {} visited, {} remaining",
        outcome.stats.total, outcome.stats.visited, outcome.stats.remaining
    );

    let doc = map_json::build_map_doc(&outcome, canonical.dropped_rows, args.heatmap);
    let pretty = serde_json::to_string_pretty(&doc).context(ParsingJsonSnafu {})?;
    match args.out.as_deref() {
        Some("stdout") | None => println!("{}", pretty),
        Some(path) => fs::write(path, &pretty).context(WritingOutputSnafu { path })?,
    }

    if let Some(path) = args.export.as_deref() {
        let path = if path == "default" {
            export::EXPORT_FILE_NAME
        } else {
            path
        };
        export::write_subset_csv(path, &outcome.subset)?;
        info!(
            "run: exported {} households to {}",
            outcome.subset.len(),
            path
        );
    }

    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, &pretty)?;
    }

    Ok(())
}
