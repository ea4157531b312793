use clap::Parser;

/// Field dashboard backend for door-to-door household visits: loads a visit
/// spreadsheet, filters it and emits map markers, summary counts and exports.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The spreadsheet containing the household visit rows.
    /// Defaults to the field file of the campaign.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (default xlsx) The type of the input: 'xlsx' or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file with several worksheets, indicates the name of the
    /// worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (repeatable) Street/neighborhood names to keep. All streets when not specified.
    #[clap(short, long, value_parser)]
    pub neighborhood: Vec<String>,

    /// (repeatable) Visit statuses to keep: 'To visit', 'Visited', 'In progress'.
    /// All three are kept when not specified.
    #[clap(short, long, value_parser)]
    pub status: Vec<String>,

    /// Keep only the households flagged as priority.
    #[clap(long, takes_value = false)]
    pub priority_only: bool,

    /// Lower inclusive bound on the household member count. When only one bound is
    /// given, the other one defaults to the observed bound of the data.
    #[clap(long, value_parser)]
    pub min_members: Option<u32>,

    /// Upper inclusive bound on the household member count.
    #[clap(long, value_parser)]
    pub max_members: Option<u32>,

    /// (file path, 'stdout' or empty) Where to write the map document in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, 'default' or empty) If specified, the filtered subset is exported
    /// as a CSV file at the given location. 'default' uses the filtered-family
    /// download name.
    #[clap(short, long, value_parser)]
    pub export: Option<String>,

    /// Also emit the density heat layer points in the map document.
    #[clap(long, takes_value = false)]
    pub heatmap: bool,

    /// (file path) A reference map document in JSON format. If provided, canvassmap
    /// will check that the generated document matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
