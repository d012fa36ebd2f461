use clap::Parser;

/// This is a tabulation program for open-list proportional elections.
///
/// Usage:
/// deputies --federal <candidates file> <votes file> <dd/mm/yyyy>
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Tabulates the election for the lower house (office code 6).
    #[clap(long, takes_value = false, conflicts_with = "estadual")]
    pub federal: bool,

    /// Tabulates the election for the state assembly (office code 7).
    #[clap(long, takes_value = false)]
    pub estadual: bool,

    /// (file path) The candidates file (';'-separated, ISO-8859-1).
    #[clap(value_parser)]
    pub candidates: Option<String>,

    /// (file path) The votes file (';'-separated, ISO-8859-1).
    #[clap(value_parser)]
    pub votes: Option<String>,

    /// (dd/mm/yyyy) The date of the election, used to compute the ages of the candidates.
    #[clap(value_parser)]
    pub date: Option<String>,

    /// (file path, optional) A JSON file with the settings of the election. Options given
    /// on the command line take precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the election will be written
    /// in JSON format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the summary of an election in JSON format. If
    /// provided, deputies will check that the tabulated summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
