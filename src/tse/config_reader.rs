use crate::tse::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

/// The optional JSON configuration of an election. Every field may also be
/// passed on the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct TseConfig {
    /// `--federal` or `--estadual`, with or without the dashes.
    pub office: Option<String>,
    #[serde(rename = "candidatesFilePath")]
    pub candidates_file_path: Option<String>,
    #[serde(rename = "votesFilePath")]
    pub votes_file_path: Option<String>,
    #[serde(rename = "electionDate")]
    pub election_date: Option<String>,
    #[serde(rename = "outputFilePath")]
    pub output_file_path: Option<String>,
}

pub fn read_config(path: &str) -> TseResult<TseConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: TseConfig = serde_json::from_str(&contents).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> TseResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
