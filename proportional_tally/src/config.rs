// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use chrono::NaiveDate;

/// A party number, a candidate number or any other votable number printed on
/// the electronic ballot.
pub type VotableNumber = u32;

/// The candidacy is counted as elected when the turn status is one of these codes.
pub const ELECTED_TURN_STATUSES: [u32; 2] = [2, 3];

/// Candidacy conditions under which a candidate may receive nominal votes.
pub const ACCEPTED_CANDIDACY_CONDITIONS: [u32; 2] = [2, 16];

/// Vote destination of a candidate whose votes are only valid for the party list.
pub const LEGEND_DESTINATION: &str = "Válido (legenda)";

/// Vote destination of a candidate whose votes are valid nominal votes.
pub const VALID_DESTINATION: &str = "Válido";

/// Party numbers occupy the leading digits of every candidate number.
///
/// This is a positional convention of the national numbering scheme (two digits
/// for the party, followed by the candidate's own digits). It must be checked
/// again before reusing the engine for another jurisdiction.
pub const PARTY_NUMBER_DIGITS: u32 = 2;

/// Federation number of a candidate whose party runs alone.
pub const NO_FEDERATION: i32 = -1;

/// Votable numbers of blank and null votes. The ingestion layer removes them
/// from the vote stream.
pub const BLANK_AND_NULL_VOTES: [VotableNumber; 4] = [95, 96, 97, 98];

/// Format of the birth dates and of the election date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// The office contested in an election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum OfficeType {
    /// Lower house of the national congress (code 6).
    Federal,
    /// State legislative assembly (code 7).
    State,
}

impl OfficeType {
    /// The office code used in the official data files.
    pub fn code(&self) -> u32 {
        match self {
            OfficeType::Federal => 6,
            OfficeType::State => 7,
        }
    }

    /// Parses the selector given on the command line (`--federal` or `--estadual`).
    /// The leading dashes are optional.
    pub fn from_selector(selector: &str) -> Result<OfficeType, TallyErrors> {
        match selector.trim_start_matches('-') {
            "federal" => Ok(OfficeType::Federal),
            "estadual" => Ok(OfficeType::State),
            _ => Err(TallyErrors::UnknownOffice(selector.to_string())),
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            OfficeType::Federal => "--federal",
            OfficeType::State => "--estadual",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Gender {
    Male,
    Female,
    /// Any other code found in the data, kept verbatim.
    Other(u32),
}

impl Gender {
    pub fn from_code(code: u32) -> Gender {
        match code {
            2 => Gender::Male,
            4 => Gender::Female,
            x => Gender::Other(x),
        }
    }
}

/// One candidate row, already tokenized and typed by the ingestion layer.
///
/// Numeric fields that could not be parsed are expected to be zero.
/// The birth date is kept raw: the candidate computes its age from it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CandidateRecord {
    pub office_code: u32,
    pub number: VotableNumber,
    pub ballot_name: String,
    pub party_number: VotableNumber,
    pub party_acronym: String,
    pub party_name: String,
    pub federation_number: i32,
    pub birth_date: Option<String>,
    pub gender_code: u32,
    pub turn_status: u32,
    pub vote_destination: String,
    pub candidacy_condition: u32,
}

/// Parses an election date in the `dd/mm/yyyy` format.
pub fn parse_election_date(s: &str) -> Result<NaiveDate, TallyErrors> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TallyErrors::InvalidDate(s.to_string()))
}

// Vote destinations are compared without regard to case.
pub(crate) fn destination_is(destination: &str, sentinel: &str) -> bool {
    destination.trim().to_lowercase() == sentinel.to_lowercase()
}

/// Errors raised by the few fallible helpers of this crate.
///
/// Registration, attribution and ranking never fail.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum TallyErrors {
    UnknownOffice(String),
    InvalidDate(String),
}

impl Error for TallyErrors {}

impl Display for TallyErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TallyErrors::UnknownOffice(s) => {
                write!(f, "unknown office {:?} (expected --federal or --estadual)", s)
            }
            TallyErrors::InvalidDate(s) => write!(f, "invalid date {:?} (expected dd/mm/yyyy)", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn office_selectors() {
        assert_eq!(OfficeType::from_selector("--federal"), Ok(OfficeType::Federal));
        assert_eq!(OfficeType::from_selector("estadual"), Ok(OfficeType::State));
        assert_eq!(OfficeType::State.code(), 7);
        assert!(OfficeType::from_selector("--municipal").is_err());
    }

    #[test]
    fn election_dates() {
        let d = parse_election_date("02/10/2022").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2022, 10, 2).unwrap());
        assert_eq!(
            parse_election_date("2022-10-02"),
            Err(TallyErrors::InvalidDate("2022-10-02".to_string()))
        );
    }

    #[test]
    fn destinations_ignore_case() {
        assert!(destination_is("VÁLIDO (LEGENDA)", LEGEND_DESTINATION));
        assert!(destination_is("válido", VALID_DESTINATION));
        assert!(!destination_is("Válido (legenda)", VALID_DESTINATION));
        assert!(!destination_is("Anulado", VALID_DESTINATION));
    }
}
