use chrono::{Datelike, NaiveDate};
use log::warn;

use crate::config::*;

/// Index of a candidate inside the election arena.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct CandidateId(pub(crate) usize);

/// How a candidate row enters the election.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Admission {
    /// Accepted candidacy: the candidate may receive nominal votes.
    Credited,
    /// Rejected candidacy whose votes still count for the party list.
    Dismissed,
    /// Not part of the election tally at all.
    Rejected,
}

impl Admission {
    pub fn of(record: &CandidateRecord) -> Admission {
        if ACCEPTED_CANDIDACY_CONDITIONS.contains(&record.candidacy_condition) {
            Admission::Credited
        } else if destination_is(&record.vote_destination, LEGEND_DESTINATION) {
            Admission::Dismissed
        } else {
            Admission::Rejected
        }
    }
}

/// One candidacy in the election.
///
/// Everything except the nominal votes is fixed at construction.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Candidate {
    office_code: u32,
    number: VotableNumber,
    ballot_name: String,
    party_number: VotableNumber,
    party_acronym: String,
    federation_number: i32,
    birth_date: Option<NaiveDate>,
    gender: Gender,
    turn_status: u32,
    vote_destination: String,
    candidacy_condition: u32,
    nominal_votes: u64,
    age: Option<u32>,
}

impl Candidate {
    pub fn new(record: CandidateRecord, election_date: NaiveDate) -> Candidate {
        let birth_date = match record.birth_date.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(d) => Some(d),
                Err(e) => {
                    warn!(
                        "Candidate {} ({}): cannot parse birth date {:?}: {}",
                        record.ballot_name, record.number, s, e
                    );
                    None
                }
            },
            _ => {
                warn!(
                    "Candidate {} ({}): birth date is missing",
                    record.ballot_name, record.number
                );
                None
            }
        };
        let age = birth_date.and_then(|bd| age_at(bd, election_date));

        Candidate {
            office_code: record.office_code,
            number: record.number,
            ballot_name: record.ballot_name,
            party_number: record.party_number,
            party_acronym: record.party_acronym,
            federation_number: record.federation_number,
            birth_date,
            gender: Gender::from_code(record.gender_code),
            turn_status: record.turn_status,
            vote_destination: record.vote_destination,
            candidacy_condition: record.candidacy_condition,
            nominal_votes: 0,
            age,
        }
    }

    pub(crate) fn add_votes(&mut self, votes: u64) {
        self.nominal_votes += votes;
    }

    pub fn office_code(&self) -> u32 {
        self.office_code
    }

    pub fn number(&self) -> VotableNumber {
        self.number
    }

    pub fn ballot_name(&self) -> &str {
        &self.ballot_name
    }

    /// The ballot name, prefixed with `*` when the party runs inside a federation.
    pub fn display_name(&self) -> String {
        if self.in_federation() {
            format!("*{}", self.ballot_name)
        } else {
            self.ballot_name.clone()
        }
    }

    pub fn party_number(&self) -> VotableNumber {
        self.party_number
    }

    pub fn party_acronym(&self) -> &str {
        &self.party_acronym
    }

    pub fn federation_number(&self) -> i32 {
        self.federation_number
    }

    pub fn in_federation(&self) -> bool {
        self.federation_number != NO_FEDERATION
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn turn_status(&self) -> u32 {
        self.turn_status
    }

    pub fn vote_destination(&self) -> &str {
        &self.vote_destination
    }

    pub fn candidacy_condition(&self) -> u32 {
        self.candidacy_condition
    }

    pub fn nominal_votes(&self) -> u64 {
        self.nominal_votes
    }

    /// Age on the election day, if the birth date was known.
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn is_elected(&self) -> bool {
        ELECTED_TURN_STATUSES.contains(&self.turn_status)
    }

    pub fn has_accepted_candidacy(&self) -> bool {
        ACCEPTED_CANDIDACY_CONDITIONS.contains(&self.candidacy_condition)
    }

    /// Votes for this number only count toward the party list.
    pub fn is_legend_destination(&self) -> bool {
        destination_is(&self.vote_destination, LEGEND_DESTINATION)
    }

    pub fn is_valid_destination(&self) -> bool {
        destination_is(&self.vote_destination, VALID_DESTINATION)
    }
}

/// Age in whole years, borrowing a year when the birthday has not come yet.
fn age_at(birth_date: NaiveDate, election_date: NaiveDate) -> Option<u32> {
    let mut age = election_date.year() - birth_date.year();
    if (election_date.month(), election_date.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    if age < 0 {
        warn!(
            "Birth date {} is after the election date {}",
            birth_date, election_date
        );
        return None;
    }
    Some(age as u32)
}
