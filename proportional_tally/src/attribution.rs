// Classification of the votable numbers found in the vote stream.

use log::debug;

use crate::candidate::CandidateId;
use crate::config::*;
use crate::election::Election;

/// Where the votes for one votable number end up.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Attribution {
    /// The number is a party number: the votes are list votes.
    PartyList { party: VotableNumber },
    /// A credited candidate whose votes are only valid for the party list.
    CandidateLegend {
        party: VotableNumber,
        candidate: CandidateId,
    },
    /// A credited candidate receiving nominal votes.
    Nominal {
        party: VotableNumber,
        candidate: CandidateId,
    },
    /// A dismissed candidate of the party found in the leading digits.
    DismissedLegend {
        party: VotableNumber,
        candidate: VotableNumber,
    },
    /// A credited candidate not eligible for any credit. The votes are dropped.
    Ineligible { candidate: CandidateId },
    /// Nothing matches this number. The votes are dropped.
    Unresolved,
}

impl Attribution {
    /// True if the votes end up in no tally.
    pub fn is_discarded(&self) -> bool {
        matches!(self, Attribution::Ineligible { .. } | Attribution::Unresolved)
    }
}

/// Decides which aggregate receives the votes cast for a number.
///
/// In order: party numbers, then credited candidates, then dismissed
/// candidates under the party read from the leading digits of the number.
/// The election is not modified.
pub fn classify(election: &Election, code: VotableNumber) -> Attribution {
    if election.party(code).is_some() {
        return Attribution::PartyList { party: code };
    }

    if let Some(cid) = election.candidate_id(code) {
        let c = election.candidate_by_id(cid);
        let party = c.party_number();
        if c.is_legend_destination() {
            return Attribution::CandidateLegend {
                party,
                candidate: cid,
            };
        }
        if c.has_accepted_candidacy() && c.is_valid_destination() {
            return Attribution::Nominal {
                party,
                candidate: cid,
            };
        }
        debug!(
            "classify: candidate {} has destination {:?} and condition {}, dropping its votes",
            code,
            c.vote_destination(),
            c.candidacy_condition()
        );
        return Attribution::Ineligible { candidate: cid };
    }

    if let Some(party_number) = party_prefix(code) {
        if let Some(p) = election.party(party_number) {
            if p.has_dismissed_candidate(code) {
                return Attribution::DismissedLegend {
                    party: party_number,
                    candidate: code,
                };
            }
        }
    }
    Attribution::Unresolved
}

/// The party number encoded in the leading digits of a votable number.
///
/// Returns None for numbers shorter than a party number.
pub fn party_prefix(code: VotableNumber) -> Option<VotableNumber> {
    let digits = decimal_digits(code);
    if digits < PARTY_NUMBER_DIGITS {
        return None;
    }
    Some(code / 10u32.pow(digits - PARTY_NUMBER_DIGITS))
}

fn decimal_digits(mut x: u32) -> u32 {
    let mut digits = 1;
    while x >= 10 {
        x /= 10;
        digits += 1;
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use chrono::NaiveDate;

    fn record(number: u32, condition: u32, destination: &str) -> CandidateRecord {
        CandidateRecord {
            office_code: 6,
            number,
            ballot_name: format!("pessoa {}", number),
            party_number: 13,
            party_acronym: "PT".to_string(),
            party_name: "Partido dos Trabalhadores".to_string(),
            federation_number: NO_FEDERATION,
            birth_date: Some("01/01/1970".to_string()),
            gender_code: 4,
            turn_status: 4,
            vote_destination: destination.to_string(),
            candidacy_condition: condition,
        }
    }

    fn election() -> Election {
        let date = NaiveDate::from_ymd_opt(2022, 10, 2).unwrap();
        let mut e = Election::new(date, OfficeType::Federal);
        e.register_party(13, "PT", "Partido dos Trabalhadores");
        e.register_party(45, "PSDB", "Partido da Social Democracia Brasileira");
        e.register_credited_candidate(Candidate::new(record(1313, 2, VALID_DESTINATION), date));
        e.register_credited_candidate(Candidate::new(record(1399, 2, LEGEND_DESTINATION), date));
        e.register_credited_candidate(Candidate::new(record(1377, 2, "Anulado"), date));
        e.register_dismissed_candidate(Candidate::new(record(13555, 4, LEGEND_DESTINATION), date));
        e
    }

    #[test]
    fn prefixes() {
        assert_eq!(party_prefix(1313), Some(13));
        assert_eq!(party_prefix(45123), Some(45));
        assert_eq!(party_prefix(13), Some(13));
        assert_eq!(party_prefix(7), None);
        assert_eq!(party_prefix(0), None);
    }

    #[test]
    fn classification_order() {
        let e = election();
        assert_eq!(classify(&e, 13), Attribution::PartyList { party: 13 });
        assert!(matches!(
            classify(&e, 1313),
            Attribution::Nominal { party: 13, .. }
        ));
        assert!(matches!(
            classify(&e, 1399),
            Attribution::CandidateLegend { party: 13, .. }
        ));
        assert!(matches!(classify(&e, 1377), Attribution::Ineligible { .. }));
        assert!(classify(&e, 1377).is_discarded());
        assert_eq!(
            classify(&e, 13555),
            Attribution::DismissedLegend {
                party: 13,
                candidate: 13555
            }
        );
        // The party exists but does not know this dismissed candidate.
        assert_eq!(classify(&e, 45555), Attribution::Unresolved);
        assert_eq!(classify(&e, 99999), Attribution::Unresolved);
        assert_eq!(classify(&e, 5), Attribution::Unresolved);
    }
}
