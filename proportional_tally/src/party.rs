use std::collections::{BTreeMap, HashMap};

use crate::candidate::{Candidate, CandidateId};
use crate::config::VotableNumber;

/// A political party taking part in the election.
///
/// The credited candidates are stored as ids into the election arena: the
/// party never owns them. Dismissed candidates only exist in their party.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Party {
    number: VotableNumber,
    acronym: String,
    name: String,
    // In registration order.
    candidates: Vec<CandidateId>,
    candidate_numbers: HashMap<VotableNumber, CandidateId>,
    dismissed_candidates: BTreeMap<VotableNumber, Candidate>,
    elected_count: u32,
    // "votos de legenda"
    list_votes: u64,
    nominal_votes: u64,
    total_votes: u64,
}

impl Party {
    pub fn new(number: VotableNumber, acronym: &str, name: &str) -> Party {
        Party {
            number,
            acronym: acronym.to_string(),
            name: name.to_string(),
            candidates: Vec::new(),
            candidate_numbers: HashMap::new(),
            dismissed_candidates: BTreeMap::new(),
            elected_count: 0,
            list_votes: 0,
            nominal_votes: 0,
            total_votes: 0,
        }
    }

    /// Returns false if a candidate with this number is already known to the
    /// party, credited or dismissed.
    pub(crate) fn add_candidate(&mut self, cid: CandidateId, candidate: &Candidate) -> bool {
        let number = candidate.number();
        if self.knows_candidate(number) {
            return false;
        }
        self.candidate_numbers.insert(number, cid);
        self.candidates.push(cid);
        if candidate.is_elected() {
            self.elected_count += 1;
        }
        true
    }

    pub(crate) fn add_dismissed_candidate(&mut self, candidate: Candidate) -> bool {
        let number = candidate.number();
        if self.knows_candidate(number) {
            return false;
        }
        self.dismissed_candidates.insert(number, candidate);
        true
    }

    fn knows_candidate(&self, number: VotableNumber) -> bool {
        self.candidate_numbers.contains_key(&number)
            || self.dismissed_candidates.contains_key(&number)
    }

    pub(crate) fn add_list_votes(&mut self, votes: u64) {
        self.list_votes += votes;
    }

    pub(crate) fn add_nominal_votes(&mut self, votes: u64) {
        self.nominal_votes += votes;
    }

    pub(crate) fn close(&mut self) {
        self.total_votes = self.list_votes + self.nominal_votes;
    }

    pub fn number(&self) -> VotableNumber {
        self.number
    }

    pub fn acronym(&self) -> &str {
        &self.acronym
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ids of the credited candidates, in registration order.
    pub fn candidate_ids(&self) -> &[CandidateId] {
        &self.candidates
    }

    pub fn candidate_id(&self, number: VotableNumber) -> Option<CandidateId> {
        self.candidate_numbers.get(&number).copied()
    }

    pub fn number_of_candidates(&self) -> usize {
        self.candidates.len()
    }

    pub fn has_dismissed_candidate(&self, number: VotableNumber) -> bool {
        self.dismissed_candidates.contains_key(&number)
    }

    pub fn dismissed_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.dismissed_candidates.values()
    }

    pub fn elected_count(&self) -> u32 {
        self.elected_count
    }

    pub fn list_votes(&self) -> u64 {
        self.list_votes
    }

    pub fn nominal_votes(&self) -> u64 {
        self.nominal_votes
    }

    /// List votes plus nominal votes, as computed by the last finalization.
    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::*;
    use chrono::NaiveDate;

    fn candidate(number: u32, turn_status: u32) -> Candidate {
        let record = CandidateRecord {
            office_code: 6,
            number,
            ballot_name: format!("pessoa {}", number),
            party_number: 13,
            party_acronym: "PT".to_string(),
            party_name: "Partido dos Trabalhadores".to_string(),
            federation_number: NO_FEDERATION,
            birth_date: None,
            gender_code: 4,
            turn_status,
            vote_destination: VALID_DESTINATION.to_string(),
            candidacy_condition: 2,
        };
        Candidate::new(record, NaiveDate::from_ymd_opt(2022, 10, 2).unwrap())
    }

    #[test]
    fn registration_is_idempotent() {
        let mut p = Party::new(13, "PT", "Partido dos Trabalhadores");
        let c = candidate(1313, 2);
        assert!(p.add_candidate(CandidateId(0), &c));
        assert!(!p.add_candidate(CandidateId(0), &c));
        assert_eq!(p.number_of_candidates(), 1);
        assert_eq!(p.elected_count(), 1);
        assert_eq!(p.candidate_id(1313), Some(CandidateId(0)));
    }

    #[test]
    fn credited_and_dismissed_are_disjoint() {
        let mut p = Party::new(13, "PT", "Partido dos Trabalhadores");
        assert!(p.add_candidate(CandidateId(0), &candidate(1313, 4)));
        assert!(!p.add_dismissed_candidate(candidate(1313, 4)));
        assert!(p.add_dismissed_candidate(candidate(1322, 4)));
        assert!(!p.add_candidate(CandidateId(1), &candidate(1322, 4)));
        assert!(!p.add_dismissed_candidate(candidate(1322, 4)));

        assert!(p.has_dismissed_candidate(1322));
        assert!(!p.has_dismissed_candidate(1313));
        assert_eq!(p.number_of_candidates(), 1);
        assert_eq!(p.elected_count(), 0);
    }

    #[test]
    fn close_sums_the_tallies() {
        let mut p = Party::new(13, "PT", "Partido dos Trabalhadores");
        p.add_list_votes(20);
        p.add_nominal_votes(100);
        assert_eq!(p.total_votes(), 0);
        p.close();
        assert_eq!(p.total_votes(), 120);
        p.add_list_votes(5);
        p.close();
        assert_eq!(p.total_votes(), p.list_votes() + p.nominal_votes());
    }
}
