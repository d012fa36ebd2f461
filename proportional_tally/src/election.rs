use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::attribution::{classify, Attribution};
use crate::candidate::{Admission, Candidate, CandidateId};
use crate::config::*;
use crate::party::Party;

/// One election for one office: the parties, their candidates and the tallies.
///
/// The election owns every credited candidate. Parties refer to them through
/// their `CandidateId`, so a vote credited to a candidate is visible from both
/// the election and the party.
///
/// The protocol has two phases: registrations and votes are accumulated first,
/// then `finalize_totals` computes the totals of the election and of every party.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Election {
    date: NaiveDate,
    office: OfficeType,
    // == number of elected candidates
    seats: u32,
    list_votes: u64,
    nominal_votes: u64,
    total_votes: u64,
    finalized: bool,
    // Credited candidates, in registration order.
    candidates: Vec<Candidate>,
    candidate_numbers: HashMap<VotableNumber, CandidateId>,
    // Parties, in registration order.
    parties: Vec<Party>,
    party_numbers: HashMap<VotableNumber, usize>,
}

impl Election {
    pub fn new(date: NaiveDate, office: OfficeType) -> Election {
        Election {
            date,
            office,
            seats: 0,
            list_votes: 0,
            nominal_votes: 0,
            total_votes: 0,
            finalized: false,
            candidates: Vec::new(),
            candidate_numbers: HashMap::new(),
            parties: Vec::new(),
            party_numbers: HashMap::new(),
        }
    }

    // ******** Registration *********

    /// Registers a party. Returns false (and changes nothing) if the number is
    /// already registered.
    pub fn register_party(&mut self, number: VotableNumber, acronym: &str, name: &str) -> bool {
        if self.party_numbers.contains_key(&number) {
            return false;
        }
        self.party_numbers.insert(number, self.parties.len());
        self.parties.push(Party::new(number, acronym, name));
        true
    }

    /// Registers a candidate eligible to receive nominal votes.
    ///
    /// The candidate is indexed both by the election and by its party. If its
    /// party was never registered, a party is created from the acronym carried
    /// by the candidate. Returns false if the number is already known.
    pub fn register_credited_candidate(&mut self, candidate: Candidate) -> bool {
        let number = candidate.number();
        if self.candidate_numbers.contains_key(&number) {
            debug!("register_credited_candidate: {} already registered", number);
            return false;
        }
        let cid = CandidateId(self.candidates.len());
        let party = self.party_for(&candidate);
        if !party.add_candidate(cid, &candidate) {
            debug!(
                "register_credited_candidate: {} already known to party {}",
                number,
                party.number()
            );
            return false;
        }
        if candidate.is_elected() {
            self.seats += 1;
        }
        self.candidate_numbers.insert(number, cid);
        self.candidates.push(candidate);
        self.finalized = false;
        true
    }

    /// Registers a candidate whose candidacy was rejected but whose votes still
    /// go to the party list. Returns false if the number is already known.
    pub fn register_dismissed_candidate(&mut self, candidate: Candidate) -> bool {
        let number = candidate.number();
        if self.candidate_numbers.contains_key(&number) {
            debug!(
                "register_dismissed_candidate: {} is already a credited candidate",
                number
            );
            return false;
        }
        self.party_for(&candidate).add_dismissed_candidate(candidate)
    }

    /// Registers one row of the candidate file.
    ///
    /// The party of the row is always registered. The candidate itself is only
    /// kept if it runs for the office of this election, as credited or dismissed
    /// depending on its candidacy.
    pub fn ingest_candidate(&mut self, record: CandidateRecord) -> Admission {
        self.register_party(record.party_number, &record.party_acronym, &record.party_name);
        if record.office_code != self.office.code() {
            return Admission::Rejected;
        }
        let admission = Admission::of(&record);
        match admission {
            Admission::Credited => {
                let c = Candidate::new(record, self.date);
                self.register_credited_candidate(c);
            }
            Admission::Dismissed => {
                let c = Candidate::new(record, self.date);
                self.register_dismissed_candidate(c);
            }
            Admission::Rejected => {
                debug!(
                    "ingest_candidate: skipping {} ({}), condition {}, destination {:?}",
                    record.ballot_name,
                    record.number,
                    record.candidacy_condition,
                    record.vote_destination
                );
            }
        }
        admission
    }

    fn party_for(&mut self, candidate: &Candidate) -> &mut Party {
        let number = candidate.party_number();
        if !self.party_numbers.contains_key(&number) {
            warn!(
                "Candidate {} refers to unregistered party {}, registering it",
                candidate.number(),
                number
            );
            self.register_party(number, candidate.party_acronym(), "");
        }
        let idx = self.party_numbers[&number];
        &mut self.parties[idx]
    }

    // ******** Votes *********

    /// Credits the votes cast for a votable number.
    ///
    /// Blank and null votes must have been removed by the caller. Numbers that
    /// cannot be attributed are dropped without error.
    pub fn attribute_vote(&mut self, code: VotableNumber, votes: u64) -> Attribution {
        let attribution = classify(self, code);
        match attribution {
            Attribution::PartyList { party }
            | Attribution::CandidateLegend { party, .. }
            | Attribution::DismissedLegend { party, .. } => {
                let idx = self.party_numbers[&party];
                self.parties[idx].add_list_votes(votes);
                self.list_votes += votes;
            }
            Attribution::Nominal { party, candidate } => {
                self.candidates[candidate.0].add_votes(votes);
                let idx = self.party_numbers[&party];
                self.parties[idx].add_nominal_votes(votes);
                self.nominal_votes += votes;
            }
            Attribution::Ineligible { .. } | Attribution::Unresolved => {
                debug!("attribute_vote: dropping {} votes for {}", votes, code);
            }
        }
        if self.finalized && !attribution.is_discarded() {
            warn!("attribute_vote: votes added after finalization, totals are stale");
            self.finalized = false;
        }
        attribution
    }

    /// Computes the total votes of the election and of every party.
    ///
    /// Must be called once the whole vote stream has been attributed.
    pub fn finalize_totals(&mut self) {
        self.total_votes = self.list_votes + self.nominal_votes;
        for p in self.parties.iter_mut() {
            p.close();
        }
        self.finalized = true;
        info!(
            "Finalized: {} seats, {} parties, {} candidates, {} valid votes ({} nominal, {} list)",
            self.seats,
            self.parties.len(),
            self.candidates.len(),
            self.total_votes,
            self.nominal_votes,
            self.list_votes
        );
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    // ******** Accessors *********

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn office(&self) -> OfficeType {
        self.office
    }

    pub fn seats(&self) -> u32 {
        self.seats
    }

    pub fn list_votes(&self) -> u64 {
        self.list_votes
    }

    pub fn nominal_votes(&self) -> u64 {
        self.nominal_votes
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn candidate_id(&self, number: VotableNumber) -> Option<CandidateId> {
        self.candidate_numbers.get(&number).copied()
    }

    pub fn candidate(&self, number: VotableNumber) -> Option<&Candidate> {
        self.candidate_id(number).map(|cid| self.candidate_by_id(cid))
    }

    pub fn candidate_by_id(&self, cid: CandidateId) -> &Candidate {
        &self.candidates[cid.0]
    }

    /// All the credited candidates, in registration order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn party(&self, number: VotableNumber) -> Option<&Party> {
        self.party_numbers.get(&number).map(|idx| &self.parties[*idx])
    }

    /// All the parties, in registration order.
    pub fn parties(&self) -> &[Party] {
        &self.parties
    }

    /// The credited candidates of a party, in registration order.
    pub fn party_candidates<'a>(&'a self, party: &'a Party) -> impl Iterator<Item = &'a Candidate> {
        party
            .candidate_ids()
            .iter()
            .map(move |cid| self.candidate_by_id(*cid))
    }
}
