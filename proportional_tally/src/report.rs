// ******** Output data structures *********

use std::cmp::Ordering;

use log::{debug, warn};

use crate::candidate::{Candidate, CandidateId};
use crate::config::Gender;
use crate::election::Election;
use crate::party::Party;

/// A candidate and its position (starting at 1) in the most-voted ranking.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    pub position: usize,
    pub candidate: &'a Candidate,
}

/// A party and its position (starting at 1) in the party ranking.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct RankedParty<'a> {
    pub position: usize,
    pub party: &'a Party,
}

/// The best and the worst placed candidates of one party. They are the same
/// candidate when the party has a single one.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PartyExtremes<'a> {
    pub party: &'a Party,
    pub top: &'a Candidate,
    pub bottom: &'a Candidate,
}

/// Comparison of the actual outcome with a plain most-voted allocation of the seats.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MajoritarianPartition<'a> {
    /// Within the first `seats` positions of the ranking, but not elected.
    pub not_elected_in_top: Vec<RankedCandidate<'a>>,
    /// Elected, but ranked after the first `seats` positions.
    pub proportional_beneficiaries: Vec<RankedCandidate<'a>>,
}

/// A count and its share of some total, in percent.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Share {
    pub count: u64,
    pub percentage: f64,
}

impl Share {
    /// The share is 0% when the total is zero.
    pub fn of(count: u64, total: u64) -> Share {
        let percentage = if total == 0 {
            0.0
        } else {
            (count as f64) / (total as f64) * 100.0
        };
        Share { count, percentage }
    }
}

/// Variants are in increasing age order, which is also their index in `ALL`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum AgeBracket {
    Under30 = 0,
    From30To39,
    From40To49,
    From50To59,
    From60,
}

impl AgeBracket {
    pub const ALL: [AgeBracket; 5] = [
        AgeBracket::Under30,
        AgeBracket::From30To39,
        AgeBracket::From40To49,
        AgeBracket::From50To59,
        AgeBracket::From60,
    ];

    pub fn of(age: u32) -> AgeBracket {
        match age {
            0..=29 => AgeBracket::Under30,
            30..=39 => AgeBracket::From30To39,
            40..=49 => AgeBracket::From40To49,
            50..=59 => AgeBracket::From50To59,
            _ => AgeBracket::From60,
        }
    }
}

/// Elected candidates by age on the election day.
///
/// Percentages are relative to the number of elected candidates, including the
/// ones whose age is unknown. Those are only counted in `unknown`.
#[derive(PartialEq, Debug, Clone)]
pub struct AgeBreakdown {
    pub brackets: Vec<(AgeBracket, Share)>,
    pub unknown: u64,
    pub elected: u64,
}

/// Elected candidates by gender, relative to the number of seats.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct GenderBreakdown {
    pub female: Share,
    pub male: Share,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct VoteSummary {
    pub total: u64,
    pub nominal: Share,
    pub list: Share,
}

/// Most-voted order: more nominal votes first, then the younger candidate.
/// Candidates of unknown age come after the others on a tie.
pub fn candidate_order(a: &Candidate, b: &Candidate) -> Ordering {
    b.nominal_votes()
        .cmp(&a.nominal_votes())
        .then_with(|| (a.age().is_none(), a.age()).cmp(&(b.age().is_none(), b.age())))
}

/// Party order: more total votes first, then the smaller party number.
pub fn party_order(a: &Party, b: &Party) -> Ordering {
    b.total_votes()
        .cmp(&a.total_votes())
        .then_with(|| a.number().cmp(&b.number()))
}

/// The ranked views over a finalized election.
///
/// Both rankings are computed once at construction. All the sorts are stable:
/// on a complete tie, registration order is kept.
pub struct Report<'a> {
    election: &'a Election,
    ranking: Vec<CandidateId>,
    party_ranking: Vec<&'a Party>,
}

impl<'a> Report<'a> {
    pub fn new(election: &'a Election) -> Report<'a> {
        if !election.is_finalized() {
            warn!("Report requested on an election whose totals are not finalized");
        }
        let mut ranking: Vec<CandidateId> = (0..election.candidates().len())
            .map(CandidateId)
            .collect();
        ranking.sort_by(|a, b| {
            candidate_order(election.candidate_by_id(*a), election.candidate_by_id(*b))
        });

        let mut party_ranking: Vec<&Party> = election.parties().iter().collect();
        party_ranking.sort_by(|a, b| party_order(a, b));

        Report {
            election,
            ranking,
            party_ranking,
        }
    }

    pub fn election(&self) -> &'a Election {
        self.election
    }

    pub fn seats(&self) -> u32 {
        self.election.seats()
    }

    /// Every credited candidate, most voted first.
    pub fn candidate_ranking(&self) -> Vec<RankedCandidate<'a>> {
        let election = self.election;
        self.ranking
            .iter()
            .enumerate()
            .map(|(idx, cid)| RankedCandidate {
                position: idx + 1,
                candidate: election.candidate_by_id(*cid),
            })
            .collect()
    }

    /// The elected candidates, in ranking order.
    pub fn elected(&self) -> Vec<&'a Candidate> {
        self.candidate_ranking()
            .into_iter()
            .map(|rc| rc.candidate)
            .filter(|c| c.is_elected())
            .collect()
    }

    /// The first `seats` candidates of the ranking.
    pub fn most_voted(&self) -> Vec<RankedCandidate<'a>> {
        let mut res = self.candidate_ranking();
        res.truncate(self.seats() as usize);
        res
    }

    pub fn party_ranking(&self) -> Vec<RankedParty<'a>> {
        self.party_ranking
            .iter()
            .enumerate()
            .map(|(idx, p)| RankedParty {
                position: idx + 1,
                party: *p,
            })
            .collect()
    }

    pub fn majoritarian_partition(&self) -> MajoritarianPartition<'a> {
        let seats = self.seats() as usize;
        let mut not_elected_in_top: Vec<RankedCandidate> = Vec::new();
        let mut proportional_beneficiaries: Vec<RankedCandidate> = Vec::new();
        for rc in self.candidate_ranking() {
            let elected = rc.candidate.is_elected();
            if rc.position <= seats && !elected {
                not_elected_in_top.push(rc);
            } else if rc.position > seats && elected {
                proportional_beneficiaries.push(rc);
            }
        }
        debug!(
            "majoritarian_partition: {} not elected in top {}, {} beneficiaries",
            not_elected_in_top.len(),
            seats,
            proportional_beneficiaries.len()
        );
        MajoritarianPartition {
            not_elected_in_top,
            proportional_beneficiaries,
        }
    }

    /// First and last placed candidates of every party that has candidates.
    ///
    /// Ordered by the votes of the top candidate, then by party number.
    pub fn party_extremes(&self) -> Vec<PartyExtremes<'a>> {
        let election = self.election;
        let mut res: Vec<PartyExtremes> = Vec::new();
        for party in election.parties() {
            let mut candidates: Vec<&Candidate> = election.party_candidates(party).collect();
            candidates.sort_by(|a, b| candidate_order(a, b));
            if let (Some(top), Some(bottom)) = (candidates.first(), candidates.last()) {
                res.push(PartyExtremes {
                    party,
                    top: *top,
                    bottom: *bottom,
                });
            }
        }
        res.sort_by(|a, b| {
            b.top
                .nominal_votes()
                .cmp(&a.top.nominal_votes())
                .then_with(|| a.party.number().cmp(&b.party.number()))
        });
        res
    }

    pub fn age_breakdown(&self) -> AgeBreakdown {
        let mut counts = [0u64; 5];
        let mut unknown: u64 = 0;
        let mut elected: u64 = 0;
        for c in self.election.candidates().iter().filter(|c| c.is_elected()) {
            elected += 1;
            match c.age() {
                Some(age) => counts[AgeBracket::of(age) as usize] += 1,
                None => unknown += 1,
            }
        }
        AgeBreakdown {
            brackets: AgeBracket::ALL
                .iter()
                .zip(counts.iter())
                .map(|(b, count)| (*b, Share::of(*count, elected)))
                .collect(),
            unknown,
            elected,
        }
    }

    pub fn gender_breakdown(&self) -> GenderBreakdown {
        let seats = self.seats() as u64;
        let mut female: u64 = 0;
        let mut male: u64 = 0;
        for c in self.election.candidates().iter().filter(|c| c.is_elected()) {
            match c.gender() {
                Gender::Female => female += 1,
                Gender::Male => male += 1,
                Gender::Other(_) => {}
            }
        }
        GenderBreakdown {
            female: Share::of(female, seats),
            male: Share::of(male, seats),
        }
    }

    pub fn vote_summary(&self) -> VoteSummary {
        let total = self.election.total_votes();
        VoteSummary {
            total,
            nominal: Share::of(self.election.nominal_votes(), total),
            list: Share::of(self.election.list_votes(), total),
        }
    }
}
