/*!
Vote attribution and outcome ranking for open-list proportional elections.

An [`Election`] collects the parties and the candidates of one office, then
receives the vote stream as `(votable number, votes)` pairs. Each number is
credited to a party list, to a candidate (and its party) or dropped, following
the rules of [`attribution::classify`]. Once every vote is in,
[`Election::finalize_totals`] computes the totals and a [`Report`] derives the
rankings from them.

```
use proportional_tally::*;

let date = parse_election_date("02/10/2022")?;
let mut election = Election::new(date, OfficeType::Federal);
election.register_party(13, "PT", "Partido dos Trabalhadores");
election.ingest_candidate(CandidateRecord {
    office_code: 6,
    number: 1313,
    ballot_name: "pessoa A".to_string(),
    party_number: 13,
    party_acronym: "PT".to_string(),
    party_name: "Partido dos Trabalhadores".to_string(),
    federation_number: NO_FEDERATION,
    birth_date: Some("10/03/1975".to_string()),
    gender_code: 4,
    turn_status: 2,
    vote_destination: "Válido".to_string(),
    candidacy_condition: 2,
});

election.attribute_vote(1313, 100);
election.attribute_vote(13, 20);
election.finalize_totals();

let report = Report::new(&election);
assert_eq!(report.seats(), 1);
assert_eq!(report.vote_summary().total, 120);
# Ok::<(), TallyErrors>(())
```

See the [manual] for the rules in detail.
*/

pub mod attribution;
mod candidate;
mod config;
mod election;
pub mod manual;
mod party;
mod report;

pub use crate::attribution::Attribution;
pub use crate::candidate::*;
pub use crate::config::*;
pub use crate::election::Election;
pub use crate::party::Party;
pub use crate::report::*;
