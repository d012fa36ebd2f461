use log::{debug, info, warn};

use proportional_tally::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tse::config_reader::*;
use crate::tse::text_report::{format_percentage, TextReport};

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod text_report;

#[derive(Debug, Snafu)]
pub enum TseError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading CSV file {path}"))]
    ReadingCsv { source: csv::Error, path: String },
    #[snafu(display("Missing column {column} in file {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing setting {name}: pass it on the command line or in the --config file"))]
    MissingSetting { name: String },
    #[snafu(display("Invalid setting: {source}"))]
    InvalidSetting { source: TallyErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type TseResult<T> = Result<T, TseError>;

/// Everything needed to tabulate one election.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Settings {
    pub office: OfficeType,
    pub candidates_path: PathBuf,
    pub votes_path: PathBuf,
    pub date: NaiveDate,
    pub out: Option<String>,
    pub reference: Option<String>,
}

/// Merges the command line with the optional JSON configuration file.
/// The command line wins.
pub fn resolve_settings(args: &Args) -> TseResult<Settings> {
    let config: TseConfig = match &args.config {
        Some(p) => read_config(p)?,
        None => TseConfig::default(),
    };
    debug!("resolve_settings: config: {:?}", config);
    // Relative paths in the configuration are relative to the configuration file.
    let root: PathBuf = args
        .config
        .as_ref()
        .and_then(|p| Path::new(p).parent().map(|x| x.to_path_buf()))
        .unwrap_or_default();
    let from_config = |p: &Option<String>| p.as_ref().map(|s| root.join(s));

    let office_selector: String = if args.federal {
        OfficeType::Federal.selector().to_string()
    } else if args.estadual {
        OfficeType::State.selector().to_string()
    } else {
        config
            .office
            .clone()
            .context(MissingSettingSnafu { name: "office" })?
    };
    let office = OfficeType::from_selector(&office_selector).context(InvalidSettingSnafu {})?;

    let candidates_path: PathBuf = args
        .candidates
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&config.candidates_file_path))
        .context(MissingSettingSnafu { name: "candidates" })?;
    let votes_path: PathBuf = args
        .votes
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&config.votes_file_path))
        .context(MissingSettingSnafu { name: "votes" })?;

    let date_s: String = args
        .date
        .clone()
        .or_else(|| config.election_date.clone())
        .context(MissingSettingSnafu { name: "date" })?;
    let date = parse_election_date(&date_s).context(InvalidSettingSnafu {})?;

    // 'stdout' and the empty string are not paths.
    let out: Option<String> = args.out.clone().or_else(|| match config.output_file_path.as_deref() {
        Some(sentinel @ ("stdout" | "")) => Some(sentinel.to_string()),
        Some(p) => Some(root.join(p).display().to_string()),
        None => None,
    });

    Ok(Settings {
        office,
        candidates_path,
        votes_path,
        date,
        out,
        reference: args.reference.clone(),
    })
}

fn ranked_candidate_js(rc: &RankedCandidate) -> JSValue {
    let c = rc.candidate;
    json!({
        "position": rc.position,
        "number": c.number(),
        "name": c.display_name(),
        "party": c.party_acronym(),
        "votes": c.nominal_votes().to_string(),
    })
}

fn share_js(share: &Share) -> JSValue {
    json!({
        "count": share.count.to_string(),
        "percentage": format_percentage(share.percentage),
    })
}

/// The JSON summary of all the ranked views.
///
/// Counts are written as strings so that the summary can be compared textually.
pub fn build_summary_js(settings: &Settings, report: &Report) -> JSValue {
    let election = report.election();

    let elected: Vec<JSValue> = report
        .elected()
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            json!({
                "position": idx + 1,
                "number": c.number(),
                "name": c.display_name(),
                "party": c.party_acronym(),
                "votes": c.nominal_votes().to_string(),
            })
        })
        .collect();

    let most_voted: Vec<JSValue> = report.most_voted().iter().map(ranked_candidate_js).collect();

    let partition = report.majoritarian_partition();
    let not_elected: Vec<JSValue> = partition
        .not_elected_in_top
        .iter()
        .map(ranked_candidate_js)
        .collect();
    let beneficiaries: Vec<JSValue> = partition
        .proportional_beneficiaries
        .iter()
        .map(ranked_candidate_js)
        .collect();

    let parties: Vec<JSValue> = report
        .party_ranking()
        .iter()
        .map(|rp| {
            let p = rp.party;
            json!({
                "position": rp.position,
                "number": p.number(),
                "acronym": p.acronym(),
                "totalVotes": p.total_votes().to_string(),
                "nominalVotes": p.nominal_votes().to_string(),
                "listVotes": p.list_votes().to_string(),
                "elected": p.elected_count(),
            })
        })
        .collect();

    let extremes: Vec<JSValue> = report
        .party_extremes()
        .iter()
        .map(|pe| {
            json!({
                "party": pe.party.number(),
                "acronym": pe.party.acronym(),
                "first": {"number": pe.top.number(), "name": pe.top.ballot_name(), "votes": pe.top.nominal_votes().to_string()},
                "last": {"number": pe.bottom.number(), "name": pe.bottom.ballot_name(), "votes": pe.bottom.nominal_votes().to_string()},
            })
        })
        .collect();

    let ages = report.age_breakdown();
    let age_brackets: Vec<JSValue> = ages
        .brackets
        .iter()
        .map(|(bracket, share)| json!({"bracket": format!("{:?}", bracket), "elected": share_js(share)}))
        .collect();
    let genders = report.gender_breakdown();
    let votes = report.vote_summary();

    json!({
        "config": {
            "office": settings.office.selector(),
            "date": election.date().format(DATE_FORMAT).to_string(),
        },
        "seats": report.seats(),
        "elected": elected,
        "mostVoted": most_voted,
        "majoritarianNotElected": not_elected,
        "proportionalBeneficiaries": beneficiaries,
        "parties": parties,
        "partyExtremes": extremes,
        "ages": {"brackets": age_brackets, "unknown": ages.unknown.to_string()},
        "genders": {"female": share_js(&genders.female), "male": share_js(&genders.male)},
        "votes": {
            "total": votes.total.to_string(),
            "nominal": share_js(&votes.nominal),
            "list": share_js(&votes.list),
        },
    })
}

pub fn run_election(settings: &Settings) -> TseResult<()> {
    info!("settings: {:?}", settings);
    let mut election = Election::new(settings.date, settings.office);

    let num_rows = io_csv::read_candidates(&settings.candidates_path, &mut election)?;
    info!(
        "Read {} candidate rows: {} parties, {} credited candidates, {} seats",
        num_rows,
        election.parties().len(),
        election.candidates().len(),
        election.seats()
    );

    let stats = io_csv::read_votes(&settings.votes_path, &mut election)?;
    info!("Vote stream: {:?}", stats);
    if stats.discarded_votes > 0 {
        warn!(
            "{} votes could not be attributed to any party or candidate",
            stats.discarded_votes
        );
    }

    let report = Report::new(&election);
    print!("{}", TextReport(&report));

    let summary_js = build_summary_js(settings, &report);
    let pretty_js_summary =
        serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
    match settings.out.as_deref() {
        None | Some("") => {}
        Some("stdout") => println!("{}", pretty_js_summary),
        Some(path) => {
            fs::write(path, &pretty_js_summary).context(WritingSummarySnafu { path })?;
            info!("Summary written to {}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &settings.reference {
        let summary_ref = read_summary(summary_p)?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_summary.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(extra: &[&str]) -> Args {
        use clap::Parser;
        let mut v = vec!["deputies"];
        v.extend_from_slice(extra);
        Args::parse_from(v)
    }

    #[test]
    fn positional_arguments() {
        let s = resolve_settings(&args(&["--estadual", "cand.csv", "votos.csv", "02/10/2022"]))
            .unwrap();
        assert_eq!(s.office, OfficeType::State);
        assert_eq!(s.candidates_path, PathBuf::from("cand.csv"));
        assert_eq!(s.votes_path, PathBuf::from("votos.csv"));
        assert_eq!(s.date, NaiveDate::from_ymd_opt(2022, 10, 2).unwrap());
        assert_eq!(s.out, None);
    }

    #[test]
    fn missing_and_invalid_settings() {
        assert!(matches!(
            resolve_settings(&args(&["cand.csv", "votos.csv", "02/10/2022"])),
            Err(TseError::MissingSetting { .. })
        ));
        assert!(matches!(
            resolve_settings(&args(&["--federal", "cand.csv", "votos.csv", "2022-10-02"])),
            Err(TseError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn config_file_and_precedence() {
        let dir = tempdir().unwrap();
        let config_p = dir.path().join("election.json");
        fs::write(
            &config_p,
            r#"{"office": "--estadual", "candidatesFilePath": "cand.csv",
                "votesFilePath": "votos.csv", "electionDate": "02/10/2022",
                "outputFilePath": "summary.json"}"#,
        )
        .unwrap();
        let config_s = config_p.display().to_string();

        let s = resolve_settings(&args(&["--config", &config_s])).unwrap();
        assert_eq!(s.office, OfficeType::State);
        assert_eq!(s.candidates_path, dir.path().join("cand.csv"));
        assert_eq!(s.votes_path, dir.path().join("votos.csv"));
        assert_eq!(
            s.out,
            Some(dir.path().join("summary.json").display().to_string())
        );

        let s = resolve_settings(&args(&["--federal", "--config", &config_s, "other.csv"])).unwrap();
        assert_eq!(s.office, OfficeType::Federal);
        assert_eq!(s.candidates_path, PathBuf::from("other.csv"));
        assert_eq!(s.votes_path, dir.path().join("votos.csv"));

        let s = resolve_settings(&args(&["--config", &config_s, "--out", "stdout"])).unwrap();
        assert_eq!(s.out.as_deref(), Some("stdout"));
    }

    #[test]
    fn config_output_sentinels_are_not_paths() {
        let dir = tempdir().unwrap();
        for sentinel in ["stdout", ""] {
            let config_p = dir.path().join("election.json");
            fs::write(
                &config_p,
                format!(
                    r#"{{"office": "federal", "candidatesFilePath": "cand.csv",
                        "votesFilePath": "votos.csv", "electionDate": "02/10/2022",
                        "outputFilePath": "{}"}}"#,
                    sentinel
                ),
            )
            .unwrap();
            let config_s = config_p.display().to_string();
            let s = resolve_settings(&args(&["--config", &config_s])).unwrap();
            assert_eq!(s.out.as_deref(), Some(sentinel));
        }
    }

    #[test]
    fn summary_json() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 2).unwrap();
        let mut e = Election::new(date, OfficeType::Federal);
        e.ingest_candidate(CandidateRecord {
            office_code: 6,
            number: 1313,
            ballot_name: "pessoa A".to_string(),
            party_number: 13,
            party_acronym: "PT".to_string(),
            party_name: "Partido dos Trabalhadores".to_string(),
            federation_number: 1,
            birth_date: Some("10/03/1975".to_string()),
            gender_code: 4,
            turn_status: 2,
            vote_destination: "Válido".to_string(),
            candidacy_condition: 2,
        });
        e.attribute_vote(1313, 1500);
        e.attribute_vote(13, 500);
        e.finalize_totals();
        let settings = Settings {
            office: OfficeType::Federal,
            candidates_path: PathBuf::from("cand.csv"),
            votes_path: PathBuf::from("votos.csv"),
            date,
            out: None,
            reference: None,
        };
        let js = build_summary_js(&settings, &Report::new(&e));
        assert_eq!(js["seats"], json!(1));
        assert_eq!(js["config"]["date"], json!("02/10/2022"));
        assert_eq!(js["elected"][0]["name"], json!("*pessoa A"));
        assert_eq!(js["parties"][0]["totalVotes"], json!("2000"));
        assert_eq!(js["votes"]["list"]["percentage"], json!("25,00"));
        assert_eq!(js["genders"]["female"]["count"], json!("1"));
        assert_eq!(js["partyExtremes"][0]["first"]["number"], json!(1313));
    }
}
