// Readers for the candidate and vote files published by the electoral court.

use std::fs::File;
use std::path::Path;

use csv::{ByteRecord, StringRecord};
use log::{debug, info};

use crate::tse::io_common::{column_index, decode_latin1, parse_or_zero, simplify_file_name};
use crate::tse::*;

/// Counters gathered while reading the vote file.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoteStats {
    pub rows: usize,
    /// Rows for another office, and blank or null votes.
    pub skipped_rows: usize,
    pub attributed_votes: u64,
    pub discarded_votes: u64,
}

const CANDIDATE_COLUMNS: [&str; 12] = [
    "CD_CARGO",
    "NR_CANDIDATO",
    "NM_URNA_CANDIDATO",
    "NR_PARTIDO",
    "SG_PARTIDO",
    "NM_PARTIDO",
    "NR_FEDERACAO",
    "DT_NASCIMENTO",
    "CD_GENERO",
    "CD_SIT_TOT_TURNO",
    "NM_TIPO_DESTINACAO_VOTOS",
    "CD_SITUACAO_CANDIDATO_TOT",
];

const VOTE_COLUMNS: [&str; 3] = ["CD_CARGO", "NR_VOTAVEL", "QT_VOTOS"];

/// An open file: the remaining rows, with the positions of the requested columns.
struct SemicolonFile {
    records: csv::ByteRecordsIntoIter<File>,
    indices: Vec<usize>,
    path: String,
}

fn open_semicolon_file(path: &Path, columns: &[&str]) -> TseResult<SemicolonFile> {
    let path_s = path.display().to_string();
    let file = File::open(path).context(OpeningFileSnafu { path: &path_s })?;
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers: StringRecord = rdr
        .byte_headers()
        .context(ReadingCsvSnafu { path: &path_s })?
        .iter()
        .map(decode_latin1)
        .collect();
    let indices = columns
        .iter()
        .map(|c| column_index(&headers, c, path))
        .collect::<TseResult<Vec<usize>>>()?;
    Ok(SemicolonFile {
        records: rdr.into_byte_records(),
        indices,
        path: path_s,
    })
}

fn field(record: &ByteRecord, idx: usize) -> String {
    record.get(idx).map(decode_latin1).unwrap_or_default()
}

/// Reads the candidate file into the election. Returns the number of rows read.
pub fn read_candidates(path: &Path, election: &mut Election) -> TseResult<usize> {
    let SemicolonFile {
        records,
        indices,
        path: path_s,
    } = open_semicolon_file(path, &CANDIDATE_COLUMNS)?;
    let (mut rows, mut credited, mut dismissed) = (0, 0, 0);
    for (i, line_r) in records.enumerate() {
        let line = line_r.context(ReadingCsvSnafu { path: &path_s })?;
        // The header is line 1.
        let lineno = i + 2;
        rows += 1;
        let get = |k: usize| field(&line, indices[k]);
        let birth_date = get(7);
        let record = CandidateRecord {
            office_code: parse_or_zero(CANDIDATE_COLUMNS[0], &get(0), lineno),
            number: parse_or_zero(CANDIDATE_COLUMNS[1], &get(1), lineno),
            ballot_name: get(2),
            party_number: parse_or_zero(CANDIDATE_COLUMNS[3], &get(3), lineno),
            party_acronym: get(4),
            party_name: get(5),
            federation_number: parse_or_zero(CANDIDATE_COLUMNS[6], &get(6), lineno),
            birth_date: if birth_date.is_empty() {
                None
            } else {
                Some(birth_date)
            },
            gender_code: parse_or_zero(CANDIDATE_COLUMNS[8], &get(8), lineno),
            turn_status: parse_or_zero(CANDIDATE_COLUMNS[9], &get(9), lineno),
            vote_destination: get(10),
            candidacy_condition: parse_or_zero(CANDIDATE_COLUMNS[11], &get(11), lineno),
        };
        match election.ingest_candidate(record) {
            Admission::Credited => credited += 1,
            Admission::Dismissed => dismissed += 1,
            Admission::Rejected => {}
        }
    }
    info!(
        "{}: {} rows, {} credited and {} dismissed candidates",
        simplify_file_name(path),
        rows,
        credited,
        dismissed
    );
    Ok(rows)
}

/// Reads the vote file into the election, one row at a time, then finalizes
/// the totals.
pub fn read_votes(path: &Path, election: &mut Election) -> TseResult<VoteStats> {
    let SemicolonFile {
        records,
        indices,
        path: path_s,
    } = open_semicolon_file(path, &VOTE_COLUMNS)?;
    let office_code = election.office().code();
    let mut stats = VoteStats::default();
    for (i, line_r) in records.enumerate() {
        let line = line_r.context(ReadingCsvSnafu { path: &path_s })?;
        let lineno = i + 2;
        stats.rows += 1;
        let office: u32 = parse_or_zero(VOTE_COLUMNS[0], &field(&line, indices[0]), lineno);
        let code: VotableNumber = parse_or_zero(VOTE_COLUMNS[1], &field(&line, indices[1]), lineno);
        let votes: u64 = parse_or_zero(VOTE_COLUMNS[2], &field(&line, indices[2]), lineno);
        if office != office_code || BLANK_AND_NULL_VOTES.contains(&code) {
            stats.skipped_rows += 1;
            continue;
        }
        let attribution = election.attribute_vote(code, votes);
        if attribution.is_discarded() {
            debug!("read_votes: line {}: {:?}", lineno, attribution);
            stats.discarded_votes += votes;
        } else {
            stats.attributed_votes += votes;
        }
    }
    election.finalize_totals();
    Ok(stats)
}
