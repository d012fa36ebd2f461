// The text report, in Portuguese, with the Brazilian number formatting.

use std::fmt;

use proportional_tally::*;

/// Formats an integer with `.` as the thousands separator.
pub fn format_int(x: u64) -> String {
    let digits = x.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push('.');
        }
        res.push(c);
    }
    res
}

/// Formats a percentage with two decimals and `,` as the decimal separator.
pub fn format_percentage(x: f64) -> String {
    let s = format!("{:.2}", x);
    match s.split_once('.') {
        Some((int_part, frac)) => match int_part.parse::<u64>() {
            Ok(i) => format!("{},{}", format_int(i), frac),
            Err(_) => format!("{},{}", int_part, frac),
        },
        None => s,
    }
}

fn plural<'s>(count: u64, one: &'s str, many: &'s str) -> &'s str {
    if count > 1 {
        many
    } else {
        one
    }
}

fn share(s: &Share) -> String {
    format!("{} ({}%)", s.count, format_percentage(s.percentage))
}

/// Displays all the sections of the report, separated by blank lines.
pub struct TextReport<'a>(pub &'a Report<'a>);

impl<'a> TextReport<'a> {
    fn candidate_line(f: &mut fmt::Formatter<'_>, pos: usize, c: &Candidate) -> fmt::Result {
        writeln!(
            f,
            "{} - {} ({}, {} votos)",
            pos,
            c.display_name(),
            c.party_acronym(),
            format_int(c.nominal_votes())
        )
    }

    fn seats(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Número de vagas: {}", format_int(self.0.seats() as u64))?;
        writeln!(f)
    }

    fn elected(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.election().office() {
            OfficeType::Federal => writeln!(f, "Deputados federais eleitos:")?,
            OfficeType::State => writeln!(f, "Deputados estaduais eleitos:")?,
        }
        for (idx, c) in self.0.elected().iter().enumerate() {
            Self::candidate_line(f, idx + 1, c)?;
        }
        writeln!(f)
    }

    fn most_voted(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Candidatos mais votados (em ordem decrescente de votação e respeitando número de vagas):"
        )?;
        for rc in self.0.most_voted() {
            Self::candidate_line(f, rc.position, rc.candidate)?;
        }
        writeln!(f)
    }

    fn partition(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partition = self.0.majoritarian_partition();
        writeln!(
            f,
            "Teriam sido eleitos se a votação fosse majoritária, e não foram eleitos:"
        )?;
        writeln!(f, "(com sua posição no ranking de mais votados)")?;
        for rc in partition.not_elected_in_top.iter() {
            Self::candidate_line(f, rc.position, rc.candidate)?;
        }
        writeln!(f)?;
        writeln!(f, "Eleitos, que se beneficiaram do sistema proporcional:")?;
        writeln!(f, "(com sua posição no ranking de mais votados)")?;
        for rc in partition.proportional_beneficiaries.iter() {
            Self::candidate_line(f, rc.position, rc.candidate)?;
        }
        writeln!(f)
    }

    fn parties(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Votação dos partidos e número de candidatos eleitos:")?;
        for rp in self.0.party_ranking() {
            let p = rp.party;
            let total = p.total_votes();
            let nominal = p.nominal_votes();
            let elected = p.elected_count();
            writeln!(
                f,
                "{} - {} - {}, {} {} ({} {} e {} de legenda), {} {}",
                rp.position,
                p.acronym(),
                p.number(),
                format_int(total),
                if total == 0 { "voto" } else { "votos" },
                format_int(nominal),
                if nominal == 0 { "nominal" } else { "nominais" },
                format_int(p.list_votes()),
                elected,
                plural(elected as u64, "candidato eleito", "candidatos eleitos"),
            )?;
        }
        writeln!(f)
    }

    fn extremes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Primeiro e último colocados de cada partido:")?;
        for (idx, pe) in self.0.party_extremes().iter().enumerate() {
            let (top, bottom) = (pe.top, pe.bottom);
            writeln!(
                f,
                "{} - {} - {}, {} ({}, {} {}) / {} ({}, {} {})",
                idx + 1,
                pe.party.acronym(),
                pe.party.number(),
                top.ballot_name(),
                top.number(),
                format_int(top.nominal_votes()),
                plural(top.nominal_votes(), "voto", "votos"),
                bottom.ballot_name(),
                bottom.number(),
                format_int(bottom.nominal_votes()),
                plural(bottom.nominal_votes(), "voto", "votos"),
            )?;
        }
        writeln!(f)
    }

    fn ages(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ages = self.0.age_breakdown();
        writeln!(f, "Eleitos, por faixa etária (na data da eleição):")?;
        for (bracket, s) in ages.brackets.iter() {
            let label = match bracket {
                AgeBracket::Under30 => "      Idade < 30",
                AgeBracket::From30To39 => "30 <= Idade < 40",
                AgeBracket::From40To49 => "40 <= Idade < 50",
                AgeBracket::From50To59 => "50 <= Idade < 60",
                AgeBracket::From60 => "60 <= Idade     ",
            };
            writeln!(f, "{}: {}", label, share(s))?;
        }
        if ages.unknown > 0 {
            writeln!(f, "Idade desconhecida: {}", ages.unknown)?;
        }
        writeln!(f)
    }

    fn genders(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let genders = self.0.gender_breakdown();
        writeln!(f, "Eleitos, por gênero:")?;
        writeln!(f, "Feminino:\t{}", share(&genders.female))?;
        writeln!(f, "Masculino:\t{}", share(&genders.male))?;
        writeln!(f)
    }

    fn votes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let votes = self.0.vote_summary();
        writeln!(f, "Total de votos válidos:\t{}", format_int(votes.total))?;
        writeln!(
            f,
            "Total de votos nominais:\t{} ({}%)",
            format_int(votes.nominal.count),
            format_percentage(votes.nominal.percentage)
        )?;
        writeln!(
            f,
            "Total de votos de legenda:\t{} ({}%)",
            format_int(votes.list.count),
            format_percentage(votes.list.percentage)
        )
    }
}

impl<'a> fmt::Display for TextReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.seats(f)?;
        self.elected(f)?;
        self.most_voted(f)?;
        self.partition(f)?;
        self.parties(f)?;
        self.extremes(f)?;
        self.ages(f)?;
        self.genders(f)?;
        self.votes(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn numbers() {
        assert_eq!(format_int(0), "0");
        assert_eq!(format_int(999), "999");
        assert_eq!(format_int(1000), "1.000");
        assert_eq!(format_int(1234567), "1.234.567");
        assert_eq!(format_percentage(0.0), "0,00");
        assert_eq!(format_percentage(33.333333), "33,33");
        assert_eq!(format_percentage(100.0), "100,00");
    }

    fn record(number: u32, name: &str, elected: bool, gender_code: u32) -> CandidateRecord {
        CandidateRecord {
            office_code: 7,
            number,
            ballot_name: name.to_string(),
            party_number: 13,
            party_acronym: "PT".to_string(),
            party_name: "Partido dos Trabalhadores".to_string(),
            federation_number: NO_FEDERATION,
            birth_date: Some("10/03/1975".to_string()),
            gender_code,
            turn_status: if elected { 3 } else { 4 },
            vote_destination: "Válido".to_string(),
            candidacy_condition: 2,
        }
    }

    #[test]
    fn full_report() {
        let date = NaiveDate::from_ymd_opt(2022, 10, 2).unwrap();
        let mut e = Election::new(date, OfficeType::State);
        e.ingest_candidate(record(13100, "ANA", false, 4));
        e.ingest_candidate(record(13200, "BETO", true, 2));
        e.attribute_vote(13100, 2500);
        e.attribute_vote(13200, 1000);
        e.attribute_vote(13, 500);
        e.finalize_totals();
        let report = Report::new(&e);
        let text = TextReport(&report).to_string();

        assert!(text.starts_with("Número de vagas: 1\n\nDeputados estaduais eleitos:\n1 - BETO (PT, 1.000 votos)\n"));
        assert!(text.contains("(com sua posição no ranking de mais votados)\n1 - ANA (PT, 2.500 votos)\n"));
        assert!(text.contains("\n2 - BETO (PT, 1.000 votos)\n"));
        assert!(text.contains(
            "1 - PT - 13, 4.000 votos (3.500 nominais e 500 de legenda), 1 candidato eleito\n"
        ));
        assert!(text.contains("1 - PT - 13, ANA (13100, 2.500 votos) / BETO (13200, 1.000 votos)\n"));
        assert!(text.contains("40 <= Idade < 50: 1 (100,00%)\n"));
        assert!(text.contains("Feminino:\t0 (0,00%)\nMasculino:\t1 (100,00%)\n"));
        assert!(text.ends_with(
            "Total de votos válidos:\t4.000\nTotal de votos nominais:\t3.500 (87,50%)\nTotal de votos de legenda:\t500 (12,50%)\n"
        ));
    }
}
