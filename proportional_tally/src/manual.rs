/*!

This is the long-form manual for `proportional_tally` and `deputies`.

## Input formats

Two `;`-separated files are read, in the ISO-8859-1 encoding, with a header
row. Quotes around the fields are removed. Columns are found by their header.

### Candidates

| column                      | meaning                                              |
|-----------------------------|------------------------------------------------------|
| `CD_CARGO`                  | office: 6 for the lower house, 7 for state assembly  |
| `NR_CANDIDATO`              | candidate number                                     |
| `NM_URNA_CANDIDATO`         | name printed on the ballot                           |
| `NR_PARTIDO`                | party number                                         |
| `SG_PARTIDO`                | party acronym                                        |
| `NM_PARTIDO`                | party name                                           |
| `NR_FEDERACAO`              | federation number, -1 when the party runs alone      |
| `DT_NASCIMENTO`             | birth date, `dd/mm/yyyy`                             |
| `CD_GENERO`                 | 2 for male, 4 for female                             |
| `CD_SIT_TOT_TURNO`          | 2 or 3 when elected                                  |
| `NM_TIPO_DESTINACAO_VOTOS`  | `Válido`, `Válido (legenda)`, ...                    |
| `CD_SITUACAO_CANDIDATO_TOT` | 2 or 16 when the candidacy is accepted               |

Every row registers its party, even when the candidate runs for another office.
A candidate with an accepted candidacy is *credited*: it receives nominal votes.
A candidate whose candidacy was not accepted but whose votes are `Válido
(legenda)` is *dismissed*: its votes go to the party list. All the other rows
are ignored.

### Votes

| column       | meaning                          |
|--------------|----------------------------------|
| `CD_CARGO`   | office, as above                 |
| `NR_VOTAVEL` | party or candidate number        |
| `QT_VOTOS`   | number of votes                  |

Rows for another office, and the numbers 95 to 98 (blank and null votes), are
skipped. Any number that cannot be parsed is read as 0 and a warning is logged.

## Vote attribution

The votes for a number are credited to:
1. the party list, if the number is a party number;
2. for a credited candidate: the party list if its votes are `Válido
(legenda)`, otherwise the candidate, its party and the election nominal total
if its candidacy is accepted and its votes are `Válido`. Other candidates do
not receive anything;
3. the party list, if the first two digits of the number are a party that has
this number as a dismissed candidate;
4. nothing otherwise.

## Rankings

- Candidates are ranked by nominal votes, the younger first on a tie.
- Parties are ranked by total votes, the smaller number first on a tie.
- The number of seats is the number of elected candidates. Candidates in the
first `seats` positions who were not elected would have been elected with a
majoritarian vote. Elected candidates after these positions benefited from the
proportional system. Both keep their position in the full ranking.

## Configuration

The program can also read its settings from a JSON file given with `--config`.
Options given on the command line take precedence.

```json
{
  "office": "--federal",
  "candidatesFilePath": "consulta_cand_2022_PR.csv",
  "votesFilePath": "votacao_secao_2022_PR.csv",
  "electionDate": "02/10/2022",
  "outputFilePath": "summary.json"
}
```

Relative paths are resolved from the directory of the configuration file.

 */
