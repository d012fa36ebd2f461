use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;
use log::warn;

use crate::tse::*;

pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decodes ISO-8859-1 bytes. Every byte is the code point of its character.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Parses a numeric field, falling back to zero (with a warning) when the
/// field is not a number.
pub fn parse_or_zero<T: FromStr + Default>(column: &str, value: &str, lineno: usize) -> T {
    match value.trim().parse::<T>() {
        Ok(x) => x,
        Err(_) => {
            warn!(
                "line {}: could not parse {:?} in column {}, using 0",
                lineno, value, column
            );
            T::default()
        }
    }
}

/// The position of a column, found by its header.
pub fn column_index(headers: &StringRecord, column: &str, path: &Path) -> TseResult<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .context(MissingColumnSnafu {
            column,
            path: path.display().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1() {
        assert_eq!(decode_latin1(b"V\xe1lido (legenda)"), "Válido (legenda)");
        assert_eq!(decode_latin1(b"JO\xc3O"), "JOÃO");
    }

    #[test]
    fn parse_fallback() {
        assert_eq!(parse_or_zero::<u32>("NR_VOTAVEL", " 1313 ", 2), 1313);
        assert_eq!(parse_or_zero::<u64>("QT_VOTOS", "#NULO", 3), 0);
        assert_eq!(parse_or_zero::<i32>("NR_FEDERACAO", "-1", 4), -1);
    }

    #[test]
    fn columns() {
        let headers = StringRecord::from(vec!["CD_CARGO", " NR_VOTAVEL", "QT_VOTOS"]);
        let p = Path::new("/tmp/votos.csv");
        assert_eq!(column_index(&headers, "NR_VOTAVEL", p).unwrap(), 1);
        assert!(matches!(
            column_index(&headers, "NR_PARTIDO", p),
            Err(TseError::MissingColumn { .. })
        ));
        assert_eq!(simplify_file_name(p), "votos.csv");
    }
}
