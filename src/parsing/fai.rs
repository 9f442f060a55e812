//! Parser for FASTA index (.fai) text.
//!
//! FAI format provides name and length for each sequence.
//! Format: `name\tlength\toffset\tline_bases\tline_width`

use crate::core::error::FormatError;
use crate::utils::validation::check_sequence_limit;

/// Parse FAI text into (name, length) pairs
///
/// # Errors
///
/// Returns `FormatError::InvalidLength` if a length is not a positive integer,
/// `FormatError::InvalidText` if no sequences are found, or
/// `FormatError::TooManySequences` if the limit is exceeded.
pub fn parse_fai_text(text: &str) -> Result<Vec<(String, u64)>, FormatError> {
    let mut entries = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            continue;
        }

        // Check sequence limit for DOS protection
        if check_sequence_limit(entries.len()).is_some() {
            return Err(FormatError::TooManySequences(entries.len()));
        }

        let name = fields[0].to_string();
        let length = match fields[1].parse::<u64>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(FormatError::InvalidLength {
                    name,
                    value: fields[1].to_string(),
                })
            }
        };

        entries.push((name, length));
    }

    if entries.is_empty() {
        return Err(FormatError::InvalidText(
            "No sequences found in FAI text".to_string(),
        ));
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fai_text() {
        let fai = "chr1\t248956422\t112\t70\t71\nchr2\t242193529\t252513167\t70\t71\n# comment\n\n";
        let entries = parse_fai_text(fai).unwrap();
        assert_eq!(
            entries,
            vec![
                ("chr1".to_string(), 248_956_422),
                ("chr2".to_string(), 242_193_529)
            ]
        );
    }

    #[test]
    fn test_parse_fai_invalid_length() {
        let err = parse_fai_text("chr1\tlots\t0\t60\t61\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidLength { .. }));
    }

    #[test]
    fn test_parse_fai_empty() {
        assert!(parse_fai_text("").is_err());
    }
}
