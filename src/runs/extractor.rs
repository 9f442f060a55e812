use std::collections::HashSet;
use std::io::BufRead;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::core::error::{FormatError, ScanError};
use crate::parsing::dict::SequenceDictionary;
use crate::runs::collection::LetterRunCollection;
use crate::utils::CancelToken;

/// Unknown base
pub const DEFAULT_LETTER: char = 'N';

const HEADER_SENTINEL: char = '>';

fn run_pattern(letter: char) -> Result<Regex, FormatError> {
    RegexBuilder::new(&format!("{}+", regex::escape(&letter.to_string())))
        .case_insensitive(true)
        .build()
        .map_err(|e| FormatError::InvalidText(format!("Invalid run letter '{letter}': {e}")))
}

/// One sequence being scanned
struct Current {
    collection: LetterRunCollection,
    position: u64,
}

impl Current {
    fn finish(mut self) -> Result<LetterRunCollection, FormatError> {
        self.collection.end(self.position)?;
        Ok(self.collection)
    }

    fn consume_line(&mut self, line: &str, pattern: &Regex) -> Result<(), FormatError> {
        let line_len = line.len() as u64;
        let line_start = self.position;
        let line_end = line_start + line_len;

        if line_end > self.collection.sequence_length() {
            return Err(FormatError::LengthMismatch {
                name: self.collection.name().to_string(),
                expected: self.collection.sequence_length(),
                found: line_end,
            });
        }

        // A run left open by the previous line stops where this line starts
        // with another letter
        if self.collection.is_open() && !starts_with_run(line, pattern) {
            self.collection.close_run(line_start)?;
        }

        for m in pattern.find_iter(line) {
            let start = line_start + m.start() as u64;
            let end = line_start + m.end() as u64;

            // An open run here can only continue from the previous line
            if !self.collection.is_open() {
                self.collection.open_run(start)?;
            }

            if end < line_end {
                self.collection.close_run(end)?;
            }
        }

        self.position = line_end;
        Ok(())
    }
}

fn starts_with_run(line: &str, pattern: &Regex) -> bool {
    pattern.find(line).is_some_and(|m| m.start() == 0)
}

/// Scan FASTA text for runs of `letter` (case-insensitive), one collection
/// per sequence in file order.
///
/// Every sequence must be present in `dictionary` exactly once and its
/// residue count must equal the dictionary length.
///
/// # Errors
///
/// Returns `ScanError::Format` with `FormatError::UnknownSequence`,
/// `FormatError::DuplicateSequence`, `FormatError::LengthMismatch`,
/// `FormatError::NoSequenceHeaders` (text that is not FASTA) or
/// `FormatError::Io`, and `ScanError::Cancelled` if `cancel` fires.
pub fn scan<R: BufRead>(
    reader: R,
    dictionary: &SequenceDictionary,
    letter: char,
    cancel: Option<&CancelToken>,
) -> Result<Vec<LetterRunCollection>, ScanError> {
    let pattern = run_pattern(letter)?;
    let mut collections = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut current: Option<Current> = None;

    for line in reader.lines() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(ScanError::Cancelled);
        }

        let line = line.map_err(FormatError::from)?;
        let line = line.trim_end_matches('\r');

        if let Some(header) = line.strip_prefix(HEADER_SENTINEL) {
            if let Some(done) = current.take() {
                collections.push(done.finish()?);
            }

            let name = header.split_whitespace().next().unwrap_or_default();
            let Some(length) = dictionary.length_of(name) else {
                return Err(FormatError::UnknownSequence(name.to_string()).into());
            };
            if !seen.insert(name.to_string()) {
                return Err(FormatError::DuplicateSequence(name.to_string()).into());
            }

            debug!(sequence = name, length, "Scanning sequence");
            current = Some(Current {
                collection: LetterRunCollection::new(name, length),
                position: 0,
            });
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match current.as_mut() {
            Some(cur) => cur.consume_line(line, &pattern)?,
            None => {
                let preview: String = line.chars().take(40).collect();
                return Err(FormatError::NoSequenceHeaders(preview).into());
            }
        }
    }

    if let Some(done) = current.take() {
        collections.push(done.finish()?);
    }

    if collections.is_empty() {
        return Err(FormatError::NoSequenceHeaders(String::new()).into());
    }

    Ok(collections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::collection::LetterRun;

    fn dict(entries: &[(&str, u64)]) -> SequenceDictionary {
        SequenceDictionary::from_entries(entries.iter().map(|(n, l)| (*n, *l)))
    }

    fn runs(fasta: &str, entries: &[(&str, u64)]) -> Vec<LetterRunCollection> {
        scan(fasta.as_bytes(), &dict(entries), 'N', None).unwrap()
    }

    fn run(start: u64, length: u64) -> LetterRun {
        LetterRun { start, length }
    }

    #[test]
    fn test_runs_within_lines() {
        let out = runs(">chr1\nACNNGT\nNACGTN\nNNNNNN\n", &[("chr1", 18)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].runs(), &[run(2, 2), run(6, 1), run(11, 7)]);
    }

    #[test]
    fn test_run_continues_across_lines() {
        let out = runs(">chr1\nACGNNN\nNNNNAC\n", &[("chr1", 12)]);
        assert_eq!(out[0].runs(), &[run(3, 7)]);
    }

    #[test]
    fn test_open_run_closed_by_next_line() {
        let out = runs(">chr1\nACGNNN\nACNNAC\n", &[("chr1", 12)]);
        assert_eq!(out[0].runs(), &[run(3, 3), run(8, 2)]);
    }

    #[test]
    fn test_lowercase_and_multiple_sequences() {
        let out = runs(
            ">chr1 description\nnnAC\n>chrM\nACGT\n",
            &[("chr1", 4), ("chrM", 4)],
        );
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].runs(), &[run(0, 2)]);
        assert!(out[1].runs().is_empty());
        assert_eq!(out[1].name(), "chrM");
    }

    #[test]
    fn test_unknown_sequence() {
        let err = scan(">chr9\nACGT\n".as_bytes(), &dict(&[("chr1", 4)]), 'N', None).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Format(FormatError::UnknownSequence(ref n)) if n == "chr9"
        ));
    }

    #[test]
    fn test_duplicate_sequence() {
        let err = scan(
            ">chr1\nACGT\n>chr1\nACGT\n".as_bytes(),
            &dict(&[("chr1", 4)]),
            'N',
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ScanError::Format(FormatError::DuplicateSequence(_))));
    }

    #[test]
    fn test_length_mismatch() {
        let short = scan(">chr1\nACGT\n".as_bytes(), &dict(&[("chr1", 5)]), 'N', None).unwrap_err();
        assert!(matches!(
            short,
            ScanError::Format(FormatError::LengthMismatch { expected: 5, found: 4, .. })
        ));

        let long = scan(">chr1\nACGTAC\n".as_bytes(), &dict(&[("chr1", 5)]), 'N', None).unwrap_err();
        assert!(matches!(long, ScanError::Format(FormatError::LengthMismatch { .. })));
    }

    #[test]
    fn test_wrong_format() {
        let err = scan("@SQ\tSN:chr1\tLN:4\n".as_bytes(), &dict(&[("chr1", 4)]), 'N', None)
            .unwrap_err();
        assert!(matches!(err, ScanError::Format(FormatError::NoSequenceHeaders(_))));

        let empty = scan("".as_bytes(), &dict(&[("chr1", 4)]), 'N', None).unwrap_err();
        assert!(matches!(empty, ScanError::Format(FormatError::NoSequenceHeaders(_))));
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = scan(">chr1\nACGT\n".as_bytes(), &dict(&[("chr1", 4)]), 'N', Some(&cancel))
            .unwrap_err();
        assert!(matches!(err, ScanError::Cancelled));
    }

    #[test]
    fn test_other_letter() {
        let out = scan(">chr1\nAAGA\n".as_bytes(), &dict(&[("chr1", 4)]), 'A', None).unwrap();
        assert_eq!(out[0].runs(), &[run(0, 2), run(3, 1)]);
    }
}
