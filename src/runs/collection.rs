use serde::Serialize;

use crate::core::error::FormatError;

/// Closed half-open interval `[start, start + length)` of one letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterRun {
    pub start: u64,
    pub length: u64,
}

impl LetterRun {
    /// Exclusive end
    #[must_use]
    pub fn end(&self) -> u64 {
        self.start + self.length
    }
}

/// Counts for one finished collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub name: String,
    pub length: u64,
    pub runs: usize,
    pub letters: u64,
    pub long_runs: usize,
}

/// Ordered, non-overlapping runs within one named sequence.
///
/// Runs are added by [`open_run`](Self::open_run) /
/// [`close_run`](Self::close_run) pairs in increasing, non-adjacent order;
/// [`end`](Self::end) seals the collection once, at the sequence length.
#[derive(Debug, Clone, Serialize)]
pub struct LetterRunCollection {
    name: String,
    sequence_length: u64,
    runs: Vec<LetterRun>,
    #[serde(skip)]
    open: Option<u64>,
    #[serde(skip)]
    ended: bool,
}

impl LetterRunCollection {
    pub fn new(name: impl Into<String>, sequence_length: u64) -> Self {
        Self {
            name: name.into(),
            sequence_length,
            runs: Vec::new(),
            open: None,
            ended: false,
        }
    }

    fn invalid(&self, reason: String) -> FormatError {
        FormatError::InvalidRun {
            name: self.name.clone(),
            reason,
        }
    }

    /// Start a run at `position`
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidRun` if the collection has ended, a run is
    /// already open, or `position` does not lie strictly after the previous
    /// run and inside the sequence.
    pub fn open_run(&mut self, position: u64) -> Result<(), FormatError> {
        if self.ended {
            return Err(self.invalid(format!("open at {position} after end")));
        }
        if let Some(start) = self.open {
            return Err(self.invalid(format!(
                "open at {position} while run from {start} is open"
            )));
        }
        if let Some(last) = self.runs.last() {
            if position <= last.end() {
                return Err(self.invalid(format!(
                    "open at {position} overlaps or touches run ending at {}",
                    last.end()
                )));
            }
        }
        if position >= self.sequence_length {
            return Err(self.invalid(format!(
                "open at {position} beyond sequence length {}",
                self.sequence_length
            )));
        }

        self.open = Some(position);
        Ok(())
    }

    /// Close the open run at exclusive end `position`
    ///
    /// # Errors
    ///
    /// Returns `FormatError::InvalidRun` if no run is open, `position` is not
    /// after the run start, or it lies beyond the sequence.
    pub fn close_run(&mut self, position: u64) -> Result<(), FormatError> {
        let Some(start) = self.open else {
            return Err(self.invalid(format!("close at {position} with no open run")));
        };
        if position <= start {
            return Err(self.invalid(format!(
                "close at {position} not after run start {start}"
            )));
        }
        if position > self.sequence_length {
            return Err(self.invalid(format!(
                "close at {position} beyond sequence length {}",
                self.sequence_length
            )));
        }

        self.runs.push(LetterRun {
            start,
            length: position - start,
        });
        self.open = None;
        Ok(())
    }

    /// Seal the collection at `position`, closing any open run there
    ///
    /// # Errors
    ///
    /// Returns `FormatError::LengthMismatch` if `position` is not the declared
    /// sequence length, or `FormatError::InvalidRun` if already ended.
    pub fn end(&mut self, position: u64) -> Result<(), FormatError> {
        if self.ended {
            return Err(self.invalid("ended twice".to_string()));
        }
        if position != self.sequence_length {
            return Err(FormatError::LengthMismatch {
                name: self.name.clone(),
                expected: self.sequence_length,
                found: position,
            });
        }
        if self.open.is_some() {
            self.close_run(position)?;
        }
        self.ended = true;
        Ok(())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn sequence_length(&self) -> u64 {
        self.sequence_length
    }

    #[must_use]
    pub fn runs(&self) -> &[LetterRun] {
        &self.runs
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    #[must_use]
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    #[must_use]
    pub fn summary(&self, long_run: u64) -> RunSummary {
        RunSummary {
            name: self.name.clone(),
            length: self.sequence_length,
            runs: self.runs.len(),
            letters: self.runs.iter().map(|r| r.length).sum(),
            long_runs: self.runs.iter().filter(|r| r.length >= long_run).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_accumulate() {
        let mut c = LetterRunCollection::new("chr1", 100);
        c.open_run(0).unwrap();
        c.close_run(10).unwrap();
        c.open_run(20).unwrap();
        c.end(100).unwrap();

        assert_eq!(
            c.runs(),
            &[
                LetterRun { start: 0, length: 10 },
                LetterRun { start: 20, length: 80 }
            ]
        );
        assert!(c.is_ended());

        let summary = c.summary(50);
        assert_eq!(summary.runs, 2);
        assert_eq!(summary.letters, 90);
        assert_eq!(summary.long_runs, 1);
    }

    #[test]
    fn test_open_while_open_fails() {
        let mut c = LetterRunCollection::new("chr1", 100);
        c.open_run(5).unwrap();
        assert!(matches!(c.open_run(8), Err(FormatError::InvalidRun { .. })));
    }

    #[test]
    fn test_close_not_after_start_fails() {
        let mut c = LetterRunCollection::new("chr1", 100);
        c.open_run(5).unwrap();
        assert!(c.close_run(5).is_err());
        assert!(c.close_run(4).is_err());
        assert!(c.close_run(6).is_ok());
    }

    #[test]
    fn test_close_without_open_fails() {
        let mut c = LetterRunCollection::new("chr1", 100);
        assert!(c.close_run(6).is_err());
    }

    #[test]
    fn test_out_of_order_or_adjacent_open_fails() {
        let mut c = LetterRunCollection::new("chr1", 100);
        c.open_run(10).unwrap();
        c.close_run(20).unwrap();

        assert!(c.open_run(15).is_err());
        assert!(c.open_run(5).is_err());
        assert!(c.open_run(20).is_err());
        assert!(c.open_run(21).is_ok());
    }

    #[test]
    fn test_end_must_match_length() {
        let mut c = LetterRunCollection::new("chr1", 100);
        let err = c.end(99).unwrap_err();
        assert!(matches!(
            err,
            FormatError::LengthMismatch { expected: 100, found: 99, .. }
        ));
        c.end(100).unwrap();
        assert!(c.end(100).is_err());
        assert!(c.open_run(50).is_err());
    }

    #[test]
    fn test_bounds() {
        let mut c = LetterRunCollection::new("chr1", 10);
        assert!(c.open_run(10).is_err());
        c.open_run(9).unwrap();
        assert!(c.close_run(11).is_err());
        c.close_run(10).unwrap();
    }
}
