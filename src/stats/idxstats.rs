//! Per-contig mapped/unmapped counts from an index summary
//! (`name\tlength\tmapped\tunmapped`) and a coarse sex signal derived from
//! X and Y read density.

use std::fmt;

use serde::Serialize;

use crate::core::error::FormatError;
use crate::naming::{is_autosome, to_canonical};

/// X density (relative to autosomes) at or above which two X copies are assumed
pub const X_DIPLOID_RATIO: f64 = 0.75;

/// Y density (relative to autosomes) at or above which a Y is assumed present
pub const Y_PRESENT_RATIO: f64 = 0.1;

/// Y density below which Y is treated as absent (mismapping noise)
pub const Y_ABSENT_RATIO: f64 = 0.05;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContigCounts {
    pub name: String,
    pub length: u64,
    pub mapped: u64,
    pub unmapped: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SexSignal {
    Male,
    Female,
    Undetermined,
}

impl fmt::Display for SexSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "Male"),
            Self::Female => write!(f, "Female"),
            Self::Undetermined => write!(f, "Undetermined"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IdxStatsSummary {
    pub total_mapped: u64,
    pub total_unmapped: u64,
    /// X reads per base relative to autosomes
    pub x_ratio: Option<f64>,
    /// Y reads per base relative to autosomes
    pub y_ratio: Option<f64>,
    pub sex: SexSignal,
}

/// Parse index statistics text
///
/// # Errors
///
/// Returns `FormatError::MalformedRecord` for a line without four fields or
/// with a non-numeric count.
pub fn parse_idxstats_text(text: &str) -> Result<Vec<ContigCounts>, FormatError> {
    let mut counts = Vec::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(FormatError::MalformedRecord {
                line: i + 1,
                reason: format!("expected 4 fields, found {}", fields.len()),
            });
        }

        let number = |field: &str, what: &str| {
            field
                .parse::<u64>()
                .map_err(|_| FormatError::MalformedRecord {
                    line: i + 1,
                    reason: format!("invalid {what} '{field}'"),
                })
        };

        counts.push(ContigCounts {
            name: fields[0].to_string(),
            length: number(fields[1], "length")?,
            mapped: number(fields[2], "mapped count")?,
            unmapped: number(fields[3], "unmapped count")?,
        });
    }

    Ok(counts)
}

#[allow(clippy::cast_precision_loss)]
fn density(mapped: u64, length: u64) -> Option<f64> {
    (length > 0).then(|| mapped as f64 / length as f64)
}

/// Totals and sex signal. Chromosomes are recognized in any naming
/// convention.
#[must_use]
pub fn summarize(counts: &[ContigCounts]) -> IdxStatsSummary {
    let mut auto = (0u64, 0u64);
    let mut x = (0u64, 0u64);
    let mut y = (0u64, 0u64);

    for c in counts {
        let canonical = to_canonical(&c.name);
        let slot = match canonical.as_str() {
            "X" => &mut x,
            "Y" => &mut y,
            name if is_autosome(name) => &mut auto,
            _ => continue,
        };
        slot.0 += c.mapped;
        slot.1 += c.length;
    }

    let auto_density = density(auto.0, auto.1).filter(|d| *d > 0.0);
    let relative = |(mapped, length): (u64, u64)| {
        auto_density.and_then(|a| density(mapped, length).map(|d| d / a))
    };
    let x_ratio = relative(x);
    let y_ratio = relative(y);

    let sex = match (x_ratio, y_ratio) {
        (Some(x), Some(y)) if y >= Y_PRESENT_RATIO && x < X_DIPLOID_RATIO => SexSignal::Male,
        (Some(x), Some(y)) if y < Y_ABSENT_RATIO && x >= X_DIPLOID_RATIO => SexSignal::Female,
        // Reference without Y
        (Some(x), None) if x >= X_DIPLOID_RATIO => SexSignal::Female,
        _ => SexSignal::Undetermined,
    };

    IdxStatsSummary {
        total_mapped: counts.iter().map(|c| c.mapped).sum(),
        total_unmapped: counts.iter().map(|c| c.unmapped).sum(),
        x_ratio,
        y_ratio,
        sex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MALE: &str = "chr1\t1000\t10000\t5\nchr2\t1000\t10000\t5\nchrX\t1000\t5000\t1\nchrY\t1000\t4000\t0\nchrM\t100\t900\t0\n*\t0\t0\t321\n";

    #[test]
    fn test_parse() {
        let counts = parse_idxstats_text(MALE).unwrap();
        assert_eq!(counts.len(), 6);
        assert_eq!(counts[5].name, "*");
        assert_eq!(counts[5].unmapped, 321);
    }

    #[test]
    fn test_parse_malformed() {
        let err = parse_idxstats_text("chr1\t1000\tmany\t0\n").unwrap_err();
        assert!(matches!(err, FormatError::MalformedRecord { line: 1, .. }));
        assert!(parse_idxstats_text("chr1\t1000\n").is_err());
    }

    #[test]
    fn test_male() {
        let summary = summarize(&parse_idxstats_text(MALE).unwrap());
        assert_eq!(summary.total_mapped, 29_900);
        assert_eq!(summary.total_unmapped, 332);
        assert!((summary.x_ratio.unwrap() - 0.5).abs() < 1e-9);
        assert!((summary.y_ratio.unwrap() - 0.4).abs() < 1e-9);
        assert_eq!(summary.sex, SexSignal::Male);
    }

    #[test]
    fn test_female_refseq_names() {
        let text = "NC_000001.11\t1000\t10000\t0\nNC_000023.11\t1000\t9800\t0\nNC_000024.10\t1000\t100\t0\n";
        let summary = summarize(&parse_idxstats_text(text).unwrap());
        assert_eq!(summary.sex, SexSignal::Female);
    }

    #[test]
    fn test_undetermined_without_autosomes() {
        let summary = summarize(&parse_idxstats_text("chrX\t1000\t10\t0\n").unwrap());
        assert_eq!(summary.x_ratio, None);
        assert_eq!(summary.sex, SexSignal::Undetermined);
    }
}
