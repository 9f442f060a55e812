use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::error::FormatError;
use crate::core::types::ReadType;
use crate::parsing::record::AlignmentRecord;
use crate::stats::platform::PlatformLookup;
use crate::stats::welford::{RunningStats, Summary};
use crate::utils::CancelToken;

/// Records read before the sample window starts
pub const DEFAULT_SKIP: usize = 20_000;

/// Records kept in the sample window
pub const DEFAULT_LIMIT: usize = 10_000;

/// Insert sizes at or above this magnitude are treated as implausible
pub const DEFAULT_INSERT_SIZE_BOUND: u64 = 50_000;

/// Mean read length above which a long-read platform triggers a second pass
pub const DEFAULT_LONG_READ_THRESHOLD: f64 = 410.0;

/// Window multiplier for the long-read pass
pub const DEFAULT_LONG_READ_FACTOR: usize = 30;

/// Minimum samples per statistic
pub const MIN_SAMPLES: u64 = 3;

/// Configuration for read sampling
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub skip: usize,
    pub limit: usize,
    pub insert_size_bound: u64,
    pub long_read_threshold: f64,
    pub long_read_factor: usize,
    /// Platform label fragments (case-insensitive) that mark long-read vendors
    pub long_read_markers: Vec<String>,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            skip: DEFAULT_SKIP,
            limit: DEFAULT_LIMIT,
            insert_size_bound: DEFAULT_INSERT_SIZE_BOUND,
            long_read_threshold: DEFAULT_LONG_READ_THRESHOLD,
            long_read_factor: DEFAULT_LONG_READ_FACTOR,
            long_read_markers: vec!["Nanopore".to_string(), "PacBio".to_string()],
        }
    }
}

/// Which statistic lacked data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientData {
    ReadLength { found: u64 },
    MappingQuality { found: u64 },
    InsertSize { found: u64 },
    TiedReadType { paired: u64, single: u64 },
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadLength { found } => {
                write!(f, "only {found} usable read lengths (need {MIN_SAMPLES})")
            }
            Self::MappingQuality { found } => {
                write!(f, "only {found} usable mapping qualities (need {MIN_SAMPLES})")
            }
            Self::InsertSize { found } => {
                write!(f, "only {found} usable insert sizes (need {MIN_SAMPLES})")
            }
            Self::TiedReadType { paired, single } => {
                write!(f, "read type undecided ({paired} paired vs {single} single)")
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Insufficient data: {0}")]
    Insufficient(InsufficientData),

    #[error("Sampling cancelled")]
    Cancelled,

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Population statistics over one sample window
#[derive(Debug, Clone, Serialize)]
pub struct SampleStatistics {
    pub read_length: Summary,
    /// Empty for single-end data
    pub insert_size: Summary,
    pub mapping_quality: Summary,
    pub duplicates: u64,
    pub read_type: ReadType,
    pub platform: Option<String>,
    /// Records in the window after skipping
    pub window_size: usize,
    /// Records that fed the statistics
    pub counted: u64,
}

/// Computes [`SampleStatistics`] over a bounded window of records
#[derive(Debug, Clone, Default)]
pub struct ReadSampler {
    config: SamplerConfig,
    platforms: PlatformLookup,
}

#[derive(Default)]
struct Accumulator {
    length: RunningStats,
    insert: RunningStats,
    quality: RunningStats,
    duplicates: u64,
    paired: u64,
    single: u64,
}

impl Accumulator {
    fn observe(&mut self, record: &AlignmentRecord, insert_size_bound: u64) {
        if record.is_duplicate() {
            self.duplicates += 1;
            return;
        }
        if record.is_excluded() {
            return;
        }

        if record.is_paired() {
            self.paired += 1;
        } else {
            self.single += 1;
        }

        // `*` sequences decode to length 1
        if record.sequence_length > 1 {
            #[allow(clippy::cast_precision_loss)]
            self.length.push(record.sequence_length as f64);
        }

        self.quality.push(f64::from(record.mapping_quality));

        let insert = record.template_length.unsigned_abs();
        if record.mate_on_same_contig() && insert < insert_size_bound {
            #[allow(clippy::cast_precision_loss)]
            self.insert.push(insert as f64);
        }
    }

    fn counted(&self) -> u64 {
        self.paired + self.single
    }

    fn read_type(&self) -> ReadType {
        let counted = self.counted();
        if self.paired * 2 > counted {
            ReadType::Paired
        } else if self.single * 2 > counted {
            ReadType::Single
        } else {
            ReadType::Unknown
        }
    }

    fn finish(
        self,
        platform: Option<String>,
        window_size: usize,
    ) -> Result<SampleStatistics, InsufficientData> {
        if self.length.count() < MIN_SAMPLES {
            return Err(InsufficientData::ReadLength {
                found: self.length.count(),
            });
        }
        if self.quality.count() < MIN_SAMPLES {
            return Err(InsufficientData::MappingQuality {
                found: self.quality.count(),
            });
        }

        let read_type = self.read_type();
        match read_type {
            ReadType::Unknown => {
                return Err(InsufficientData::TiedReadType {
                    paired: self.paired,
                    single: self.single,
                })
            }
            ReadType::Paired if self.insert.count() < MIN_SAMPLES => {
                return Err(InsufficientData::InsertSize {
                    found: self.insert.count(),
                })
            }
            _ => {}
        }

        Ok(SampleStatistics {
            read_length: self.length.summary(),
            insert_size: self.insert.summary(),
            mapping_quality: self.quality.summary(),
            duplicates: self.duplicates,
            read_type,
            platform,
            window_size,
            counted: self.counted(),
        })
    }
}

impl ReadSampler {
    #[must_use]
    pub fn new(config: SamplerConfig, platforms: PlatformLookup) -> Self {
        Self { config, platforms }
    }

    #[must_use]
    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Compute statistics over the last `limit` of the first `skip + limit`
    /// records.
    ///
    /// When fewer than `skip + limit` records exist the window still holds the
    /// most recent `limit`, so part of the skipped region may be sampled.
    ///
    /// # Errors
    ///
    /// Returns `StatsError::Insufficient` when a statistic has fewer than
    /// [`MIN_SAMPLES`] values or the read-type vote is tied,
    /// `StatsError::Cancelled` if `cancel` fires, or `StatsError::Format` for
    /// a record that fails to decode.
    pub fn compute<I>(
        &self,
        records: I,
        skip: usize,
        limit: usize,
        cancel: Option<&CancelToken>,
    ) -> Result<SampleStatistics, StatsError>
    where
        I: IntoIterator<Item = Result<AlignmentRecord, FormatError>>,
    {
        let is_cancelled = || cancel.is_some_and(CancelToken::is_cancelled);

        let mut window: VecDeque<AlignmentRecord> = VecDeque::with_capacity(limit.min(1 << 16));
        for record in records.into_iter().take(skip.saturating_add(limit)) {
            if is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            let record = record?;
            if limit == 0 {
                continue;
            }
            if window.len() == limit {
                window.pop_front();
            }
            window.push_back(record);
        }

        let platform = window
            .front()
            .and_then(|r| self.platforms.classify(&r.name))
            .map(str::to_string);

        let mut acc = Accumulator::default();
        for record in &window {
            if is_cancelled() {
                return Err(StatsError::Cancelled);
            }
            acc.observe(record, self.config.insert_size_bound);
        }

        debug!(
            window = window.len(),
            counted = acc.counted(),
            duplicates = acc.duplicates,
            "Sampled alignment records"
        );

        acc.finish(platform, window.len()).map_err(|reason| {
            warn!(%reason, "Not enough data for read statistics");
            StatsError::Insufficient(reason)
        })
    }

    /// Whether `stats` calls for the larger long-read window
    #[must_use]
    pub fn needs_long_read_pass(&self, stats: &SampleStatistics) -> bool {
        if stats.read_length.mean <= self.config.long_read_threshold {
            return false;
        }
        let Some(platform) = stats.platform.as_deref() else {
            return false;
        };
        let platform = platform.to_lowercase();
        self.config
            .long_read_markers
            .iter()
            .any(|m| platform.contains(&m.to_lowercase()))
    }

    /// Window size for the long-read pass
    #[must_use]
    pub fn long_read_limit(&self) -> usize {
        self.config.limit.saturating_mul(self.config.long_read_factor)
    }

    /// Compute with the configured window, then recompute over the long-read
    /// window if [`needs_long_read_pass`](Self::needs_long_read_pass) holds.
    ///
    /// `open` is called once per pass and must yield the records from the
    /// start of the input each time. If the second pass lacks data the first
    /// result is kept.
    ///
    /// # Errors
    ///
    /// Returns any error from the first pass, from `open`, or a cancellation
    /// or format error from the second pass.
    pub fn sample_with_refinement<F, I>(
        &self,
        mut open: F,
        cancel: Option<&CancelToken>,
    ) -> Result<SampleStatistics, StatsError>
    where
        F: FnMut() -> Result<I, FormatError>,
        I: IntoIterator<Item = Result<AlignmentRecord, FormatError>>,
    {
        let first = self.compute(open()?, self.config.skip, self.config.limit, cancel)?;
        if !self.needs_long_read_pass(&first) {
            return Ok(first);
        }

        let limit = self.long_read_limit();
        info!(
            platform = first.platform.as_deref().unwrap_or("unknown"),
            mean_length = first.read_length.mean,
            limit,
            "Long reads detected, resampling with a larger window"
        );

        match self.compute(open()?, self.config.skip, limit, cancel) {
            Ok(second) => Ok(second),
            Err(StatsError::Insufficient(_)) => Ok(first),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::record::{FLAG_DUPLICATE, FLAG_PAIRED, FLAG_SECONDARY};
    use std::cell::Cell;

    fn record(name: &str, flags: u16, len: usize, mapq: u8, tlen: i64) -> AlignmentRecord {
        AlignmentRecord {
            name: name.to_string(),
            flags,
            reference_name: "chr1".to_string(),
            mapping_quality: mapq,
            mate_reference_name: if flags & FLAG_PAIRED == 0 {
                "*".to_string()
            } else {
                "=".to_string()
            },
            template_length: tlen,
            sequence_length: len,
        }
    }

    fn ok(records: Vec<AlignmentRecord>) -> impl Iterator<Item = Result<AlignmentRecord, FormatError>> {
        records.into_iter().map(Ok)
    }

    #[test]
    fn test_paired_statistics() {
        let records = vec![
            record("A00123:8:H5KJDDSXX:1:1101:1:1", FLAG_PAIRED, 150, 60, 300),
            record("A00123:8:H5KJDDSXX:1:1101:1:2", FLAG_PAIRED, 150, 50, -310),
            record("A00123:8:H5KJDDSXX:1:1101:1:3", FLAG_PAIRED, 148, 40, 320),
            record("A00123:8:H5KJDDSXX:1:1101:1:4", FLAG_PAIRED | FLAG_DUPLICATE, 10, 0, 99_999),
            record("A00123:8:H5KJDDSXX:1:1101:1:5", FLAG_PAIRED | FLAG_SECONDARY, 10, 0, 0),
        ];

        let stats = ReadSampler::default().compute(ok(records), 0, 100, None).unwrap();

        assert_eq!(stats.read_type, ReadType::Paired);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.counted, 3);
        assert_eq!(stats.window_size, 5);
        assert_eq!(stats.platform.as_deref(), Some("Illumina"));
        assert_eq!(stats.read_length.count, 3);
        assert!((stats.insert_size.mean - 310.0).abs() < 1e-9);
        assert!((stats.insert_size.std_dev - 10.0).abs() < 1e-9);
        assert!((stats.mapping_quality.mean - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_keeps_most_recent() {
        // 10 records, skip 4, limit 3: window is the last 3 of the first 7
        let records: Vec<_> = (0..10)
            .map(|i| record(&format!("r{i}"), 0, 100 + i, 60, 0))
            .collect();

        let stats = ReadSampler::default().compute(ok(records), 4, 3, None).unwrap();
        assert_eq!(stats.window_size, 3);
        assert!((stats.read_length.mean - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_input_samples_skipped_region() {
        let records: Vec<_> = (0..5)
            .map(|i| record(&format!("r{i}"), 0, 100 + i, 60, 0))
            .collect();

        let stats = ReadSampler::default().compute(ok(records), 100, 3, None).unwrap();
        assert_eq!(stats.window_size, 3);
        assert!((stats.read_length.mean - 103.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_end_ignores_insert_size() {
        let records = vec![
            record("r1", 0, 100, 60, 0),
            record("r2", 0, 101, 60, 0),
            record("r3", 0, 102, 60, 0),
        ];
        let stats = ReadSampler::default().compute(ok(records), 0, 10, None).unwrap();
        assert_eq!(stats.read_type, ReadType::Single);
        assert_eq!(stats.insert_size.count, 0);
    }

    #[test]
    fn test_tied_vote() {
        let records = vec![
            record("r1", 0, 100, 60, 0),
            record("r2", 0, 100, 60, 0),
            record("r3", FLAG_PAIRED, 100, 60, 200),
            record("r4", FLAG_PAIRED, 100, 60, 200),
        ];
        let err = ReadSampler::default().compute(ok(records), 0, 10, None).unwrap_err();
        assert!(matches!(
            err,
            StatsError::Insufficient(InsufficientData::TiedReadType { paired: 2, single: 2 })
        ));
    }

    #[test]
    fn test_too_few_lengths() {
        // `*` sequences do not count toward read length
        let records = vec![
            record("r1", 0, 1, 60, 0),
            record("r2", 0, 100, 60, 0),
            record("r3", 0, 100, 60, 0),
        ];
        let err = ReadSampler::default().compute(ok(records), 0, 10, None).unwrap_err();
        assert!(matches!(
            err,
            StatsError::Insufficient(InsufficientData::ReadLength { found: 2 })
        ));
    }

    #[test]
    fn test_insert_size_bound() {
        let records = vec![
            record("r1", FLAG_PAIRED, 100, 60, 200),
            record("r2", FLAG_PAIRED, 100, 60, 50_000),
            record("r3", FLAG_PAIRED, 100, 60, -250_000),
            record("r4", FLAG_PAIRED, 100, 60, 300),
        ];
        let err = ReadSampler::default().compute(ok(records), 0, 10, None).unwrap_err();
        assert!(matches!(
            err,
            StatsError::Insufficient(InsufficientData::InsertSize { found: 2 })
        ));
    }

    #[test]
    fn test_extreme_template_length_is_out_of_bound() {
        let records = vec![
            record("r1", FLAG_PAIRED, 100, 60, 200),
            record("r2", FLAG_PAIRED, 100, 60, i64::MIN),
            record("r3", FLAG_PAIRED, 100, 60, -300),
            record("r4", FLAG_PAIRED, 100, 60, 250),
        ];
        let stats = ReadSampler::default().compute(ok(records), 0, 10, None).unwrap();
        assert_eq!(stats.insert_size.count, 3);
        assert!((stats.insert_size.mean - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let records = vec![record("r1", 0, 100, 60, 0)];
        let err = ReadSampler::default()
            .compute(ok(records), 0, 10, Some(&cancel))
            .unwrap_err();
        assert!(matches!(err, StatsError::Cancelled));
    }

    #[test]
    fn test_format_error_propagates() {
        let records = vec![Err(FormatError::MalformedRecord {
            line: 1,
            reason: "bad".to_string(),
        })];
        let err = ReadSampler::default().compute(records, 0, 10, None).unwrap_err();
        assert!(matches!(err, StatsError::Format(_)));
    }

    #[test]
    fn test_long_read_refinement_runs_second_pass() {
        let nanopore = "0a1b2c3d-1234-5678-9abc-def012345678";
        let config = SamplerConfig {
            skip: 0,
            limit: 3,
            long_read_factor: 2,
            ..SamplerConfig::default()
        };
        let sampler = ReadSampler::new(config, PlatformLookup::builtin());
        let opened = Cell::new(0);

        let stats = sampler
            .sample_with_refinement(
                || {
                    opened.set(opened.get() + 1);
                    let records: Vec<_> = (0..10)
                        .map(|i| record(nanopore, 0, 5000 + i, 60, 0))
                        .collect();
                    Ok(ok(records))
                },
                None,
            )
            .unwrap();

        assert_eq!(opened.get(), 2);
        assert_eq!(stats.window_size, 6);
        assert_eq!(stats.platform.as_deref(), Some("Oxford Nanopore"));
    }

    #[test]
    fn test_short_reads_skip_second_pass() {
        let sampler = ReadSampler::new(
            SamplerConfig {
                skip: 0,
                ..SamplerConfig::default()
            },
            PlatformLookup::builtin(),
        );
        let opened = Cell::new(0);

        let stats = sampler
            .sample_with_refinement(
                || {
                    opened.set(opened.get() + 1);
                    let records: Vec<_> = (0..5).map(|i| record("r", 0, 150 + i, 60, 0)).collect();
                    Ok(ok(records))
                },
                None,
            )
            .unwrap();

        assert_eq!(opened.get(), 1);
        assert!(!sampler.needs_long_read_pass(&stats));
    }
}
