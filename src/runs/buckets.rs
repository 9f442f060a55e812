use serde::Serialize;

use crate::runs::collection::LetterRunCollection;

pub const DEFAULT_BUCKETS: usize = 1000;

/// Runs shorter than this are ignored when bucketing
pub const DEFAULT_LONG_RUN: u64 = 300;

/// Configuration for bucket aggregation
#[derive(Debug, Clone, Copy)]
pub struct BucketConfig {
    pub buckets: usize,
    pub long_run: u64,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
            long_run: DEFAULT_LONG_RUN,
        }
    }
}

/// Long-run letters summed over equal-width coordinate buckets of one
/// sequence
#[derive(Debug, Clone, Serialize)]
pub struct LetterRunBuckets {
    pub name: String,
    /// Width of every bucket but the last, which absorbs the remainder
    pub bucket_width: u64,
    pub sums: Vec<u64>,
}

impl LetterRunBuckets {
    /// Partition a finished collection. No buckets are produced when more
    /// buckets than bases are requested.
    #[must_use]
    pub fn from_collection(collection: &LetterRunCollection, config: &BucketConfig) -> Self {
        let length = collection.sequence_length();
        let count = config.buckets as u64;

        if count == 0 || count > length {
            return Self {
                name: collection.name().to_string(),
                bucket_width: 0,
                sums: Vec::new(),
            };
        }

        let width = length / count;
        let last_bucket = count - 1;
        let bucket_of = |position: u64| (position / width).min(last_bucket);
        let mut sums = vec![0u64; config.buckets];

        for run in collection.runs().iter().filter(|r| r.length >= config.long_run) {
            let run_end = run.end();
            for b in bucket_of(run.start)..=bucket_of(run_end - 1) {
                let first = b * width;
                let last = if b == last_bucket {
                    length - 1
                } else {
                    first + width - 1
                };
                // Inclusive bucket end against exclusive run end
                let hi = run_end.min(last);
                let lo = run.start.max(first);
                if hi > lo {
                    #[allow(clippy::cast_possible_truncation)]
                    {
                        sums[b as usize] += hi - lo;
                    }
                }
            }
        }

        Self {
            name: collection.name().to_string(),
            bucket_width: width,
            sums,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.sums.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sums.is_empty()
    }
}
