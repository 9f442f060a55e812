//! Runs of one letter (by default `N`, the unknown base) in reference FASTA.
//!
//! [`scan`] streams FASTA text, checks each sequence against a
//! [`SequenceDictionary`](crate::parsing::dict::SequenceDictionary), and
//! records runs into one [`LetterRunCollection`] per sequence. Runs may span
//! line breaks. [`LetterRunBuckets`] then sums long runs over fixed-width
//! coordinate buckets for compact reporting.
//!
//! ## Example
//!
//! ```rust
//! use align_probe::parsing::dict::SequenceDictionary;
//! use align_probe::runs::{scan, BucketConfig, LetterRunBuckets};
//!
//! let dict = SequenceDictionary::from_entries([("chr1", 12)]);
//! let fasta = ">chr1\nACGNNN\nNNNNAC\n";
//!
//! let collections = scan(fasta.as_bytes(), &dict, 'N', None).unwrap();
//! assert_eq!(collections[0].runs()[0].start, 3);
//! assert_eq!(collections[0].runs()[0].length, 7);
//!
//! let config = BucketConfig { buckets: 2, long_run: 5 };
//! let buckets = LetterRunBuckets::from_collection(&collections[0], &config);
//! assert_eq!(buckets.sums, vec![2, 4]);
//! ```

pub mod buckets;
pub mod collection;
pub mod extractor;

pub use buckets::{BucketConfig, LetterRunBuckets};
pub use collection::{LetterRun, LetterRunCollection, RunSummary};
pub use extractor::scan;
