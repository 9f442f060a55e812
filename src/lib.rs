//! # align-probe
//!
//! A library for inferring what an alignment file contains from its metadata
//! alone.
//!
//! Alignment files arrive with little context: the reference they were
//! aligned against, the sequencer, and the read layout are rarely stated
//! outright. `align-probe` recovers them from the SAM/BAM header and a small
//! sample of reads, and builds N-run reports from reference FASTA.
//!
//! ## Features
//!
//! - **Header parsing**: `@HD`, `@SQ`, `@PG`, `@RG` and `@CO` into a typed model
//! - **Reference identification**: MD5 or length based matching against a
//!   catalog, with ambiguity reported rather than resolved
//! - **Read statistics**: Welford mean/standard deviation of read length,
//!   insert size and mapping quality over a recency-biased window
//! - **Name translation**: `chr1`, `1`, `NC_000001.11`, `CM000663.2` and
//!   T2T accessions to one canonical form and back
//! - **Unknown-base runs**: runs of `N` per sequence, bucketed by coordinate
//!
//! ## Example
//!
//! ```rust
//! use align_probe::parsing::header::parse_header_text;
//! use align_probe::{Genome, GenomeCatalog, MatchStatus, ReferenceMatcher, SequenceRecord};
//!
//! let header = parse_header_text(
//!     "@HD\tVN:1.6\tSO:coordinate\n@SQ\tSN:chr1\tLN:1000\n@SQ\tSN:chr2\tLN:500\n",
//! )
//! .unwrap();
//!
//! let mut catalog = GenomeCatalog::new();
//! catalog
//!     .add_genome(Genome::new("toy", "Toy1", "Example").with_sequences(vec![
//!         SequenceRecord::new("chr1", 1000),
//!         SequenceRecord::new("chr2", 500),
//!     ]))
//!     .unwrap();
//!
//! let result = ReferenceMatcher::new(&catalog).find_match(header.sequences());
//! assert_eq!(result.status, MatchStatus::Downloadable);
//! assert_eq!(result.builds, vec!["Toy1".to_string()]);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Genome catalog storage and identity-key indexes
//! - [`core`]: Data model for sequences, headers and genomes
//! - [`matching`]: Reference matching
//! - [`naming`]: Chromosome naming conventions
//! - [`parsing`]: Parsers for headers, records, FASTA and dictionaries
//! - [`runs`]: Unknown-base run extraction and bucketing
//! - [`stats`]: Read sampling statistics
//! - [`utils`]: Validation helpers and cancellation
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod naming;
pub mod parsing;
pub mod runs;
pub mod stats;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::GenomeCatalog;
pub use core::error::{FormatError, ScanError};
pub use core::genome::Genome;
pub use core::header::HeaderModel;
pub use core::sequence::SequenceRecord;
pub use core::types::*;
pub use matching::engine::{ReferenceMatchResult, ReferenceMatcher};
pub use stats::{ReadSampler, SampleStatistics, StatsError};
