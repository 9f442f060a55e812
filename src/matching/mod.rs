//! Reference genome identification.
//!
//! [`ReferenceMatcher`] compares a query's declared sequences with every
//! genome in a [`GenomeCatalog`](crate::catalog::store::GenomeCatalog):
//!
//! 1. **Identity key**: MD5 when every query sequence has one, else length
//! 2. **Candidates**: genomes whose every sequence shares a key with the query
//! 3. **Perfect matches**: candidates where names, lengths and MD5s agree and
//!    the sequence counts are equal
//!
//! ## Status
//!
//! | Status | Condition |
//! |--------|-----------|
//! | Available | A perfect match is present on local storage |
//! | Downloadable | Perfect matches exist, none local |
//! | Ambiguous | Perfect matches carry different build labels |
//! | Buildable | No perfect match, but every query sequence has a hit |
//! | Unknown | Anything else |
//!
//! ## Example
//!
//! ```rust,no_run
//! use align_probe::{GenomeCatalog, ReferenceMatcher};
//! use align_probe::parsing::header::parse_header_text;
//! use std::path::Path;
//!
//! let catalog = GenomeCatalog::load_from_file(Path::new("genomes.json")).unwrap();
//! let header = parse_header_text("@SQ\tSN:chr1\tLN:248956422\n").unwrap();
//!
//! let result = ReferenceMatcher::new(&catalog).find_match(header.sequences());
//! println!("{}: {:?}", result.status, result.builds);
//! ```

pub mod engine;

pub use engine::{CatalogHit, ReferenceMatchResult, ReferenceMatcher, SequenceHits};
