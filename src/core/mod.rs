//! Core data types for alignment-file inspection.
//!
//! - [`SequenceRecord`]: a named, sized, optionally hashed sequence
//! - [`HeaderModel`]: the structured contents of a SAM header
//! - [`Genome`]: a reference genome definition from the catalog
//! - [`SortOrder`], [`NamingStyle`], [`MatchStatus`], [`ReadType`]: classification types
//! - [`FormatError`]: malformed input
//!
//! ## Naming styles
//!
//! | Style   | Chromosome 1  | Mitochondrial |
//! |---------|---------------|---------------|
//! | Chr     | chr1          | chrM          |
//! | Numeric | 1             | MT            |
//! | RefSeq  | NC_000001.11  | NC_012920.1   |
//! | GenBank | CM000663.2    | J01415.2      |
//!
//! [`SequenceRecord`]: sequence::SequenceRecord
//! [`HeaderModel`]: header::HeaderModel
//! [`Genome`]: genome::Genome
//! [`SortOrder`]: types::SortOrder
//! [`NamingStyle`]: types::NamingStyle
//! [`MatchStatus`]: types::MatchStatus
//! [`ReadType`]: types::ReadType
//! [`FormatError`]: error::FormatError

pub mod error;
pub mod genome;
pub mod header;
pub mod sequence;
pub mod types;
