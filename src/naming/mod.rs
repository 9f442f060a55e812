//! Chromosome name translation between naming conventions.
//!
//! Every supported convention maps onto a single canonical form: bare digits
//! for autosomes and `X`, `Y`, `M` for the sex and mitochondrial
//! chromosomes. Accession names are resolved through fixed tables for the
//! `GRCh38` and T2T-CHM13 assemblies.
//!
//! ```
//! use align_probe::naming::{convert, to_canonical, NamingConvention};
//!
//! assert_eq!(to_canonical("chrMT"), "M");
//! assert_eq!(to_canonical("NC_000001.11"), "1");
//! assert_eq!(convert("chr1", NamingConvention::GenBank).as_deref(), Some("CM000663.2"));
//! assert_eq!(convert("chrUn_gl000220", NamingConvention::RefSeq), None);
//! ```

pub mod canonical;
pub mod tables;

pub use canonical::{
    compare_for_display, convert, is_autosome, sort_for_display, to_canonical, AccessionFamily,
    NamingConvention,
};
