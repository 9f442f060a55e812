//! Reference genome catalog storage and indexing.
//!
//! The catalog is a JSON file listing known reference genomes with their
//! sequences, MD5 checksums and metadata. Every sequence is indexed by MD5
//! and by length so the matcher can find catalog sequences without relying
//! on names.
//!
//! ## Example
//!
//! ```rust,no_run
//! use align_probe::GenomeCatalog;
//! use std::path::Path;
//!
//! let mut catalog = GenomeCatalog::load_from_file(Path::new("genomes.json")).unwrap();
//! catalog.refresh_materialized(Path::new("/data/references"));
//!
//! for genome in catalog.genomes() {
//!     println!("{} local={}", genome.display_name(), genome.materialized);
//! }
//! ```
//!
//! ## Format
//!
//! ```json
//! {
//!   "version": "1.0.0",
//!   "created_at": "2024-01-01T00:00:00Z",
//!   "genomes": [
//!     {"id": "hg38", "build": "GRCh38", "source": "UCSC", "file_name": "hg38.fa.gz",
//!      "sequences": [{"name": "chr1", "length": 248956422, "md5": "..."}]}
//!   ]
//! }
//! ```

pub mod index;
pub mod store;
