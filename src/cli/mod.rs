//! Command-line interface for align-probe.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **header**: Summarize the header of a SAM/BAM file
//! - **identify**: Identify the reference genome from a SAM/BAM header
//! - **stats**: Read length, insert size and mapping quality statistics
//! - **nruns**: Runs of unknown bases in a reference FASTA
//! - **names**: Canonicalize and convert chromosome names
//! - **catalog**: List, show, export or extend the genome catalog
//!
//! ## Usage
//!
//! ```text
//! # Identify the reference from a BAM file
//! align-probe identify sample.bam --catalog genomes.json
//!
//! # Pipe a header from samtools
//! samtools view -H sample.bam | align-probe header -
//!
//! # Read statistics from SAM text
//! samtools view sample.bam | align-probe stats - --format json
//!
//! # N runs bucketed per sequence
//! align-probe nruns hg38.fa.gz --dict hg38.dict --format tsv
//! ```

use std::io::{self, Read};
use std::path::Path;

use clap::{Parser, Subcommand};

use crate::core::header::HeaderModel;
use crate::parsing;

pub mod catalog;
pub mod header;
pub mod identify;
pub mod names;
pub mod nruns;
pub mod stats;

#[derive(Parser)]
#[command(name = "align-probe")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Infer reference build, read statistics and N runs from alignment files")]
#[command(
    long_about = "align-probe inspects alignment files using their metadata alone.\n\nIt reports:\n- Which known reference genome the file was aligned against\n- Read length, insert size and mapping quality over a sample of reads\n- Sort order, sequencer platform and naming conventions\n- Runs of unknown bases in reference FASTA, bucketed for reporting"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a SAM/BAM header
    Header(header::HeaderArgs),

    /// Identify the reference genome used in a SAM/BAM file
    Identify(identify::IdentifyArgs),

    /// Sample reads and report population statistics
    Stats(stats::StatsArgs),

    /// Find runs of unknown bases in a reference FASTA
    Nruns(nruns::NrunsArgs),

    /// Canonicalize, convert and sort chromosome names
    Names(names::NamesArgs),

    /// Manage the genome catalog
    Catalog(catalog::CatalogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Whether a path argument means standard input
pub(crate) fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Parse a header from a SAM/BAM/`.dict` file, or header text on stdin
pub(crate) fn read_header(input: &Path) -> anyhow::Result<HeaderModel> {
    if is_stdin(input) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(parsing::header::parse_header_text(&buffer)?);
    }
    Ok(parsing::sam::parse_file(input)?)
}
