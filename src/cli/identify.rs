use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info, warn};

use crate::catalog::store::GenomeCatalog;
use crate::cli::{is_stdin, read_header, OutputFormat};
use crate::core::sequence::SequenceRecord;
use crate::core::types::MatchStatus;
use crate::matching::{ReferenceMatchResult, ReferenceMatcher};
use crate::parsing;

#[derive(Args)]
pub struct IdentifyArgs {
    /// Input file (SAM, BAM, .dict, .fai or FASTA).
    /// Use '-' for header text on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Path to the genome catalog (JSON)
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Directory holding local reference FASTA files
    #[arg(long)]
    pub reference_dir: Option<PathBuf>,

    /// Show catalog hits for every query sequence
    #[arg(long)]
    pub hits: bool,
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the input or catalog cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let query = query_sequences(&args.input)?;
    info!(
        sequences = query.len(),
        with_md5 = query.iter().filter(|s| s.md5.is_some()).count(),
        "Parsed query sequences"
    );

    let mut catalog = GenomeCatalog::load_from_file(&args.catalog)?;
    if let Some(dir) = &args.reference_dir {
        let local = catalog.refresh_materialized(dir);
        debug!(local, dir = %dir.display(), "Checked local references");
    }

    if catalog.is_empty() {
        warn!("Catalog is empty, no genomes to match against");
    }

    let result = ReferenceMatcher::new(&catalog).find_match(&query);

    match format {
        OutputFormat::Text => print_text(&result, args.hits || verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Tsv => print_tsv(&result),
    }

    Ok(())
}

/// Declared sequences of the input, by file type
fn query_sequences(input: &Path) -> anyhow::Result<Vec<SequenceRecord>> {
    if is_stdin(input) {
        return Ok(read_header(input)?.sequences().to_vec());
    }

    if parsing::fasta::is_fasta_file(input) {
        return Ok(parsing::fasta::read_sequences(input, true)?);
    }

    let is_fai = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("fai"));
    if is_fai {
        let text = std::fs::read_to_string(input)?;
        return Ok(parsing::fai::parse_fai_text(&text)?
            .into_iter()
            .map(|(name, length)| SequenceRecord::new(name, length))
            .collect());
    }

    Ok(read_header(input)?.sequences().to_vec())
}

fn print_text(result: &ReferenceMatchResult<'_>, show_hits: bool) {
    println!("Status: {}", result.status);
    println!("Key:    {:?}", result.key);

    match result.status {
        MatchStatus::Available | MatchStatus::Downloadable | MatchStatus::Ambiguous => {
            println!("Builds: {}", result.builds.join(", "));
            println!("\nMatching genomes:");
            for genome in &result.matching {
                let marker = if genome.materialized { "local" } else { "remote" };
                println!("  {} [{marker}]", genome.display_name());
                if let Some(url) = &genome.download_url {
                    println!("    └─ {url}");
                }
            }
            if let Some(preferred) = result.preferred() {
                println!("\nPreferred: {}", preferred.id);
            }
        }
        MatchStatus::Buildable => {
            println!("\nNo catalog genome matches exactly, but every sequence was found.");
        }
        MatchStatus::Unknown => {
            let unresolved: Vec<&str> = result.unresolved().collect();
            if !unresolved.is_empty() {
                println!(
                    "\n{} sequence(s) not found in the catalog: {}",
                    unresolved.len(),
                    unresolved.join(", ")
                );
            }
        }
    }

    if show_hits {
        println!("\nHits:");
        for seq in &result.per_sequence {
            let hits: Vec<String> = seq
                .hits
                .iter()
                .map(|h| format!("{}:{}", h.genome, h.sequence.name))
                .collect();
            println!("  {:<24} {}", seq.query, hits.join(" "));
        }
    }
}

fn print_tsv(result: &ReferenceMatchResult<'_>) {
    println!("status\tid\tbuild\tsource\tmaterialized\tdownload_url");
    if result.matching.is_empty() {
        println!("{}\t\t\t\t\t", result.status);
    }
    for genome in &result.matching {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            result.status,
            genome.id,
            genome.build,
            genome.source,
            genome.materialized,
            genome.download_url.as_deref().unwrap_or("")
        );
    }
}
