use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tracing::{debug, info};

use crate::catalog::store::GenomeCatalog;
use crate::cli::OutputFormat;
use crate::core::genome::Genome;
use crate::parsing::fasta;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all genomes in the catalog
    List {
        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Directory holding local reference FASTA files
        #[arg(long)]
        reference_dir: Option<PathBuf>,

        /// Filter by build (e.g., "GRCh38")
        #[arg(long)]
        build: Option<String>,
    },

    /// Show details of one genome
    Show {
        /// Genome ID
        #[arg(required = true)]
        id: String,

        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// Show all sequences
        #[arg(long)]
        all_sequences: bool,
    },

    /// Write the catalog back out as normalized JSON
    Export {
        /// Output file path
        #[arg(required = true)]
        output: PathBuf,

        /// Path to catalog file
        #[arg(long, required = true)]
        catalog: PathBuf,
    },

    /// Add a genome described by a reference FASTA
    Add {
        /// Reference FASTA (MD5s are computed from its sequences)
        #[arg(required = true)]
        fasta: PathBuf,

        /// Unique genome ID (e.g., "hg38")
        #[arg(long, required = true)]
        id: String,

        /// Build label (e.g., "GRCh38")
        #[arg(long, required = true)]
        build: String,

        /// Source organization (e.g., "UCSC")
        #[arg(long, required = true)]
        source: String,

        /// Reference FASTA download URL
        #[arg(long)]
        download_url: Option<String>,

        /// Description text
        #[arg(long)]
        description: Option<String>,

        /// Existing catalog to append to. A new catalog is started otherwise
        #[arg(long)]
        append_to: Option<PathBuf>,

        /// Output file (JSON). If not specified, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog or FASTA cannot be read or written.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List {
            catalog,
            reference_dir,
            build,
        } => run_list(
            &catalog,
            reference_dir.as_deref(),
            build.as_deref(),
            format,
            verbose,
        ),
        CatalogCommands::Show {
            id,
            catalog,
            all_sequences,
        } => run_show(&id, &catalog, all_sequences, format),
        CatalogCommands::Export { output, catalog } => run_export(&output, &catalog),
        CatalogCommands::Add {
            fasta,
            id,
            build,
            source,
            download_url,
            description,
            append_to,
            output,
        } => {
            let mut genome = Genome::new(id, build, source);
            genome.download_url = download_url;
            genome.description = description;
            run_add(genome, &fasta, append_to.as_deref(), output.as_deref())
        }
    }
}

fn run_list(
    catalog_path: &Path,
    reference_dir: Option<&Path>,
    build_filter: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let mut catalog = GenomeCatalog::load_from_file(catalog_path)?;
    if let Some(dir) = reference_dir {
        catalog.refresh_materialized(dir);
    }
    debug!(genomes = catalog.len(), "Loaded catalog");

    let filtered: Vec<&Genome> = catalog
        .genomes()
        .iter()
        .filter(|g| {
            build_filter.map_or(true, |b| g.build.to_lowercase().contains(&b.to_lowercase()))
        })
        .collect();

    match format {
        OutputFormat::Text => {
            let id_width = filtered.iter().map(|g| g.id.len()).max().unwrap_or(2).max(2);
            let build_width = filtered
                .iter()
                .map(|g| g.build.len())
                .max()
                .unwrap_or(5)
                .max(5);
            let source_width = filtered
                .iter()
                .map(|g| g.source.len())
                .max()
                .unwrap_or(6)
                .max(6);
            let total_width = id_width + build_width + source_width + 10 + 6 + 4;

            println!("Genome Catalog ({} genomes)\n", filtered.len());
            println!(
                "{:<id_w$} {:<b_w$} {:<s_w$} {:>10} {:>6}",
                "ID",
                "Build",
                "Source",
                "Sequences",
                "Local",
                id_w = id_width,
                b_w = build_width,
                s_w = source_width
            );
            println!("{}", "-".repeat(total_width));

            for g in &filtered {
                println!(
                    "{:<id_w$} {:<b_w$} {:<s_w$} {:>10} {:>6}",
                    g.id,
                    g.build,
                    g.source,
                    g.sequences.len(),
                    if g.materialized { "yes" } else { "no" },
                    id_w = id_width,
                    b_w = build_width,
                    s_w = source_width
                );
                if verbose {
                    let md5_count = g.sequences.iter().filter(|s| s.md5.is_some()).count();
                    match &g.download_url {
                        Some(url) => println!(
                            "  └─ MD5: {}/{}  URL: {}",
                            md5_count,
                            g.sequences.len(),
                            url
                        ),
                        None => println!("  └─ MD5: {}/{}", md5_count, g.sequences.len()),
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = filtered
                .iter()
                .map(|g| {
                    serde_json::json!({
                        "id": g.id,
                        "display_name": g.display_name(),
                        "build": g.build,
                        "source": g.source,
                        "sequence_count": g.sequences.len(),
                        "md5_count": g.sequences.iter().filter(|s| s.md5.is_some()).count(),
                        "total_length": g.total_length(),
                        "materialized": g.materialized,
                        "download_url": g.download_url,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tbuild\tsource\tsequence_count\ttotal_length\tmaterialized\tdownload_url");
            for g in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                    g.id,
                    g.build,
                    g.source,
                    g.sequences.len(),
                    g.total_length(),
                    g.materialized,
                    g.download_url.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}

fn run_show(
    id: &str,
    catalog_path: &Path,
    all_sequences: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let catalog = GenomeCatalog::load_from_file(catalog_path)?;
    let genome = catalog
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("Genome '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Genome: {}\n", genome.display_name());
            println!("ID:        {}", genome.id);
            println!("Build:     {}", genome.build);
            println!("Source:    {}", genome.source);
            if let Some(description) = &genome.description {
                println!("About:     {description}");
            }
            println!("Sequences: {}", genome.sequences.len());
            println!("Length:    {}", genome.total_length());
            if let Some(url) = &genome.download_url {
                println!("URL:       {url}");
            }

            let shown = if all_sequences {
                genome.sequences.len()
            } else {
                genome.sequences.len().min(25)
            };
            println!("\nSequences:");
            for s in &genome.sequences[..shown] {
                println!(
                    "  {:<24} {:>12}  {}",
                    s.name,
                    s.length,
                    s.md5.as_deref().unwrap_or("")
                );
            }
            if shown < genome.sequences.len() {
                println!(
                    "  ... {} more (use --all-sequences)",
                    genome.sequences.len() - shown
                );
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(genome)?),
        OutputFormat::Tsv => {
            println!("name\tlength\tmd5\tcanonical");
            for s in &genome.sequences {
                println!(
                    "{}\t{}\t{}\t{}",
                    s.name,
                    s.length,
                    s.md5.as_deref().unwrap_or(""),
                    s.canonical_name()
                );
            }
        }
    }

    Ok(())
}

fn run_export(output: &Path, catalog_path: &Path) -> anyhow::Result<()> {
    let catalog = GenomeCatalog::load_from_file(catalog_path)?;

    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!("Exported {} genomes to {}", catalog.len(), output.display());

    Ok(())
}

fn run_add(
    genome: Genome,
    fasta_path: &Path,
    append_to: Option<&Path>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let sequences = fasta::read_sequences(fasta_path, true)?;
    info!(
        genome = %genome.id,
        sequences = sequences.len(),
        "Read reference FASTA"
    );

    let file_name = fasta_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());
    let mut genome = genome.with_sequences(sequences);
    genome.file_name = file_name;

    let mut catalog = match append_to {
        Some(path) => GenomeCatalog::load_from_file(path)?,
        None => GenomeCatalog::new(),
    };
    catalog.add_genome(genome)?;

    let json = catalog.to_json()?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("Wrote {} genomes to {}", catalog.len(), path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
