use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::cli::{read_header, OutputFormat};
use crate::core::header::{HeaderModel, PreviousProgram};

#[derive(Args)]
pub struct HeaderArgs {
    /// Input file (SAM, BAM or .dict). Use '-' for header text on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// List every sequence
    #[arg(long)]
    pub all_sequences: bool,
}

/// Execute header subcommand
///
/// # Errors
///
/// Returns an error if the header cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: HeaderArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let header = read_header(&args.input)?;
    debug!(sequences = header.sequences().len(), "Parsed header");

    match format {
        OutputFormat::Text => print_text(&header, args.all_sequences || verbose),
        OutputFormat::Json => print_json(&header)?,
        OutputFormat::Tsv => print_tsv(&header),
    }

    Ok(())
}

fn print_text(header: &HeaderModel, all_sequences: bool) {
    println!("Version:      {}", header.version.as_deref().unwrap_or("-"));
    println!("Sort order:   {}", header.sort_order);
    if let Some(grouping) = &header.grouping {
        println!("Grouping:     {grouping}");
    }
    println!("Sequences:    {}", header.sequences().len());
    println!("Total length: {}", header.total_length());
    println!("MD5 coverage: {:.0}%", header.md5_coverage() * 100.0);
    println!("Naming:       {}", header.chromosome_naming_style());
    println!("Mito naming:  {}", header.mitochondrial_naming_style());

    if !header.read_groups.is_empty() {
        println!("\nRead groups:");
        for rg in &header.read_groups {
            println!(
                "  {}  SM:{}  PL:{}",
                rg.id().unwrap_or("-"),
                rg.sample().unwrap_or("-"),
                rg.platform().unwrap_or("-")
            );
        }
    }

    if !header.programs.is_empty() {
        println!("\nPrograms:");
        for (i, pg) in header.programs.iter().enumerate() {
            let chain: Vec<&str> = header
                .program_chain(i)
                .iter()
                .map(|p| p.id.as_str())
                .collect();
            let unresolved = match &pg.previous {
                Some(PreviousProgram::Unresolved(id)) => format!(" (PP:{id} unresolved)"),
                _ => String::new(),
            };
            println!(
                "  {}  {}{}  chain: {}",
                pg.id,
                pg.name.as_deref().unwrap_or("-"),
                unresolved,
                chain.join(" <- ")
            );
        }
    }

    if all_sequences {
        println!("\nSequences:");
        for seq in header.sequences() {
            println!(
                "  {:<24} {:>12}  {}",
                seq.name,
                seq.length,
                seq.md5.as_deref().unwrap_or("")
            );
        }
    }

    if !header.comments.is_empty() {
        println!("\nComments: {}", header.comments.len());
    }
}

fn print_json(header: &HeaderModel) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "header": header,
        "chromosome_naming_style": header.chromosome_naming_style(),
        "mitochondrial_naming_style": header.mitochondrial_naming_style(),
        "total_length": header.total_length(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(header: &HeaderModel) {
    println!("name\tlength\tmd5\tcanonical");
    for seq in header.sequences() {
        println!(
            "{}\t{}\t{}\t{}",
            seq.name,
            seq.length,
            seq.md5.as_deref().unwrap_or(""),
            seq.canonical_name()
        );
    }
}
