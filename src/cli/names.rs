use clap::Args;

use crate::cli::OutputFormat;
use crate::naming::{convert, sort_for_display, to_canonical, NamingConvention};

#[derive(Args)]
pub struct NamesArgs {
    /// Chromosome names
    #[arg(required = true, num_args = 1..)]
    pub names: Vec<String>,

    /// Convert to this naming convention
    #[arg(long, value_enum)]
    pub to: Option<NamingConvention>,

    /// Sort in display order (autosomes, X, Y, M, others)
    #[arg(long)]
    pub sort: bool,

    /// Sort the remaining names alphabetically
    #[arg(long, requires = "sort")]
    pub alphabetical: bool,
}

/// Execute names subcommand
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn run(args: NamesArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut names = args.names;
    if args.sort {
        sort_for_display(&mut names, args.alphabetical);
    }

    let rows: Vec<(String, String, Option<String>)> = names
        .into_iter()
        .map(|name| {
            let canonical = to_canonical(&name);
            let converted = args.to.and_then(|target| convert(&name, target));
            (name, canonical, converted)
        })
        .collect();

    match format {
        OutputFormat::Text => {
            for (name, canonical, converted) in &rows {
                match (args.to, converted) {
                    (Some(_), Some(c)) => println!("{name}\t{canonical}\t{c}"),
                    (Some(_), None) => println!("{name}\t{canonical}\t(unmapped)"),
                    (None, _) => println!("{name}\t{canonical}"),
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = rows
                .iter()
                .map(|(name, canonical, converted)| {
                    serde_json::json!({
                        "name": name,
                        "canonical": canonical,
                        "converted": converted,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("name\tcanonical\tconverted");
            for (name, canonical, converted) in &rows {
                println!("{name}\t{canonical}\t{}", converted.as_deref().unwrap_or(""));
            }
        }
    }

    Ok(())
}
