use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::cli::OutputFormat;
use crate::parsing::dict::SequenceDictionary;
use crate::parsing::fasta;
use crate::runs::buckets::{DEFAULT_BUCKETS, DEFAULT_LONG_RUN};
use crate::runs::extractor::DEFAULT_LETTER;
use crate::runs::{scan, BucketConfig, LetterRunBuckets, LetterRunCollection};

#[derive(Args)]
pub struct NrunsArgs {
    /// Reference FASTA (plain or gzip/bgzip compressed)
    #[arg(required = true)]
    pub fasta: PathBuf,

    /// Sequence dictionary (.dict, SAM header or .fai). Read from the FASTA
    /// itself when omitted
    #[arg(long)]
    pub dict: Option<PathBuf>,

    /// Buckets per sequence
    #[arg(long, default_value_t = DEFAULT_BUCKETS)]
    pub buckets: usize,

    /// Minimum run length counted in buckets
    #[arg(long, default_value_t = DEFAULT_LONG_RUN)]
    pub long_run: u64,

    /// Letter to find runs of (case-insensitive)
    #[arg(long, default_value_t = DEFAULT_LETTER)]
    pub letter: char,

    /// Print every run
    #[arg(long)]
    pub runs: bool,
}

/// Execute nruns subcommand
///
/// # Errors
///
/// Returns an error if the FASTA or dictionary cannot be read, or the FASTA
/// disagrees with the dictionary.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: NrunsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let dictionary = match &args.dict {
        Some(path) => SequenceDictionary::load(path)?,
        None => SequenceDictionary::from_entries(
            fasta::read_sequences(&args.fasta, false)?
                .into_iter()
                .map(|s| (s.name, s.length)),
        ),
    };

    let collections = scan(fasta::open_text(&args.fasta)?, &dictionary, args.letter, None)?;

    let config = BucketConfig {
        buckets: args.buckets,
        long_run: args.long_run,
    };
    let buckets: Vec<LetterRunBuckets> = collections
        .iter()
        .map(|c| LetterRunBuckets::from_collection(c, &config))
        .collect();

    info!(
        sequences = collections.len(),
        runs = collections.iter().map(|c| c.runs().len()).sum::<usize>(),
        "Scanned FASTA"
    );

    match format {
        OutputFormat::Text => print_text(&collections, &buckets, &config, args.runs || verbose),
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = collections
                .iter()
                .zip(&buckets)
                .map(|(c, b)| {
                    let mut json = serde_json::json!({
                        "summary": c.summary(config.long_run),
                        "bucket_width": b.bucket_width,
                        "buckets": b.sums,
                    });
                    if args.runs {
                        json["runs"] = serde_json::json!(c.runs());
                    }
                    json
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv(&collections, &buckets, &config),
    }

    Ok(())
}

fn print_text(
    collections: &[LetterRunCollection],
    buckets: &[LetterRunBuckets],
    config: &BucketConfig,
    show_runs: bool,
) {
    let name_width = collections
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:<name_w$} {:>12} {:>8} {:>12} {:>9} {:>12}",
        "Name",
        "Length",
        "Runs",
        "Letters",
        "Long",
        "Bucketed",
        name_w = name_width
    );
    println!("{}", "-".repeat(name_width + 58));

    for (c, b) in collections.iter().zip(buckets) {
        let summary = c.summary(config.long_run);
        println!(
            "{:<name_w$} {:>12} {:>8} {:>12} {:>9} {:>12}",
            summary.name,
            summary.length,
            summary.runs,
            summary.letters,
            summary.long_runs,
            b.total(),
            name_w = name_width
        );
        if show_runs {
            for run in c.runs() {
                println!("  └─ {}..{} ({})", run.start, run.end(), run.length);
            }
        }
    }
}

/// One row per sequence: summary then the bucket sums
fn print_tsv(
    collections: &[LetterRunCollection],
    buckets: &[LetterRunBuckets],
    config: &BucketConfig,
) {
    println!("name\tlength\truns\tletters\tlong_runs\tbucket_width\tbuckets");
    for (c, b) in collections.iter().zip(buckets) {
        let summary = c.summary(config.long_run);
        let sums: Vec<String> = b.sums.iter().map(u64::to_string).collect();
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            summary.name,
            summary.length,
            summary.runs,
            summary.letters,
            summary.long_runs,
            b.bucket_width,
            sums.join(",")
        );
    }
}
