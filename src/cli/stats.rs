use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::Args;
use noodles::bam;
use tracing::{debug, warn};

use crate::cli::{is_stdin, OutputFormat};
use crate::core::error::FormatError;
use crate::parsing::record::{sam_records, AlignmentRecord, BamRecords};
use crate::parsing::sam::AlignmentFormat;
use crate::stats::idxstats::{self, IdxStatsSummary};
use crate::stats::sampler::{DEFAULT_LIMIT, DEFAULT_SKIP};
use crate::stats::{
    InsufficientData, PlatformLookup, ReadSampler, SampleStatistics, SamplerConfig, StatsError,
};

#[derive(Args)]
pub struct StatsArgs {
    /// Alignment records (SAM or BAM). Use '-' for SAM text on stdin
    #[arg(required = true)]
    pub input: PathBuf,

    /// Records to read before the sample window
    #[arg(long, default_value_t = DEFAULT_SKIP)]
    pub skip: usize,

    /// Records in the sample window
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// JSON table of read-name patterns and platform labels
    #[arg(long)]
    pub platforms: Option<PathBuf>,

    /// Do not resample long-read data with a larger window
    #[arg(long)]
    pub no_long_read_pass: bool,

    /// Per-contig mapped/unmapped counts (name, length, mapped, unmapped)
    #[arg(long)]
    pub idxstats: Option<PathBuf>,
}

type RecordIter = Box<dyn Iterator<Item = Result<AlignmentRecord, FormatError>>>;

fn open_records(path: &Path) -> Result<RecordIter, FormatError> {
    match AlignmentFormat::from_path(path) {
        AlignmentFormat::Bam => {
            let reader = File::open(path).map(bam::io::Reader::new)?;
            Ok(Box::new(BamRecords::new(reader)?))
        }
        AlignmentFormat::Sam => Ok(Box::new(sam_records(BufReader::new(File::open(path)?)))),
    }
}

/// Execute stats subcommand
///
/// # Errors
///
/// Returns an error if the input cannot be read or a record is malformed. A
/// sample with too little data prints a "No result" line instead.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: StatsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let platforms = match &args.platforms {
        Some(path) => PlatformLookup::load(path)?,
        None => PlatformLookup::builtin(),
    };
    debug!(patterns = platforms.len(), "Loaded platform table");

    let config = SamplerConfig {
        skip: args.skip,
        limit: args.limit,
        ..SamplerConfig::default()
    };
    let sampler = ReadSampler::new(config, platforms);

    let result = if is_stdin(&args.input) {
        let records = sam_records(io::stdin().lock());
        let result = sampler.compute(records, args.skip, args.limit, None);
        if let Ok(stats) = &result {
            if !args.no_long_read_pass && sampler.needs_long_read_pass(stats) {
                warn!("Long reads detected on stdin; cannot resample, pass a file to refine");
            }
        }
        result
    } else if args.no_long_read_pass {
        sampler.compute(open_records(&args.input)?, args.skip, args.limit, None)
    } else {
        sampler.sample_with_refinement(|| open_records(&args.input), None)
    };

    let idx = match &args.idxstats {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Some(idxstats::summarize(&idxstats::parse_idxstats_text(&text)?))
        }
        None => None,
    };

    // Too little data is a result to report, not a failure
    let stats = match result {
        Ok(stats) => stats,
        Err(StatsError::Insufficient(reason)) => return print_no_result(&reason, format),
        Err(e) => return Err(e.into()),
    };

    match format {
        OutputFormat::Text => print_text(&stats, idx.as_ref(), verbose),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "statistics": stats,
                "idxstats": idx,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => print_tsv(&stats, idx.as_ref()),
    }

    Ok(())
}

fn print_no_result(reason: &InsufficientData, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("No result: {reason}"),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "statistics": null,
                "insufficient_data": reason.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("metric\tvalue");
            println!("insufficient_data\t{reason}");
        }
    }
    Ok(())
}

fn print_text(stats: &SampleStatistics, idx: Option<&IdxStatsSummary>, verbose: bool) {
    println!("Read type:       {}", stats.read_type);
    println!(
        "Platform:        {}",
        stats.platform.as_deref().unwrap_or("unknown")
    );
    println!(
        "Read length:     {:.1} ± {:.1}",
        stats.read_length.mean, stats.read_length.std_dev
    );
    if stats.insert_size.count > 0 {
        println!(
            "Insert size:     {:.1} ± {:.1}",
            stats.insert_size.mean, stats.insert_size.std_dev
        );
    }
    println!(
        "Mapping quality: {:.1} ± {:.1}",
        stats.mapping_quality.mean, stats.mapping_quality.std_dev
    );
    println!("Duplicates:      {}", stats.duplicates);

    if verbose {
        println!(
            "Sampled:         {} records ({} counted)",
            stats.window_size, stats.counted
        );
    }

    if let Some(idx) = idx {
        println!("\nMapped:          {}", idx.total_mapped);
        println!("Unmapped:        {}", idx.total_unmapped);
        println!("Sex signal:      {}", idx.sex);
        if let (Some(x), Some(y)) = (idx.x_ratio, idx.y_ratio) {
            println!("X/Y density:     {x:.3} / {y:.3}");
        }
    }
}

fn print_tsv(stats: &SampleStatistics, idx: Option<&IdxStatsSummary>) {
    let mut rows = vec![
        ("read_type", stats.read_type.to_string()),
        (
            "platform",
            stats.platform.clone().unwrap_or_default(),
        ),
        ("read_length_mean", format!("{:.3}", stats.read_length.mean)),
        ("read_length_sd", format!("{:.3}", stats.read_length.std_dev)),
        ("insert_size_mean", format!("{:.3}", stats.insert_size.mean)),
        ("insert_size_sd", format!("{:.3}", stats.insert_size.std_dev)),
        ("mapq_mean", format!("{:.3}", stats.mapping_quality.mean)),
        ("mapq_sd", format!("{:.3}", stats.mapping_quality.std_dev)),
        ("duplicates", stats.duplicates.to_string()),
        ("window_size", stats.window_size.to_string()),
        ("counted", stats.counted.to_string()),
    ];
    if let Some(idx) = idx {
        rows.push(("total_mapped", idx.total_mapped.to_string()));
        rows.push(("total_unmapped", idx.total_unmapped.to_string()));
        rows.push(("sex", idx.sex.to_string()));
    }

    println!("metric\tvalue");
    for (metric, value) in rows {
        println!("{metric}\t{value}");
    }
}
