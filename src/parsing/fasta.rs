//! FASTA input: sequence records (optionally with MD5) and raw text access.
//!
//! Plain and gzip/bgzip compressed files are both accepted:
//! - `.fa`, `.fasta`, `.fna`
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz`, `.fa.bgz`, ...

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;

use crate::core::error::FormatError;
use crate::core::sequence::SequenceRecord;
use crate::utils::validation::check_sequence_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let stripped = if is_gzipped(path) {
        path.file_stem().map(Path::new)
    } else {
        Some(path)
    };

    matches!(
        stripped
            .and_then(Path::extension)
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

fn is_gzipped(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("gz" | "bgz")
    )
}

/// Open a text file, transparently decompressing gzip/bgzip
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be opened.
pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, FormatError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Read name and length of every sequence in a FASTA file.
///
/// With `with_md5`, each record also carries the MD5 of its uppercased
/// residues, the digest stored in `@SQ M5`.
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be read, `FormatError::Noodles`
/// if a record is malformed, `FormatError::InvalidText` if no sequences are
/// found, or `FormatError::TooManySequences` if the limit is exceeded.
pub fn read_sequences(path: &Path, with_md5: bool) -> Result<Vec<SequenceRecord>, FormatError> {
    let mut reader = fasta::io::Reader::new(open_text(path)?);
    read_from(&mut reader, with_md5)
}

fn read_from<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
    with_md5: bool,
) -> Result<Vec<SequenceRecord>, FormatError> {
    let mut sequences = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| FormatError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_sequence_limit(sequences.len()).is_some() {
            return Err(FormatError::TooManySequences(sequences.len()));
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let residues = record.sequence().as_ref();
        let mut sequence = SequenceRecord::new(name, residues.len() as u64);

        if with_md5 {
            let uppercase: Vec<u8> = residues.iter().map(u8::to_ascii_uppercase).collect();
            sequence = sequence.with_md5(format!("{:x}", md5::compute(&uppercase)));
        }

        sequences.push(sequence);
    }

    if sequences.is_empty() {
        return Err(FormatError::InvalidText(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(sequences)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("ref.fa")));
        assert!(is_fasta_file(Path::new("ref.fasta.gz")));
        assert!(is_fasta_file(Path::new("/data/Reference.FNA.bgz")));
        assert!(!is_fasta_file(Path::new("ref.fa.fai")));
        assert!(!is_fasta_file(Path::new("reads.bam")));
        assert!(!is_fasta_file(Path::new("notes.gz")));
    }

    #[test]
    fn test_read_sequences() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1 description\nACGTACGT\nNNNN\n>chr2\nGGGG\n")
            .unwrap();
        temp.flush().unwrap();

        let sequences = read_sequences(temp.path(), false).unwrap();
        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].name, "chr1");
        assert_eq!(sequences[0].length, 12);
        assert_eq!(sequences[0].md5, None);
        assert_eq!(sequences[1].length, 4);
    }

    #[test]
    fn test_md5_on_uppercase() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">chr1\nacgt\n").unwrap();
        temp.flush().unwrap();

        let sequences = read_sequences(temp.path(), true).unwrap();
        assert_eq!(
            sequences[0].md5.as_deref(),
            Some("f1f8f4bf413b16ad135722aa4591043e")
        );
    }

    #[test]
    fn test_gzipped() {
        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">chrM\nACGT\n").unwrap();
        temp.write_all(&encoder.finish().unwrap()).unwrap();
        temp.flush().unwrap();

        let sequences = read_sequences(temp.path(), false).unwrap();
        assert_eq!(sequences[0].name, "chrM");
        assert_eq!(sequences[0].length, 4);
    }

    #[test]
    fn test_empty_fasta() {
        let temp = NamedTempFile::with_suffix(".fa").unwrap();
        assert!(read_sequences(temp.path(), false).is_err());
    }
}
