use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::core::error::FormatError;
use crate::core::header::HeaderModel;
use crate::parsing::header::{parse_header_lines, parse_header_text};

/// Container formats the header can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    /// SAM text, or a bare header such as a Picard `.dict`
    Sam,
    Bam,
}

impl AlignmentFormat {
    /// Detect from file extension, defaulting to SAM text
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("bam") => Self::Bam,
            _ => Self::Sam,
        }
    }
}

/// Parse the header of a SAM/BAM file (or a `.dict`)
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be read, `FormatError::Noodles`
/// if the BAM header cannot be decoded, or any error from
/// [`parse_header_lines`].
pub fn parse_file(path: &Path) -> Result<HeaderModel, FormatError> {
    match AlignmentFormat::from_path(path) {
        AlignmentFormat::Sam => parse_sam_file(path),
        AlignmentFormat::Bam => parse_header_text(&read_bam_header_text(path)?),
    }
}

/// Read the `@` lines at the top of a SAM text file
fn parse_sam_file(path: &Path) -> Result<HeaderModel, FormatError> {
    let reader = BufReader::new(File::open(path)?);

    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.starts_with('@') {
            break;
        }
        lines.push(line);
    }

    parse_header_lines(lines)
}

/// Decode a BAM header with noodles and render it back to SAM text
///
/// # Errors
///
/// Returns `FormatError::Io` if the file cannot be opened, or
/// `FormatError::Noodles` if the header cannot be decoded or re-encoded.
pub fn read_bam_header_text(path: &Path) -> Result<String, FormatError> {
    use noodles::{bam, sam};

    let mut reader = File::open(path).map(bam::io::Reader::new)?;
    let header = reader
        .read_header()
        .map_err(|e| FormatError::Noodles(e.to_string()))?;

    let mut writer = sam::io::Writer::new(Vec::new());
    writer
        .write_header(&header)
        .map_err(|e| FormatError::Noodles(e.to_string()))?;

    String::from_utf8(writer.get_ref().clone()).map_err(|e| FormatError::InvalidText(e.to_string()))
}
