//! Decoding of alignment records into the minimal form the read sampler needs.
//!
//! Records come either as SAM text lines (e.g. the output of `samtools view`)
//! or straight from a BAM file through noodles.

use std::io::{BufRead, Read};

use noodles::{bam, sam};

use crate::core::error::FormatError;

pub const FLAG_PAIRED: u16 = 0x1;
pub const FLAG_SECONDARY: u16 = 0x100;
pub const FLAG_QC_FAIL: u16 = 0x200;
pub const FLAG_DUPLICATE: u16 = 0x400;
pub const FLAG_SUPPLEMENTARY: u16 = 0x800;

/// Mapping quality meaning "not available"
pub const MAPQ_UNAVAILABLE: u8 = 255;

/// The fields of one alignment record used for sampling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// Read name (QNAME)
    pub name: String,
    pub flags: u16,
    /// Reference sequence name (RNAME), `*` when unmapped
    pub reference_name: String,
    pub mapping_quality: u8,
    /// Mate reference name (RNEXT); `=` means same as `reference_name`
    pub mate_reference_name: String,
    /// Observed template length (TLEN)
    pub template_length: i64,
    /// Length of SEQ as stored. The `*` placeholder has length 1.
    pub sequence_length: usize,
}

impl AlignmentRecord {
    #[must_use]
    pub fn is_paired(&self) -> bool {
        self.flags & FLAG_PAIRED != 0
    }

    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        self.flags & FLAG_DUPLICATE != 0
    }

    /// Secondary, supplementary or QC-failed
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.flags & (FLAG_SECONDARY | FLAG_SUPPLEMENTARY | FLAG_QC_FAIL) != 0
    }

    /// The mate is declared on the same reference sequence
    #[must_use]
    pub fn mate_on_same_contig(&self) -> bool {
        match self.mate_reference_name.as_str() {
            "=" => true,
            "*" | "" => false,
            mate => mate == self.reference_name,
        }
    }

    /// Parse one SAM text line. `line_number` is used only for errors.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::MalformedRecord` when fewer than 11 fields are
    /// present or FLAG, MAPQ or TLEN are not integers.
    pub fn from_sam_line(line: &str, line_number: usize) -> Result<Self, FormatError> {
        let malformed = |reason: String| FormatError::MalformedRecord {
            line: line_number,
            reason,
        };

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 11 {
            return Err(malformed(format!(
                "expected at least 11 fields, found {}",
                fields.len()
            )));
        }

        let flags = fields[1]
            .parse()
            .map_err(|_| malformed(format!("invalid FLAG '{}'", fields[1])))?;
        let mapping_quality = fields[4]
            .parse()
            .map_err(|_| malformed(format!("invalid MAPQ '{}'", fields[4])))?;
        let template_length = fields[8]
            .parse()
            .map_err(|_| malformed(format!("invalid TLEN '{}'", fields[8])))?;

        Ok(Self {
            name: fields[0].to_string(),
            flags,
            reference_name: fields[2].to_string(),
            mapping_quality,
            mate_reference_name: fields[6].to_string(),
            template_length,
            sequence_length: fields[9].len(),
        })
    }

    fn from_bam(record: &bam::Record, header: &sam::Header) -> std::io::Result<Self> {
        let reference_id = record.reference_sequence_id().transpose()?;
        let mate_id = record.mate_reference_sequence_id().transpose()?;

        let name_of = |id: Option<usize>| {
            id.and_then(|i| header.reference_sequences().get_index(i))
                .map_or_else(|| "*".to_string(), |(name, _)| name.to_string())
        };

        let mate_reference_name = match (reference_id, mate_id) {
            (Some(a), Some(b)) if a == b => "=".to_string(),
            (_, mate) => name_of(mate),
        };

        Ok(Self {
            name: record.name().map(|n| n.to_string()).unwrap_or_default(),
            flags: u16::from(record.flags()),
            reference_name: name_of(reference_id),
            mapping_quality: record
                .mapping_quality()
                .map_or(MAPQ_UNAVAILABLE, |q| q.get()),
            mate_reference_name,
            template_length: i64::from(record.template_length()),
            sequence_length: record.sequence().len(),
        })
    }
}

/// Lazily decode SAM text records, skipping `@` header and blank lines
pub fn sam_records<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<AlignmentRecord, FormatError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Err(e) => Some(Err(FormatError::Io(e))),
            Ok(line) if line.is_empty() || line.starts_with('@') => None,
            Ok(line) => Some(AlignmentRecord::from_sam_line(&line, i + 1)),
        })
}

/// Lazily decode records from a BAM stream
pub struct BamRecords<R> {
    reader: bam::io::Reader<R>,
    header: sam::Header,
    record: bam::Record,
}

impl<R: Read> BamRecords<R> {
    /// Read the BAM header and prepare to stream records
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Noodles` if the header cannot be decoded.
    pub fn new(mut reader: bam::io::Reader<R>) -> Result<Self, FormatError> {
        let header = reader
            .read_header()
            .map_err(|e| FormatError::Noodles(e.to_string()))?;

        Ok(Self {
            reader,
            header,
            record: bam::Record::default(),
        })
    }
}

impl<R: Read> Iterator for BamRecords<R> {
    type Item = Result<AlignmentRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(0) => None,
            Ok(_) => Some(
                AlignmentRecord::from_bam(&self.record, &self.header)
                    .map_err(|e| FormatError::Noodles(e.to_string())),
            ),
            Err(e) => Some(Err(FormatError::Noodles(e.to_string()))),
        }
    }
}
