use tracing::debug;

use crate::core::error::FormatError;
use crate::core::header::{HeaderModel, PreviousProgram, ProgramRecord, ReadGroupRecord};
use crate::core::sequence::SequenceRecord;
use crate::core::types::SortOrder;
use crate::utils::validation::{check_sequence_limit, is_valid_md5};

/// Header record types, keyed by their `@XX` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordKind {
    Header,
    Sequence,
    Program,
    ReadGroup,
    Comment,
}

impl RecordKind {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "@HD" => Some(Self::Header),
            "@SQ" => Some(Self::Sequence),
            "@PG" => Some(Self::Program),
            "@RG" => Some(Self::ReadGroup),
            "@CO" => Some(Self::Comment),
            _ => None,
        }
    }
}

/// `KK:value` subfields of a record line. Fields without a two letter key
/// are skipped.
fn subfields(line: &str) -> impl Iterator<Item = (&str, &str)> {
    line.split('\t').skip(1).filter_map(|field| {
        if field.as_bytes().get(2) != Some(&b':') {
            return None;
        }
        Some((field.get(..2)?, field.get(3..)?))
    })
}

/// Parse header text (one record per line)
///
/// # Errors
///
/// See [`parse_header_lines`].
pub fn parse_header_text(text: &str) -> Result<HeaderModel, FormatError> {
    parse_header_lines(text.lines())
}

/// Parse header lines into a [`HeaderModel`]
///
/// Unrecognized record types and blank lines are skipped.
///
/// # Errors
///
/// Returns `FormatError::MissingSequenceField` if an `@SQ` record lacks `SN`
/// or `LN`, `FormatError::InvalidLength` if `LN` is not a positive integer,
/// `FormatError::DuplicateSequence` if two `@SQ` records share a name, or
/// `FormatError::TooManySequences` if the limit is exceeded.
pub fn parse_header_lines<I, S>(lines: I) -> Result<HeaderModel, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut header = HeaderModel::default();

    for line in lines {
        let line = line.as_ref().trim_end_matches(['\r', '\n']);
        let tag = line.split('\t').next().unwrap_or_default();

        match RecordKind::from_tag(tag) {
            Some(RecordKind::Header) => parse_hd(line, &mut header),
            Some(RecordKind::Sequence) => parse_sq(line, &mut header)?,
            Some(RecordKind::Program) => parse_pg(line, &mut header),
            Some(RecordKind::ReadGroup) => parse_rg(line, &mut header),
            Some(RecordKind::Comment) => {
                let text = &line[tag.len()..];
                header
                    .comments
                    .push(text.strip_prefix('\t').unwrap_or(text).to_string());
            }
            None => {}
        }
    }

    debug!(
        sequences = header.sequences().len(),
        programs = header.programs.len(),
        read_groups = header.read_groups.len(),
        sort_order = %header.sort_order,
        "Parsed header"
    );

    Ok(header)
}

fn parse_hd(line: &str, header: &mut HeaderModel) {
    for (key, value) in subfields(line) {
        match key {
            "VN" => header.version = Some(value.to_string()),
            "SO" => header.sort_order = SortOrder::parse(value),
            "GO" => header.grouping = Some(value.to_string()),
            _ => {}
        }
    }
}

fn parse_sq(line: &str, header: &mut HeaderModel) -> Result<(), FormatError> {
    let mut name: Option<&str> = None;
    let mut length_raw: Option<&str> = None;
    let mut md5_raw: Option<&str> = None;
    let mut uri: Option<String> = None;
    let mut assembly: Option<String> = None;
    let mut species: Option<String> = None;
    let mut aliases: Vec<String> = Vec::new();

    for (key, value) in subfields(line) {
        match key {
            "SN" => name = Some(value),
            "LN" => length_raw = Some(value),
            "M5" => md5_raw = Some(value),
            "UR" => uri = Some(value.to_string()),
            "AS" => assembly = Some(value.to_string()),
            "SP" => species = Some(value.to_string()),
            "AN" => {
                // Alternate names (aliases), comma-separated
                aliases = value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| FormatError::MissingSequenceField {
        tag: "SN",
        line: line.to_string(),
    })?;
    let length_raw = length_raw.ok_or_else(|| FormatError::MissingSequenceField {
        tag: "LN",
        line: line.to_string(),
    })?;
    let length = match length_raw.parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(FormatError::InvalidLength {
                name: name.to_string(),
                value: length_raw.to_string(),
            })
        }
    };

    if check_sequence_limit(header.sequences().len()).is_some() {
        return Err(FormatError::TooManySequences(header.sequences().len()));
    }

    let mut record = SequenceRecord::new(name, length);
    if let Some(raw) = md5_raw.filter(|m| !is_valid_md5(m)) {
        debug!(sequence = %name, md5 = %raw, "M5 is not a 32-digit hex digest");
    }
    record.md5 = md5_raw.map(str::to_string);
    record.uri = uri;
    record.assembly = assembly;
    record.species = species;
    record.aliases = aliases;

    header
        .push_sequence(record)
        .map_err(|rejected| FormatError::DuplicateSequence(rejected.name))
}

fn parse_pg(line: &str, header: &mut HeaderModel) {
    let mut program = ProgramRecord {
        id: String::new(),
        name: None,
        version: None,
        command_line: None,
        description: None,
        previous: None,
    };

    for (key, value) in subfields(line) {
        match key {
            "ID" => program.id = value.to_string(),
            "PN" => program.name = Some(value.to_string()),
            "VN" => program.version = Some(value.to_string()),
            "CL" => program.command_line = Some(value.to_string()),
            "DS" => program.description = Some(value.to_string()),
            "PP" => {
                // Only programs already seen can be linked; a forward
                // reference is kept as its raw id.
                program.previous = Some(match header.program_index(value) {
                    Some(index) => PreviousProgram::Resolved(index),
                    None => PreviousProgram::Unresolved(value.to_string()),
                });
            }
            _ => {}
        }
    }

    header.programs.push(program);
}

fn parse_rg(line: &str, header: &mut HeaderModel) {
    let fields = subfields(line)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    header.read_groups.push(ReadGroupRecord { fields });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::to_canonical;

    #[test]
    fn test_parse_minimal_header() {
        let header =
            parse_header_text("@HD\tVN:1.0\tSO:coordinate\n@SQ\tSN:chr1\tLN:1000\tM5:abc123")
                .unwrap();

        assert_eq!(header.sort_order, SortOrder::Coordinate);
        assert_eq!(header.version.as_deref(), Some("1.0"));
        assert_eq!(header.sequences().len(), 1);

        let chr1 = &header.sequences()[0];
        assert_eq!(chr1.name, "chr1");
        assert_eq!(chr1.length, 1000);
        assert_eq!(to_canonical(&chr1.name), "1");
        // M5 is kept as written, even when it is not a 32-digit digest
        assert_eq!(chr1.md5.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_parse_full_header() {
        let text = "@HD\tVN:1.6\tSO:queryname\tGO:query
@SQ\tSN:chr1\tLN:248956422\tM5:6AEF897C3D6FF0C78AFF06AC189178DD\tUR:file:///ref/hg38.fa
@SQ\tSN:chr2\tLN:242193529\tAS:GRCh38\tSP:Homo sapiens
@SQ\tSN:chrM\tLN:16569\tAN:MT,chrMT
@RG\tID:rg1\tSM:sample1\tPL:ILLUMINA\tLB:lib1
@PG\tID:bwa\tPN:bwa\tVN:0.7.17\tCL:bwa mem ref.fa r1.fq r2.fq
@PG\tID:samtools\tPN:samtools\tPP:bwa\tVN:1.17
@CO\tfree text\twith tab
@XX\tunknown record
";
        let header = parse_header_text(text).unwrap();

        assert_eq!(header.sort_order, SortOrder::QueryName);
        assert_eq!(header.grouping.as_deref(), Some("query"));

        let names: Vec<&str> = header.sequences().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["chr1", "chr2", "chrM"]);
        assert_eq!(
            header.sequence("chr1").unwrap().md5.as_deref(),
            Some("6AEF897C3D6FF0C78AFF06AC189178DD")
        );
        assert_eq!(
            header.sequence("chr1").unwrap().uri.as_deref(),
            Some("file:///ref/hg38.fa")
        );
        assert_eq!(
            header.sequence("chr2").unwrap().species.as_deref(),
            Some("Homo sapiens")
        );
        assert_eq!(header.sequence("chrM").unwrap().aliases, vec!["MT", "chrMT"]);

        assert_eq!(header.read_groups.len(), 1);
        assert_eq!(header.read_groups[0].id(), Some("rg1"));
        assert_eq!(header.read_groups[0].platform(), Some("ILLUMINA"));
        assert_eq!(header.read_groups[0].fields.len(), 4);

        assert_eq!(header.programs.len(), 2);
        assert_eq!(
            header.programs[0].command_line.as_deref(),
            Some("bwa mem ref.fa r1.fq r2.fq")
        );
        assert_eq!(header.programs[1].previous, Some(PreviousProgram::Resolved(0)));
        let chain: Vec<&str> = header.program_chain(1).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(chain, vec!["samtools", "bwa"]);

        assert_eq!(header.comments, vec!["free text\twith tab"]);
    }

    #[test]
    fn test_sequence_order_preserved() {
        let names = ["chr3", "chr1", "chrX", "chr2", "chrUn_gl000220"];
        let lines: Vec<String> = names
            .iter()
            .enumerate()
            .map(|(i, n)| format!("@SQ\tSN:{n}\tLN:{}", (i + 1) * 10))
            .collect();

        let header = parse_header_lines(&lines).unwrap();
        let parsed: Vec<&str> = header.sequences().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(parsed, names);
        assert_eq!(header.sequences()[4].length, 50);
    }

    #[test]
    fn test_program_forward_reference_left_unresolved() {
        // Known limitation: PP pointing at a later @PG stays a plain id
        let text = "@PG\tID:samtools\tPP:bwa\n@PG\tID:bwa\tPN:bwa\n";
        let header = parse_header_text(text).unwrap();
        assert_eq!(
            header.programs[0].previous,
            Some(PreviousProgram::Unresolved("bwa".to_string()))
        );
        assert_eq!(header.program_chain(0).len(), 1);
    }

    #[test]
    fn test_duplicate_sequence_is_error() {
        let text = "@SQ\tSN:chr1\tLN:100\n@SQ\tSN:chr1\tLN:200\n";
        let err = parse_header_text(text).unwrap_err();
        assert!(matches!(err, FormatError::DuplicateSequence(ref n) if n == "chr1"));
    }

    #[test]
    fn test_missing_name_or_length_is_error() {
        let err = parse_header_text("@SQ\tLN:100\n").unwrap_err();
        assert!(matches!(err, FormatError::MissingSequenceField { tag: "SN", .. }));

        let err = parse_header_text("@SQ\tSN:chr1\n").unwrap_err();
        assert!(matches!(err, FormatError::MissingSequenceField { tag: "LN", .. }));
    }

    #[test]
    fn test_invalid_length_is_error() {
        let err = parse_header_text("@SQ\tSN:chr1\tLN:abc\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidLength { .. }));

        let err = parse_header_text("@SQ\tSN:chr1\tLN:0\n").unwrap_err();
        assert!(matches!(err, FormatError::InvalidLength { .. }));
    }

    #[test]
    fn test_unknown_sort_order_does_not_fail() {
        let header = parse_header_text("@HD\tVN:1.6\tSO:sideways\n").unwrap();
        assert_eq!(header.sort_order, SortOrder::Unknown);
    }

    #[test]
    fn test_missing_hd_defaults() {
        let header = parse_header_text("@SQ\tSN:1\tLN:5\r\n").unwrap();
        assert_eq!(header.sort_order, SortOrder::Unknown);
        assert!(header.version.is_none());
        assert_eq!(header.sequences()[0].length, 5);
    }

    #[test]
    fn test_empty_input() {
        let header = parse_header_text("").unwrap();
        assert!(header.sequences().is_empty());
    }
}
