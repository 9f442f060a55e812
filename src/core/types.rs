use serde::{Deserialize, Serialize};

/// Sort order declared by the `SO` field of `@HD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Coordinate,
    QueryName,
    Unsorted,
    #[default]
    Unknown,
}

impl SortOrder {
    /// Case-insensitive parse; anything unrecognized is `Unknown`
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "coordinate" => SortOrder::Coordinate,
            "queryname" => SortOrder::QueryName,
            "unsorted" => SortOrder::Unsorted,
            _ => SortOrder::Unknown,
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coordinate => write!(f, "coordinate"),
            Self::QueryName => write!(f, "queryname"),
            Self::Unsorted => write!(f, "unsorted"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Chromosome naming style detected from a set of sequence names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStyle {
    /// GenBank accessions: CM000663.2, CP068277.2, J01415.2
    GenBank,
    /// RefSeq accessions: NC_000001.11
    RefSeq,
    /// UCSC style: chr1, chrX
    Chr,
    /// NCBI/Ensembl style: 1, X
    Numeric,
    Unknown,
}

impl NamingStyle {
    #[must_use]
    pub fn is_accession(self) -> bool {
        matches!(self, Self::GenBank | Self::RefSeq)
    }
}

impl std::fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GenBank => write!(f, "GenBank"),
            Self::RefSeq => write!(f, "RefSeq"),
            Self::Chr => write!(f, "Chr"),
            Self::Numeric => write!(f, "Numeric"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Name under which the mitochondrial sequence appears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitochondrialStyle {
    ChrMT,
    MT,
    ChrM,
    M,
    Accession,
    Unknown,
}

impl std::fmt::Display for MitochondrialStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ChrMT => write!(f, "chrMT"),
            Self::MT => write!(f, "MT"),
            Self::ChrM => write!(f, "chrM"),
            Self::M => write!(f, "M"),
            Self::Accession => write!(f, "Accession"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Majority-vote classification of sampled reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadType {
    Paired,
    Single,
    Unknown,
}

impl std::fmt::Display for ReadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paired => write!(f, "Paired-end"),
            Self::Single => write!(f, "Single-end"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Outcome of matching a header against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// A perfect match whose FASTA is already on local storage
    Available,
    /// A perfect match exists but none is stored locally
    Downloadable,
    /// No perfect match, but every sequence exists somewhere in the catalog
    Buildable,
    /// Perfect matches disagree on the genome build
    Ambiguous,
    Unknown,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Downloadable => write!(f, "DOWNLOADABLE"),
            Self::Buildable => write!(f, "BUILDABLE"),
            Self::Ambiguous => write!(f, "AMBIGUOUS"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse_case_insensitive() {
        assert_eq!(SortOrder::parse("coordinate"), SortOrder::Coordinate);
        assert_eq!(SortOrder::parse("Coordinate"), SortOrder::Coordinate);
        assert_eq!(SortOrder::parse("QUERYNAME"), SortOrder::QueryName);
        assert_eq!(SortOrder::parse("unsorted"), SortOrder::Unsorted);
        assert_eq!(SortOrder::parse("unknown"), SortOrder::Unknown);
    }

    #[test]
    fn test_sort_order_parse_fallback() {
        assert_eq!(SortOrder::parse("by-chance"), SortOrder::Unknown);
        assert_eq!(SortOrder::parse(""), SortOrder::Unknown);
    }
}
