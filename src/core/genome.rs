use serde::{Deserialize, Serialize};

use crate::core::sequence::SequenceRecord;

/// A known reference genome in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genome {
    /// Unique identifier, e.g. `hg38`
    pub id: String,

    /// Genome build label, e.g. `GRCh38`
    pub build: String,

    /// Source organization, e.g. `UCSC`, `EBI`, `1000 Genomes`
    pub source: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Download URL for the reference FASTA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,

    /// FASTA file name relative to the local reference directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// All sequences in this genome, in FASTA order
    pub sequences: Vec<SequenceRecord>,

    /// Whether the FASTA is present on local storage. Refreshed from disk by
    /// the catalog store, not persisted.
    #[serde(skip)]
    pub materialized: bool,
}

impl Genome {
    pub fn new(id: impl Into<String>, build: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            build: build.into(),
            source: source.into(),
            description: None,
            download_url: None,
            file_name: None,
            sequences: Vec::new(),
            materialized: false,
        }
    }

    #[must_use]
    pub fn with_sequences(mut self, sequences: Vec<SequenceRecord>) -> Self {
        self.sequences = sequences;
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Human readable label, e.g. `hg38 (GRCh38, UCSC)`
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} ({}, {})", self.id, self.build, self.source)
    }

    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.sequences.iter().map(|s| s.length).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let genome = Genome::new("hg38", "GRCh38", "UCSC");
        assert_eq!(genome.display_name(), "hg38 (GRCh38, UCSC)");
    }

    #[test]
    fn test_materialized_not_deserialized() {
        let json = r#"{"id":"t","build":"GRCh38","source":"x","sequences":[{"name":"1","length":10}]}"#;
        let genome: Genome = serde_json::from_str(json).unwrap();
        assert!(!genome.materialized);
        assert_eq!(genome.total_length(), 10);
        assert!(genome.file_name.is_none());
    }
}
