use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::index::{IdentityKey, SequenceIndex, SequenceRef};
use crate::core::genome::Genome;
use crate::core::sequence::SequenceRecord;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Duplicate genome id: {0}")]
    DuplicateGenome(String),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// FASTA suffixes tried when a genome has no explicit file name
const FASTA_SUFFIXES: &[&str] = &[".fa", ".fa.gz", ".fasta", ".fasta.gz", ".fna", ".fna.gz"];

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    pub genomes: Vec<Genome>,
}

/// Known reference genomes with identity-key indexes
#[derive(Debug, Default)]
pub struct GenomeCatalog {
    genomes: Vec<Genome>,
    id_to_index: HashMap<String, usize>,
    index: SequenceIndex,
}

impl GenomeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ReadError` if the file cannot be read, or any
    /// error from [`Self::from_json`].
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` for invalid JSON, or
    /// `CatalogError::DuplicateGenome` if two genomes share an id.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            warn!(
                expected = CATALOG_VERSION,
                found = %data.version,
                "Catalog version mismatch"
            );
        }

        let mut catalog = Self::new();
        for genome in data.genomes {
            catalog.add_genome(genome)?;
        }

        debug!(
            genomes = catalog.len(),
            md5s = catalog.index.distinct_md5s(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    /// Add a genome, pointing each of its sequences back at it
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateGenome` if the id is already present.
    pub fn add_genome(&mut self, mut genome: Genome) -> Result<usize, CatalogError> {
        if self.id_to_index.contains_key(&genome.id) {
            return Err(CatalogError::DuplicateGenome(genome.id));
        }

        let genome_index = self.genomes.len();
        for (i, sequence) in genome.sequences.iter_mut().enumerate() {
            sequence.parent = Some(genome_index);
            self.index.insert(
                SequenceRef {
                    genome: genome_index,
                    sequence: i,
                },
                sequence,
            );
        }

        self.id_to_index.insert(genome.id.clone(), genome_index);
        self.genomes.push(genome);
        Ok(genome_index)
    }

    /// Get a genome by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Genome> {
        self.id_to_index.get(id).map(|&idx| &self.genomes[idx])
    }

    #[must_use]
    pub fn genome(&self, index: usize) -> Option<&Genome> {
        self.genomes.get(index)
    }

    /// All genomes in catalog order
    #[must_use]
    pub fn genomes(&self) -> &[Genome] {
        &self.genomes
    }

    /// Resolve an arena position
    #[must_use]
    pub fn sequence(&self, at: SequenceRef) -> Option<&SequenceRecord> {
        self.genomes
            .get(at.genome)
            .and_then(|g| g.sequences.get(at.sequence))
    }

    /// Owning genome of a catalog sequence
    #[must_use]
    pub fn parent_of(&self, sequence: &SequenceRecord) -> Option<&Genome> {
        sequence.parent.and_then(|i| self.genomes.get(i))
    }

    /// Every catalog sequence sharing `key`
    #[must_use]
    pub fn lookup(&self, key: &IdentityKey<'_>) -> &[SequenceRef] {
        self.index.lookup(key)
    }

    /// Candidate local paths for a genome's FASTA under `reference_dir`
    #[must_use]
    pub fn local_paths(genome: &Genome, reference_dir: &Path) -> Vec<PathBuf> {
        match &genome.file_name {
            Some(name) => vec![reference_dir.join(name)],
            None => FASTA_SUFFIXES
                .iter()
                .map(|suffix| reference_dir.join(format!("{}{suffix}", genome.id)))
                .collect(),
        }
    }

    /// Mark each genome as materialized when its FASTA exists under
    /// `reference_dir`. Returns the number of materialized genomes.
    pub fn refresh_materialized(&mut self, reference_dir: &Path) -> usize {
        let mut count = 0;
        for genome in &mut self.genomes {
            genome.materialized = Self::local_paths(genome, reference_dir)
                .iter()
                .any(|p| p.is_file());
            if genome.materialized {
                debug!(genome = %genome.id, "Found local FASTA");
                count += 1;
            }
        }
        count
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ParseError` if serialization fails.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            genomes: self.genomes.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of genomes in catalog
    #[must_use]
    pub fn len(&self) -> usize {
        self.genomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.genomes.is_empty()
    }
}
