use serde::{Deserialize, Serialize};

use crate::naming;

/// A single named sequence (contig) from a header or a catalog genome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Sequence name (SN tag in SAM)
    pub name: String,

    /// Sequence length (LN tag in SAM)
    pub length: u64,

    /// MD5 checksum of the sequence (M5 tag in SAM)
    /// Lowercase hex, 32 characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    /// URI where sequence can be retrieved (UR tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    /// Assembly identifier (AS tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assembly: Option<String>,

    /// Species (SP tag in SAM)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// Alternative names (AN tag in SAM)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Index of the owning genome in its catalog. Set by the catalog, never
    /// read from or written to JSON.
    #[serde(skip)]
    pub parent: Option<usize>,
}

impl SequenceRecord {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Self {
            name: name.into(),
            length,
            md5: None,
            uri: None,
            assembly: None,
            species: None,
            aliases: Vec::new(),
            parent: None,
        }
    }

    #[must_use]
    pub fn with_md5(mut self, md5: impl Into<String>) -> Self {
        self.md5 = Some(md5.into());
        self
    }

    /// Naming-convention independent form of the name, e.g. `chr1` -> `1`
    #[must_use]
    pub fn canonical_name(&self) -> String {
        naming::to_canonical(&self.name)
    }

    /// Autosomes and X/Y in any supported naming convention
    #[must_use]
    pub fn is_primary_chromosome(&self) -> bool {
        let canonical = self.canonical_name();
        naming::is_autosome(&canonical) || canonical == "X" || canonical == "Y"
    }

    #[must_use]
    pub fn is_mitochondrial(&self) -> bool {
        self.canonical_name() == "M"
    }
}
