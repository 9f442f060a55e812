use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Failed to read platform table: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse platform table: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid pattern for {label}: {source}")]
    InvalidPattern {
        label: String,
        #[source]
        source: regex::Error,
    },
}

/// One (read-name pattern, platform label) pair as stored in JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub pattern: String,
    pub label: String,
}

/// Read-name based sequencer classification. First matching pattern wins.
#[derive(Debug, Clone)]
pub struct PlatformLookup {
    entries: Vec<(Regex, String)>,
}

const BUILTIN: &[(&str, &str)] = &[
    // CASAVA 1.8+: instrument:run:flowcell:lane:tile:x:y
    (
        r"^[A-Za-z0-9_-]+:\d+:[A-Za-z0-9_-]+:\d+:\d+:\d+:\d+",
        "Illumina",
    ),
    // Pre-CASAVA 1.8: instrument:lane:tile:x:y#index/read
    (
        r"^[A-Za-z0-9_-]+:\d+:\d+:\d+:\d+(#\S*)?(/[12])?$",
        "Illumina (pre-1.8)",
    ),
    (r"^[EV]\d{9}L\dC\d{3}R\d{3,}", "MGI DNBSEQ"),
    (r"^m\d{5,}[A-Za-z]?_\d{6}_\d{6}/\d+", "PacBio"),
    (
        r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        "Oxford Nanopore",
    ),
    (r"^[A-Z0-9]{5}:\d{1,5}:\d{1,5}$", "Ion Torrent"),
];

impl PlatformLookup {
    /// Compile a table of entries, keeping their order
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidPattern` if a pattern is not a valid regex.
    pub fn from_entries(entries: &[PlatformEntry]) -> Result<Self, PlatformError> {
        let entries = entries
            .iter()
            .map(|e| {
                Regex::new(&e.pattern)
                    .map(|re| (re, e.label.clone()))
                    .map_err(|source| PlatformError::InvalidPattern {
                        label: e.label.clone(),
                        source,
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { entries })
    }

    /// Load a JSON array of `{"pattern": ..., "label": ...}` objects
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ReadError` if the file cannot be read,
    /// `PlatformError::ParseError` for invalid JSON, or
    /// `PlatformError::InvalidPattern` for an invalid regex.
    pub fn load(path: &Path) -> Result<Self, PlatformError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<PlatformEntry> = serde_json::from_str(&content)?;
        Self::from_entries(&entries)
    }

    /// The built-in table of common read-name layouts
    #[must_use]
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .filter_map(|(pattern, label)| {
                Regex::new(pattern)
                    .ok()
                    .map(|re| (re, (*label).to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Platform label for a read name
    #[must_use]
    pub fn classify(&self, read_name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(re, _)| re.is_match(read_name))
            .map(|(_, label)| label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PlatformLookup {
    fn default() -> Self {
        Self::builtin()
    }
}
