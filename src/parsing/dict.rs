use std::collections::HashMap;
use std::path::Path;

use crate::core::error::FormatError;
use crate::core::header::HeaderModel;
use crate::parsing::{fai, sam};

/// Ordered name -> length dictionary guiding a FASTA scan
#[derive(Debug, Clone, Default)]
pub struct SequenceDictionary {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl SequenceDictionary {
    /// Build from (name, length) pairs. A repeated name keeps its first length.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u64)>,
        S: Into<String>,
    {
        let mut dict = Self::default();
        for (name, length) in entries {
            let name = name.into();
            if dict.index.contains_key(&name) {
                continue;
            }
            dict.index.insert(name.clone(), dict.entries.len());
            dict.entries.push((name, length));
        }
        dict
    }

    #[must_use]
    pub fn from_header(header: &HeaderModel) -> Self {
        Self::from_entries(
            header
                .sequences()
                .iter()
                .map(|s| (s.name.clone(), s.length)),
        )
    }

    /// Load a Picard `.dict` / SAM header, or a `.fai` index
    ///
    /// # Errors
    ///
    /// Returns `FormatError::Io` if the file cannot be read, or any parse
    /// error from the underlying format.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let is_fai = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("fai"));

        if is_fai {
            let text = std::fs::read_to_string(path)?;
            Ok(Self::from_entries(fai::parse_fai_text(&text)?))
        } else {
            Ok(Self::from_header(&sam::parse_file(path)?))
        }
    }

    #[must_use]
    pub fn length_of(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&i| self.entries[i].1)
    }

    /// Entries in dictionary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(n, l)| (n.as_str(), *l))
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
