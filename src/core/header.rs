use serde::Serialize;
use std::collections::HashMap;

use crate::core::sequence::SequenceRecord;
use crate::core::types::{MitochondrialStyle, NamingStyle, SortOrder};
use crate::naming::AccessionFamily;

/// Link from a program record to the program that ran before it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousProgram {
    /// Index into [`HeaderModel::programs`] of an earlier record
    Resolved(usize),
    /// `PP` value naming a program that had not been seen yet
    Unresolved(String),
}

/// One `@PG` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PreviousProgram>,
}

/// One `@RG` record, fields kept in header order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadGroupRecord {
    pub fields: Vec<(String, String)>,
}

impl ReadGroupRecord {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get("ID")
    }

    /// Platform (`PL`), e.g. ILLUMINA
    #[must_use]
    pub fn platform(&self) -> Option<&str> {
        self.get("PL")
    }

    #[must_use]
    pub fn sample(&self) -> Option<&str> {
        self.get("SM")
    }
}

/// Structured view of a SAM header. Built once by the header parser.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeaderModel {
    /// Format version (`VN` of `@HD`)
    pub version: Option<String>,

    pub sort_order: SortOrder,

    /// Grouping of alignments (`GO` of `@HD`)
    pub grouping: Option<String>,

    sequences: Vec<SequenceRecord>,

    #[serde(skip)]
    name_to_index: HashMap<String, usize>,

    pub programs: Vec<ProgramRecord>,

    pub read_groups: Vec<ReadGroupRecord>,

    pub comments: Vec<String>,
}

impl HeaderModel {
    /// Sequences in header order
    #[must_use]
    pub fn sequences(&self) -> &[SequenceRecord] {
        &self.sequences
    }

    #[must_use]
    pub fn sequence(&self, name: &str) -> Option<&SequenceRecord> {
        self.name_to_index.get(name).map(|&i| &self.sequences[i])
    }

    /// Append a sequence. Returns it back if the name is already present.
    pub(crate) fn push_sequence(&mut self, record: SequenceRecord) -> Result<(), SequenceRecord> {
        if self.name_to_index.contains_key(&record.name) {
            return Err(record);
        }
        self.name_to_index
            .insert(record.name.clone(), self.sequences.len());
        self.sequences.push(record);
        Ok(())
    }

    pub(crate) fn program_index(&self, id: &str) -> Option<usize> {
        self.programs.iter().position(|p| p.id == id)
    }

    /// Walk the `PP` chain starting at `index`, newest first. Stops at the
    /// first unresolved link.
    #[must_use]
    pub fn program_chain(&self, index: usize) -> Vec<&ProgramRecord> {
        let mut chain = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            let Some(program) = self.programs.get(i) else {
                break;
            };
            // Resolved links always point backwards, so this terminates
            chain.push(program);
            current = match program.previous {
                Some(PreviousProgram::Resolved(prev)) if prev < i => Some(prev),
                _ => None,
            };
        }
        chain
    }

    /// Total length of all declared sequences
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.sequences.iter().map(|s| s.length).sum()
    }

    /// Fraction of sequences with MD5 checksums
    #[must_use]
    pub fn md5_coverage(&self) -> f64 {
        if self.sequences.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let with_md5 = self.sequences.iter().filter(|s| s.md5.is_some()).count() as f64;
        #[allow(clippy::cast_precision_loss)]
        let total = self.sequences.len() as f64;
        with_md5 / total
    }

    /// First naming style, in priority order GenBank, RefSeq, chr, numeric,
    /// matched by any sequence name
    #[must_use]
    pub fn chromosome_naming_style(&self) -> NamingStyle {
        let names = || self.sequences.iter().map(|s| s.name.as_str());

        if names().any(|n| {
            matches!(
                AccessionFamily::of(n),
                Some(AccessionFamily::GenBank | AccessionFamily::GenBankT2t)
            )
        }) {
            NamingStyle::GenBank
        } else if names().any(|n| AccessionFamily::of(n) == Some(AccessionFamily::RefSeq)) {
            NamingStyle::RefSeq
        } else if names().any(|n| n.starts_with("chr")) {
            NamingStyle::Chr
        } else if names().any(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())) {
            NamingStyle::Numeric
        } else {
            NamingStyle::Unknown
        }
    }

    #[must_use]
    pub fn mitochondrial_naming_style(&self) -> MitochondrialStyle {
        const CANDIDATES: [(&str, MitochondrialStyle); 4] = [
            ("chrMT", MitochondrialStyle::ChrMT),
            ("MT", MitochondrialStyle::MT),
            ("chrM", MitochondrialStyle::ChrM),
            ("M", MitochondrialStyle::M),
        ];

        for (name, style) in CANDIDATES {
            if self.name_to_index.contains_key(name) {
                return style;
            }
        }

        if self.chromosome_naming_style().is_accession() {
            MitochondrialStyle::Accession
        } else {
            MitochondrialStyle::Unknown
        }
    }
}
