use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

use crate::core::sequence::SequenceRecord;
use crate::utils::validation::md5_key;

/// Position of a sequence inside the catalog arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SequenceRef {
    pub genome: usize,
    pub sequence: usize,
}

/// Which identity key a query uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyKind {
    Md5,
    Length,
}

impl KeyKind {
    /// MD5 when every sequence carries one, otherwise length
    #[must_use]
    pub fn for_query(query: &[SequenceRecord]) -> Self {
        if !query.is_empty() && query.iter().all(|s| s.md5.is_some()) {
            Self::Md5
        } else {
            Self::Length
        }
    }
}

/// Name-independent identity of a sequence. MD5 keys are lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey<'a> {
    Md5(Cow<'a, str>),
    Length(u64),
}

impl<'a> IdentityKey<'a> {
    /// Key of `sequence` under `kind`. `None` when MD5 is requested but absent.
    #[must_use]
    pub fn of(sequence: &'a SequenceRecord, kind: KeyKind) -> Option<Self> {
        match kind {
            KeyKind::Md5 => sequence
                .md5
                .as_deref()
                .map(|m| IdentityKey::Md5(md5_key(m))),
            KeyKind::Length => Some(IdentityKey::Length(sequence.length)),
        }
    }
}

/// MD5 and length lookups over every sequence of every genome
#[derive(Debug, Default)]
pub struct SequenceIndex {
    by_md5: HashMap<String, Vec<SequenceRef>>,
    by_length: HashMap<u64, Vec<SequenceRef>>,
}

impl SequenceIndex {
    pub fn insert(&mut self, at: SequenceRef, sequence: &SequenceRecord) {
        if let Some(md5) = &sequence.md5 {
            self.by_md5
                .entry(md5_key(md5).into_owned())
                .or_default()
                .push(at);
        }
        self.by_length.entry(sequence.length).or_default().push(at);
    }

    /// Every catalog sequence sharing `key`, in catalog order
    #[must_use]
    pub fn lookup(&self, key: &IdentityKey<'_>) -> &[SequenceRef] {
        let hits = match key {
            IdentityKey::Md5(md5) => self.by_md5.get(&**md5),
            IdentityKey::Length(length) => self.by_length.get(length),
        };
        hits.map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn distinct_md5s(&self) -> usize {
        self.by_md5.len()
    }
}
