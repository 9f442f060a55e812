use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::index::{IdentityKey, KeyKind, SequenceRef};
use crate::catalog::store::GenomeCatalog;
use crate::core::genome::Genome;
use crate::core::sequence::SequenceRecord;
use crate::core::types::MatchStatus;

/// A catalog sequence sharing a query sequence's identity key
#[derive(Debug, Clone, Serialize)]
pub struct CatalogHit<'a> {
    pub genome: &'a str,
    pub sequence: &'a SequenceRecord,
}

/// All catalog hits for one query sequence
#[derive(Debug, Clone, Serialize)]
pub struct SequenceHits<'a> {
    pub query: String,
    pub hits: Vec<CatalogHit<'a>>,
}

/// Verdict for one query sequence set
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceMatchResult<'a> {
    pub status: MatchStatus,
    /// Identity key used for the lookups
    pub key: KeyKind,
    /// Perfect matches in catalog order
    pub matching: Vec<&'a Genome>,
    /// Distinct build labels of the perfect matches
    pub builds: Vec<String>,
    /// Hits per query sequence, in query order
    pub per_sequence: Vec<SequenceHits<'a>>,
}

impl<'a> ReferenceMatchResult<'a> {
    /// First materialized perfect match, else the first perfect match
    #[must_use]
    pub fn preferred(&self) -> Option<&'a Genome> {
        self.matching
            .iter()
            .find(|g| g.materialized)
            .or_else(|| self.matching.first())
            .copied()
    }

    /// Query sequences without any catalog hit
    pub fn unresolved(&self) -> impl Iterator<Item = &str> {
        self.per_sequence
            .iter()
            .filter(|s| s.hits.is_empty())
            .map(|s| s.query.as_str())
    }
}

/// Matches a query's sequences against a [`GenomeCatalog`]
pub struct ReferenceMatcher<'a> {
    catalog: &'a GenomeCatalog,
}

impl<'a> ReferenceMatcher<'a> {
    #[must_use]
    pub fn new(catalog: &'a GenomeCatalog) -> Self {
        Self { catalog }
    }

    /// Find the genomes `query` was aligned against. Never fails; no match is
    /// reported as [`MatchStatus::Unknown`].
    #[must_use]
    pub fn find_match(&self, query: &[SequenceRecord]) -> ReferenceMatchResult<'a> {
        let key = KeyKind::for_query(query);

        // genome index -> genome sequence index -> query indices sharing its key
        let mut covered: BTreeMap<usize, BTreeMap<usize, Vec<usize>>> = BTreeMap::new();
        let mut per_sequence = Vec::with_capacity(query.len());

        for (qi, sequence) in query.iter().enumerate() {
            let refs: &[SequenceRef] = IdentityKey::of(sequence, key)
                .map(|k| self.catalog.lookup(&k))
                .unwrap_or_default();

            let mut hits = Vec::with_capacity(refs.len());
            for &at in refs {
                let (Some(genome), Some(hit)) =
                    (self.catalog.genome(at.genome), self.catalog.sequence(at))
                else {
                    continue;
                };
                covered
                    .entry(at.genome)
                    .or_default()
                    .entry(at.sequence)
                    .or_default()
                    .push(qi);
                hits.push(CatalogHit {
                    genome: genome.id.as_str(),
                    sequence: hit,
                });
            }

            per_sequence.push(SequenceHits {
                query: sequence.name.clone(),
                hits,
            });
        }

        let mut matching = Vec::new();
        for (&genome_index, pairs) in &covered {
            let Some(genome) = self.catalog.genome(genome_index) else {
                continue;
            };
            // Every genome sequence must be hit by the query
            if genome.sequences.is_empty() || pairs.len() != genome.sequences.len() {
                continue;
            }
            if is_perfect(genome, pairs, query, &per_sequence) {
                matching.push(genome);
            }
        }

        let mut builds: Vec<String> = Vec::new();
        for genome in &matching {
            if !builds.contains(&genome.build) {
                builds.push(genome.build.clone());
            }
        }

        let status = if !matching.is_empty() {
            if builds.len() > 1 {
                warn!(
                    builds = %builds.join(", "),
                    genomes = matching.len(),
                    "Perfect matches disagree on build; catalog metadata is inconsistent"
                );
                MatchStatus::Ambiguous
            } else if matching.iter().any(|g| g.materialized) {
                MatchStatus::Available
            } else {
                MatchStatus::Downloadable
            }
        } else if !per_sequence.is_empty() && per_sequence.iter().all(|s| !s.hits.is_empty()) {
            MatchStatus::Buildable
        } else {
            MatchStatus::Unknown
        };

        debug!(
            %status,
            ?key,
            candidates = covered.len(),
            perfect = matching.len(),
            "Matched query sequences"
        );

        ReferenceMatchResult {
            status,
            key,
            matching,
            builds,
            per_sequence,
        }
    }
}

/// Each genome sequence has a query counterpart with equal name, length and
/// MD5 (compared case-insensitively when both sides have one), and every query
/// sequence left unpaired still resolves somewhere in the catalog
fn is_perfect(
    genome: &Genome,
    pairs: &BTreeMap<usize, Vec<usize>>,
    query: &[SequenceRecord],
    per_sequence: &[SequenceHits<'_>],
) -> bool {
    let mut paired = vec![false; query.len()];

    let all_agree = pairs.iter().all(|(&si, query_indices)| {
        let expected = &genome.sequences[si];
        let found = query_indices.iter().copied().find(|&qi| {
            let q = &query[qi];
            let md5_agrees = match (&q.md5, &expected.md5) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => true,
            };
            q.name == expected.name && q.length == expected.length && md5_agrees
        });
        if let Some(qi) = found {
            paired[qi] = true;
        }
        found.is_some()
    });

    all_agree
        && per_sequence
            .iter()
            .zip(&paired)
            .all(|(sequence, &was_paired)| was_paired || !sequence.hits.is_empty())
}
