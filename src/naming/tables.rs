//! Accession to canonical chromosome tables.
//!
//! Each table pairs one accession (with the version used by the assembly)
//! with the canonical name of the chromosome it holds.

pub type AccessionTable = &'static [(&'static str, &'static str)];

/// RefSeq accessions for the gapped `GRCh38` primary assembly
pub const REFSEQ_GRCH38: AccessionTable = &[
    ("NC_000001.11", "1"),
    ("NC_000002.12", "2"),
    ("NC_000003.12", "3"),
    ("NC_000004.12", "4"),
    ("NC_000005.10", "5"),
    ("NC_000006.12", "6"),
    ("NC_000007.14", "7"),
    ("NC_000008.11", "8"),
    ("NC_000009.12", "9"),
    ("NC_000010.11", "10"),
    ("NC_000011.10", "11"),
    ("NC_000012.12", "12"),
    ("NC_000013.11", "13"),
    ("NC_000014.9", "14"),
    ("NC_000015.10", "15"),
    ("NC_000016.10", "16"),
    ("NC_000017.11", "17"),
    ("NC_000018.10", "18"),
    ("NC_000019.10", "19"),
    ("NC_000020.11", "20"),
    ("NC_000021.9", "21"),
    ("NC_000022.11", "22"),
    ("NC_000023.11", "X"),
    ("NC_000024.10", "Y"),
    ("NC_012920.1", "M"),
];

/// GenBank accessions for the gapped `GRCh38` primary assembly
pub const GENBANK_GRCH38: AccessionTable = &[
    ("CM000663.2", "1"),
    ("CM000664.2", "2"),
    ("CM000665.2", "3"),
    ("CM000666.2", "4"),
    ("CM000667.2", "5"),
    ("CM000668.2", "6"),
    ("CM000669.2", "7"),
    ("CM000670.2", "8"),
    ("CM000671.2", "9"),
    ("CM000672.2", "10"),
    ("CM000673.2", "11"),
    ("CM000674.2", "12"),
    ("CM000675.2", "13"),
    ("CM000676.2", "14"),
    ("CM000677.2", "15"),
    ("CM000678.2", "16"),
    ("CM000679.2", "17"),
    ("CM000680.2", "18"),
    ("CM000681.2", "19"),
    ("CM000682.2", "20"),
    ("CM000683.2", "21"),
    ("CM000684.2", "22"),
    ("CM000685.2", "X"),
    ("CM000686.2", "Y"),
    ("J01415.2", "M"),
];

/// RefSeq accessions for T2T-CHM13v2.0
pub const REFSEQ_T2T: AccessionTable = &[
    ("NC_060925.1", "1"),
    ("NC_060926.1", "2"),
    ("NC_060927.1", "3"),
    ("NC_060928.1", "4"),
    ("NC_060929.1", "5"),
    ("NC_060930.1", "6"),
    ("NC_060931.1", "7"),
    ("NC_060932.1", "8"),
    ("NC_060933.1", "9"),
    ("NC_060934.1", "10"),
    ("NC_060935.1", "11"),
    ("NC_060936.1", "12"),
    ("NC_060937.1", "13"),
    ("NC_060938.1", "14"),
    ("NC_060939.1", "15"),
    ("NC_060940.1", "16"),
    ("NC_060941.1", "17"),
    ("NC_060942.1", "18"),
    ("NC_060943.1", "19"),
    ("NC_060944.1", "20"),
    ("NC_060945.1", "21"),
    ("NC_060946.1", "22"),
    ("NC_060947.1", "X"),
    ("NC_060948.1", "Y"),
    ("NC_012920.1", "M"),
];

/// GenBank accessions for T2T-CHM13v2.0
pub const GENBANK_T2T: AccessionTable = &[
    ("CP068277.2", "1"),
    ("CP068276.2", "2"),
    ("CP068275.2", "3"),
    ("CP068274.2", "4"),
    ("CP068273.2", "5"),
    ("CP068272.2", "6"),
    ("CP068271.2", "7"),
    ("CP068270.2", "8"),
    ("CP068269.2", "9"),
    ("CP068268.2", "10"),
    ("CP068267.2", "11"),
    ("CP068266.2", "12"),
    ("CP068265.2", "13"),
    ("CP068264.2", "14"),
    ("CP068263.2", "15"),
    ("CP068262.2", "16"),
    ("CP068261.2", "17"),
    ("CP068260.2", "18"),
    ("CP068259.2", "19"),
    ("CP068258.2", "20"),
    ("CP068257.2", "21"),
    ("CP068256.2", "22"),
    ("CP068255.2", "X"),
    ("CP086569.2", "Y"),
    ("CP068254.1", "M"),
];

pub const ALL_TABLES: [AccessionTable; 4] = [REFSEQ_GRCH38, GENBANK_GRCH38, REFSEQ_T2T, GENBANK_T2T];

/// Accession without its `.version` suffix
fn unversioned(accession: &str) -> &str {
    accession
        .split_once('.')
        .map_or(accession, |(base, _)| base)
}

/// Canonical name for an accession. Any version of a listed accession matches,
/// so `NC_000001.10` (`GRCh37`) resolves like `NC_000001.11`.
pub fn canonical_for(table: AccessionTable, accession: &str) -> Option<&'static str> {
    if let Some((_, canonical)) = table.iter().find(|(acc, _)| *acc == accession) {
        return Some(canonical);
    }
    let base = unversioned(accession);
    table
        .iter()
        .find(|(acc, _)| unversioned(acc) == base)
        .map(|(_, canonical)| *canonical)
}

/// Accession for a canonical name
pub fn accession_for(table: AccessionTable, canonical: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, c)| *c == canonical)
        .map(|(acc, _)| *acc)
}
