use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::tables::{self, AccessionTable};

/// Accession prefix families and the tables that resolve them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessionFamily {
    /// `NC_` accessions, gapped or T2T
    RefSeq,
    /// `CM` / `J` accessions of the gapped assemblies
    GenBank,
    /// `CP` accessions of T2T-CHM13
    GenBankT2t,
}

impl AccessionFamily {
    /// Family of a sequence name, judged by prefix only
    pub fn of(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        let digit_at = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_digit);

        if name.starts_with("NC_") && digit_at(3) {
            Some(Self::RefSeq)
        } else if name.starts_with("CP") && digit_at(2) {
            Some(Self::GenBankT2t)
        } else if (name.starts_with("CM") && digit_at(2)) || (name.starts_with('J') && digit_at(1))
        {
            Some(Self::GenBank)
        } else {
            None
        }
    }

    fn tables(self) -> &'static [AccessionTable] {
        match self {
            Self::RefSeq => &[tables::REFSEQ_GRCH38, tables::REFSEQ_T2T],
            Self::GenBank => &[tables::GENBANK_GRCH38],
            Self::GenBankT2t => &[tables::GENBANK_T2T],
        }
    }
}

/// Target conventions for [`convert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// Bare form: 1, X, Y, M
    Canonical,
    /// UCSC: chr1, chrX, chrM
    Chr,
    /// NCBI/Ensembl: 1, X, MT
    Numeric,
    /// RefSeq `GRCh38`: `NC_000001.11`
    #[value(name = "refseq")]
    RefSeq,
    /// GenBank `GRCh38`: CM000663.2
    #[value(name = "genbank")]
    GenBank,
    /// RefSeq T2T-CHM13: `NC_060925.1`
    #[value(name = "refseq-t2t")]
    RefSeqT2t,
    /// GenBank T2T-CHM13: CP068277.2
    #[value(name = "genbank-t2t")]
    GenBankT2t,
}

/// Takes the name as given and its canonical form
type Converter = fn(&str, &str) -> Option<String>;

impl NamingConvention {
    /// Converter into this convention
    fn converter(self) -> Converter {
        match self {
            Self::Canonical => to_canonical_form,
            Self::Chr => to_chr,
            Self::Numeric => to_numeric,
            Self::RefSeq => to_refseq,
            Self::GenBank => to_genbank,
            Self::RefSeqT2t => to_refseq_t2t,
            Self::GenBankT2t => to_genbank_t2t,
        }
    }
}

fn to_canonical_form(_name: &str, canonical: &str) -> Option<String> {
    Some(canonical.to_string())
}

/// Primary chromosomes always get `chr`; other names keep it only if they
/// had it
fn to_chr(name: &str, canonical: &str) -> Option<String> {
    if is_primary(canonical) || strip_chr(name) != name {
        Some(format!("chr{canonical}"))
    } else {
        Some(canonical.to_string())
    }
}

fn to_numeric(_name: &str, canonical: &str) -> Option<String> {
    if canonical == "M" {
        Some("MT".to_string())
    } else {
        Some(canonical.to_string())
    }
}

fn to_refseq(_name: &str, canonical: &str) -> Option<String> {
    tables::accession_for(tables::REFSEQ_GRCH38, canonical).map(String::from)
}

fn to_genbank(_name: &str, canonical: &str) -> Option<String> {
    tables::accession_for(tables::GENBANK_GRCH38, canonical).map(String::from)
}

fn to_refseq_t2t(_name: &str, canonical: &str) -> Option<String> {
    tables::accession_for(tables::REFSEQ_T2T, canonical).map(String::from)
}

fn to_genbank_t2t(_name: &str, canonical: &str) -> Option<String> {
    tables::accession_for(tables::GENBANK_T2T, canonical).map(String::from)
}

/// True for a bare autosome number such as `1` or `22`
pub fn is_autosome(canonical: &str) -> bool {
    !canonical.is_empty() && canonical.bytes().all(|b| b.is_ascii_digit())
}

fn is_primary(canonical: &str) -> bool {
    is_autosome(canonical) || matches!(canonical, "X" | "Y" | "M")
}

fn strip_chr(name: &str) -> &str {
    match name.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("chr") && name.len() > 3 => &name[3..],
        _ => name,
    }
}

/// Canonical form of a sequence name.
///
/// Leading `chr` prefixes are removed first. Accessions from the known tables
/// then map to their chromosome, and autosomes, X, Y and M (also `MT`) are
/// uppercased; any other name is returned with only the prefixes removed.
pub fn to_canonical(name: &str) -> String {
    let mut stripped = name;
    loop {
        let next = strip_chr(stripped);
        if next == stripped {
            break;
        }
        stripped = next;
    }

    if let Some(family) = AccessionFamily::of(stripped) {
        for table in family.tables() {
            if let Some(canonical) = tables::canonical_for(*table, stripped) {
                return canonical.to_string();
            }
        }
    }

    let upper = stripped.to_ascii_uppercase();
    match upper.as_str() {
        "M" | "MT" => "M".to_string(),
        "X" | "Y" => upper,
        _ if is_autosome(&upper) => upper,
        _ => stripped.to_string(),
    }
}

/// Convert a name in any convention to `target`. Returns `None` when the
/// target is an accession convention with no entry for the name.
pub fn convert(name: &str, target: NamingConvention) -> Option<String> {
    let canonical = to_canonical(name);
    (target.converter())(name, &canonical)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum DisplayGroup {
    Autosome(u64),
    X,
    Y,
    M,
    Other,
}

fn display_group(name: &str) -> DisplayGroup {
    let canonical = to_canonical(name);
    match canonical.as_str() {
        "X" => DisplayGroup::X,
        "Y" => DisplayGroup::Y,
        "M" => DisplayGroup::M,
        c if is_autosome(c) => c
            .parse()
            .map_or(DisplayGroup::Other, DisplayGroup::Autosome),
        _ => DisplayGroup::Other,
    }
}

/// Display ordering: autosomes ascending, then X, Y, M, then everything else.
/// Other names keep their relative order unless `alphabetical` is set.
pub fn compare_for_display(a: &str, b: &str, alphabetical: bool) -> Ordering {
    let (ga, gb) = (display_group(a), display_group(b));
    match (ga, gb) {
        (DisplayGroup::Other, DisplayGroup::Other) if alphabetical => a.cmp(b),
        (ga, gb) => ga.cmp(&gb),
    }
}

/// Stable sort of names into display order
pub fn sort_for_display<S: AsRef<str>>(names: &mut [S], alphabetical: bool) {
    names.sort_by(|a, b| compare_for_display(a.as_ref(), b.as_ref(), alphabetical));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::tables::ALL_TABLES;

    const SAMPLE_NAMES: &[&str] = &[
        "chr1",
        "Chr2",
        "CHR22",
        "1",
        "x",
        "chrX",
        "chrY",
        "chrM",
        "chrMT",
        "MT",
        "m",
        "NC_000001.11",
        "NC_000001.10",
        "CM000663.2",
        "CP068277.2",
        "J01415.2",
        "NC_060947.1",
        "chrUn_gl000220",
        "chr1_KI270706v1_random",
        "GL000192.1",
        "hs37d5",
        "chrEBV",
        "chrchr1",
        "chrNC_000001.11",
        "chrCM000663.2",
        "chrchr",
    ];

    #[test]
    fn test_to_canonical_basic() {
        assert_eq!(to_canonical("chr1"), "1");
        assert_eq!(to_canonical("Chr2"), "2");
        assert_eq!(to_canonical("x"), "X");
        assert_eq!(to_canonical("chrMT"), "M");
        assert_eq!(to_canonical("MT"), "M");
        assert_eq!(to_canonical("chrM"), "M");
        assert_eq!(to_canonical("NC_000023.11"), "X");
        assert_eq!(to_canonical("CM000686.2"), "Y");
        assert_eq!(to_canonical("CP068254.1"), "M");
        assert_eq!(to_canonical("NC_060925.1"), "1");
        assert_eq!(to_canonical("chrchr1"), "1");
        assert_eq!(to_canonical("chrNC_000001.11"), "1");
        assert_eq!(to_canonical("chrCM000663.2"), "1");
    }

    #[test]
    fn test_to_canonical_passthrough() {
        assert_eq!(to_canonical("chrUn_gl000220"), "Un_gl000220");
        assert_eq!(to_canonical("GL000192.1"), "GL000192.1");
        assert_eq!(to_canonical("hs37d5"), "hs37d5");
        assert_eq!(to_canonical("chr"), "chr");
        // Accession-looking but not in any table
        assert_eq!(to_canonical("CM999999.1"), "CM999999.1");
    }

    #[test]
    fn test_to_canonical_idempotent() {
        for name in SAMPLE_NAMES {
            let once = to_canonical(name);
            assert_eq!(to_canonical(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_round_trip_every_table() {
        let conventions = [
            (ALL_TABLES[0], NamingConvention::RefSeq),
            (ALL_TABLES[1], NamingConvention::GenBank),
            (ALL_TABLES[2], NamingConvention::RefSeqT2t),
            (ALL_TABLES[3], NamingConvention::GenBankT2t),
        ];
        for (table, convention) in conventions {
            for (accession, number) in table {
                assert_eq!(to_canonical(accession), *number);
                assert_eq!(convert(number, convention).as_deref(), Some(*accession));
            }
        }
    }

    #[test]
    fn test_convert_between_conventions() {
        assert_eq!(convert("1", NamingConvention::Chr).as_deref(), Some("chr1"));
        assert_eq!(convert("MT", NamingConvention::Chr).as_deref(), Some("chrM"));
        assert_eq!(convert("chrM", NamingConvention::Numeric).as_deref(), Some("MT"));
        assert_eq!(
            convert("chrX", NamingConvention::GenBank).as_deref(),
            Some("CM000685.2")
        );
        assert_eq!(
            convert("CM000663.2", NamingConvention::RefSeq).as_deref(),
            Some("NC_000001.11")
        );
        assert_eq!(
            convert("chrUn_gl000220", NamingConvention::Chr).as_deref(),
            Some("chrUn_gl000220")
        );
        assert_eq!(convert("chrEBV", NamingConvention::Chr).as_deref(), Some("chrEBV"));
        assert_eq!(convert("hs37d5", NamingConvention::Chr).as_deref(), Some("hs37d5"));
        assert_eq!(
            convert("chrUn_gl000220", NamingConvention::Canonical).as_deref(),
            Some("Un_gl000220")
        );
    }

    #[test]
    fn test_convert_unmapped_accession_is_none() {
        assert_eq!(convert("chrUn_gl000220", NamingConvention::RefSeq), None);
        assert_eq!(convert("23", NamingConvention::GenBankT2t), None);
    }

    #[test]
    fn test_accession_family() {
        assert_eq!(AccessionFamily::of("NC_000001.11"), Some(AccessionFamily::RefSeq));
        assert_eq!(AccessionFamily::of("CM000663.2"), Some(AccessionFamily::GenBank));
        assert_eq!(AccessionFamily::of("J01415.2"), Some(AccessionFamily::GenBank));
        assert_eq!(AccessionFamily::of("CP068277.2"), Some(AccessionFamily::GenBankT2t));
        assert_eq!(AccessionFamily::of("chr1"), None);
        assert_eq!(AccessionFamily::of("CMV"), None);
    }

    #[test]
    fn test_sort_for_display() {
        let mut names = vec![
            "chrM", "chr10", "chrUn_b", "chrY", "chr2", "chrX", "chrUn_a", "chr1",
        ];
        sort_for_display(&mut names, false);
        assert_eq!(
            names,
            vec!["chr1", "chr2", "chr10", "chrX", "chrY", "chrM", "chrUn_b", "chrUn_a"]
        );

        sort_for_display(&mut names, true);
        assert_eq!(
            names,
            vec!["chr1", "chr2", "chr10", "chrX", "chrY", "chrM", "chrUn_a", "chrUn_b"]
        );
    }

    #[test]
    fn test_sort_mixed_conventions() {
        let mut names = vec!["MT", "CM000664.2", "X", "1"];
        sort_for_display(&mut names, false);
        assert_eq!(names, vec!["1", "CM000664.2", "X", "MT"]);
    }
}
