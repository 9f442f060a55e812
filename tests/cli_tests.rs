//! End-to-end tests for the `align-probe` binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const HEADER: &str = "@HD\tVN:1.6\tSO:coordinate\n\
@SQ\tSN:chr1\tLN:1000\n\
@SQ\tSN:chr2\tLN:500\n\
@RG\tID:rg1\tSM:NA12878\tPL:ILLUMINA\n\
@PG\tID:bwa\tPN:bwa\n\
@PG\tID:samtools\tPN:samtools\tPP:bwa\n";

fn align_probe() -> Command {
    Command::cargo_bin("align-probe").unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn toy_catalog(dir: &Path) -> std::path::PathBuf {
    let json = r#"{
        "version": "1.0.0",
        "created_at": "2024-01-01T00:00:00Z",
        "genomes": [
            {
                "id": "toy",
                "build": "Toy1",
                "source": "Example",
                "file_name": "toy.fa",
                "sequences": [
                    {"name": "chr1", "length": 1000},
                    {"name": "chr2", "length": 500}
                ]
            }
        ]
    }"#;
    write(dir, "catalog.json", json)
}

#[test]
fn test_names_to_refseq() {
    align_probe()
        .args(["names", "chr1", "--to", "refseq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NC_000001.11"));
}

#[test]
fn test_names_unmapped() {
    align_probe()
        .args(["names", "chrUn_random", "--to", "refseq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(unmapped)"));
}

#[test]
fn test_header_from_stdin() {
    align_probe()
        .args(["header", "-"])
        .write_stdin(HEADER)
        .assert()
        .success()
        .stdout(predicate::str::contains("coordinate"))
        .stdout(predicate::str::contains("Sequences:    2"))
        .stdout(predicate::str::contains("NA12878"));
}

#[test]
fn test_header_json() {
    let output = align_probe()
        .args(["--format", "json", "header", "-"])
        .write_stdin(HEADER)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json.is_object());
}

#[test]
fn test_header_missing_file() {
    align_probe()
        .args(["header", "/nonexistent/input.sam"])
        .assert()
        .failure();
}

#[test]
fn test_identify_downloadable() {
    let dir = TempDir::new().unwrap();
    let catalog = toy_catalog(dir.path());
    let sam = write(dir.path(), "input.sam", HEADER);

    align_probe()
        .arg("identify")
        .arg(&sam)
        .arg("--catalog")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("DOWNLOADABLE"))
        .stdout(predicate::str::contains("Toy1"));
}

#[test]
fn test_identify_available_with_reference_dir() {
    let dir = TempDir::new().unwrap();
    let catalog = toy_catalog(dir.path());
    let sam = write(dir.path(), "input.sam", HEADER);
    write(dir.path(), "toy.fa", ">chr1\nACGT\n");

    align_probe()
        .arg("identify")
        .arg(&sam)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--reference-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AVAILABLE"));
}

#[test]
fn test_identify_unknown() {
    let dir = TempDir::new().unwrap();
    let catalog = toy_catalog(dir.path());

    align_probe()
        .args(["identify", "-", "--catalog"])
        .arg(&catalog)
        .write_stdin("@SQ\tSN:chrZ\tLN:42\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("UNKNOWN"));
}

#[test]
fn test_stats_paired_sam() {
    let dir = TempDir::new().unwrap();
    let mut text = String::from(HEADER);
    for i in 0..6 {
        text.push_str(&format!(
            "r{i}\t99\tchr1\t{}\t60\t8M\t=\t{}\t{}\tACGTACGT\tIIIIIIII\n",
            100 + i,
            300 + i,
            300 + i * 10
        ));
    }
    let sam = write(dir.path(), "reads.sam", &text);

    align_probe()
        .arg("stats")
        .arg(&sam)
        .args(["--skip", "0", "--limit", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Paired-end"))
        .stdout(predicate::str::contains("8.0"));
}

#[test]
fn test_stats_too_few_records() {
    let dir = TempDir::new().unwrap();
    let text = format!("{HEADER}r0\t0\tchr1\t100\t60\t4M\t*\t0\t0\tACGT\tIIII\n");
    let sam = write(dir.path(), "reads.sam", &text);

    align_probe()
        .arg("stats")
        .arg(&sam)
        .args(["--skip", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No result"));
}

#[test]
fn test_nruns_tsv_with_fai() {
    let dir = TempDir::new().unwrap();
    let fasta = write(dir.path(), "ref.fa", ">chr1\nACNNNNGT\nNNAC\n");
    let fai = write(dir.path(), "ref.fa.fai", "chr1\t12\t6\t8\t9\n");

    align_probe()
        .args(["--format", "tsv", "nruns"])
        .arg(&fasta)
        .arg("--dict")
        .arg(&fai)
        .args(["--buckets", "2", "--long-run", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chr1\t12\t2\t6"));
}

#[test]
fn test_nruns_without_dict() {
    let dir = TempDir::new().unwrap();
    let fasta = write(dir.path(), "ref.fa", ">chr1\nNNNNACGT\n>chr2\nACGT\n");

    align_probe()
        .args(["--format", "tsv", "nruns"])
        .arg(&fasta)
        .assert()
        .success()
        .stdout(predicate::str::contains("chr1\t8\t1\t4"))
        .stdout(predicate::str::contains("chr2\t4\t0\t0"));
}

#[test]
fn test_nruns_length_mismatch() {
    let dir = TempDir::new().unwrap();
    let fasta = write(dir.path(), "ref.fa", ">chr1\nACGTACGT\n");
    let fai = write(dir.path(), "ref.fa.fai", "chr1\t100\t6\t8\t9\n");

    align_probe()
        .arg("nruns")
        .arg(&fasta)
        .arg("--dict")
        .arg(&fai)
        .assert()
        .failure();
}

#[test]
fn test_catalog_list() {
    let dir = TempDir::new().unwrap();
    let catalog = toy_catalog(dir.path());

    align_probe()
        .args(["catalog", "list", "--catalog"])
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("toy"))
        .stdout(predicate::str::contains("Toy1"));
}

#[test]
fn test_catalog_add_then_identify_fasta() {
    let dir = TempDir::new().unwrap();
    let fasta = write(dir.path(), "mini.fa", ">chr1\nACGT\n>chr2\nGGCC\n");
    let catalog = dir.path().join("mini.json");

    align_probe()
        .args(["catalog", "add"])
        .arg(&fasta)
        .args(["--id", "mini", "--build", "Mini1", "--source", "Test"])
        .arg("--output")
        .arg(&catalog)
        .assert()
        .success();

    let written = fs::read_to_string(&catalog).unwrap();
    assert!(written.contains("f1f8f4bf413b16ad135722aa4591043e"));

    align_probe()
        .arg("identify")
        .arg(&fasta)
        .arg("--catalog")
        .arg(&catalog)
        .arg("--reference-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("AVAILABLE"))
        .stdout(predicate::str::contains("Md5"));
}

#[test]
fn test_identify_uppercase_md5() {
    let dir = TempDir::new().unwrap();
    let json = r#"{
        "version": "1.0.0",
        "created_at": "2024-01-01T00:00:00Z",
        "genomes": [
            {
                "id": "toy",
                "build": "Toy1",
                "source": "Example",
                "sequences": [
                    {"name": "chr1", "length": 1000, "md5": "6AEF897C3D6FF0C78AFF06AC189178DD"}
                ]
            }
        ]
    }"#;
    let catalog = write(dir.path(), "catalog.json", json);

    align_probe()
        .args(["identify", "-", "--catalog"])
        .arg(&catalog)
        .write_stdin("@SQ\tSN:chr1\tLN:1000\tM5:6aef897c3d6ff0c78aff06ac189178dd\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOWNLOADABLE"))
        .stdout(predicate::str::contains("Md5"));
}
