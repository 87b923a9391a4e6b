mod common;

use std::fs;

use insta::assert_snapshot;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::common::{data_lines, dcb, run_dcb, small_genome_fasta, write_fasta};

fn stderr_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn tsv_header_snapshot() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q"]);
    let header = stdout
        .lines()
        .find(|line| !line.starts_with('#'))
        .unwrap();
    assert_snapshot!(header, @"gene_id\tcodons\tscore\tlow_confidence");
}

#[test]
fn tsv_scores_every_valid_gene_in_order() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q"]);
    let rows = data_lines(&stdout);

    let ids: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
    assert_eq!(ids, vec!["gene_gct", "gene_gcc", "gene_mixed"]);

    // ATG + 100 codons + stop
    assert_eq!(rows[0][1], "102");
    assert_eq!(rows[0][3], "false");
    // 40 codons + ATG + stop is below the default threshold of 100
    assert_eq!(rows[2][1], "42");
    assert_eq!(rows[2][3], "true");

    let gct: f64 = rows[0][2].parse().unwrap();
    let gcc: f64 = rows[1][2].parse().unwrap();
    let mixed: f64 = rows[2][2].parse().unwrap();
    assert!((gct - gcc).abs() < 1e-6);
    assert!(mixed < gct);
}

#[test]
fn tsv_reports_skipped_gene_without_failing() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q"]);
    assert!(stdout.contains("# skipped_genes\t1\n"));
    assert!(stdout.contains("# skipped\tbroken\t"));
}

#[test]
fn skipped_genes_are_logged_as_warning() {
    let input = write_fasta(&small_genome_fasta());
    let assert = dcb().arg("-i").arg(input.path()).assert().success();
    assert!(stderr_of(&assert).contains("1 genes skipped"));
}

#[test]
fn min_codons_changes_low_confidence_flag() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q", "-n", "10"]);
    let rows = data_lines(&stdout);
    assert!(rows.iter().all(|row| row[3] == "false"));
}

#[test]
fn usage_format_lists_all_codons() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q", "-f", "usage"]);
    let mut lines = stdout.lines();
    assert_eq!(
        lines.next(),
        Some("amino_acid\tcodon\tcount\trelative_usage\trscu")
    );
    assert_eq!(lines.count(), 64);
    assert!(stdout.contains("Met\tATG\t3\t1.000\t1.000\n"));
    assert!(stdout.contains("Ala\tGCT\t70\t0.500\t2.000\n"));
}

#[test]
fn json_format_is_valid_report() {
    let input = write_fasta(&small_genome_fasta());
    let stdout = run_dcb(&input, &["-q", "-f", "json", "-d", "squared", "-w", "uniform"]);
    let report: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(report["genes"].as_array().unwrap().len(), 3);
    assert_eq!(report["summary"]["gene_count"], 3);
    assert_eq!(report["skipped_genes"][0]["gene_id"], "broken");
    assert_eq!(report["codon_usage"].as_array().unwrap().len(), 21);
}

#[test]
fn output_file_and_threads() {
    let input = write_fasta(&small_genome_fasta());
    let output = NamedTempFile::new().unwrap();
    dcb()
        .arg("-i")
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["-t", "2", "-q"])
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(output.path()).unwrap();
    assert_eq!(data_lines(&written).len(), 3);
}

#[test]
fn reads_stdin_when_no_input_given() {
    let output = dcb()
        .arg("-q")
        .write_stdin(small_genome_fasta())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(data_lines(&stdout).len(), 3);
}

#[test]
fn empty_genome_fails() {
    let input = write_fasta(">only_bad\nATGC\n");
    let assert = dcb().arg("-i").arg(input.path()).assert().failure();
    assert!(stderr_of(&assert).contains("EmptyGenome"));
}

#[test]
fn missing_input_file_fails() {
    dcb()
        .args(["-i", "does_not_exist.fna"])
        .assert()
        .failure();
}

#[test]
fn invalid_format_is_rejected() {
    let input = write_fasta(&small_genome_fasta());
    let assert = dcb()
        .arg("-i")
        .arg(input.path())
        .args(["-f", "gff"])
        .assert()
        .failure();
    assert!(stderr_of(&assert).contains("Invalid output format"));
}

#[test]
fn help_lists_options() {
    let assert = dcb().arg("--help").assert().success();
    let help = stdout_of(&assert);
    for option in ["--min-codons", "--weighting", "--metric", "--format", "--threads"] {
        assert!(help.contains(option), "help is missing {option}");
    }
}
