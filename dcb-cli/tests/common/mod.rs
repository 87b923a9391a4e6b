#![allow(dead_code)]

use std::fs;

use assert_cmd::Command;
use tempfile::NamedTempFile;

/// A small genome: two Ala/Gly genes with opposite preferences, one neutral
/// gene, and one whose length is not a whole number of codons.
pub fn small_genome_fasta() -> String {
    format!(
        ">gene_gct\n{}\n>gene_gcc\n{}\n>gene_mixed\n{}\n>broken\nATGGCTG\n",
        format!("ATG{}{}TAA", "GCT".repeat(60), "GGT".repeat(40)),
        format!("ATG{}{}TAA", "GCC".repeat(60), "GGC".repeat(40)),
        format!("ATG{}TAA", "GCTGCCGGTGGC".repeat(10)),
    )
}

/// Writes FASTA text to a temporary file that lives as long as the handle
pub fn write_fasta(content: &str) -> NamedTempFile {
    let file = NamedTempFile::new().unwrap();
    fs::write(file.path(), content).unwrap();
    file
}

/// The `dcb` binary built from this workspace
pub fn dcb() -> Command {
    Command::cargo_bin("dcb").unwrap()
}

/// Runs `dcb` on a FASTA file and returns stdout, asserting success
pub fn run_dcb(input: &NamedTempFile, args: &[&str]) -> String {
    let output = dcb()
        .arg("-i")
        .arg(input.path())
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

/// Data lines of a TSV report, comment lines and header removed
pub fn data_lines(tsv: &str) -> Vec<Vec<String>> {
    tsv.lines()
        .filter(|line| !line.starts_with('#'))
        .skip(1)
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}
