//! # dcb - Codon Bias Scoring for Predicted Genes
//!
//! Reads the coding sequences a gene predictor wrote for one genome and
//! reports how strongly each gene's synonymous codon usage departs from the
//! genome's own.
//!
//! ## Usage
//!
//! ```bash
//! # Per-gene scores as TSV
//! dcb -i genes.fna -o genes.dcb.tsv
//!
//! # Genome codon usage table
//! dcb -i genes.fna -f usage
//!
//! # Full report as JSON with squared deviations and uniform family weights
//! dcb -i genes.fna -f json -d squared -w uniform -o report.json
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: CDS FASTA file (default: stdin)
//! - `-o, --output <FILE>`: Output file (default: stdout)
//! - `-f, --format <FORMAT>`: tsv, usage or json (default: tsv)
//! - `-d, --metric <METRIC>`: absolute or squared (default: absolute)
//! - `-w, --weighting <WEIGHTING>`: count or uniform (default: count)
//! - `-n, --min-codons <INT>`: Low confidence threshold (default: 100)
//! - `-t, --threads <INT>`: Worker threads (default: available cores)
//! - `-l, --loglevel <LOGLEVEL>`: error, warn, info, debug, trace, none
//! - `-q, --quiet`: Silence all log output

use std::fs::File;
use std::io::{self, BufWriter, Write};

use dcb_core::output::write_report;
use dcb_core::sequence::SequenceStore;
use dcb_core::DcbAnalyzer;

mod cli;
mod log_level;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = cli::handle_cli()?;

    let analyzer = DcbAnalyzer::new(options.config);
    let report = match &options.input {
        Some(path) => {
            log::info!("Reading coding sequences from {}", path.display());
            analyzer.analyze_fasta_file(path)?
        }
        None => {
            log::info!("Reading coding sequences from stdin");
            analyzer.analyze_store(SequenceStore::from_fasta_reader(io::stdin().lock())?)?
        }
    };

    let mut writer: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout())),
    };
    write_report(&mut writer, &report, analyzer.config.output_format)?;
    writer.flush()?;

    if report.has_skipped_genes() {
        log::warn!(
            "Completed with {} genes skipped",
            report.skipped_genes.len()
        );
    }
    log::info!(
        "Analysis complete: {} genes, mean bias {:.4}",
        report.summary.gene_count,
        report.summary.mean
    );

    Ok(())
}
