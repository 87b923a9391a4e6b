//! Output formatting for codon bias reports.
//!
//! ## Supported Formats
//!
//! - **TSV**: One line per gene with its score, after `#` summary lines
//! - **Usage**: The genome-wide codon usage table, grouped by amino acid
//! - **JSON**: The whole [`Report`], serialized
//!
//! ## Examples
//!
//! ```rust,no_run
//! use dcb_core::{DcbAnalyzer, config::{DcbConfig, OutputFormat}};
//! use dcb_core::output::write_report;
//! use std::fs::File;
//!
//! let analyzer = DcbAnalyzer::new(DcbConfig::default());
//! let report = analyzer.analyze_fasta_file("genes.fna")?;
//!
//! let mut scores = File::create("genes.dcb.tsv")?;
//! write_report(&mut scores, &report, OutputFormat::Tsv)?;
//!
//! let mut usage = File::create("genome.usage.tsv")?;
//! write_report(&mut usage, &report, OutputFormat::Usage)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::{config::OutputFormat, report::Report, types::DcbError};
use std::io::Write;

mod formats {
    pub mod json;
    pub mod tsv;
    pub mod usage;
}

use formats::{json::write_json_format, tsv::write_tsv_format, usage::write_usage_format};

/// Writes a report in the specified format.
///
/// # Errors
///
/// Returns [`DcbError::Io`] if writing fails, or
/// [`DcbError::Serialization`] if the JSON encoder rejects the report.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &Report,
    format: OutputFormat,
) -> Result<(), DcbError> {
    match format {
        OutputFormat::Tsv => write_tsv_format(writer, report),
        OutputFormat::Usage => write_usage_format(writer, report),
        OutputFormat::Json => write_json_format(writer, report),
    }
}
