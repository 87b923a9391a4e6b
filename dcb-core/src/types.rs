use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A gene that was excluded from the analysis because its input was malformed.
///
/// Skipped genes do not abort the run; they are carried through to the
/// [`Report`](crate::report::Report) so callers can tell "completed with
/// skips" apart from a failed analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedGene {
    /// Identifier of the offending gene as given by the gene predictor
    pub gene_id: String,
    /// Human readable description of what was wrong with the record
    pub reason: String,
}

impl SkippedGene {
    #[must_use]
    pub fn new(gene_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkippedGene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.gene_id, self.reason)
    }
}

impl From<SkippedGene> for DcbError {
    fn from(skipped: SkippedGene) -> Self {
        Self::MalformedSequence {
            gene_id: skipped.gene_id,
            reason: skipped.reason,
        }
    }
}

/// Error types that can occur during codon bias analysis
#[derive(Error, Debug)]
pub enum DcbError {
    /// Input sequence has a bad length or alphabet. Recoverable per gene.
    #[error("Malformed sequence for gene {gene_id}: {reason}")]
    MalformedSequence { gene_id: String, reason: String },
    /// A triplet outside the 64 valid codons reached the codon table.
    ///
    /// Validation should make this impossible, so it always aborts the run.
    #[error("Unknown codon: {0}")]
    UnknownCodon(String),
    /// No genes left to analyze
    #[error("Genome contains no analyzable genes")]
    EmptyGenome,
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing input data
    #[error("Parse error: {0}")]
    Parse(String),
    /// Worker thread pool could not be created
    #[error("Failed to configure thread pool: {0}")]
    ThreadPool(String),
    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl DcbError {
    /// Whether the error is confined to a single gene and the run may continue
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedSequence { .. })
    }
}
