//! # Codon Bias Scoring for Predicted Genes
//!
//! Measures how far each gene of a genome departs from the genome's own
//! synonymous codon usage. The input is the coding sequences a gene
//! predictor wrote out; the output is one bias score per gene plus the
//! genome-wide usage table the scores were measured against.
//!
//! ## Overview
//!
//! An analysis has two phases:
//!
//! 1. **Tabulation**: count the 64 codons of every gene, then sum the counts
//!    into a genome-wide table.
//! 2. **Scoring**: compare each gene's relative synonymous usage with the
//!    genome's, family by family, and combine the family deviations into a
//!    single score.
//!
//! Genes are processed independently in both phases and spread across
//! threads with Rayon.
//!
//! ## Quick Start
//!
//! ```rust
//! use dcb_core::{DcbAnalyzer, config::DcbConfig};
//!
//! let analyzer = DcbAnalyzer::new(DcbConfig::default());
//! let report = analyzer.analyze_records([
//!     ("gene_a", "ATGGCTGCTGCTGGTTAA"),
//!     ("gene_b", "ATGGCCGCCGCCGGCTAA"),
//! ])?;
//!
//! for gene in &report.genes {
//!     println!("{}\t{:.4}", gene.gene_id, gene.score);
//! }
//! # Ok::<(), dcb_core::types::DcbError>(())
//! ```
//!
//! ## Architecture
//!
//! The engine uses a type-state pattern so that no gene can be scored before
//! the genome reference is complete:
//!
//! ```rust
//! use dcb_core::engine::PendingRun;
//! use dcb_core::config::DcbConfig;
//! use dcb_core::sequence::SequenceStore;
//!
//! let store = SequenceStore::from_records([("gene_a", "GCTGCC"), ("gene_b", "GCCGCC")]);
//!
//! // `score` only exists on a tabulated run
//! let tabulated = PendingRun::new(DcbConfig::default(), store)?.tabulate()?;
//! let report = tabulated.score()?;
//! assert_eq!(report.genes.len(), 2);
//! # Ok::<(), dcb_core::types::DcbError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`codon`]: Codon indexing and the standard genetic code
//! - [`sequence`]: Coding sequence validation and FASTA input
//! - [`tabulation`]: Per-gene and genome-wide codon counts
//! - [`bias`]: Relative usage, RSCU and gene scoring
//! - [`report`]: Report assembly and summary statistics
//! - [`engine`]: The two-phase analysis run
//! - [`output`]: TSV, usage table and JSON writers
//! - [`config`]: Analysis options
//! - [`types`]: Errors and skipped gene records
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T, DcbError>`](types::DcbError).
//! A malformed gene is recorded in the report and the run continues; an
//! empty genome, an I/O failure or an internal invariant violation aborts it.

pub mod bias;
pub mod codon;
pub mod config;
pub mod constants;
pub mod engine;
pub mod output;
pub mod report;
pub mod sequence;
pub mod tabulation;
pub mod types;

pub use engine::DcbAnalyzer;
