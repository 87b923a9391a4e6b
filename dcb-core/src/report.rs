use serde::Serialize;

use crate::bias::{GeneBias, GenomeReference};
use crate::codon::{AminoAcid, Codon, CodonTable};
use crate::types::{DcbError, SkippedGene};

/// Result of one codon bias analysis.
///
/// # Examples
///
/// ```rust
/// use dcb_core::{DcbAnalyzer, config::DcbConfig};
///
/// let analyzer = DcbAnalyzer::new(DcbConfig::default());
/// let report = analyzer.analyze_records([
///     ("gene_a", "GCTGCTGCTGCT"),
///     ("gene_b", "GCCGCCGCCGCC"),
///     ("gene_c", "GCCGC"),
/// ])?;
///
/// assert_eq!(report.genes.len(), 2);
/// assert!(report.has_skipped_genes());
/// println!("mean bias {:.3}", report.summary.mean);
/// # Ok::<(), dcb_core::types::DcbError>(())
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// One entry per analyzed gene, in input order
    pub genes: Vec<GeneBias>,
    /// Summary statistics over all gene scores
    pub summary: BiasSummary,
    /// Genome-wide codon usage grouped by synonymous family
    pub codon_usage: Vec<FamilyUsage>,
    /// Genes excluded because their input was malformed
    pub skipped_genes: Vec<SkippedGene>,
}

impl Report {
    /// Attach the genes that were excluded before tabulation
    #[must_use]
    pub fn with_skipped_genes(mut self, skipped_genes: Vec<SkippedGene>) -> Self {
        self.skipped_genes = skipped_genes;
        self
    }

    /// True when the run completed but some genes were left out
    #[must_use]
    pub fn has_skipped_genes(&self) -> bool {
        !self.skipped_genes.is_empty()
    }

    /// Usage entries for one amino acid
    #[must_use]
    pub fn family_usage(&self, amino_acid: AminoAcid) -> Option<&FamilyUsage> {
        self.codon_usage
            .iter()
            .find(|family| family.amino_acid == amino_acid)
    }
}

/// Mean and spread of gene scores across the genome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasSummary {
    pub gene_count: usize,
    pub mean: f64,
    /// Population variance
    pub variance: f64,
    pub low_confidence_count: usize,
    /// Ambiguous triplets excluded across all genes
    pub skipped_triplets: u64,
}

/// Genome-wide usage of one codon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodonUsage {
    pub codon: Codon,
    pub count: u64,
    /// Share of the family's codons, in [0, 1]
    pub relative_usage: f64,
    pub rscu: f64,
}

/// Genome-wide usage of one synonymous family
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyUsage {
    pub amino_acid: AminoAcid,
    pub count: u64,
    pub codons: Vec<CodonUsage>,
}

/// Package gene scores and the genome reference into a [`Report`].
///
/// # Errors
///
/// Returns [`DcbError::EmptyGenome`] if there are no gene scores. A genome
/// without predicted genes is a broken upstream input, not a zero report.
pub fn assemble(scores: Vec<GeneBias>, reference: &GenomeReference) -> Result<Report, DcbError> {
    if scores.is_empty() {
        return Err(DcbError::EmptyGenome);
    }

    let summary = summarize(&scores);
    let codon_usage = usage_table(reference, CodonTable::standard());

    Ok(Report {
        genes: scores,
        summary,
        codon_usage,
        skipped_genes: Vec::new(),
    })
}

fn summarize(scores: &[GeneBias]) -> BiasSummary {
    let n = scores.len() as f64;
    let mean = scores.iter().map(|gene| gene.score).sum::<f64>() / n;
    let variance = scores
        .iter()
        .map(|gene| (gene.score - mean).powi(2))
        .sum::<f64>()
        / n;

    BiasSummary {
        gene_count: scores.len(),
        mean,
        variance,
        low_confidence_count: scores.iter().filter(|gene| gene.low_confidence).count(),
        skipped_triplets: scores.iter().map(|gene| gene.skipped_triplets).sum(),
    }
}

fn usage_table(reference: &GenomeReference, table: &CodonTable) -> Vec<FamilyUsage> {
    let counts = reference.counts();
    let relative_usage = reference.relative_usage();

    table
        .families()
        .map(|family| FamilyUsage {
            amino_acid: family.amino_acid,
            count: counts.family_total(&family),
            codons: family
                .codons()
                .iter()
                .map(|&codon| CodonUsage {
                    codon,
                    count: counts.get(codon),
                    relative_usage: relative_usage.get(codon),
                    rscu: reference.rscu(codon),
                })
                .collect(),
        })
        .collect()
}
