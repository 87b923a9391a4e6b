use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::constants::DEFAULT_MIN_CODON_COUNT;

/// Output format options for codon bias reports.
///
/// # Formats
///
/// - **Tsv**: one line per gene with its bias score and confidence flag
/// - **Usage**: the genome-wide codon usage table grouped by amino acid
/// - **Json**: the full report serialized as JSON
///
/// # Examples
///
/// ```rust
/// use dcb_core::config::{DcbConfig, OutputFormat};
///
/// let config = DcbConfig {
///     output_format: OutputFormat::Usage,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tab-delimited per-gene scores with summary statistics as `#` comments.
    Tsv,

    /// Genome codon usage table: count, relative usage and RSCU per codon.
    Usage,

    /// Complete report as a JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(Self::Tsv),
            "usage" => Ok(Self::Usage),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// How a gene's relative usage is compared with the genome reference within
/// one synonymous family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationMetric {
    /// Sum of absolute differences, bounded by 2 per family.
    #[default]
    Absolute,
    /// Sum of squared differences, bounded by 2 per family.
    Squared,
}

impl DeviationMetric {
    /// Deviation contributed by one codon
    #[must_use]
    pub fn codon_deviation(self, gene_usage: f64, reference_usage: f64) -> f64 {
        let diff = gene_usage - reference_usage;
        match self {
            Self::Absolute => diff.abs(),
            Self::Squared => diff * diff,
        }
    }
}

impl FromStr for DeviationMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Ok(Self::Absolute),
            "squared" | "sq" => Ok(Self::Squared),
            _ => Err(format!("Invalid deviation metric: {s}")),
        }
    }
}

impl fmt::Display for DeviationMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Squared => write!(f, "squared"),
        }
    }
}

/// Weight given to each synonymous family when family deviations are
/// combined into a gene score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyWeighting {
    /// Weight each family by the number of its codons in the gene, so rarely
    /// used families do not dominate the score.
    #[default]
    CodonCount,
    /// Every family present in the gene counts equally.
    Uniform,
}

impl FamilyWeighting {
    #[must_use]
    pub fn weight(self, family_count: u64) -> f64 {
        match self {
            Self::CodonCount => family_count as f64,
            Self::Uniform => 1.0,
        }
    }
}

impl FromStr for FamilyWeighting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "count" | "codon-count" => Ok(Self::CodonCount),
            "uniform" => Ok(Self::Uniform),
            _ => Err(format!("Invalid family weighting: {s}")),
        }
    }
}

impl fmt::Display for FamilyWeighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CodonCount => write!(f, "count"),
            Self::Uniform => write!(f, "uniform"),
        }
    }
}

/// Configuration settings for one codon bias analysis run.
///
/// All settings are passed explicitly when a run is constructed; nothing is
/// read from global state.
///
/// # Examples
///
/// ```rust
/// use dcb_core::config::{DcbConfig, DeviationMetric, FamilyWeighting};
///
/// let config = DcbConfig {
///     min_codon_count: 50,
///     deviation_metric: DeviationMetric::Squared,
///     family_weighting: FamilyWeighting::Uniform,
///     num_threads: Some(4),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DcbConfig {
    /// Genes with fewer counted codons are flagged `low_confidence`.
    ///
    /// They are still scored and still contribute to the genome summary.
    ///
    /// **Default**: 100
    pub min_codon_count: usize,

    /// Per-family deviation formula.
    ///
    /// **Default**: [`DeviationMetric::Absolute`]
    pub deviation_metric: DeviationMetric,

    /// Family weighting in the per-gene weighted mean.
    ///
    /// **Default**: [`FamilyWeighting::CodonCount`]
    pub family_weighting: FamilyWeighting,

    /// Number of worker threads for tabulation and scoring.
    ///
    /// When set, the run uses its own Rayon pool of this size. Set to `None`
    /// to use the global pool.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,

    /// Output format used by report writers.
    ///
    /// **Default**: [`OutputFormat::Tsv`]
    pub output_format: OutputFormat,
}

impl Default for DcbConfig {
    fn default() -> Self {
        Self {
            min_codon_count: DEFAULT_MIN_CODON_COUNT,
            deviation_metric: DeviationMetric::default(),
            family_weighting: FamilyWeighting::default(),
            num_threads: None,
            output_format: OutputFormat::Tsv,
        }
    }
}
