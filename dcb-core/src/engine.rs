use std::path::Path;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::bias::{BiasCalculator, GenomeReference};
use crate::codon::CodonTable;
use crate::config::DcbConfig;
use crate::report::{assemble, Report};
use crate::sequence::{CodingSequence, SequenceStore};
use crate::tabulation::{aggregate_tabulations, tabulate_all, Tabulation};
use crate::types::{DcbError, SkippedGene};

/// Marker trait for the phase an analysis run is in.
///
/// Used in the type-state pattern to make scoring before the genome-wide
/// aggregate is complete a compile error. Implemented by [`Pending`] and
/// [`Tabulated`].
pub trait PhaseState {}

/// Marker type for a run whose genes have not been tabulated yet.
#[derive(Debug, Clone)]
pub struct Pending;

/// State of a run holding the per-gene counts and the completed genome
/// reference.
#[derive(Debug, Clone)]
pub struct Tabulated {
    tabulations: Vec<Tabulation>,
    reference: GenomeReference,
}

impl PhaseState for Pending {}
impl PhaseState for Tabulated {}

/// One codon bias analysis of one genome.
///
/// The run moves from [`Pending`] to [`Tabulated`] through
/// [`tabulate`](DcbRun::tabulate), which consumes it. Only a tabulated run,
/// which owns the finished [`GenomeReference`], can be scored.
///
/// # Examples
///
/// ```rust
/// use dcb_core::engine::PendingRun;
/// use dcb_core::config::DcbConfig;
/// use dcb_core::sequence::SequenceStore;
///
/// let store = SequenceStore::from_records([
///     ("gene_a", "ATGGCTGCTGCTTAA"),
///     ("gene_b", "ATGGCCGCCGCCTAA"),
/// ]);
///
/// let run = PendingRun::new(DcbConfig::default(), store)?;
/// let tabulated = run.tabulate()?;
/// assert_eq!(tabulated.reference().counts().total(), 10);
///
/// let report = tabulated.score()?;
/// assert_eq!(report.genes.len(), 2);
/// # Ok::<(), dcb_core::types::DcbError>(())
/// ```
#[derive(Debug)]
pub struct DcbRun<S: PhaseState> {
    /// Settings fixed at construction
    pub config: DcbConfig,
    sequences: Vec<CodingSequence>,
    skipped_genes: Vec<SkippedGene>,
    pool: Option<ThreadPool>,
    state: S,
}

/// A run that still has to count codons.
pub type PendingRun = DcbRun<Pending>;

/// A run with a completed genome reference, ready to score genes.
pub type TabulatedRun = DcbRun<Tabulated>;

impl<S: PhaseState> DcbRun<S> {
    fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Genes excluded because their input was malformed
    #[must_use]
    pub fn skipped_genes(&self) -> &[SkippedGene] {
        &self.skipped_genes
    }
}

impl PendingRun {
    /// Creates a run over the validated genes of `store`.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::ThreadPool`] if `config.num_threads` is set and the
    /// run's thread pool cannot be built.
    pub fn new(config: DcbConfig, store: SequenceStore) -> Result<Self, DcbError> {
        let pool = match config.num_threads {
            Some(num_threads) => Some(
                ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| DcbError::ThreadPool(e.to_string()))?,
            ),
            None => None,
        };

        let (sequences, skipped_genes) = store.into_parts();

        Ok(Self {
            config,
            sequences,
            skipped_genes,
            pool,
            state: Pending,
        })
    }

    /// Phase 1: count codons in every gene and build the genome reference.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::UnknownCodon`] if a gene holds a triplet that
    /// validation should have rejected. The run is aborted.
    pub fn tabulate(self) -> Result<TabulatedRun, DcbError> {
        log::info!(
            "Tabulating codons in {} genes ({} skipped)",
            self.sequences.len(),
            self.skipped_genes.len()
        );

        let (tabulations, counts) = self.install(|| -> Result<_, DcbError> {
            let tabulations = tabulate_all(&self.sequences)?;
            let counts = aggregate_tabulations(&tabulations);
            Ok((tabulations, counts))
        })?;

        log::debug!("Genome reference built from {} codons", counts.total());

        Ok(DcbRun {
            config: self.config,
            sequences: self.sequences,
            skipped_genes: self.skipped_genes,
            pool: self.pool,
            state: Tabulated {
                tabulations,
                reference: GenomeReference::new(counts, CodonTable::standard()),
            },
        })
    }
}

impl TabulatedRun {
    /// The completed genome-wide reference
    #[must_use]
    pub const fn reference(&self) -> &GenomeReference {
        &self.state.reference
    }

    /// Per-gene codon counts, in input order
    #[must_use]
    pub fn tabulations(&self) -> &[Tabulation] {
        &self.state.tabulations
    }

    /// Phase 2: score every gene against the reference and assemble the report.
    ///
    /// # Errors
    ///
    /// Returns [`DcbError::EmptyGenome`] if no gene survived validation.
    pub fn score(self) -> Result<Report, DcbError> {
        let reference = self.reference();
        let calculator = BiasCalculator::new(reference, &self.config);
        let scores = self.install(|| calculator.score_all(&self.state.tabulations));

        log::info!(
            "Scored {} genes ({} metric, {} weighting)",
            scores.len(),
            self.config.deviation_metric,
            self.config.family_weighting
        );

        let report = assemble(scores, reference)?;
        log::debug!(
            "Mean bias {:.6}, variance {:.6}, {} low confidence",
            report.summary.mean,
            report.summary.variance,
            report.summary.low_confidence_count
        );

        Ok(report.with_skipped_genes(self.skipped_genes))
    }
}

/// High-level entry point running both phases in one call.
///
/// # Examples
///
/// ```rust,no_run
/// use dcb_core::{DcbAnalyzer, config::DcbConfig};
///
/// let analyzer = DcbAnalyzer::new(DcbConfig::default());
/// let report = analyzer.analyze_fasta_file("genes.fna")?;
///
/// for gene in &report.genes {
///     println!("{}\t{:.4}", gene.gene_id, gene.score);
/// }
/// # Ok::<(), dcb_core::types::DcbError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DcbAnalyzer {
    /// Settings applied to every run
    pub config: DcbConfig,
}

impl DcbAnalyzer {
    #[must_use]
    pub const fn new(config: DcbConfig) -> Self {
        Self { config }
    }

    /// Analyze the genes of an already built store.
    ///
    /// # Errors
    ///
    /// Fails with [`DcbError::EmptyGenome`] when no valid genes remain,
    /// [`DcbError::UnknownCodon`] on an internal invariant violation, or
    /// [`DcbError::ThreadPool`] if the configured pool cannot be built.
    pub fn analyze_store(&self, store: SequenceStore) -> Result<Report, DcbError> {
        PendingRun::new(self.config.clone(), store)?
            .tabulate()?
            .score()
    }

    /// Analyze (gene identifier, sequence) pairs from the gene predictor.
    pub fn analyze_records<I, S, B>(&self, records: I) -> Result<Report, DcbError>
    where
        I: IntoIterator<Item = (S, B)>,
        S: Into<String>,
        B: AsRef<[u8]>,
    {
        self.analyze_store(SequenceStore::from_records(records))
    }

    /// Analyze a CDS FASTA file written by the gene predictor.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`analyze_store`](Self::analyze_store),
    /// returns [`DcbError::Io`] or [`DcbError::Parse`] if the file cannot be
    /// read.
    pub fn analyze_fasta_file<P: AsRef<Path>>(&self, path: P) -> Result<Report, DcbError> {
        self.analyze_store(SequenceStore::from_fasta_file(path)?)
    }
}
