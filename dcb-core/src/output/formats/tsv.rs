use std::io::Write;

use crate::{report::Report, types::DcbError};

pub const HEADER: &str = "gene_id\tcodons\tscore\tlow_confidence";

/// Write gene scores as tab-separated values.
///
/// Summary statistics and skipped genes come first as `#` comment lines so
/// the table itself stays loadable by any TSV reader.
pub fn write_tsv_format<W: Write>(writer: &mut W, report: &Report) -> Result<(), DcbError> {
    let summary = &report.summary;
    writeln!(writer, "# genes\t{}", summary.gene_count)?;
    writeln!(writer, "# mean\t{:.6}", summary.mean)?;
    writeln!(writer, "# variance\t{:.6}", summary.variance)?;
    writeln!(writer, "# low_confidence\t{}", summary.low_confidence_count)?;
    writeln!(writer, "# skipped_triplets\t{}", summary.skipped_triplets)?;
    writeln!(writer, "# skipped_genes\t{}", report.skipped_genes.len())?;
    for skipped in &report.skipped_genes {
        writeln!(writer, "# skipped\t{}\t{}", skipped.gene_id, skipped.reason)?;
    }

    writeln!(writer, "{HEADER}")?;
    for gene in &report.genes {
        writeln!(
            writer,
            "{}\t{}\t{:.6}\t{}",
            gene.gene_id, gene.codon_count, gene.score, gene.low_confidence
        )?;
    }
    Ok(())
}
