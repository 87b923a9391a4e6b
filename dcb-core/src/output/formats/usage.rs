use std::io::Write;

use crate::{report::Report, types::DcbError};

/// Write the genome-wide codon usage table, one codon per line in family order
pub fn write_usage_format<W: Write>(writer: &mut W, report: &Report) -> Result<(), DcbError> {
    writeln!(writer, "amino_acid\tcodon\tcount\trelative_usage\trscu")?;
    for family in &report.codon_usage {
        for usage in &family.codons {
            writeln!(
                writer,
                "{}\t{}\t{}\t{:.3}\t{:.3}",
                family.amino_acid, usage.codon, usage.count, usage.relative_usage, usage.rscu
            )?;
        }
    }
    Ok(())
}
