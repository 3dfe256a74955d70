//! Loaders normalising cohort tables into the column vocabulary used by
//! the enrichment analysis.
//!
//! Each loader reads a delimited table with a header row, treats `NA` as
//! null and returns an eager [`DataFrame`](polars::prelude::DataFrame).
mod de_novos;
mod known_genes;
mod rates;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
pub use de_novos::{standardise_ddd_de_novos, DE_NOVO_COLUMNS};
use log::debug;
pub use known_genes::{detect_separator, open_known_genes};
use polars::prelude::*;
pub use rates::{get_ddd_rates, RATE_COLUMNS};

/// Rows read to infer column types.
const INFER_SCHEMA_ROWS: usize = 10_000;

/// First line of `path`, without its line ending.
pub(crate) fn read_header(path: &Path) -> anyhow::Result<String> {
    let mut header = String::new();
    BufReader::new(
        File::open(path).with_context(|| format!("could not open {}", path.display()))?,
    )
    .read_line(&mut header)?;
    Ok(header.trim_end_matches(['\n', '\r']).to_string())
}

/// Lazily scans a delimited table with a header row.
///
/// `text_columns` are always read as strings instead of inferred. Chromosome
/// columns need this: files sorted by chromosome only reach `X` or `Y` after
/// thousands of numeric rows. Names missing from the header are ignored.
pub(crate) fn scan_table<P: AsRef<Path>>(
    path: P,
    separator: u8,
    text_columns: &[&str],
) -> anyhow::Result<LazyFrame> {
    let path = path.as_ref();
    anyhow::ensure!(path.exists(), "{} does not exist", path.display());

    let header = read_header(path)?;
    let present = header
        .split(separator as char)
        .collect::<Vec<_>>();
    let mut overwrite = Schema::default();
    for name in text_columns
        .iter()
        .filter(|name| present.contains(*name))
    {
        overwrite.with_column((*name).into(), DataType::String);
    }
    debug!(
        "Scanning {} with {} string columns",
        path.display(),
        overwrite.len()
    );

    LazyCsvReader::new(path)
        .with_separator(separator)
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_dtype_overwrite(Some(Arc::new(overwrite)))
        .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())))
        .finish()
        .with_context(|| format!("could not scan {}", path.display()))
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Writes `rows` as lines of a scratch file.
    pub fn write_table(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::write_table;
    use super::*;

    #[test]
    fn test_text_columns_stay_strings() -> anyhow::Result<()> {
        let mut rows = vec!["chrom\tpos".to_string()];
        rows.extend((0..INFER_SCHEMA_ROWS + 5).map(|i| format!("1\t{}", i)));
        rows.push("X\t1".to_string());
        let rows = rows.iter().map(String::as_str).collect::<Vec<_>>();
        let file = write_table(&rows);

        let frame = scan_table(file.path(), b'\t', &["chrom", "absent"])?.collect()?;
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.column("chrom")?.dtype(), &DataType::String);
        assert_eq!(frame.column("pos")?.dtype(), &DataType::Int64);
        assert_eq!(
            frame
                .column("chrom")?
                .as_materialized_series()
                .str()?
                .get(frame.height() - 1),
            Some("X")
        );
        Ok(())
    }
}
