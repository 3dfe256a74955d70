use std::path::Path;

use anyhow::Context;
use log::info;
use polars::prelude::*;

use super::scan_table;

/// Log10 rate columns of the input and the names they are exported under.
const LOG_RATES: [(&str, &str); 5] = [
    ("missense_rate", "mis"),
    ("nonsense_rate", "non"),
    ("splice_lof_rate", "splice_site"),
    ("synonymous_rate", "syn"),
    ("frameshift_rate", "frameshift"),
];

/// Output columns of [`get_ddd_rates`].
pub const RATE_COLUMNS: [&str; 8] = [
    "hgnc",
    "chrom",
    "length",
    "mis",
    "non",
    "splice_site",
    "syn",
    "frameshift",
];

/// Loads per-gene mutation rates.
///
/// Rates are stored as log10 values and are exponentiated; columns are
/// renamed to the names used when scaling rates by cohort size.
pub fn get_ddd_rates<P: AsRef<Path>>(path: P) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let mut selection = vec![
        col("transcript_id").alias("hgnc"),
        col("chrom"),
        col("length"),
    ];
    selection.extend(
        LOG_RATES
            .iter()
            .map(|(from, _)| col(*from).cast(DataType::Float64)),
    );

    let mut rates = scan_table(path, b'\t', &["chrom"])?
        .select(selection)
        .collect()
        .with_context(|| format!("could not read rates from {}", path.display()))?;

    for (from, to) in LOG_RATES {
        let exponentiated = rates
            .column(from)?
            .as_materialized_series()
            .f64()?
            .apply_values(|log_rate| 10f64.powf(log_rate))
            .with_name(to.into());
        rates.with_column(exponentiated.into_series())?;
    }
    let rates = rates.select(RATE_COLUMNS)?;

    info!(
        "Loaded rates for {} genes from {}",
        rates.height(),
        path.display()
    );
    Ok(rates)
}
