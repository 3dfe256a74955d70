use std::path::Path;

use anyhow::Context;
use log::{debug, info};
use polars::prelude::*;

use super::{read_header, scan_table};

/// Header names used by the different catalog releases and their shared
/// names.
const RENAMES: [(&str, &str); 5] = [
    ("DDD.category", "type"),
    ("ddg2p_status", "type"),
    ("allelic.requirement", "mode"),
    ("mutation.consequence", "mech"),
    ("gencode_gene_name", "gene"),
];

const EXCLUDED_TYPE: &str = "possible dd gene";
const DOMINANT_MODES: [&str; 2] = ["Monoallelic", "X-linked dominant"];
const HEMIZYGOUS_MODE: &str = "Hemizygous";

/// Picks the column separator from the header line: `|` if it contains
/// one, a tab otherwise.
pub fn detect_separator<P: AsRef<Path>>(path: P) -> anyhow::Result<u8> {
    let header = read_header(path.as_ref())?;
    Ok(if header.contains('|') { b'|' } else { b'\t' })
}

fn renamed(name: &str) -> &str {
    RENAMES
        .iter()
        .find(|(from, _)| *from == name)
        .map(|(_, to)| *to)
        .unwrap_or(name)
}

/// Upper-cases the first character.
fn capitalise(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalise_column(
    genes: &mut DataFrame,
    name: &str,
) -> PolarsResult<()> {
    let capitalised: StringChunked = genes
        .column(name)?
        .cast(&DataType::String)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(capitalise))
        .collect();
    genes.with_column(capitalised.with_name(name.into()).into_series())?;
    Ok(())
}

/// Loads the known developmental disorder gene catalog.
///
/// Column names of the different catalog releases are unified to `type`,
/// `mode`, `mech` and `gene`. Genes typed "possible DD gene" are dropped,
/// the `chr` prefix is stripped from chromosomes and `dominant` /
/// `hemizygous` flags are derived from the inheritance mode.
pub fn open_known_genes<P: AsRef<Path>>(path: P) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let separator = detect_separator(path)?;
    debug!(
        "Reading known genes from {} with separator {:?}",
        path.display(),
        separator as char
    );

    let mut frame = scan_table(path, separator, &["chr"])?;
    let schema = frame.collect_schema()?;
    let selection = schema
        .iter_names()
        .map(|name| col(name.as_str()).alias(renamed(name.as_str())))
        .collect::<Vec<_>>();

    let mut genes = frame
        .select(selection)
        .filter(
            col("type")
                .cast(DataType::String)
                .str()
                .to_lowercase()
                .neq_missing(lit(EXCLUDED_TYPE)),
        )
        .with_column(
            col("chr")
                .cast(DataType::String)
                .str()
                .strip_chars_start(lit("chr")),
        )
        .collect()
        .with_context(|| format!("could not read known genes from {}", path.display()))?;

    capitalise_column(&mut genes, "mode")?;
    capitalise_column(&mut genes, "mech")?;

    let genes = genes
        .lazy()
        .with_columns([
            col("mode")
                .eq(lit(DOMINANT_MODES[0]))
                .or(col("mode").eq(lit(DOMINANT_MODES[1])))
                .fill_null(lit(false))
                .alias("dominant"),
            col("mode")
                .eq(lit(HEMIZYGOUS_MODE))
                .fill_null(lit(false))
                .alias("hemizygous"),
        ])
        .collect()?;

    info!(
        "Loaded {} known genes from {}",
        genes.height(),
        path.display()
    );
    Ok(genes)
}
