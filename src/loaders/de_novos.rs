use std::path::Path;

use anyhow::Context;
use itertools::Itertools;
use log::info;
use polars::prelude::*;

use super::scan_table;

/// Output columns of [`standardise_ddd_de_novos`], before any extras.
pub const DE_NOVO_COLUMNS: [&str; 13] = [
    "person_id",
    "sex",
    "chrom",
    "start_pos",
    "end_pos",
    "ref_allele",
    "alt_allele",
    "hgnc",
    "consequence",
    "study_code",
    "publication_doi",
    "study_phenotype",
    "type",
];

const STUDY_CODE: &str = "ddd_unpublished";
const STUDY_PHENOTYPE: &str = "developmental_disorders";

/// Loads the unpublished DDD de novo table and renames its columns into the
/// shared de novo schema.
///
/// The input is tab separated and must carry `person_stable_id`, `sex`,
/// `chrom`, `pos`, `ref`, `alt`, `symbol` and `consequence`. `extra_columns`
/// are carried through unchanged after the standard ones.
pub fn standardise_ddd_de_novos<P: AsRef<Path>>(
    path: P,
    extra_columns: &[&str],
) -> anyhow::Result<DataFrame> {
    let path = path.as_ref();
    let ref_len = col("ref").str().len_chars().cast(DataType::Int64);
    let is_snv = ref_len
        .clone()
        .eq(lit(1))
        .and(col("alt").str().len_chars().eq(lit(1)));

    let selection = DE_NOVO_COLUMNS
        .iter()
        .chain(extra_columns.iter())
        .unique()
        .map(|name| col(*name))
        .collect::<Vec<_>>();

    let variants = scan_table(path, b'\t', &["chrom"])?
        .with_columns([
            when(is_snv)
                .then(lit("snv"))
                .otherwise(lit("indel"))
                .alias("type"),
            col("person_stable_id").alias("person_id"),
            col("pos").cast(DataType::Int64).alias("start_pos"),
            col("ref").alias("ref_allele"),
            col("alt").alias("alt_allele"),
            (col("pos").cast(DataType::Int64) + ref_len - lit(1)).alias("end_pos"),
            col("symbol").alias("hgnc"),
            lit(STUDY_CODE).alias("study_code"),
            lit(NULL).cast(DataType::String).alias("publication_doi"),
            lit(STUDY_PHENOTYPE).alias("study_phenotype"),
            when(col("sex").eq(lit("M")))
                .then(lit("male"))
                .when(col("sex").eq(lit("F")))
                .then(lit("female"))
                .otherwise(lit(NULL).cast(DataType::String))
                .alias("sex"),
        ])
        .select(selection)
        .collect()
        .with_context(|| format!("could not standardise de novos in {}", path.display()))?;

    info!(
        "Loaded {} de novos from {}",
        variants.height(),
        path.display()
    );
    Ok(variants)
}
