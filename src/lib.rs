//! # mupit
//!
//! `mupit` loads the annotation and cohort tables consumed by de novo
//! mutation enrichment analyses.
//!
//! ## Key Features
//!
//! * **GTF/GFF to table**: [`gtf::convert_gtf`] turns an annotation file into
//!   a polars [`DataFrame`](polars::prelude::DataFrame). The free-form
//!   attribute column is flattened into one column per attribute key, rows
//!   lacking a key hold nulls, and comma separated values become lists.
//! * **Transparent input**: gzip input is always understood, other codecs
//!   are available with the `compression` feature (on by default), and
//!   `http(s)://` paths are fetched into a scratch file first.
//! * **Cohort loaders**: [`loaders`] normalise de novo calls, known
//!   developmental disorder genes and per-gene mutation rates into the
//!   shared analysis schema.
//!
//! ## Usage
//!
//! ```no_run
//! use mupit::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let table = GtfReaderBuilder::default()
//!         .with_malformed_policy(MalformedPolicy::Skip)
//!         .build("Homo_sapiens.GRCh37.75.gtf.gz")?
//!         .into_table()?;
//!
//!     println!("{} records, {} columns", table.n_rows(), table.n_columns());
//!     let frame = table.into_dataframe()?;
//!     println!("{:?}", frame.head(Some(3)));
//!     Ok(())
//! }
//! ```
mod error;
pub mod exports;
pub mod gtf;
pub mod io;
pub mod loaders;
pub mod prelude;

pub use error::{GtfError, GtfResult};
