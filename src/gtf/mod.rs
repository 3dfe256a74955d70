//! GTF/GFF parsing into a dense table.
//!
//! Every record contributes one row. The 8 positional columns come first,
//! followed by each attribute key in the order it is first seen anywhere in
//! the file. Rows lacking an attribute hold a null in that column.
//!
//! ```no_run
//! use mupit::gtf::convert_gtf;
//!
//! fn main() -> anyhow::Result<()> {
//!     let frame = convert_gtf("gencode.v19.annotation.gtf.gz")?;
//!     println!("{:?}", frame.head(Some(5)));
//!     Ok(())
//! }
//! ```
mod line;
mod reader;
mod table;
mod value;

pub use line::{
    parse_line,
    tokenize_attributes,
    AttributeToken,
    DecodedLine,
    GTF_FIELDS,
    GTF_HEADER,
};
use polars::prelude::DataFrame;
pub use reader::{GtfReader, GtfReaderBuilder, MalformedPolicy};
pub use table::GtfTable;
pub use value::{coerce, GtfValue};

use crate::error::GtfResult;

/// Reads an optionally compressed local or remote annotation file into a
/// [`GtfTable`] using default settings.
pub fn read_gtf_table(path: &str) -> GtfResult<GtfTable> {
    GtfReaderBuilder::default()
        .build(path)?
        .into_table()
}

/// Reads an annotation file into a [`DataFrame`].
///
/// Attributes carrying comma separated values anywhere in the file become
/// `List(String)` columns.
pub fn convert_gtf(path: &str) -> GtfResult<DataFrame> {
    Ok(read_gtf_table(path)?.into_dataframe()?)
}
