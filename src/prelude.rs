pub use crate::error::{GtfError, GtfResult};
pub use crate::gtf::{
    convert_gtf,
    read_gtf_table,
    DecodedLine,
    GtfReader,
    GtfReaderBuilder,
    GtfTable,
    GtfValue,
    MalformedPolicy,
};
pub use crate::io::Compression;
pub use crate::loaders::{
    get_ddd_rates,
    open_known_genes,
    standardise_ddd_de_novos,
};
