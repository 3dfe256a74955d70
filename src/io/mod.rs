pub mod compression;
pub mod remote;
pub mod source;

pub use compression::Compression;
pub use remote::{fetch_to_tempfile, is_url, strip_query};
pub use source::{open_lines, GtfLines, SourceKind, SourceOptions};
