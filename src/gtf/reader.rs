use std::io::BufRead;
use std::path::Path;
use std::time::Duration;

use log::{info, warn};

use crate::error::GtfResult;
use crate::gtf::line::{parse_line, DecodedLine};
use crate::gtf::table::GtfTable;
use crate::io::compression::Compression;
use crate::io::remote::DEFAULT_FETCH_TIMEOUT;
use crate::io::source::{open_lines, GtfLines, SourceOptions};

/// What to do with a record that lacks the 9 mandatory fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Stop and return [`crate::GtfError::MalformedRecord`].
    #[default]
    Abort,
    /// Log a warning and drop the line.
    Skip,
}

/// Builder for [`GtfReader`].
#[derive(Debug, Clone)]
pub struct GtfReaderBuilder {
    comment_prefix:   String,
    malformed_policy: MalformedPolicy,
    compression:      Option<Compression>,
    fetch_timeout:    Option<Duration>,
}

impl Default for GtfReaderBuilder {
    fn default() -> Self {
        Self {
            comment_prefix:   "#".to_string(),
            malformed_policy: MalformedPolicy::default(),
            compression:      None,
            fetch_timeout:    Some(DEFAULT_FETCH_TIMEOUT),
        }
    }
}

impl GtfReaderBuilder {
    pub fn with_comment_prefix<S: Into<String>>(
        mut self,
        comment_prefix: S,
    ) -> Self {
        self.comment_prefix = comment_prefix.into();
        self
    }

    pub fn with_malformed_policy(
        mut self,
        malformed_policy: MalformedPolicy,
    ) -> Self {
        self.malformed_policy = malformed_policy;
        self
    }

    /// Forces a codec instead of guessing it from the path suffix.
    pub fn with_compression(
        mut self,
        compression: Option<Compression>,
    ) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_fetch_timeout(
        mut self,
        fetch_timeout: Option<Duration>,
    ) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Opens a local path or URL.
    pub fn build(
        self,
        path: &str,
    ) -> GtfResult<GtfReader> {
        let options = SourceOptions {
            compression:    self.compression,
            comment_prefix: self.comment_prefix.clone(),
            fetch_timeout:  self.fetch_timeout,
        };
        let lines = open_lines(path, &options)?;
        Ok(GtfReader::new(lines, self.malformed_policy))
    }

    /// Reads already opened, uncompressed text.
    pub fn build_from_handle(
        self,
        handle: Box<dyn BufRead>,
    ) -> GtfReader {
        let lines = GtfLines::new(handle, &self.comment_prefix);
        GtfReader::new(lines, self.malformed_policy)
    }
}

/// Iterator of decoded records.
pub struct GtfReader {
    lines:            GtfLines,
    malformed_policy: MalformedPolicy,
    skipped:          usize,
}

impl GtfReader {
    fn new(
        lines: GtfLines,
        malformed_policy: MalformedPolicy,
    ) -> Self {
        Self {
            lines,
            malformed_policy,
            skipped: 0,
        }
    }

    /// Local copy of a fetched URL, if any. Removed once the reader is
    /// dropped, whether or not parsing succeeded.
    pub fn scratch_path(&self) -> Option<&Path> { self.lines.scratch_path() }

    /// Number of malformed lines dropped under [`MalformedPolicy::Skip`].
    pub fn skipped(&self) -> usize { self.skipped }

    /// Consumes the reader, assembling every record into one table.
    pub fn into_table(mut self) -> GtfResult<GtfTable> {
        let table = GtfTable::from_lines(&mut self)?;
        info!(
            "Read {} records into {} columns",
            table.n_rows(),
            table.n_columns()
        );
        if self.skipped > 0 {
            warn!("Skipped {} malformed records", self.skipped);
        }
        Ok(table)
    }
}

impl Iterator for GtfReader {
    type Item = GtfResult<DecodedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (line_number, line) = match self.lines.next()? {
                Ok(item) => item,
                Err(e) => return Some(Err(e)),
            };
            match parse_line(&line, line_number) {
                Err(e)
                    if e.is_malformed()
                        && self.malformed_policy == MalformedPolicy::Skip =>
                {
                    warn!("{}, skipping", e);
                    self.skipped += 1;
                },
                result => return Some(result),
            }
        }
    }
}
