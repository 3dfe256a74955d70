use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use log::debug;
use tempfile::NamedTempFile;

use crate::error::{GtfError, GtfResult};
use crate::io::compression::Compression;
use crate::io::remote::{fetch_to_tempfile, is_url, strip_query};

/// Where the raw annotation lines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    Local(String),
    Remote(String),
}

impl SourceKind {
    pub fn from_path(path: &str) -> Self {
        if is_url(path) {
            SourceKind::Remote(path.to_string())
        }
        else {
            SourceKind::Local(path.to_string())
        }
    }

    pub fn location(&self) -> &str {
        match self {
            SourceKind::Local(path) | SourceKind::Remote(path) => path,
        }
    }

    /// Part of the location that carries the file name suffix.
    pub fn codec_hint(&self) -> &str {
        match self {
            SourceKind::Local(path) => path,
            SourceKind::Remote(url) => strip_query(url),
        }
    }
}

/// Options for [`open_lines`].
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub compression:    Option<Compression>,
    pub comment_prefix: String,
    pub fetch_timeout:  Option<Duration>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            compression:    None,
            comment_prefix: "#".to_string(),
            fetch_timeout:  Some(crate::io::remote::DEFAULT_FETCH_TIMEOUT),
        }
    }
}

/// Opens `path`, fetching and decompressing it as needed.
pub fn open_lines(
    path: &str,
    options: &SourceOptions,
) -> GtfResult<GtfLines> {
    let kind = SourceKind::from_path(path);
    let compression = options
        .compression
        .unwrap_or_else(|| Compression::from_path(kind.codec_hint()));
    debug!(
        "Opening {:?} with {} compression",
        kind,
        compression.name()
    );

    let (handle, scratch) = match &kind {
        SourceKind::Local(path) => {
            let handle =
                File::open(path).map_err(|e| GtfError::unavailable(path.as_str(), e))?;
            (handle, None)
        },
        SourceKind::Remote(url) => {
            let scratch = fetch_to_tempfile(url, options.fetch_timeout)?;
            let handle = scratch
                .reopen()
                .map_err(|e| GtfError::unavailable(url.as_str(), e))?;
            (handle, Some(scratch))
        },
    };

    let decoder = compression
        .get_decoder(handle)
        .map_err(|e| GtfError::unavailable(kind.location(), e))?;
    let lines = GtfLines::new(Box::new(BufReader::new(decoder)), &options.comment_prefix);
    Ok(lines.with_scratch(scratch))
}

/// Raw record lines of an annotation file.
///
/// Yields `(line_number, line)` with 1-based physical line numbers, comment
/// and blank lines skipped. Owns the underlying reader and any scratch copy
/// of a remote file, both released on drop.
pub struct GtfLines {
    reader:         Box<dyn BufRead>,
    comment_prefix: String,
    line_number:    usize,
    buf:            String,
    scratch:        Option<NamedTempFile>,
}

impl GtfLines {
    pub fn new(
        reader: Box<dyn BufRead>,
        comment_prefix: &str,
    ) -> Self {
        Self {
            reader,
            comment_prefix: comment_prefix.to_string(),
            line_number: 0,
            buf: String::new(),
            scratch: None,
        }
    }

    fn with_scratch(
        mut self,
        scratch: Option<NamedTempFile>,
    ) -> Self {
        self.scratch = scratch;
        self
    }

    /// Scratch copy of a remote source, removed when `self` is dropped.
    pub fn scratch_path(&self) -> Option<&Path> {
        self.scratch
            .as_ref()
            .map(NamedTempFile::path)
    }

    /// Number of physical lines consumed so far.
    pub fn line_number(&self) -> usize { self.line_number }

    fn is_skipped(&self) -> bool {
        let line = self.buf.trim_end_matches(['\n', '\r']);
        // Tab-only lines are records of empty fields.
        line.trim_matches(' ').is_empty()
            || (!self.comment_prefix.is_empty()
                && line.starts_with(&self.comment_prefix))
    }
}

impl Iterator for GtfLines {
    type Item = GtfResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => self.line_number += 1,
                Err(e) => return Some(Err(GtfError::Io(e))),
            }
            if self.is_skipped() {
                continue;
            }
            let line = self
                .buf
                .trim_end_matches(['\n', '\r'])
                .to_string();
            return Some(Ok((self.line_number, line)));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use rstest::rstest;

    use super::*;

    fn lines_of(text: &str) -> Vec<(usize, String)> {
        GtfLines::new(Box::new(Cursor::new(text.to_string())), "#")
            .collect::<GtfResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let lines = lines_of("#!genome-build GRCh38\na\tb\n\n##c\r\nd\r\n");
        assert_eq!(
            lines,
            vec![(2, "a\tb".to_string()), (5, "d".to_string())]
        );
    }

    #[test]
    fn test_tab_only_line_is_a_record() {
        let empty_record = "\t".repeat(8);
        let lines = lines_of(&format!("a\n  \n{}\n", empty_record));
        assert_eq!(
            lines,
            vec![(1, "a".to_string()), (3, empty_record)]
        );
    }

    #[rstest]
    #[case::query("https://x.org/a.gtf.gz?download=1", Compression::Gz)]
    #[case::fragment("http://x.org/a.gtf.gz#part", Compression::Gz)]
    #[case::plain_url("http://x.org/a.gtf?v=2.gz", Compression::None)]
    #[case::local("/data/a.gtf.gz", Compression::Gz)]
    fn test_codec_hint(
        #[case] path: &str,
        #[case] expected: Compression,
    ) {
        let kind = SourceKind::from_path(path);
        assert_eq!(Compression::from_path(kind.codec_hint()), expected);
    }

    #[test]
    fn test_only_comments() {
        assert!(lines_of("# one\n#two\n").is_empty());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = open_lines("/nonexistent/annotation.gtf", &SourceOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, GtfError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_source_kind() {
        assert_eq!(
            SourceKind::from_path("https://x.org/a.gtf"),
            SourceKind::Remote("https://x.org/a.gtf".to_string())
        );
        assert_eq!(
            SourceKind::from_path("a.gtf").location(),
            "a.gtf"
        );
    }

    #[test]
    fn test_compression_override() -> anyhow::Result<()> {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()?;
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"x\ty\n")?;
        file.write_all(&encoder.finish()?)?;
        file.flush()?;

        let options = SourceOptions {
            compression: Some(Compression::Gz),
            ..Default::default()
        };
        let path = file.path().to_str().unwrap();
        let lines = open_lines(path, &options)?.collect::<GtfResult<Vec<_>>>()?;
        assert_eq!(lines, vec![(1, "x\ty".to_string())]);
        Ok(())
    }
}
