use std::fs::File;
use std::io::{BufReader, Read};
#[cfg(feature = "compression")]
use std::io::{copy, Seek, SeekFrom};
use std::path::Path;

use log::debug;
#[cfg(feature = "compression")]
use tempfile::tempfile;

/// Codecs an annotation file may be wrapped in.
///
/// Gzip is always available; the others need the `compression` feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compression {
    None,
    Gz,
    #[cfg(feature = "compression")]
    Zstd,
    #[cfg(feature = "compression")]
    Lz4,
    #[cfg(feature = "compression")]
    Xz2,
    #[cfg(feature = "compression")]
    Bzip2,
    #[cfg(feature = "compression")]
    Zip,
}

impl Compression {
    pub fn name(&self) -> &str {
        match self {
            Compression::None => "none",
            Compression::Gz => "gzip",
            #[cfg(feature = "compression")]
            Compression::Zstd => "zstd",
            #[cfg(feature = "compression")]
            Compression::Lz4 => "lz4",
            #[cfg(feature = "compression")]
            Compression::Xz2 => "xz2",
            #[cfg(feature = "compression")]
            Compression::Bzip2 => "bzip2",
            #[cfg(feature = "compression")]
            Compression::Zip => "zip",
        }
    }

    /// Guesses the codec from the file name suffix. Works for URLs too.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("gz") | Some("gzip") => Compression::Gz,
            #[cfg(feature = "compression")]
            Some("zst") | Some("zstd") => Compression::Zstd,
            #[cfg(feature = "compression")]
            Some("lz4") => Compression::Lz4,
            #[cfg(feature = "compression")]
            Some("xz") => Compression::Xz2,
            #[cfg(feature = "compression")]
            Some("bz2") => Compression::Bzip2,
            #[cfg(feature = "compression")]
            Some("zip") => Compression::Zip,
            _ => Compression::None,
        }
    }

    /// Wraps `handle` into a decoding reader.
    pub fn get_decoder(
        &self,
        handle: File,
    ) -> anyhow::Result<Box<dyn Read>> {
        debug!("Opening {} decoder", self.name());
        let decoder: Box<dyn Read> = match self {
            Compression::None => Box::new(handle),
            // Multi-member so bgzipped annotations read to the end.
            Compression::Gz => {
                Box::new(flate2::read::MultiGzDecoder::new(BufReader::new(handle)))
            },
            #[cfg(feature = "compression")]
            Compression::Zstd => Box::new(zstd::Decoder::new(handle)?),
            #[cfg(feature = "compression")]
            Compression::Lz4 => Box::new(lz4::Decoder::new(handle)?),
            #[cfg(feature = "compression")]
            Compression::Xz2 => Box::new(xz2::read::XzDecoder::new(handle)),
            #[cfg(feature = "compression")]
            Compression::Bzip2 => Box::new(bzip2::read::BzDecoder::new(handle)),
            #[cfg(feature = "compression")]
            Compression::Zip => {
                // Entries borrow the archive, so the first one is extracted
                // into an anonymous temp file.
                let mut archive = zip::ZipArchive::new(handle)?;
                let mut temp_file = tempfile()?;
                if archive.len() > 0 {
                    let mut file_in_zip = archive.by_index(0)?;
                    copy(&mut file_in_zip, &mut temp_file)?;
                }
                temp_file.seek(SeekFrom::Start(0))?;
                Box::new(temp_file)
            },
        };
        Ok(decoder)
    }
}
