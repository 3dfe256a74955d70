use std::time::Duration;

use log::info;
use tempfile::NamedTempFile;

use crate::error::{GtfError, GtfResult};

/// Default timeout for fetching a remote annotation.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(120);

const URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Whether `path` names a remote resource rather than a local file.
pub fn is_url(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    URL_SCHEMES
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

/// `url` without its query string or fragment.
pub fn strip_query(url: &str) -> &str {
    match url.find(['?', '#']) {
        Some(end) => &url[..end],
        None => url,
    }
}

/// Downloads `url` into a scratch file which is removed once dropped.
///
/// Only a single attempt is made; network errors and non-success HTTP
/// statuses are reported as [`GtfError::ResourceUnavailable`].
pub fn fetch_to_tempfile(
    url: &str,
    timeout: Option<Duration>,
) -> GtfResult<NamedTempFile> {
    info!("Fetching {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| GtfError::unavailable(url, e))?;

    let mut response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| GtfError::unavailable(url, e))?;

    let mut scratch = NamedTempFile::new()?;
    let written = response
        .copy_to(scratch.as_file_mut())
        .map_err(|e| GtfError::unavailable(url, e))?;
    info!(
        "Fetched {} bytes into {}",
        written,
        scratch.path().display()
    );
    Ok(scratch)
}
