use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while turning a GTF/GFF source into a table.
#[derive(Debug, Error)]
pub enum GtfError {
    /// The line does not carry the 8 fixed columns plus the attribute
    /// column.
    #[error("malformed record at line {line}: expected 9 tab-separated fields, found {fields}")]
    MalformedRecord { line: usize, fields: usize },

    #[error("could not open '{location}': {source}")]
    ResourceUnavailable {
        location: String,
        #[source]
        source:   Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl GtfError {
    pub(crate) fn unavailable<E>(
        location: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>, {
        GtfError::ResourceUnavailable {
            location: location.into(),
            source:   source.into(),
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, GtfError::MalformedRecord { .. })
    }
}

pub type GtfResult<T> = Result<T, GtfError>;
