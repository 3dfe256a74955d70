use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::error::{GtfError, GtfResult};
use crate::gtf::value::{coerce, GtfValue};

/// Names of the positional columns, in file order.
pub const GTF_HEADER: [&str; 8] = [
    "seqname", "source", "feature", "start", "end", "score", "strand", "frame",
];

/// Number of tab-separated fields a record must have.
pub const GTF_FIELDS: usize = GTF_HEADER.len() + 1;

static SEMICOLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*;\s*").expect("valid semicolon pattern"));
// A padded '=' is tried before plain whitespace so "key = value" splits
// around the '='.
static KEY_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\S+?)(?:\s*=\s*|\s+)(.*)$").expect("valid key/value pattern")
});

/// One `;`-delimited item of the attribute column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeToken<'a> {
    KeyValue(&'a str, &'a str),
    BareValue(&'a str),
}

impl<'a> AttributeToken<'a> {
    /// Classifies a token by its shape.
    pub fn parse(token: &'a str) -> Self {
        match KEY_VALUE.captures(token) {
            Some(caps) => {
                match (caps.get(1), caps.get(2)) {
                    (Some(key), Some(value)) => {
                        AttributeToken::KeyValue(key.as_str(), value.as_str())
                    },
                    _ => AttributeToken::BareValue(token),
                }
            },
            None => AttributeToken::BareValue(token),
        }
    }
}

/// Splits the attribute column into trimmed, non-empty tokens.
pub fn tokenize_attributes(column: &str) -> impl Iterator<Item = AttributeToken<'_>> {
    SEMICOLON
        .split(column)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(AttributeToken::parse)
}

/// A single record decoded into `key -> value` pairs.
///
/// The fixed columns are always present, possibly with a `None` value.
/// Attributes are present only when they carry a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedLine {
    fields: IndexMap<String, Option<GtfValue>>,
}

impl DecodedLine {
    pub fn get(
        &self,
        key: &str,
    ) -> Option<&GtfValue> {
        self.fields
            .get(key)
            .and_then(Option::as_ref)
    }

    pub fn contains_key(
        &self,
        key: &str,
    ) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&GtfValue>)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub(crate) fn insert(
        &mut self,
        key: impl Into<String>,
        value: Option<GtfValue>,
    ) {
        self.fields.insert(key.into(), value);
    }

    pub(crate) fn take(
        &mut self,
        key: &str,
    ) -> Option<GtfValue> {
        self.fields.get_mut(key).and_then(Option::take)
    }
}

/// Decodes one non-comment record.
///
/// `line_number` is only used to label a [`GtfError::MalformedRecord`].
pub fn parse_line(
    line: &str,
    line_number: usize,
) -> GtfResult<DecodedLine> {
    let line = line.trim_end_matches(['\n', '\r']);
    let fields = line.split('\t').collect::<Vec<_>>();
    if fields.len() < GTF_FIELDS {
        return Err(GtfError::MalformedRecord {
            line:   line_number,
            fields: fields.len(),
        });
    }

    let mut decoded = DecodedLine::default();
    for (name, raw) in GTF_HEADER.iter().zip(fields.iter()) {
        decoded.insert(*name, coerce(raw));
    }

    let mut bare_count = 0;
    for token in tokenize_attributes(fields[GTF_HEADER.len()]) {
        let (key, raw) = match token {
            AttributeToken::KeyValue(key, value) => (key.to_string(), value),
            AttributeToken::BareValue(value) => {
                bare_count += 1;
                (format!("INFO{}", bare_count), value)
            },
        };
        if let Some(value) = coerce(raw) {
            decoded.insert(key, Some(value));
        }
    }

    Ok(decoded)
}
