use std::fmt;

use once_cell::sync::Lazy;
use regex_lite::Regex;

static COMMA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid comma pattern"));

/// Tokens which mean "no data" once quotes are stripped.
const MISSING_SENTINELS: [&str; 3] = ["", ".", "NA"];

/// A decoded GTF/GFF field value.
///
/// Missing values are not a variant of this type: they are expressed as
/// `Option::<GtfValue>::None` wherever a value may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GtfValue {
    Scalar(String),
    List(Vec<String>),
}

impl GtfValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            GtfValue::Scalar(s) => Some(s.as_str()),
            GtfValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            GtfValue::Scalar(_) => None,
            GtfValue::List(values) => Some(values.as_slice()),
        }
    }

    pub fn is_list(&self) -> bool { matches!(self, GtfValue::List(_)) }

    /// Iterates the string items, a scalar being a single item.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        let items: &[String] = match self {
            GtfValue::Scalar(s) => std::slice::from_ref(s),
            GtfValue::List(values) => values.as_slice(),
        };
        items.iter().map(String::as_str)
    }

    /// Joins list items with `separator`. Scalars are returned as is.
    pub fn joined(
        &self,
        separator: &str,
    ) -> String {
        match self {
            GtfValue::Scalar(s) => s.clone(),
            GtfValue::List(values) => values.join(separator),
        }
    }
}

impl fmt::Display for GtfValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.joined(","))
    }
}

impl From<&str> for GtfValue {
    fn from(value: &str) -> Self { GtfValue::Scalar(value.to_string()) }
}

impl From<Vec<&str>> for GtfValue {
    fn from(value: Vec<&str>) -> Self {
        GtfValue::List(
            value
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }
}

fn is_quote(c: char) -> bool { c == '"' || c == '\'' }

/// Removes at most one quote character from each end of `raw`.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw
        .strip_prefix(is_quote)
        .unwrap_or(raw);
    raw.strip_suffix(is_quote).unwrap_or(raw)
}

/// Normalises a raw field token.
///
/// Quotes are stripped first, then a value containing a comma becomes a
/// [`GtfValue::List`]; otherwise the `""`, `.` and `NA` sentinels map to
/// `None` and everything else is kept verbatim. Never fails.
pub fn coerce(raw: &str) -> Option<GtfValue> {
    if raw.is_empty() {
        return None;
    }
    let value = strip_quotes(raw);

    if value.contains(',') {
        let items = COMMA
            .split(value)
            .map(String::from)
            .collect();
        Some(GtfValue::List(items))
    }
    else if MISSING_SENTINELS.contains(&value) {
        None
    }
    else {
        Some(GtfValue::Scalar(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty("")]
    #[case::dot(".")]
    #[case::na("NA")]
    #[case::quoted_empty("\"\"")]
    #[case::quoted_dot("'.'")]
    #[case::quoted_na("\"NA\"")]
    fn test_sentinels_are_missing(#[case] raw: &str) {
        assert_eq!(coerce(raw), None);
    }

    #[test]
    fn test_scalar_is_kept_verbatim() {
        assert_eq!(coerce("ENSG0001"), Some("ENSG0001".into()));
        assert_eq!(coerce("\"protein coding\""), Some("protein coding".into()));
        assert_eq!(coerce("10"), Some("10".into()));
    }

    #[test]
    fn test_only_one_quote_layer_is_stripped() {
        assert_eq!(coerce("\"'x'\""), Some("'x'".into()));
        assert_eq!(coerce("\"x"), Some("x".into()));
    }

    #[test]
    fn test_lists() {
        assert_eq!(coerce("a,b,c"), Some(vec!["a", "b", "c"].into()));
        assert_eq!(coerce("\"a,b\""), Some(vec!["a", "b"].into()));
        assert_eq!(coerce("a , b,\tc"), Some(vec!["a", "b", "c"].into()));
        // list items are not coerced further
        assert_eq!(coerce("NA,."), Some(vec!["NA", "."].into()));
        assert_eq!(coerce("a,"), Some(vec!["a", ""].into()));
    }

    #[test]
    fn test_value_helpers() {
        let list = GtfValue::from(vec!["x", "y"]);
        assert!(list.is_list());
        assert_eq!(list.as_scalar(), None);
        assert_eq!(list.joined(";"), "x;y");
        assert_eq!(list.to_string(), "x,y");

        let scalar = GtfValue::from("x");
        assert_eq!(scalar.as_list(), None);
        assert_eq!(scalar.items().collect::<Vec<_>>(), vec!["x"]);
    }
}
