use indexmap::IndexMap;
use log::debug;
use polars::prelude::*;

use crate::gtf::line::DecodedLine;
use crate::gtf::value::GtfValue;

/// Dense table assembled from records whose attribute keys differ.
///
/// Every column always holds exactly [`GtfTable::n_rows`] cells. A column
/// first seen at row `i` is back-filled with `None` for rows `0..i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GtfTable {
    columns: IndexMap<String, Vec<Option<GtfValue>>>,
    n_rows:  usize,
}

impl GtfTable {
    pub fn new() -> Self { Self::default() }

    /// Assembles a table from a fallible sequence of records, stopping at
    /// the first error.
    pub fn from_lines<I, E>(lines: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<DecodedLine, E>>, {
        let mut table = Self::new();
        for line in lines {
            table.push_line(line?);
        }
        Ok(table)
    }

    pub fn n_rows(&self) -> usize { self.n_rows }

    pub fn n_columns(&self) -> usize { self.columns.len() }

    pub fn is_empty(&self) -> bool { self.n_rows == 0 }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(
        &self,
        name: &str,
    ) -> Option<&[Option<GtfValue>]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
    }

    /// Cell at `row` of column `name`. `None` for an unknown column, an
    /// out of range row or an empty cell.
    pub fn get(
        &self,
        name: &str,
        row: usize,
    ) -> Option<&GtfValue> {
        self.columns
            .get(name)
            .and_then(|values| values.get(row))
            .and_then(Option::as_ref)
    }

    /// Makes sure `name` is a column, back-filling it with `None` up to the
    /// current row count. Returns `true` if the column was created.
    pub fn ensure_column(
        &mut self,
        name: &str,
    ) -> bool {
        if self.columns.contains_key(name) {
            return false;
        }
        if self.n_rows > 0 {
            debug!(
                "Column '{}' first seen at row {}, back-filling",
                name, self.n_rows
            );
        }
        let mut values = Vec::with_capacity(self.n_rows + 1);
        values.resize(self.n_rows, None);
        self.columns
            .insert(name.to_string(), values);
        true
    }

    /// Appends one record as a new row.
    pub fn push_line(
        &mut self,
        mut line: DecodedLine,
    ) {
        let new_keys = line
            .keys()
            .filter(|key| !self.columns.contains_key(*key))
            .map(String::from)
            .collect::<Vec<_>>();
        for key in new_keys {
            self.ensure_column(&key);
        }

        for (name, values) in self.columns.iter_mut() {
            values.push(line.take(name));
        }
        self.n_rows += 1;
    }

    /// Converts into a [`DataFrame`]. Columns holding any list value become
    /// `List(String)` columns, with scalars wrapped as one-item lists;
    /// all other columns are `String`.
    pub fn into_dataframe(self) -> PolarsResult<DataFrame> {
        let height = self.n_rows;
        let columns = self
            .columns
            .into_iter()
            .map(|(name, values)| {
                if values.iter().flatten().any(GtfValue::is_list) {
                    list_column(&name, &values)
                }
                else {
                    string_column(&name, &values, ",")
                }
            })
            .collect::<Vec<_>>();
        frame_from_columns(columns, height)
    }

    /// Converts into a [`DataFrame`] of `String` columns only, list values
    /// joined with `separator`. Suitable for delimited text output.
    pub fn into_flat_dataframe(
        self,
        separator: &str,
    ) -> PolarsResult<DataFrame> {
        let height = self.n_rows;
        let columns = self
            .columns
            .into_iter()
            .map(|(name, values)| string_column(&name, &values, separator))
            .collect::<Vec<_>>();
        frame_from_columns(columns, height)
    }
}

fn string_column(
    name: &str,
    values: &[Option<GtfValue>],
    separator: &str,
) -> Column {
    let joined = values
        .iter()
        .map(|value| value.as_ref().map(|v| v.joined(separator)))
        .collect::<Vec<_>>();
    Series::new(name.into(), joined).into_column()
}

fn list_column(
    name: &str,
    values: &[Option<GtfValue>],
) -> Column {
    let values_capacity = values
        .iter()
        .flatten()
        .map(|v| v.items().count())
        .sum();
    let mut builder =
        ListStringChunkedBuilder::new(name.into(), values.len(), values_capacity);
    for value in values {
        match value {
            Some(value) => builder.append_values_iter(value.items()),
            None => builder.append_null(),
        }
    }
    builder.finish().into_series().into_column()
}

fn frame_from_columns(
    columns: Vec<Column>,
    height: usize,
) -> PolarsResult<DataFrame> {
    if columns.is_empty() {
        debug!("Table has no columns, returning an empty frame");
        return Ok(DataFrame::empty());
    }
    let frame = DataFrame::new(columns)?;
    debug_assert_eq!(frame.height(), height);
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gtf::line::parse_line;

    fn table_from(lines: &[&str]) -> GtfTable {
        GtfTable::from_lines(
            lines
                .iter()
                .enumerate()
                .map(|(i, line)| parse_line(line, i + 1)),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_table() {
        let table = GtfTable::new();
        assert!(table.is_empty());
        assert_eq!(table.n_columns(), 0);

        let frame = table.into_dataframe().unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 0);
    }

    #[test]
    fn test_backfill_keeps_table_dense() {
        let table = table_from(&[
            "chr1\t.\tgene\t1\t100\t.\t+\t.\tgene_id \"A\"",
            "chr1\t.\texon\t1\t50\t.\t+\t.\tgene_id \"A\"; exon_number 1",
            "chr1\t.\tCDS\t5\t50\t.\t+\t0\tprotein_id \"P\"",
        ]);

        assert_eq!(table.n_rows(), 3);
        for name in table.column_names() {
            assert_eq!(table.column(name).unwrap().len(), 3, "column {}", name);
        }

        let exon_number = table.column("exon_number").unwrap();
        assert_eq!(exon_number, &[None, Some(GtfValue::from("1")), None]);
        let protein_id = table.column("protein_id").unwrap();
        assert_eq!(protein_id, &[None, None, Some(GtfValue::from("P"))]);
        assert_eq!(table.get("gene_id", 2), None);
        assert_eq!(table.get("frame", 2), Some(&"0".into()));
        assert_eq!(table.get("frame", 0), None);
    }

    #[test]
    fn test_column_order() {
        let table = table_from(&[
            "chr1\t.\tgene\t1\t100\t.\t+\t.\tb 1; a 2",
            "chr1\t.\tgene\t1\t100\t.\t+\t.\tc 3; a 4",
        ]);
        assert_eq!(
            table.column_names().collect::<Vec<_>>(),
            vec![
                "seqname", "source", "feature", "start", "end", "score", "strand",
                "frame", "b", "a", "c"
            ]
        );
    }

    #[test]
    fn test_ensure_column() {
        let mut table = table_from(&["chr1\t.\tgene\t1\t100\t.\t+\t.\tid 1"]);
        assert!(table.ensure_column("extra"));
        assert!(!table.ensure_column("extra"));
        assert_eq!(table.column("extra").unwrap(), &[None::<GtfValue>]);
    }

    #[test]
    fn test_into_dataframe_types() {
        let table = table_from(&[
            "chr1\t.\tgene\t1\t100\t.\t+\t.\tgene_id \"A\"; tags \"x,y\"",
            "chr1\t.\texon\t1\t50\t.\t+\t.\tgene_id \"A\"; tags basic",
            "chr1\t.\texon\t60\t90\t.\t+\t.\tgene_id \"B\"",
        ]);
        let frame = table.clone().into_dataframe().unwrap();
        assert_eq!(frame.shape(), (3, 10));
        assert_eq!(
            frame.column("gene_id").unwrap().dtype(),
            &DataType::String
        );
        assert_eq!(
            frame.column("tags").unwrap().dtype(),
            &DataType::List(Box::new(DataType::String))
        );
        assert_eq!(frame.column("tags").unwrap().null_count(), 1);

        let flat = table.into_flat_dataframe("|").unwrap();
        let tags = flat
            .column("tags")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect::<Vec<_>>();
        assert_eq!(tags, vec![Some("x|y"), Some("basic"), None]);
    }
}
