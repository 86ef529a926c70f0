use std::{io::Cursor, path::Path};

use polars::prelude::*;

use crate::error::{Error, Result};

/// A headerless numeric table, one `f64` column per CSV field.
///
/// Lines starting with `#` are skipped. Empty fields are kept as missing
/// values, which the plot draws as gaps.
pub struct Table {
  frame: DataFrame,
}

impl Table {
  pub fn from_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let bytes =
      std::fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;

    Table::from_bytes(bytes)
  }

  pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Table> {
    let frame = CsvReadOptions::default()
      .with_has_header(false)
      .map_parse_options(|options| options.with_comment_prefix(Some("#")))
      .into_reader_with_file_handle(Cursor::new(bytes.into()))
      .finish()?;

    Table::from_frame(frame)
  }

  fn from_frame(frame: DataFrame) -> Result<Table> {
    if frame.height() == 0 {
      return Err(Error::Empty);
    }

    let columns = frame
      .get_columns()
      .iter()
      .enumerate()
      .map(|(index, column)| numeric_column(index, column))
      .collect::<Result<Vec<_>>>()?;

    Ok(Table { frame: DataFrame::new(columns)? })
  }

  /// Number of rows.
  pub fn height(&self) -> usize { self.frame.height() }
  /// Number of columns.
  pub fn width(&self) -> usize { self.frame.width() }

  pub fn columns(&self) -> &[Column] { self.frame.get_columns() }
  pub fn column(&self, index: usize) -> &Column { &self.columns()[index] }

  /// The value at `row`, `column`, with missing fields as NaN.
  pub fn get(&self, row: usize, column: usize) -> Option<f64> {
    let values = self.column(column).as_materialized_series().f64().ok()?;
    (row < values.len()).then(|| values.get(row).unwrap_or(f64::NAN))
  }
}

/// Casts `column` to `f64`.
///
/// A trailing separator on every row leaves a column with no values, which
/// is kept as all missing. Text columns are parsed after trimming, so
/// `0, 0.001, 20.1` reads the same as `0,0.001,20.1`.
fn numeric_column(index: usize, column: &Column) -> Result<Column> {
  let dtype = column.dtype();
  if column.null_count() == column.len() {
    return Ok(Column::full_null(column.name().clone(), column.len(), &DataType::Float64));
  }
  if dtype.is_float() || dtype.is_integer() {
    return Ok(column.cast(&DataType::Float64)?);
  }
  if dtype != &DataType::String {
    return Err(Error::NonNumeric { column: index, dtype: dtype.clone() });
  }

  let values = column
    .as_materialized_series()
    .str()?
    .into_iter()
    .map(|field| match field.map(str::trim) {
      None | Some("") => Ok(None),
      Some(text) => text
        .parse::<f64>()
        .map(Some)
        .map_err(|_| Error::NonNumeric { column: index, dtype: DataType::String }),
    })
    .collect::<Result<Vec<Option<f64>>>>()?;

  Ok(Column::new(column.name().clone(), values))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_headerless_rows() {
    let table = Table::from_bytes("0,0.0,1.0\n1,0.1,1.1\n2,0.2,1.2\n").unwrap();

    assert_eq!(table.height(), 3);
    assert_eq!(table.width(), 3);
    assert_eq!(table.get(0, 0), Some(0.0));
    assert_eq!(table.get(2, 1), Some(0.2));
    assert_eq!(table.get(1, 2), Some(1.1));
    assert_eq!(table.get(3, 0), None);
  }

  #[test]
  fn skips_comment_lines() {
    let table = Table::from_bytes("# header\n0,0.0,1.0\n").unwrap();

    assert_eq!(table.height(), 1);
    assert_eq!(table.get(0, 2), Some(1.0));
  }

  #[test]
  fn integer_columns_become_floats() {
    let table = Table::from_bytes("1,2\n3,4\n").unwrap();

    for column in table.columns() {
      assert_eq!(column.dtype(), &DataType::Float64);
    }
    assert_eq!(table.get(1, 1), Some(4.0));
  }

  #[test]
  fn missing_fields_are_nan() {
    let table = Table::from_bytes("0,1.0\n1,\n2,3.0\n").unwrap();

    assert_eq!(table.height(), 3);
    assert!(table.get(1, 1).unwrap().is_nan());
  }

  #[test]
  fn rejects_text_fields() {
    let err = Table::from_bytes("0,a\n1,b\n").err().unwrap();

    assert!(matches!(err, Error::NonNumeric { column: 1, .. }), "{err}");
  }

  #[test]
  fn spaces_after_separators_are_trimmed() {
    let table = Table::from_bytes("0, 0, 20, 23\n1, 0.001, 20.1, 23\n").unwrap();

    assert_eq!(table.width(), 4);
    for column in table.columns() {
      assert_eq!(column.dtype(), &DataType::Float64);
    }
    assert_eq!(table.get(1, 1), Some(0.001));
    assert_eq!(table.get(1, 2), Some(20.1));
  }

  #[test]
  fn trailing_separator_is_an_empty_column() {
    let table = Table::from_bytes("20.000000,23.000000,\n20.100000,23.000000,\n").unwrap();

    assert_eq!(table.width(), 3);
    assert_eq!(table.column(2).dtype(), &DataType::Float64);
    assert!(table.get(0, 2).unwrap().is_nan());
    assert_eq!(table.get(1, 0), Some(20.1));
  }

  #[test]
  fn padded_text_that_is_not_a_number_is_rejected() {
    let err = Table::from_bytes("0, 1.0\n1, abc\n").err().unwrap();

    assert!(matches!(err, Error::NonNumeric { column: 1, .. }), "{err}");
  }

  #[test]
  fn missing_file_reports_path() {
    let err = Table::from_csv("does/not/exist.csv").err().unwrap();

    match err {
      Error::Io { path, .. } => assert_eq!(path, Path::new("does/not/exist.csv")),
      other => panic!("unexpected error: {other}"),
    }
  }
}
