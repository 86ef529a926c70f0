use std::fmt;

use crate::{
  Marker, Plot,
  error::{Error, Result},
  table::Table,
};

/// How the columns of a [`Table`] map onto the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
  /// Column 0 is a row index and is skipped, column 1 is time (the x axis),
  /// every other column is a series drawn with `+` markers.
  #[default]
  Time,
  /// Every column is a series against its row number.
  Columns,
}

impl Mode {
  pub const fn min_columns(self) -> usize {
    match self {
      Mode::Time => 2,
      Mode::Columns => 1,
    }
  }

  /// Number of series a table with `width` columns produces.
  pub const fn series_count(self, width: usize) -> usize {
    match self {
      Mode::Time => width.saturating_sub(2),
      Mode::Columns => width,
    }
  }

  pub fn plot(self, table: &Table) -> Result<Plot<'_>> {
    if table.width() < self.min_columns() {
      return Err(Error::TooFewColumns {
        mode:     self,
        required: self.min_columns(),
        found:    table.width(),
      });
    }

    let mut plot = Plot::new();
    match self {
      Mode::Time => {
        plot.x.title("time");

        let time = table.column(1);
        for y in &table.columns()[2..] {
          plot.line(time, y)?.marker(Marker::Plus);
        }
      }
      Mode::Columns => {
        plot.x.title("row");

        for y in table.columns() {
          plot.line_indexed(y)?;
        }
      }
    }

    log::debug!("{self} mode: {} series from {} columns", plot.axes().len(), table.width());
    Ok(plot)
  }
}

impl fmt::Display for Mode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Mode::Time => write!(f, "time"),
      Mode::Columns => write!(f, "columns"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn table(csv: &str) -> Table { Table::from_bytes(csv).unwrap() }

  #[test]
  fn time_mode_skips_index_and_time() {
    let table = table("0,0.0,1.0,5.0\n1,0.1,1.1,5.5\n2,0.2,1.2,6.0\n");
    let plot = Mode::Time.plot(&table).unwrap();

    assert_eq!(plot.axes().len(), 2);
    assert_eq!(plot.axes().len(), Mode::Time.series_count(table.width()));
    assert!(plot.axes().iter().all(|axes| axes.options().marker.is_some()));
  }

  #[test]
  fn time_mode_with_two_columns_has_no_series() {
    let table = table("0,0.0\n1,0.1\n");
    let plot = Mode::Time.plot(&table).unwrap();

    assert!(plot.axes().is_empty());
  }

  #[test]
  fn time_mode_needs_a_time_column() {
    let table = table("1.0\n2.0\n");
    let err = Mode::Time.plot(&table).err().unwrap();

    assert!(matches!(err, Error::TooFewColumns { required: 2, found: 1, .. }), "{err}");
  }

  #[test]
  fn columns_mode_plots_every_column() {
    let table = table("0,0.0,1.0\n1,0.1,1.1\n");
    let plot = Mode::Columns.plot(&table).unwrap();

    assert_eq!(plot.axes().len(), 3);
    assert!(plot.axes().iter().all(|axes| axes.options().marker.is_none()));
  }

  #[test]
  fn columns_mode_single_column_uses_row_numbers() {
    let table = table("3.0\n4.0\n5.0\n");
    let plot = Mode::Columns.plot(&table).unwrap();

    let points: Vec<_> = plot.axes()[0].points().flatten().map(|p| (p.x, p.y)).collect();
    assert_eq!(points, vec![(0.0, 3.0), (1.0, 4.0), (2.0, 5.0)]);
  }
}
