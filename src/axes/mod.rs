mod line;

pub use line::{LineAxes, LineOptions};

use crate::Plot;
use polars::prelude::*;

impl<'a> Plot<'a> {
  /// Adds a series of `y` against `x`. Both columns must be `f64`.
  pub fn line(&mut self, x: &'a Column, y: &'a Column) -> PolarsResult<&mut LineAxes<'a>> {
    self.axes.push(LineAxes::new(Some(x), y)?);
    Ok(self.axes.last_mut().unwrap())
  }

  /// Adds a series of `y` against its row numbers.
  pub fn line_indexed(&mut self, y: &'a Column) -> PolarsResult<&mut LineAxes<'a>> {
    self.axes.push(LineAxes::new(None, y)?);
    Ok(self.axes.last_mut().unwrap())
  }

  pub fn axes(&self) -> &[LineAxes<'a>] { &self.axes }
}
