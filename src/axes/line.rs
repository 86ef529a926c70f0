use kurbo::{Affine, BezPath, Point, Stroke};
use peniko::Brush;
use polars::prelude::*;

use crate::{Bounds, Marker, bounds::Projection, render::Render};

pub struct LineAxes<'a> {
  x:       Option<&'a Float64Chunked>,
  y:       &'a Float64Chunked,
  options: LineOptions,
}

pub struct LineOptions {
  pub width:       f64,
  /// Falls back to the plot palette when unset.
  pub color:       Option<Brush>,
  pub marker:      Option<Marker>,
  pub marker_size: f64,
}

impl Default for LineOptions {
  fn default() -> Self { LineOptions { width: 2.0, color: None, marker: None, marker_size: 10.0 } }
}

impl<'a> LineAxes<'a> {
  pub(crate) fn new(x: Option<&'a Column>, y: &'a Column) -> PolarsResult<Self> {
    let x = match x {
      Some(x) => Some(x.as_materialized_series().f64()?),
      None => None,
    };
    let y = y.as_materialized_series().f64()?;

    Ok(LineAxes { x, y, options: LineOptions::default() })
  }

  pub fn options(&self) -> &LineOptions { &self.options }

  pub fn marker(&mut self, marker: Marker) -> &mut Self {
    self.options.marker = Some(marker);
    self
  }

  /// Every row as a point, or `None` where either coordinate is missing or
  /// not finite. The x coordinate is the row number when no x column is set.
  pub fn points(&self) -> impl Iterator<Item = Option<Point>> + '_ {
    self.y.into_iter().enumerate().map(move |(i, y)| {
      let x = match self.x {
        Some(x) => x.get(i)?,
        None => i as f64,
      };
      let y = y?;

      (x.is_finite() && y.is_finite()).then(|| Point::new(x, y))
    })
  }

  /// Runs of consecutive points, split wherever a value is missing.
  pub fn segments(&self) -> Vec<Vec<Point>> {
    let mut segments = vec![];
    let mut current = vec![];
    for point in self.points() {
      match point {
        Some(p) => current.push(p),
        None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
        None => {}
      }
    }
    if !current.is_empty() {
      segments.push(current);
    }
    segments
  }

  pub(crate) fn data_bounds(&self) -> Option<Bounds> {
    let mut points = self.points().flatten();
    let first = points.next()?;

    Some(points.fold(Bounds::point(first), |bounds, p| bounds.union(Bounds::point(p))))
  }

  pub(crate) fn draw(&self, render: &mut Render, projection: Projection, color: &Brush) {
    let mut shape = BezPath::new();
    for segment in self.segments() {
      let mut points = segment.into_iter().map(|p| projection.apply(p));
      if let Some(first) = points.next() {
        shape.move_to(first);
        for point in points {
          shape.line_to(point);
        }
      }
    }

    let stroke = Stroke::new(self.options.width);
    render.stroke(&shape, color, &stroke);

    if let Some(marker) = &self.options.marker {
      let path = marker.to_path();
      let mut markers = BezPath::new();
      for point in self.points().flatten().map(|p| projection.apply(p)) {
        let placed =
          Affine::translate(point.to_vec2()) * Affine::scale(self.options.marker_size) * &path;
        markers.extend(placed.elements().iter().copied());
      }

      render.stroke(&markers, color, &stroke);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn column(name: &str, values: &[f64]) -> Column { Column::new(name.into(), values) }

  #[test]
  fn explicit_x_pairs_rows() {
    let x = column("x", &[0.0, 0.1, 0.2]);
    let y = column("y", &[1.0, 1.1, 1.2]);
    let axes = LineAxes::new(Some(&x), &y).unwrap();

    let points: Vec<_> = axes.points().flatten().collect();
    assert_eq!(points, vec![Point::new(0.0, 1.0), Point::new(0.1, 1.1), Point::new(0.2, 1.2)]);
  }

  #[test]
  fn nan_splits_segments() {
    let y = column("y", &[1.0, 2.0, f64::NAN, 4.0, f64::NAN, f64::NAN, 7.0, 8.0]);
    let axes = LineAxes::new(None, &y).unwrap();

    let segments = axes.segments();
    assert_eq!(segments.len(), 3);
    assert_eq!(segments[0], vec![Point::new(0.0, 1.0), Point::new(1.0, 2.0)]);
    assert_eq!(segments[1], vec![Point::new(3.0, 4.0)]);
    assert_eq!(segments[2], vec![Point::new(6.0, 7.0), Point::new(7.0, 8.0)]);
  }

  #[test]
  fn bounds_ignore_missing_values() {
    let y = column("y", &[f64::NAN, -2.0, 5.0, f64::INFINITY]);
    let axes = LineAxes::new(None, &y).unwrap();

    let bounds = axes.data_bounds().unwrap();
    assert_eq!((bounds.x.min, bounds.x.max), (1.0, 2.0));
    assert_eq!((bounds.y.min, bounds.y.max), (-2.0, 5.0));
  }

  #[test]
  fn all_missing_has_no_bounds() {
    let y = column("y", &[f64::NAN, f64::NAN]);
    let axes = LineAxes::new(None, &y).unwrap();

    assert!(axes.data_bounds().is_none());
    assert!(axes.segments().is_empty());
  }

  #[test]
  fn integer_column_is_rejected() {
    let y = Column::new("y".into(), &[1_i64, 2, 3]);

    assert!(LineAxes::new(None, &y).is_err());
  }
}
