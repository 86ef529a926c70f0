use kurbo::{BezPath, Point};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
  Plus,
}

impl Marker {
  /// Outline of the marker inside a unit square centered on the origin.
  /// Markers are stroked, not filled.
  pub(crate) fn to_path(self) -> BezPath {
    match self {
      Marker::Plus => {
        let mut path = BezPath::new();
        path.move_to(Point::new(-0.5, 0.0));
        path.line_to(Point::new(0.5, 0.0));
        path.move_to(Point::new(0.0, -0.5));
        path.line_to(Point::new(0.0, 0.5));
        path
      }
    }
  }
}
