//! Line plots of numeric CSV tables, shown in a window.
//!
//! ```no_run
//! use csvplot::{Mode, Table};
//!
//! let table = Table::from_csv("samples.csv")?;
//! let mut plot = Mode::Time.plot(&table)?;
//! plot.title("samples");
//! plot.show()?;
//! # Ok::<(), csvplot::Error>(())
//! ```

use parley::FontWeight;
use vello::{
  kurbo::{Affine, Cap, Line, Point, Stroke},
  peniko::Brush,
};

use crate::render::{Align, DrawText, Render};

mod axes;
mod bounds;
mod error;
mod marker;
mod mode;
mod render;
mod table;
mod theme;

pub use axes::{LineAxes, LineOptions};
pub use bounds::{Bounds, NiceTicksIter, Range};
pub use error::{Error, Result};
pub use marker::Marker;
pub use mode::Mode;
pub use table::Table;

#[derive(Default)]
pub struct Plot<'a> {
  title: Option<String>,

  pub x: Axis,
  pub y: Axis,

  axes: Vec<LineAxes<'a>>,
}

#[derive(Default)]
pub struct Axis {
  title: Option<String>,
  min:   Option<f64>,
  max:   Option<f64>,
}

impl Axis {
  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  pub fn min(&mut self, min: f64) -> &mut Self {
    self.min = Some(min);
    self
  }

  pub fn max(&mut self, max: f64) -> &mut Self {
    self.max = Some(max);
    self
  }

  /// Data range padded by `margin` on each side, then clamped to the
  /// explicit limits.
  fn resolve(&self, data: Option<Range>, margin: f64) -> Range {
    let range = data.unwrap_or(Range::new(0.0, 1.0)).non_degenerate().expand_by(margin);
    Range::new(self.min.unwrap_or(range.min), self.max.unwrap_or(range.max)).non_degenerate()
  }
}

pub(crate) trait ResultExt<T> {
  fn log_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        log::error!("{e}");
        None
      }
    }
  }
}

impl<'a> Plot<'a> {
  pub fn new() -> Plot<'a> { Plot::default() }

  pub fn title(&mut self, title: &str) -> &mut Self {
    self.title = Some(title.to_string());
    self
  }

  /// Opens a window and blocks until the user closes it.
  pub fn show(&self) -> Result<()> { render::window::show(self) }

  /// Bounds of everything drawn, padded the way the axes draw them.
  pub fn data_bounds(&self) -> Bounds {
    const MARGIN: f64 = 0.05;

    let data = self.axes.iter().filter_map(LineAxes::data_bounds).reduce(|a, b| a.union(b));
    Bounds::new(
      self.x.resolve(data.map(|b| b.x), MARGIN),
      self.y.resolve(data.map(|b| b.y), MARGIN),
    )
  }

  fn draw(&self, render: &mut Render, width: f64, height: f64) {
    const LINE_COLOR: Brush = Brush::Solid(theme::FRAME);
    const TICKS: u32 = 8;

    let viewport = Bounds::new(Range::new(90.0, width - 30.0), Range::new(height - 70.0, 60.0));

    if let Some(title) = &self.title {
      render.draw_text(DrawText {
        text: title,
        size: 24.0,
        weight: FontWeight::BOLD,
        position: Point { x: (viewport.x.min + viewport.x.max) / 2.0, y: viewport.y.max - 20.0 },
        horizontal_align: Align::Center,
        vertical_align: Align::End,
        ..Default::default()
      });
    }

    if let Some(x_title) = &self.x.title {
      render.draw_text(DrawText {
        text: x_title,
        size: 18.0,
        position: Point { x: (viewport.x.min + viewport.x.max) / 2.0, y: viewport.y.min + 35.0 },
        horizontal_align: Align::Center,
        ..Default::default()
      });
    }

    if let Some(y_title) = &self.y.title {
      render.draw_text(DrawText {
        text: y_title,
        size: 18.0,
        position: Point { x: 20.0, y: (viewport.y.min + viewport.y.max) / 2.0 },
        transform: Affine::rotate(-std::f64::consts::FRAC_PI_2),
        horizontal_align: Align::Center,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let border_stroke = Stroke::new(2.0);
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.max, viewport.y.min),
      ),
      &LINE_COLOR,
      &border_stroke,
    );
    render.stroke(
      &Line::new(
        Point::new(viewport.x.min, viewport.y.min),
        Point::new(viewport.x.min, viewport.y.max),
      ),
      &LINE_COLOR,
      &border_stroke,
    );

    let data_bounds = self.data_bounds();
    let projection = data_bounds.projection_to(viewport);
    let tick_stroke = border_stroke.clone().with_caps(Cap::Butt);

    let iter = data_bounds.y.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (y, vy) in iter
      .map(|v| (v, projection.apply(Point::new(data_bounds.x.min, v)).y))
      .filter(|(_, vy)| viewport.y.contains(vy))
    {
      render.stroke(
        &Line::new(Point::new(viewport.x.min, vy), Point::new(viewport.x.min - 8.0, vy)),
        &LINE_COLOR,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{y:.decimals$}"),
        position: Point { x: viewport.x.min - 12.0, y: vy },
        horizontal_align: Align::End,
        vertical_align: Align::Center,
        ..Default::default()
      });
    }

    let iter = data_bounds.x.nice_ticks(TICKS);
    let decimals = iter.decimals();
    for (x, vx) in iter
      .map(|v| (v, projection.apply(Point::new(v, data_bounds.y.min)).x))
      .filter(|(_, vx)| viewport.x.contains(vx))
    {
      render.stroke(
        &Line::new(Point::new(vx, viewport.y.min), Point::new(vx, viewport.y.min + 8.0)),
        &LINE_COLOR,
        &tick_stroke,
      );
      render.draw_text(DrawText {
        text: &format!("{x:.decimals$}"),
        position: Point { x: vx, y: viewport.y.min + 12.0 },
        horizontal_align: Align::Center,
        ..Default::default()
      });
    }

    let count = self.axes.len();
    for (i, axes) in self.axes.iter().enumerate() {
      let color = match &axes.options().color {
        Some(color) => color.clone(),
        None => theme::SERIES.series_brush(i, count),
      };
      axes.draw(render, projection, &color);
    }
  }
}
