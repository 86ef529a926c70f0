use color::{Oklch, OpaqueColor, Srgb};
use peniko::{Brush, Color};

pub const TEXT: Color = Color::from_rgb8(32, 32, 32);
pub const FRAME: Color = Color::from_rgb8(128, 128, 128);
pub const BACKGROUND: Color = Color::WHITE;

pub struct LinearPalette {
  start: OpaqueColor<Oklch>,
  end:   OpaqueColor<Oklch>,
}

/// Series colors, blue through orange at constant lightness.
pub const SERIES: LinearPalette =
  LinearPalette::new(OpaqueColor::new([0.6, 0.13, 250.0]), OpaqueColor::new([0.6, 0.13, 50.0]));

impl LinearPalette {
  pub const fn new(start: OpaqueColor<Oklch>, end: OpaqueColor<Oklch>) -> Self {
    Self { start, end }
  }

  pub fn sample(&self, t: f32) -> OpaqueColor<Oklch> {
    let t = t.clamp(0.0, 1.0);
    self.start.lerp(self.end, t, color::HueDirection::Shorter)
  }

  /// Brush for series `index` of `count`, spread evenly over the palette.
  pub fn series_brush(&self, index: usize, count: usize) -> Brush {
    let t = if count > 1 { index as f32 / (count - 1) as f32 } else { 0.0 };
    Brush::Solid(self.sample(t).convert::<Srgb>().with_alpha(1.0))
  }
}
