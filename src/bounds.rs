use kurbo::{Affine, Point, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
  pub x: Range,
  pub y: Range,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
  pub min: f64,
  pub max: f64,
}

impl Bounds {
  pub const fn new(x: Range, y: Range) -> Self { Bounds { x, y } }
  pub const fn point(p: Point) -> Self { Bounds { x: Range::new(p.x, p.x), y: Range::new(p.y, p.y) } }

  pub fn union(&self, other: Bounds) -> Bounds {
    Bounds { x: self.x.union(other.x), y: self.y.union(other.y) }
  }

  /// Maps `self` onto `viewport`, measuring from the lower corner of
  /// `self` so large values with a narrow spread keep their precision.
  pub(crate) fn projection_to(&self, viewport: Bounds) -> Projection {
    let origin = Vec2::new(self.x.min, self.y.min);
    let local = Bounds::new(Range::new(0.0, self.x.size()), Range::new(0.0, self.y.size()));

    Projection { origin, transform: local.transform_to(viewport) }
  }

  /// Maps `self` onto `viewport`. Either range may be inverted.
  pub(crate) fn transform_to(&self, viewport: Bounds) -> Affine {
    let scale_x = viewport.x.size() / self.x.size();
    let scale_y = viewport.y.size() / self.y.size();
    let translate_x = viewport.x.min - self.x.min * scale_x;
    let translate_y = viewport.y.min - self.y.min * scale_y;

    Affine::new([scale_x, 0.0, 0.0, scale_y, translate_x, translate_y])
  }
}

/// Data to screen mapping.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
  origin:    Vec2,
  transform: Affine,
}

impl Projection {
  pub fn apply(&self, p: Point) -> Point { self.transform * (p - self.origin) }
}

impl Range {
  pub const fn new(min: f64, max: f64) -> Self { Range { min, max } }
  pub const fn size(&self) -> f64 { self.max - self.min }

  pub const fn expand(self, amount: f64) -> Self {
    Range {
      min: self.min - amount * self.size().signum(),
      max: self.max + amount * self.size().signum(),
    }
  }
  pub const fn expand_by(self, fract: f64) -> Self { self.expand(self.size() * fract) }

  pub const fn contains(&self, value: &f64) -> bool {
    (*value >= self.min && *value <= self.max) || (*value <= self.min && *value >= self.max)
  }

  pub fn union(&self, other: Range) -> Range {
    Range { min: self.min.min(other.min), max: self.max.max(other.max) }
  }

  /// Widens a zero-sized range so it can be mapped onto a viewport.
  pub fn non_degenerate(self) -> Range {
    if self.size() != 0.0 {
      return self;
    }

    let pad = if self.min == 0.0 { 0.5 } else { self.min.abs() * 0.05 };
    Range::new(self.min - pad, self.max + pad)
  }

  pub fn nice_ticks(&self, count: u32) -> NiceTicksIter {
    let step = (self.max - self.min) / f64::from(count);
    let k = step.log10().floor() as i32;
    let base = step / 10f64.powi(k);

    let nice_base = match base {
      b if b <= 1.0 => 1.0,
      b if b <= 2.0 => 2.0,
      b if b <= 2.5 => 2.5,
      b if b <= 5.0 => 5.0,
      _ => 10.0,
    };

    let step = nice_base * 10f64.powi(k);
    let lo = (self.min / step).floor() * step;
    let hi = (self.max / step).ceil() * step;

    // one more digit when the step is 2.5 * 10^k
    let decimals = i32::from(nice_base == 2.5).saturating_sub(k).max(0) as usize;
    NiceTicksIter::new(lo, hi, step, decimals)
  }
}

pub struct NiceTicksIter {
  lo:       f64,
  step:     f64,
  index:    usize,
  count:    usize,
  decimals: usize,
}

impl NiceTicksIter {
  /// Never yields more than this many ticks.
  const MAX_TICKS: usize = 1000;

  fn new(lo: f64, hi: f64, step: f64, decimals: usize) -> Self {
    let spans = (hi - lo) / step;
    let count = if lo.is_finite() && hi.is_finite() && spans.is_finite() && lo + step != lo {
      (spans.round() as usize + 1).min(Self::MAX_TICKS)
    } else {
      0
    };

    NiceTicksIter { lo, step, index: 0, count, decimals }
  }

  /// Digits after the decimal point needed to tell ticks apart.
  pub fn decimals(&self) -> usize { self.decimals }
}

impl Iterator for NiceTicksIter {
  type Item = f64;
  fn next(&mut self) -> Option<Self::Item> {
    if self.index >= self.count {
      return None;
    }

    let value = self.lo + self.index as f64 * self.step;
    self.index += 1;

    let p = 10f64.powi(self.decimals as i32 + 2);
    let rounded = (value * p).round() / p;
    Some(if rounded.is_finite() { rounded } else { value })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ticks_on_round_range() {
    let ticks = Range::new(0.0, 100.0).nice_ticks(10);
    assert_eq!(ticks.decimals(), 0);

    let ticks: Vec<f64> = ticks.collect();
    assert_eq!(ticks.len(), 11);
    assert_eq!(ticks.first(), Some(&0.0));
    assert_eq!(ticks.last(), Some(&100.0));
  }

  #[test]
  fn ticks_cover_the_range() {
    let range = Range::new(0.03, 0.97);
    let ticks: Vec<f64> = range.nice_ticks(5).collect();

    assert!(ticks[0] <= range.min);
    assert!(*ticks.last().unwrap() >= range.max);
    assert!(ticks.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn small_steps_need_decimals() {
    assert_eq!(Range::new(0.0, 1.0).nice_ticks(4).decimals(), 2);
    assert_eq!(Range::new(0.0, 1.0).nice_ticks(5).decimals(), 1);
  }

  #[test]
  fn expand_follows_range_direction() {
    assert_eq!(Range::new(0.0, 100.0).expand(-10.0), Range::new(10.0, 90.0));
    assert_eq!(Range::new(100.0, 0.0).expand(-10.0), Range::new(90.0, 10.0));
  }

  #[test]
  fn ticks_end_on_large_narrow_ranges() {
    let range = Range::new(1.7e18, 1.7e18 + 800.0).expand_by(0.05);
    let ticks: Vec<f64> = range.nice_ticks(8).take(10_000).collect();

    assert!(!ticks.is_empty());
    assert!(ticks.len() < 20, "{} ticks", ticks.len());
    assert!(ticks.iter().all(|t| t.is_finite()));
  }

  #[test]
  fn ticks_end_when_step_vanishes() {
    let range = Range::new(1.0e300, 1.0e300 * (1.0 + f64::EPSILON));

    assert!(range.nice_ticks(8).take(10_000).count() <= NiceTicksIter::MAX_TICKS);
    assert_eq!(Range::new(f64::NAN, 1.0).nice_ticks(8).count(), 0);
  }

  #[test]
  fn projection_keeps_precision_far_from_zero() {
    let start = 1.7e18;
    let data = Bounds::new(Range::new(start, start + 1024.0), Range::new(0.0, 1.0));
    let viewport = Bounds::new(Range::new(0.0, 300.0), Range::new(100.0, 0.0));
    let projection = data.projection_to(viewport);

    let p = projection.apply(Point::new(start + 512.0, 0.5));
    assert!((p.x - 150.0).abs() < 1e-9, "{}", p.x);
    assert!((p.y - 50.0).abs() < 1e-9, "{}", p.y);
  }

  #[test]
  fn degenerate_ranges_are_padded() {
    assert_eq!(Range::new(0.0, 0.0).non_degenerate(), Range::new(-0.5, 0.5));
    assert_eq!(Range::new(10.0, 10.0).non_degenerate(), Range::new(9.5, 10.5));
    assert_eq!(Range::new(1.0, 2.0).non_degenerate(), Range::new(1.0, 2.0));
  }

  #[test]
  fn transform_maps_corners() {
    let data = Bounds::new(Range::new(0.0, 10.0), Range::new(-1.0, 1.0));
    let viewport = Bounds::new(Range::new(100.0, 600.0), Range::new(400.0, 0.0));
    let transform = data.transform_to(viewport);

    assert_eq!(transform * Point::new(0.0, -1.0), Point::new(100.0, 400.0));
    assert_eq!(transform * Point::new(10.0, 1.0), Point::new(600.0, 0.0));
  }

  #[test]
  fn union_spans_both() {
    let a = Bounds::point(Point::new(1.0, 5.0));
    let b = Bounds::point(Point::new(-3.0, 2.0));

    assert_eq!(a.union(b), Bounds::new(Range::new(-3.0, 1.0), Range::new(2.0, 5.0)));
  }
}
