use parley::{FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use vello::{
  kurbo::{Affine, Point, Shape, Stroke, Vec2},
  peniko::{Brush, Fill},
  wgpu,
};

use crate::error::Result;

pub(crate) mod window;

pub(crate) struct Render {
  pub scene: vello::Scene,
  font:      parley::FontContext,
  layout:    parley::LayoutContext<Brush>,
}

#[derive(Clone, Copy, Default)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  /// Applied around `position`, after alignment.
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             12.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(crate::theme::TEXT),
      position:         Point::ORIGIN,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Render {
  pub fn new() -> Self {
    Render {
      scene:  vello::Scene::new(),
      font:   parley::FontContext::new(),
      layout: parley::LayoutContext::new(),
    }
  }

  pub fn stroke(&mut self, shape: &impl Shape, brush: &Brush, stroke: &Stroke) {
    self.scene.stroke(stroke, Affine::IDENTITY, brush, None, shape);
  }

  fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout
  }

  pub fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);

    let width = f64::from(layout.width());
    let height = f64::from(layout.height());
    let offset = Vec2::new(
      match text.horizontal_align {
        Align::Start => 0.0,
        Align::Center => -width / 2.0,
        Align::End => -width,
      },
      match text.vertical_align {
        Align::Start => 0.0,
        Align::Center => -height / 2.0,
        Align::End => -height,
      },
    );
    let transform =
      Affine::translate(text.position.to_vec2()) * text.transform * Affine::translate(offset);

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

/// Device, queue, and the storage texture vello renders into.
struct GpuHandle {
  device:   wgpu::Device,
  queue:    wgpu::Queue,
  _texture: wgpu::Texture,
  view:     wgpu::TextureView,
}

impl GpuHandle {
  fn new(adapter: &wgpu::Adapter, width: u32, height: u32) -> Result<Self> {
    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label: Some("plot device"),
      ..Default::default()
    }))?;

    let (texture, view) = create_target(&device, width, height);
    Ok(GpuHandle { device, queue, _texture: texture, view })
  }

  fn resize(&mut self, width: u32, height: u32) {
    let (texture, view) = create_target(&self.device, width, height);
    self._texture = texture;
    self.view = view;
  }
}

fn create_target(device: &wgpu::Device, width: u32, height: u32) -> (wgpu::Texture, wgpu::TextureView) {
  let texture = device.create_texture(&wgpu::TextureDescriptor {
    label:           Some("plot target"),
    size:            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
    mip_level_count: 1,
    sample_count:    1,
    dimension:       wgpu::TextureDimension::D2,
    format:          wgpu::TextureFormat::Rgba8Unorm,
    usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::TEXTURE_BINDING,
    view_formats:    &[],
  });
  let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
  (texture, view)
}
