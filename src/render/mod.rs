use std::path::Path;

use parley::{Alignment, FontWeight, PositionedLayoutItem, StyleProperty};
use vello::{
  kurbo::{Affine, Point, Shape, Size, Stroke},
  peniko::{Brush, Color, Fill},
  wgpu::{self, TextureDescriptor},
};

use crate::{Error, sheet::Sheet};

mod texture;
mod window;

pub use window::show;

pub(crate) struct Render {
  pub(crate) scene:      vello::Scene,
  font:                  parley::FontContext,
  layout:                parley::LayoutContext<Brush>,
  pub(crate) background: Color,
}

pub(crate) struct GpuHandle {
  device:  wgpu::Device,
  queue:   wgpu::Queue,
  texture: wgpu::Texture,
  view:    wgpu::TextureView,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RenderConfig {
  width:  u32,
  height: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
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
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      size:             16.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Sheet<'_> {
  /// Renders the sheet off-screen and writes it as an image. The format follows the
  /// extension of `path`.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
    let layout = self.layout();
    let config = RenderConfig::fit(layout.size);
    let handle = GpuHandle::new(&config, None)?;

    let mut render = Render::new();
    self.draw(&mut render, &layout);

    let mut renderer = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .map_err(Error::gpu)?;
    renderer
      .render_to_texture(
        &handle.device,
        &handle.queue,
        &render.scene,
        &handle.view,
        &render.params(&config),
      )
      .map_err(Error::gpu)?;

    texture::write_image(&handle, &config, path.as_ref())
  }
}

impl Render {
  pub(crate) fn new() -> Self {
    Render {
      scene:      vello::Scene::new(),
      font:       parley::FontContext::new(),
      layout:     parley::LayoutContext::new(),
      background: Color::WHITE,
    }
  }

  pub(crate) fn params(&self, config: &RenderConfig) -> vello::RenderParams {
    vello::RenderParams {
      base_color:          self.background,
      width:               config.width,
      height:              config.height,
      antialiasing_method: vello::AaConfig::Msaa16,
    }
  }

  pub(crate) fn fill(&mut self, shape: &impl Shape, brush: &Brush) {
    self.scene.fill(Fill::NonZero, Affine::IDENTITY, brush, None, shape);
  }

  pub(crate) fn stroke(&mut self, shape: &impl Shape, brush: &Brush, stroke: &Stroke) {
    self.scene.stroke(stroke, Affine::IDENTITY, brush, None, shape);
  }

  pub(crate) fn layout_text(&mut self, text: &DrawText) -> parley::Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub(crate) fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub(crate) fn draw_text_layout(&mut self, layout: parley::Layout<Brush>, text: DrawText) {
    let origin = Point::new(
      text.position.x - text.horizontal_align.offset(f64::from(layout.width())),
      text.position.y - text.vertical_align.offset(f64::from(layout.height())),
    );

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = origin.x as f32 + glyph_run.offset();
        let baseline = (origin.y as f32 + glyph_run.baseline()).round();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(true)
          .transform(Affine::IDENTITY)
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

impl Align {
  const fn offset(self, size: f64) -> f64 {
    match self {
      Align::Start => 0.0,
      Align::Center => size / 2.0,
      Align::End => size,
    }
  }
}

impl GpuHandle {
  fn new(config: &RenderConfig, adapter: Option<wgpu::Adapter>) -> Result<Self, Error> {
    let adapter = match adapter {
      Some(adapter) => adapter,
      None => {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
          .map_err(Error::gpu)?
      }
    };

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))
    .map_err(Error::gpu)?;

    let texture = create_texture(&device, config);
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Ok(GpuHandle { device, queue, texture, view })
  }

  fn resize(&mut self, config: &RenderConfig) {
    self.texture = create_texture(&self.device, config);
    self.view = self.texture.create_view(&wgpu::TextureViewDescriptor::default());
  }
}

fn create_texture(device: &wgpu::Device, config: &RenderConfig) -> wgpu::Texture {
  device.create_texture(&TextureDescriptor {
    label:           Some("Render Texture"),
    size:            config.extent_3d(),
    mip_level_count: 1,
    sample_count:    1,
    dimension:       wgpu::TextureDimension::D2,
    format:          wgpu::TextureFormat::Rgba8Unorm,
    usage:           wgpu::TextureUsages::STORAGE_BINDING
      | wgpu::TextureUsages::TEXTURE_BINDING
      | wgpu::TextureUsages::COPY_SRC,
    view_formats:    &[],
  })
}

impl RenderConfig {
  const ROW_ALIGNMENT: u32 = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT / 4;

  fn new(width: u32, height: u32) -> Self {
    RenderConfig { width: width.max(1), height: height.max(1) }
  }

  /// A canvas covering `size`. Texture rows copied back to the CPU must be 256-byte aligned, so
  /// the width is padded to a multiple of 64 pixels.
  fn fit(size: Size) -> Self {
    let width = (size.width.ceil().max(1.0) as u32).next_multiple_of(Self::ROW_ALIGNMENT);
    RenderConfig::new(width, size.height.ceil() as u32)
  }

  fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fit_pads_width_for_readback() {
    let config = RenderConfig::fit(Size::new(1000.2, 700.5));
    assert_eq!(config, RenderConfig { width: 1024, height: 701 });
    assert_eq!((config.width * 4) % wgpu::COPY_BYTES_PER_ROW_ALIGNMENT, 0);

    assert_eq!(RenderConfig::fit(Size::new(64.0, 10.0)).width, 64);
    assert_eq!(RenderConfig::fit(Size::ZERO), RenderConfig { width: 64, height: 1 });
  }

  #[test]
  fn alignment_offsets() {
    assert_eq!(Align::Start.offset(80.0), 0.0);
    assert_eq!(Align::Center.offset(80.0), 40.0);
    assert_eq!(Align::End.offset(80.0), 80.0);
  }
}
