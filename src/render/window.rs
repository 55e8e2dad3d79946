use std::sync::Arc;

use vello::{kurbo::Affine, wgpu};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{ElementState, KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{Key, NamedKey},
  window::{Window, WindowId},
};

use crate::{
  Error, InputState, ResultExt,
  mix::Blend,
  render::{GpuHandle, Render, RenderConfig},
  sheet::{Sheet, caption},
};

const DEFAULT_TINT_START: f32 = 0.5;

/// Opens a window showing the sheet for `state`.
///
/// Left/Right cycle presets, `r` switches row tables, `b` switches blends, `t` toggles the tint
/// and `q` or Escape closes the window. Every change recomputes the whole sheet.
pub fn show(state: InputState, blend: Blend) -> Result<(), Error> {
  let event_loop = EventLoop::new()?;
  event_loop.set_control_flow(ControlFlow::Wait);

  let mut app = App { state, blend, stale: true, render: None, init: None, error: None };
  event_loop.run_app(&mut app)?;

  let error = app.error.take();

  // FIXME: Ideally, we'd drop this. But dropping the surface after the loop exits segfaults.
  std::mem::forget(app);

  error.map_or(Ok(()), Err)
}

struct App {
  state:  InputState,
  blend:  Blend,
  stale:  bool,
  render: Option<Render>,
  init:   Option<Init>,
  error:  Option<Error>,
}

struct Init {
  window:  Arc<Window>,
  surface: wgpu::Surface<'static>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl ApplicationHandler for App {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match Init::new(event_loop) {
      Ok(init) => {
        init.window.request_redraw();
        self.init = Some(init);
      }
      Err(e) => {
        self.error = Some(e);
        event_loop.exit();
      }
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => {
        event_loop.exit();
      }

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key, state: ElementState::Pressed, .. },
        ..
      } => match logical_key.as_ref() {
        Key::Character("q") | Key::Named(NamedKey::Escape) => event_loop.exit(),
        Key::Named(NamedKey::ArrowRight) => self.update(|app| app.state.cycle_preset(1)),
        Key::Named(NamedKey::ArrowLeft) => self.update(|app| app.state.cycle_preset(-1)),
        Key::Character("r") => self.update(|app| {
          let scale = app.state.scale().toggled();
          app.state.set_scale(scale);
        }),
        Key::Character("b") => self.update(|app| app.blend = app.blend.next()),
        Key::Character("t") => self.update(|app| {
          let start = match app.state.tint_start() {
            Some(_) => None,
            None => Some(DEFAULT_TINT_START),
          };
          app.state.set_tint_start(start);
        }),
        _ => {}
      },

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init.handle.resize(&RenderConfig::new(new_size.width, new_size.height));
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::RedrawRequested => {
        let Some(init) = &mut self.init else { return };

        if self.stale {
          self.stale = false;
          let render = self.render.get_or_insert_with(Render::new);
          render.scene.reset();

          let model = self.state.render(&self.blend);
          let caption = caption(&self.state, self.blend);
          init.window.set_title(&format!("mixgrid - {caption}"));

          let sheet = Sheet::new(&model, caption);
          let layout = sheet.layout();
          sheet.draw(render, &layout);

          // Shrink the sheet to fit the window, never enlarge it.
          let scale = (f64::from(init.config.width) / layout.size.width)
            .min(f64::from(init.config.height) / layout.size.height)
            .min(1.0);
          let mut frame = vello::Scene::new();
          frame.append(&render.scene, Some(Affine::scale(scale)));

          let config = RenderConfig::new(init.config.width, init.config.height);
          init
            .vello
            .render_to_texture(
              &init.handle.device,
              &init.handle.queue,
              &frame,
              &init.handle.view,
              &render.params(&config),
            )
            .log_err();
        }
        init.redraw();
      }

      _ => (),
    }
  }
}

impl App {
  fn update(&mut self, f: impl FnOnce(&mut App)) {
    f(self);
    self.stale = true;
    if let Some(init) = &self.init {
      init.window.request_redraw();
    }
  }
}

impl Init {
  fn new(event_loop: &ActiveEventLoop) -> Result<Self, Error> {
    let window = Arc::new(
      event_loop.create_window(
        Window::default_attributes()
          .with_title("mixgrid")
          .with_inner_size(LogicalSize::new(1100, 1000))
          .with_min_inner_size(LogicalSize::new(320, 240)),
      )?,
    );
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone()).map_err(Error::gpu)?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))
    .map_err(Error::gpu)?;

    // vello already writes sRGB-encoded values, so the surface must not encode them again.
    let surface_caps = surface.get_capabilities(&adapter);
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| !f.is_srgb())
      .or_else(|| surface_caps.formats.first().copied())
      .ok_or_else(|| Error::Gpu("surface reports no texture formats".to_string()))?;

    let render_config = RenderConfig::new(size.width, size.height);
    let handle = GpuHandle::new(&render_config, Some(adapter))?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT
        | wgpu::TextureUsages::COPY_DST,
      format:                        surface_format,
      width:                         render_config.width,
      height:                        render_config.height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps
        .alpha_modes
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto),
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())
      .map_err(Error::gpu)?;

    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    Ok(Init { window, surface, config, handle, blit, vello })
  }

  fn redraw(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        return;
      }
      Err(e) => {
        tracing::warn!("dropped frame: {e}");
        return;
      }
    };

    let surface_view = &frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    frame.present();
  }
}
