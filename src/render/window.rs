use std::sync::Arc;

use vello::wgpu;
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::{ElementState, KeyEvent, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{Key, NamedKey},
  window::{Window, WindowId},
};

use crate::{
  Plot, ResultExt,
  error::{Error, Result},
  render::{GpuHandle, Render},
  theme,
};

/// Opens a window showing `plot` and blocks until it is closed.
pub fn show(plot: &Plot) -> Result<()> {
  let event_loop = EventLoop::new()?;
  event_loop.set_control_flow(ControlFlow::Wait);

  let mut app = App { plot, stale: true, render: None, init: None, error: None };
  event_loop.run_app(&mut app)?;

  match app.error.take() {
    Some(err) => Err(err),
    None => Ok(()),
  }
}

struct App<'p, 'a> {
  plot:   &'p Plot<'a>,
  stale:  bool,
  render: Option<Render>,

  init:  Option<Init>,
  error: Option<Error>,
}

struct Init {
  // Dropped before the window it draws into.
  surface: wgpu::Surface<'static>,
  window:  Arc<Window>,
  config:  wgpu::SurfaceConfiguration,
  handle:  GpuHandle,

  blit:  wgpu::util::TextureBlitter,
  vello: vello::Renderer,
}

impl App<'_, '_> {
  fn open_window(&self, event_loop: &ActiveEventLoop) -> Result<Init> {
    let mut attributes = Window::default_attributes()
      .with_inner_size(LogicalSize::new(1000, 700))
      .with_min_inner_size(LogicalSize::new(320, 240));
    if let Some(title) = self.plot.title.as_deref() {
      attributes = attributes.with_title(title);
    }

    let window = Arc::new(event_loop.create_window(attributes)?);
    let size = window.inner_size();

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let surface = instance.create_surface(window.clone())?;

    let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
      compatible_surface: Some(&surface),
      ..Default::default()
    }))?;
    log::debug!("using adapter {:?}", adapter.get_info().name);

    let surface_caps = surface.get_capabilities(&adapter);
    // vello writes sRGB-encoded values, so the surface must not encode again.
    let surface_format = surface_caps
      .formats
      .iter()
      .copied()
      .find(|f| matches!(f, wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Bgra8Unorm))
      .unwrap_or(surface_caps.formats[0]);

    let width = size.width.max(1);
    let height = size.height.max(1);
    let handle = GpuHandle::new(&adapter, width, height)?;

    let config = wgpu::SurfaceConfiguration {
      usage:                         wgpu::TextureUsages::RENDER_ATTACHMENT,
      format:                        surface_format,
      width:                         width,
      height:                        height,
      present_mode:                  wgpu::PresentMode::AutoVsync,
      alpha_mode:                    surface_caps.alpha_modes[0],
      view_formats:                  vec![],
      desired_maximum_frame_latency: 2,
    };
    surface.configure(&handle.device, &config);

    let vello = vello::Renderer::new(&handle.device, vello::RendererOptions::default())?;
    let blit = wgpu::util::TextureBlitter::new(&handle.device, config.format);

    window.request_redraw();
    Ok(Init { surface, window, config, handle, blit, vello })
  }

  fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
    self.error = Some(err);
    event_loop.exit();
  }
}

impl ApplicationHandler for App<'_, '_> {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    if self.init.is_some() {
      return;
    }

    match self.open_window(event_loop) {
      Ok(init) => {
        log::info!("window open, close it or press q to exit");
        self.init = Some(init);
      }
      Err(err) => self.fail(event_loop, err),
    }
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
    match event {
      WindowEvent::CloseRequested => {
        log::info!("window closed");
        event_loop.exit();
      }

      WindowEvent::KeyboardInput {
        event: KeyEvent { logical_key, state: ElementState::Pressed, .. },
        ..
      } => match logical_key {
        Key::Character(c) if c.as_str() == "q" => event_loop.exit(),
        Key::Named(NamedKey::Escape) => event_loop.exit(),
        _ => {}
      },

      WindowEvent::Resized(new_size) => {
        if let Some(init) = &mut self.init {
          if new_size.width > 0 && new_size.height > 0 {
            init.config.width = new_size.width;
            init.config.height = new_size.height;
            init.handle.resize(new_size.width, new_size.height);
            init.surface.configure(&init.handle.device, &init.config);

            self.stale = true;
            init.window.request_redraw();
          }
        }
      }

      WindowEvent::RedrawRequested => {
        let Some(init) = &mut self.init else { return };

        if self.stale {
          let render = self.render.get_or_insert_with(Render::new);
          render.scene.reset();
          self.plot.draw(render, f64::from(init.config.width), f64::from(init.config.height));

          let rendered = init
            .vello
            .render_to_texture(
              &init.handle.device,
              &init.handle.queue,
              &render.scene,
              &init.handle.view,
              &vello::RenderParams {
                base_color:          theme::BACKGROUND,
                width:               init.config.width,
                height:              init.config.height,
                antialiasing_method: vello::AaConfig::Msaa16,
              },
            )
            .log_err();
          self.stale = rendered.is_none();
        }

        init.present();
      }

      _ => (),
    }
  }
}

impl Init {
  fn present(&mut self) {
    let frame = match self.surface.get_current_texture() {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
        self.surface.configure(&self.handle.device, &self.config);
        self.window.request_redraw();
        return;
      }
      Err(e) => {
        log::warn!("dropped frame: {e}");
        return;
      }
    };

    let surface_view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let mut encoder = self
      .handle
      .device
      .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("plot blit") });

    self.blit.copy(&self.handle.device, &mut encoder, &self.handle.view, &surface_view);

    self.handle.queue.submit(std::iter::once(encoder.finish()));

    self.window.pre_present_notify();
    frame.present();
  }
}
