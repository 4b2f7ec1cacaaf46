use anyhow::{Context, Result};
use clap::Parser;
use minetrace_render::{Frame, RenderConfig, Renderer, VoxelRenderer};
use minetrace_render_wgpu::FramePresenter;
use minetrace_tools::{FrameTimer, as_millis_f32};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const TITLE: &str = "MineTrace";
const TITLE_REFRESH: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "minetrace-desktop", about = "Minetrace voxel ray caster in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON render config; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Block atlas (binary PPM, 256x64)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// World generation seed
    #[arg(long)]
    seed: Option<u64>,

    /// Frame width in pixels
    #[arg(long, default_value = "320")]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value = "240")]
    height: u32,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RenderConfig::default(),
        };
        if let Some(texture) = &self.texture {
            config.texture_path = texture.clone();
        }
        if let Some(seed) = self.seed {
            config.grid.seed = seed;
        }
        Ok(config)
    }
}

/// Window-side GPU objects, created once the event loop is running.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    presenter: FramePresenter,
}

struct App {
    renderer: Option<VoxelRenderer>,
    frame: Frame,
    gpu: Option<Gpu>,
    timer: FrameTimer,
    last_title: Instant,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(renderer: VoxelRenderer, width: u32, height: u32) -> Self {
        Self {
            renderer: Some(renderer),
            frame: Frame::new(width as usize, height as usize),
            gpu: None,
            timer: FrameTimer::new(60),
            last_title: Instant::now(),
            error: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let frame_size = PhysicalSize::new(self.frame.width() as u32, self.frame.height() as u32);
        let attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(frame_size)
            .with_min_inner_size(frame_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("creating window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("creating surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no compatible GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("minetrace_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("creating device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let presenter = FramePresenter::new(
            &device,
            surface_format,
            self.frame.width() as u32,
            self.frame.height() as u32,
        );

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            ?surface_format,
            "GPU initialized"
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            presenter,
        })
    }

    fn redraw(&mut self) {
        let (Some(renderer), Some(gpu)) = (&mut self.renderer, &self.gpu) else {
            return;
        };

        let start = Instant::now();
        renderer.render(&mut self.frame.as_buffer());
        self.timer.record(start.elapsed());

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        gpu.presenter.present(
            &gpu.device,
            &gpu.queue,
            &view,
            gpu.config.width,
            gpu.config.height,
            self.frame.pixels(),
        );
        output.present();

        if self.last_title.elapsed() >= TITLE_REFRESH {
            let ms = as_millis_f32(self.timer.average());
            gpu.window.set_title(&format!("{TITLE} - {ms:.2} ms"));
            self.last_title = Instant::now();
        }
    }

    fn shutdown(&mut self) {
        if let Some(renderer) = self.renderer.take() {
            renderer.end();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                self.error = Some(e);
                self.shutdown();
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.shutdown();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.render_config()?;
    let renderer = VoxelRenderer::start(&config).with_context(|| {
        format!(
            "starting renderer with texture {}",
            config.texture_path.display()
        )
    })?;

    let event_loop = EventLoop::new().context("creating event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(renderer, cli.width.max(1), cli.height.max(1));
    event_loop.run_app(&mut app).context("running event loop")?;
    app.shutdown();

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
