use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use minetrace_render::{Frame, RenderConfig, Renderer, VoxelRenderer};
use minetrace_tools::{FrameTimer, GridInspector, as_millis_f32, write_ppm};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "minetrace-cli", about = "Headless tools for the minetrace voxel ray caster")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON render config; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Block atlas (binary PPM, 256x64)
    #[arg(long, global = true)]
    texture: Option<PathBuf>,

    /// World generation seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and a summary of the generated world
    Info,
    /// Render frames and write the last one as a binary PPM
    Render {
        /// Number of frames to advance before writing
        #[arg(short, long, default_value = "1")]
        frames: u32,
        #[arg(long, default_value = "320")]
        width: usize,
        #[arg(long, default_value = "240")]
        height: usize,
        /// Output image
        #[arg(short, long, default_value = "frame.ppm")]
        output: PathBuf,
    },
    /// Time frame rendering
    Bench {
        #[arg(short, long, default_value = "100")]
        frames: u32,
        #[arg(long, default_value = "320")]
        width: usize,
        #[arg(long, default_value = "240")]
        height: usize,
    },
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

fn start_renderer(config: &RenderConfig) -> Result<VoxelRenderer> {
    VoxelRenderer::start(config).with_context(|| {
        format!(
            "starting renderer with texture {}",
            config.texture_path.display()
        )
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.render_config()?;

    match cli.command {
        Commands::Info => {
            println!("minetrace-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", minetrace_common::crate_info());
            println!("assets: {}", minetrace_assets::crate_info());
            println!("kernel: {}", minetrace_kernel::crate_info());
            println!("render: {}", minetrace_render::crate_info());
            println!("tools: {}", minetrace_tools::crate_info());

            let grid = config.grid.build().context("generating grid")?;
            println!("{}", GridInspector::summary(&grid));
            println!("texture: {}", config.texture_path.display());
        }
        Commands::Render {
            frames,
            width,
            height,
            output,
        } => {
            if frames == 0 {
                bail!("--frames must be at least 1");
            }
            let mut renderer = start_renderer(&config)?;
            let mut frame = Frame::new(width, height);
            for _ in 0..frames {
                renderer.render(&mut frame.as_buffer());
            }
            write_ppm(&output, width, height, frame.pixels())
                .with_context(|| format!("writing {}", output.display()))?;
            println!(
                "Wrote frame {} ({width}x{height}) to {}",
                renderer.clock().frame(),
                output.display()
            );
            renderer.end();
        }
        Commands::Bench {
            frames,
            width,
            height,
        } => {
            let mut renderer = start_renderer(&config)?;
            let mut frame = Frame::new(width, height);
            let mut timer = FrameTimer::new(frames as usize);

            let total = Instant::now();
            for _ in 0..frames {
                let start = Instant::now();
                renderer.render(&mut frame.as_buffer());
                timer.record(start.elapsed());
            }
            let elapsed = total.elapsed();

            println!(
                "Rendered {} frames at {width}x{height} in {elapsed:?}",
                timer.count()
            );
            println!(
                "avg {:.3} ms  min {:.3} ms  max {:.3} ms",
                as_millis_f32(timer.average()),
                as_millis_f32(timer.min()),
                as_millis_f32(timer.max())
            );
            renderer.end();
        }
    }

    Ok(())
}
