use borda::animation::SteppedHost;
use borda::config::{self, BordaConfig, CONFIG_FILE_NAME};
use borda::imaging::{
    FillPercent, RasterCanvas, RenderSink, SourceImage, is_supported_image, load_source_image,
};
use borda::output::{self, AnimationSummary, ComposeSummary};
use borda::ratio::{parse_presets, parse_ratio};
use borda::session::{Session, SessionSettings};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that render.
#[derive(clap::Args, Clone)]
struct RenderArgs {
    /// Share of the frame the photo may occupy, 1-100 (default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=100))]
    size: Option<u32>,

    /// Directory to write PNGs into
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser)]
#[command(name = "borda")]
#[command(about = "Frame photos on a solid matte at a fixed aspect ratio")]
#[command(long_about = "\
Frame photos on a solid matte at a fixed aspect ratio

The photo's longer side is kept at full resolution; the frame grows around
it to reach the requested ratio, and the photo is scaled to cover the chosen
share of the frame, centered.

Examples:

  borda compose beach.jpg --ratio 4:5 --size 90
      → ./borda-4x5-<timestamp>.png

  borda animate beach.jpg --from 9:16 --to 1:1 --out frames/
      → frames/frame-0000.png, frame-0001.png, ...

Settings are read from ./borda.toml when present.
Run 'borda gen-config' to generate a documented one.
Set RUST_LOG=debug to trace the animator.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults apply when it does not exist)
    #[arg(long, default_value = CONFIG_FILE_NAME, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Frame one photo and write it as PNG
    Compose {
        /// Photo to frame (JPEG, PNG, TIFF, WebP)
        image: PathBuf,

        /// Target aspect ratio as W:H (default from config)
        #[arg(long)]
        ratio: Option<String>,

        #[command(flatten)]
        render: RenderArgs,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render a ratio transition frame by frame
    Animate {
        /// Photo to frame (JPEG, PNG, TIFF, WebP)
        image: PathBuf,

        /// Starting ratio as W:H (default from config)
        #[arg(long)]
        from: Option<String>,

        /// Final ratio as W:H
        #[arg(long)]
        to: String,

        /// Frames per second (default from config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=240))]
        fps: Option<u32>,

        #[command(flatten)]
        render: RenderArgs,
    },
    /// List the configured ratio presets
    Presets,
    /// Print a stock borda.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Compose {
            image,
            ratio,
            render,
            json,
        } => {
            let config = config::load_config(&cli.config)?;
            compose(&config, &image, ratio.as_deref(), &render, json)?;
        }
        Command::Animate {
            image,
            from,
            to,
            fps,
            render,
        } => {
            let config = config::load_config(&cli.config)?;
            animate(&config, &image, from.as_deref(), &to, fps, &render)?;
        }
        Command::Presets => {
            let config = config::load_config(&cli.config)?;
            let presets = parse_presets(&config.presets)?;
            let default = parse_ratio(&config.default_ratio)?;
            output::print_presets(&presets, &default);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compose(
    config: &BordaConfig,
    image_path: &Path,
    ratio: Option<&str>,
    render: &RenderArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = open_photo(image_path)?;
    let source_size = source.dimensions();
    let mut session = new_session(config, render, config.animation.fps)?;
    if let Some(ratio) = ratio {
        session.select_ratio(ratio)?;
    }
    session.load_image(source);

    let exported = session
        .export_png()?
        .ok_or("nothing to export: no photo loaded")?;
    std::fs::create_dir_all(&render.out)?;
    let path = render.out.join(&exported.file_name);
    std::fs::write(&path, &exported.bytes)?;
    info!(path = %path.display(), bytes = exported.bytes.len(), "composite written");

    let summary = ComposeSummary::new(
        image_path,
        source_size,
        session.selected_ratio(),
        session.fill_percent().value(),
        &exported.plan,
        &path,
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        output::print_compose_summary(&summary);
    }
    Ok(())
}

fn animate(
    config: &BordaConfig,
    image_path: &Path,
    from: Option<&str>,
    to: &str,
    fps: Option<u32>,
    render: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let to = parse_ratio(to)?;
    let fps = fps.unwrap_or(config.animation.fps);
    let source = open_photo(image_path)?;
    let source_size = source.dimensions();

    let mut session = new_session(config, render, fps)?;
    if let Some(from) = from {
        session.select_ratio(from)?;
    }
    let from = session.selected_ratio().clone();
    session.load_image(source);
    std::fs::create_dir_all(&render.out)?;

    // Frame 0 is the starting ratio, before any host refresh
    let mut frames = vec![write_frame(&session, &render.out, 0)?];
    session.request_ratio(to.clone());
    while session.is_animating() {
        for handle in session.host_mut().advance() {
            if session.on_frame(handle).is_some() {
                frames.push(write_frame(&session, &render.out, frames.len())?);
            }
        }
    }
    info!(frames = frames.len(), "transition written");

    output::print_animation_summary(&AnimationSummary {
        source: image_path,
        source_size,
        from: &from,
        to: &to,
        duration: Duration::from_millis(config.animation.duration_ms),
        fps,
        frames: &frames,
    });
    Ok(())
}

fn new_session(
    config: &BordaConfig,
    render: &RenderArgs,
    fps: u32,
) -> Result<Session<RasterCanvas, SteppedHost>, Box<dyn std::error::Error>> {
    let mut settings = SessionSettings::try_from(config)?;
    if let Some(size) = render.size {
        settings.fill = FillPercent::new(size);
    }
    Ok(Session::new(
        RasterCanvas::new(config.render.filter),
        SteppedHost::from_fps(fps),
        settings,
    ))
}

/// Check the extension, then decode.
fn open_photo(path: &Path) -> Result<SourceImage, Box<dyn std::error::Error>> {
    if !is_supported_image(path) {
        return Err(format!("unsupported image type: {}", path.display()).into());
    }
    Ok(load_source_image(path)?)
}

/// Encode whatever the canvas currently holds as `frame-NNNN.png`.
fn write_frame(
    session: &Session<RasterCanvas, SteppedHost>,
    dir: &Path,
    index: usize,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = dir.join(format!("frame-{index:04}.png"));
    std::fs::write(&path, session.sink().encode_png()?)?;
    Ok(path)
}
