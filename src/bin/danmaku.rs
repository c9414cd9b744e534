use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use danmaku::{
    ErrorReporter, OverlayConfig, ParleyRasterizer, Renderer, RendererOpts, ScriptSource,
    StderrReporter, argb32_to_rgba8_straight,
};

#[derive(Parser, Debug)]
#[command(name = "danmaku", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a message script and write every frame as a PNG.
    Frames(FramesArgs),
    /// Play a message script up to a point in time and write that frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct OverlayArgs {
    /// Font file (TTF/OTF/TTC).
    #[arg(long)]
    font: PathBuf,

    /// Face index inside a font collection.
    #[arg(long, default_value_t = 0)]
    font_index: u32,

    /// Overlay configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Message script: one `<offset seconds><TAB><text>` per line.
    #[arg(long)]
    script: PathBuf,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Playback frame rate.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Paint a near-invisible marker on empty frames.
    #[arg(long, default_value_t = false)]
    idle_marker: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    overlay: OverlayArgs,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out: PathBuf,

    /// Stop after this many frames even if the overlay is still active.
    #[arg(long)]
    max_frames: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    overlay: OverlayArgs,

    /// Playback time of the frame to write, in seconds.
    #[arg(long)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

struct Playback {
    renderer: Renderer<ParleyRasterizer>,
    source: ScriptSource,
    origin: Instant,
    frame_step: Duration,
    width: u32,
    height: u32,
}

impl Playback {
    fn open(args: &OverlayArgs) -> anyhow::Result<Self> {
        if args.fps == 0 {
            anyhow::bail!("--fps must be > 0");
        }
        let config = match &args.config {
            Some(p) => OverlayConfig::from_json_file(p)
                .with_context(|| format!("load config '{}'", p.display()))?,
            None => OverlayConfig::default(),
        };
        config.validate()?;

        let rasterizer =
            match ParleyRasterizer::from_file(&args.font, args.font_index, config.font_size as f32) {
                Ok(r) => r,
                Err(e) if e.is_font_error() => {
                    StderrReporter.report_error(&e.to_string());
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };

        let origin = Instant::now();
        let source = ScriptSource::from_file(&args.script, origin)
            .with_context(|| format!("load script '{}'", args.script.display()))?;
        let renderer = Renderer::new(
            config,
            rasterizer,
            RendererOpts {
                idle_marker: args.idle_marker,
            },
        )?;

        Ok(Self {
            renderer,
            source,
            origin,
            frame_step: Duration::from_secs_f64(1.0 / f64::from(args.fps)),
            width: args.width,
            height: args.height,
        })
    }

    /// Render frame `index`, passing the straight-alpha RGBA8 pixels to `sink`. Returns whether
    /// the overlay is still active.
    fn step(
        &mut self,
        index: u32,
        sink: impl FnOnce(&[u8]) -> anyhow::Result<()>,
    ) -> anyhow::Result<bool> {
        let now = self.origin + self.frame_step * index;
        self.source.set_clock(now);
        let (width, height) = (self.width, self.height);
        let mut rgba = None;
        let active = self
            .renderer
            .paint_frame_at(width, height, now, &mut self.source, |frame, stride| {
                rgba = Some(argb32_to_rgba8_straight(frame, stride, width, height));
                Ok(())
            })?;
        if let Some(rgba) = rgba {
            sink(&rgba)?;
        }
        Ok(active)
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut playback = Playback::open(&args.overlay)?;
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let (width, height) = (playback.width, playback.height);
    let mut index: u32 = 0;
    loop {
        if args.max_frames.is_some_and(|max| u64::from(index) >= max) {
            break;
        }
        let path = args.out.join(format!("frame_{index:05}.png"));
        let active = playback.step(index, |rgba| write_png(&path, rgba, width, height))?;
        index = index
            .checked_add(1)
            .context("frame index overflowed")?;
        if !active {
            break;
        }
    }

    eprintln!("wrote {index} frames to {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    if !args.at.is_finite() || args.at < 0.0 {
        anyhow::bail!("--at must be finite and >= 0");
    }
    let mut playback = Playback::open(&args.overlay)?;
    let (width, height) = (playback.width, playback.height);

    // Earlier frames are replayed so reflow starts at the same instants as in `frames`.
    let target = (args.at * f64::from(args.overlay.fps)).floor() as u32;
    for index in 0..target {
        playback.step(index, |_| Ok(()))?;
    }
    playback.step(target, |rgba| {
        if let Some(parent) = args.out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        write_png(&args.out, rgba, width, height)
    })?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
