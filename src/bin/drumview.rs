use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "drumview", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a frame range as PNGs, skipping frames that fail.
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print a JSON summary of one prepared frame.
    Inspect(InspectArgs),
    /// List the configured camera views.
    Views(ViewsArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON run configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation output directory (contains `particles/`, `rover/`, `images/`).
    #[arg(long)]
    root: Option<PathBuf>,

    /// Camera view id.
    #[arg(long)]
    view: Option<String>,

    /// Drum/base separation margin above the lowest rigid particle.
    #[arg(long)]
    margin: Option<f64>,

    /// Fixed absolute-y bound for soil particles.
    #[arg(long, conflicts_with = "soil_bound_from_drum")]
    soil_bound: Option<f64>,

    /// Use |y_min| of the rigid snapshot as the soil bound.
    #[arg(long)]
    soil_bound_from_drum: bool,

    /// Fail a frame when any rover mesh file is missing.
    #[arg(long)]
    require_meshes: bool,

    /// Output width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Do not draw drum particles.
    #[arg(long)]
    hide_drum: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// First frame (inclusive).
    #[arg(long)]
    start: Option<u64>,

    /// Last frame (exclusive).
    #[arg(long)]
    end: Option<u64>,

    /// Prepare frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel batch.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Prepare frames and report stats without writing images.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index.
    #[arg(long)]
    frame: u64,

    /// Output PNG path (defaults to `<root>/images/<view>_<k:04>.png`).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Frame index.
    #[arg(long)]
    frame: u64,
}

#[derive(Args, Debug)]
struct ViewsArgs {
    /// JSON run configuration.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Views(args) => cmd_views(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<drumview::RunConfig> {
    match path {
        Some(p) => drumview::RunConfig::from_path(p)
            .with_context(|| format!("load run config '{}'", p.display())),
        None => Ok(drumview::RunConfig::default()),
    }
}

fn resolve_config(common: &CommonArgs) -> anyhow::Result<drumview::RunConfig> {
    let mut cfg = load_config(common.config.as_ref())?;
    if let Some(root) = &common.root {
        cfg.sim_root = root.clone();
    }
    if let Some(view) = &common.view {
        cfg.view = view.clone();
    }
    if let Some(m) = common.margin {
        cfg.drum_margin = m;
    }
    if let Some(b) = common.soil_bound {
        cfg.soil_bound = drumview::SoilBound::Fixed(b);
    }
    if common.soil_bound_from_drum {
        cfg.soil_bound = drumview::SoilBound::DrumFloor;
    }
    if common.require_meshes {
        cfg.require_meshes = true;
    }
    if let Some(w) = common.width {
        cfg.render.width = w;
    }
    if let Some(h) = common.height {
        cfg.render.height = h;
    }
    if common.hide_drum {
        cfg.render.draw_drum = false;
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = resolve_config(&args.common)?;
    let start = args.start.unwrap_or(cfg.frames.start.0);
    let end = args.end.unwrap_or(cfg.frames.end.0);
    cfg.set_frames(start, end)?;
    if args.parallel {
        cfg.threading.parallel = true;
    }
    if args.threads.is_some() {
        cfg.threading.threads = args.threads;
    }
    if let Some(n) = args.chunk_size {
        cfg.threading.chunk_size = n;
    }
    cfg.validate()?;

    let stats = if args.dry_run {
        let mut renderer = drumview::RecordingRenderer::new();
        drumview::render_range(&cfg, &mut renderer)?
    } else {
        let mut renderer = drumview::PreviewRenderer::new(cfg.render.clone())?;
        drumview::render_range(&cfg, &mut renderer)?
    };

    eprintln!(
        "rendered {}/{} frames into {}",
        stats.frames_rendered,
        stats.frames_total,
        cfg.layout().out_dir().display()
    );
    for f in &stats.failed {
        eprintln!("  skipped frame {} ({}): {}", f.frame, f.kind, f.message);
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.common)?;
    let mut renderer = drumview::PreviewRenderer::new(cfg.render.clone())?;
    let out = drumview::render_one(
        &cfg,
        drumview::FrameIndex(args.frame),
        args.out.as_deref(),
        &mut renderer,
    )
        .with_context(|| format!("render frame {}", args.frame))?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = resolve_config(&args.common)?;
    cfg.validate()?;
    let scene = drumview::prepare_frame(
        &cfg.layout(),
        drumview::FrameIndex(args.frame),
        cfg.active_view()?,
        &cfg.frame_opts(),
    )
    .with_context(|| format!("prepare frame {}", args.frame))?;

    let json = serde_json::to_string_pretty(&scene.summary())?;
    println!("{json}");
    Ok(())
}

fn cmd_views(args: ViewsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_ref())?;
    for (id, view) in cfg.views.iter() {
        println!(
            "{id}: location_offset={} target_offset={} roll_deg={} file_name={}",
            view.location_offset, view.target_offset, view.roll_deg, view.file_name
        );
    }
    Ok(())
}
