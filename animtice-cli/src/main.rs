use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

use animtice::{FrameIndex, LessonInputs, Locale, Quality, Rasterizer, RenderToMp4Opts, Timeline};
use animtice_lessons::LessonEntry;

#[derive(Parser, Debug)]
#[command(name = "animtice", version, about = "Render grade-3 math lesson animations")]
struct Cli {
    /// More logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the lessons in the catalog.
    List,
    /// Render a whole lesson: MP4 when `--out` ends in `.mp4` (requires `ffmpeg` on PATH),
    /// otherwise a directory of numbered PNG frames.
    Render(RenderArgs),
    /// Render a single frame as PNG or SVG, chosen by the output extension.
    Frame(FrameArgs),
    /// Write the recorded timeline as JSON.
    Timeline(TimelineArgs),
}

#[derive(Args, Debug)]
struct LessonArgs {
    /// Lesson id, e.g. `m3-l15-perimeter` (see `animtice list`).
    lesson: String,

    #[arg(long, value_enum, default_value_t = QualityArg::Medium)]
    quality: QualityArg,

    /// Lesson language; defaults to the language of the lesson config.
    #[arg(long, value_parser = parse_locale)]
    lang: Option<Locale>,

    /// JSON object overriding style fields.
    #[arg(long)]
    style: Option<PathBuf>,

    /// JSON object overriding lesson content fields.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    lesson: LessonArgs,

    #[arg(long)]
    out: PathBuf,

    /// Extra directory of font files for text rendering.
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// x264 constant rate factor (MP4 only).
    #[arg(long, default_value_t = 18)]
    crf: u8,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    lesson: LessonArgs,

    /// Output `.png` or `.svg` path.
    #[arg(long)]
    out: PathBuf,

    /// Frame index (0-based).
    #[arg(long, group = "when")]
    frame: Option<u64>,

    /// Time in seconds.
    #[arg(long, group = "when")]
    at: Option<f64>,

    /// Last frame of the named step.
    #[arg(long, group = "when")]
    step: Option<String>,

    #[arg(long)]
    fonts: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    lesson: LessonArgs,

    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum QualityArg {
    Low,
    Medium,
    High,
}

impl From<QualityArg> for Quality {
    fn from(q: QualityArg) -> Self {
        match q {
            QualityArg::Low => Quality::Low,
            QualityArg::Medium => Quality::Medium,
            QualityArg::High => Quality::High,
        }
    }
}

fn parse_locale(s: &str) -> Result<Locale, String> {
    Locale::parse(s).ok_or_else(|| format!("unknown language '{s}' (expected en or ar)"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List => cmd_list(),
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_list() -> anyhow::Result<()> {
    for entry in animtice_lessons::catalog() {
        println!("{:<30} {}", entry.id, (entry.title)().en);
    }
    Ok(())
}

fn read_json(path: Option<&Path>) -> anyhow::Result<Option<serde_json::Value>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read '{}'", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("parse json '{}'", path.display()))?;
    Ok(Some(value))
}

fn lookup(id: &str) -> anyhow::Result<LessonEntry> {
    animtice_lessons::find(id)
        .with_context(|| format!("unknown lesson '{id}' (see `animtice list`)"))
}

fn build(args: &LessonArgs) -> anyhow::Result<Timeline> {
    let entry = lookup(&args.lesson)?;
    let inputs = LessonInputs {
        settings: Quality::from(args.quality).settings(),
        locale: args.lang,
        style: read_json(args.style.as_deref())?,
        config: read_json(args.config.as_deref())?,
    };
    let timeline =
        (entry.build)(&inputs).with_context(|| format!("build lesson '{}'", entry.id))?;
    tracing::info!(
        lesson = entry.id,
        frames = timeline.duration.0,
        secs = timeline.duration_secs(),
        "timeline built"
    );
    Ok(timeline)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let timeline = build(&args.lesson)?;
    let raster = Rasterizer::new(args.fonts.as_deref());

    let stats = if has_extension(&args.out, "mp4") {
        let opts = RenderToMp4Opts {
            crf: args.crf,
            ..RenderToMp4Opts::default()
        };
        animtice::render_to_mp4(&timeline, args.out.clone(), opts, &raster)?
    } else {
        animtice::render_frames_png(&timeline, None, &args.out, &raster)?
    };
    tracing::debug!(?stats, "render finished");

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = build(&args.lesson)?;
    let frame = if let Some(f) = args.frame {
        FrameIndex(f)
    } else if let Some(secs) = args.at {
        timeline.frame_at_secs(secs)
    } else if let Some(step) = &args.step {
        timeline
            .step_frame(step)
            .with_context(|| format!("lesson '{}' has no step '{step}'", args.lesson.lesson))?
    } else {
        FrameIndex(0)
    };
    animtice::ensure_parent_dir(&args.out)?;

    if has_extension(&args.out, "svg") {
        let svg = animtice::render_frame_svg(&timeline, frame)?;
        std::fs::write(&args.out, svg)
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        let raster = Rasterizer::new(args.fonts.as_deref());
        let pixels = animtice::render_frame(&timeline, frame, &raster)?;
        animtice::save_png(&pixels, &args.out)?;
    }

    eprintln!("wrote {} (frame {})", args.out.display(), frame.0);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let timeline = build(&args.lesson)?;
    animtice::ensure_parent_dir(&args.out)?;
    let json = timeline.to_json_pretty()?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write timeline '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
