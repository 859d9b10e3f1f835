use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ripple", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a single frame of the field.
    Frame(FrameArgs),
    /// Play the animation in the terminal (q, Esc or Ctrl-C to quit).
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Field config JSON (rows, cols, palette). Defaults to 40x120 and the water palette.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame counter value (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Emit rows with their opacity as JSON instead of plain text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Field config JSON (rows, cols, palette). Defaults to 40x120 and the water palette.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frame increments.
    #[arg(long)]
    frames: Option<u64>,

    /// Display refresh rate driving the frame clock.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    refresh_hz: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<ripple::FieldConfig> {
    let Some(path) = path else {
        return Ok(ripple::FieldConfig::default());
    };
    ripple::FieldConfig::from_json_path(path)
        .with_context(|| format!("load config '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let dims = config.dims()?;
    let frame = ripple::render(ripple::FrameIndex(args.frame), dims, &config.palette);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &frame).context("write frame JSON")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", frame.to_text())?;
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = read_config(args.config.as_deref())?;
    let refresh = Duration::from_secs_f64(1.0 / f64::from(args.refresh_hz));

    let mut session = ripple::AnimationSession::start(&config, ripple::RealtimeScheduler::new())?;
    let mut surface =
        ripple::TerminalSurface::enter(io::stdout()).context("enter terminal surface")?;

    surface.draw(&session.current_frame())?;
    let mut drawn = session.frame();

    loop {
        let tick_start = Instant::now();
        session.scheduler_mut().pump(tick_start);

        let frame = session.frame();
        if frame != drawn {
            surface.draw(&session.current_frame())?;
            drawn = frame;
        }
        if args.frames.is_some_and(|limit| frame.0 >= limit) {
            break;
        }

        let budget = refresh.saturating_sub(tick_start.elapsed());
        if event::poll(budget)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        break;
                    }
                }
                Event::Resize(cols, rows) => {
                    surface.resize(cols, rows)?;
                    surface.draw(&session.current_frame())?;
                }
                _ => {}
            }
        }
    }

    let scheduler = session.teardown();
    drop(surface);
    tracing::debug!(scheduled = ripple::Scheduler::is_scheduled(&scheduler), "playback stopped");
    Ok(())
}
