mod cli;
mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alien_raid::config::{HIGHEST_SHIP_HEIGHT, LOW_ALIEN_MARGIN};
use alien_raid::{FixedStage, GameSession, Stage};

use crate::cli::Args;
use crate::display::Screen;
use crate::input::HeldKeys;

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Once the game is over the final screen stays
/// up and ticks stop.
///
/// Input model: direction keys are edge-triggered.  The first press of a key
/// sends `key_down`; the release (or, on terminals without release events,
/// silence past the key's hold window) sends `key_up`.  Fire shoots on every
/// press or repeat.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    stage: &FixedStage,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    frame_time: Duration,
    releases_reported: bool,
) -> anyhow::Result<()> {
    let mut held = HeldKeys::default();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        if input::drain(rx, frame, &mut held, session, stage) {
            return Ok(());
        }

        if !releases_reported {
            for key in held.expire(frame) {
                session.key_up(key);
            }
        }

        if !session.is_over() {
            let report = session.tick(stage, rng);
            if report.game_over {
                info!(level = session.level(), "final screen");
            }
        }

        let (cols, rows) = terminal::size().context("reading terminal size")?;
        let screen = Screen {
            cols,
            rows,
            viewport: stage.viewport(),
        };
        display::render(out, session, screen).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

/// Everything between raw mode and restore.  Any error here still reaches
/// the restore path in `main`.
fn run<W: Write>(
    out: &mut W,
    session: &mut GameSession,
    stage: &FixedStage,
    rng: &mut StdRng,
    frame_time: Duration,
    keyboard_enhanced: &mut bool,
) -> anyhow::Result<()> {
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to expiry.
    *keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    game_loop(out, session, stage, rng, &rx, frame_time, *keyboard_enhanced)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alien_raid=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    ensure!(args.width > 0.0, "--width must be positive");
    ensure!(
        args.height > HIGHEST_SHIP_HEIGHT + LOW_ALIEN_MARGIN,
        "--height must exceed {}",
        HIGHEST_SHIP_HEIGHT + LOW_ALIEN_MARGIN
    );

    if let Some(path) = &args.log {
        init_tracing(path)?;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, width = args.width, height = args.height, "starting");
    let mut rng = StdRng::seed_from_u64(seed);
    let stage = FixedStage::new(args.width, args.height);
    let mut session = GameSession::new(stage.viewport());
    let frame_time = Duration::from_secs(1) / args.fps;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    let mut keyboard_enhanced = false;
    let result = run(
        &mut out,
        &mut session,
        &stage,
        &mut rng,
        frame_time,
        &mut keyboard_enhanced,
    );

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(level = session.level(), frames = session.frame, "exiting");
    result
}
