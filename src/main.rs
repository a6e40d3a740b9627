mod display;
mod input;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use bomb_dodge::compute::{init_state, tick};
use bomb_dodge::config::{GameConfig, GAME_OVER_HOLD_MS};
use bomb_dodge::entities::{FrameEvent, GameState, GameStatus, TickInput};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use display::{SpriteSheet, Viewport};
use input::KeyTracker;
use rand::rngs::StdRng;
use rand::SeedableRng;

const LOG_FILE: &str = "bomb_dodge.log";

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log records go to a file in the
/// system temp dir.  Level comes from `RUST_LOG` (default `info`).
fn init_logging() {
    let path = std::env::temp_dir().join(LOG_FILE);
    let Ok(file) = std::fs::File::create(&path) else {
        return;
    };
    let env = env_logger::Env::default().default_filter_or("info");
    let installed = env_logger::Builder::from_env(env)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .is_ok();
    if installed {
        log::info!("logging to {}", path.display());
    }
}

fn log_events(state: &GameState) {
    for event in &state.events {
        match event {
            FrameEvent::BeamFired => log::debug!("beam fired at frame {}", state.frame),
            FrameEvent::BombDestroyed { center } => log::info!(
                "bomb destroyed at {:?}, score {}, {} bombs left",
                center,
                state.score.value,
                state.bombs.len()
            ),
            FrameEvent::GameOver(cause) => log::info!(
                "game over ({:?}) at frame {} with score {}",
                cause,
                state.frame,
                state.score.value
            ),
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs one session to completion and returns its final state.
///
/// Input model: `KeyTracker` records the frame of the last press/repeat event
/// for every key; each frame the still-fresh direction keys form the held
/// set.  Space is edge-triggered: one beam per press event.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    seed: u64,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<GameState> {
    let frame_budget = Duration::from_millis(config.frame_millis());
    let sheet = SpriteSheet::new();
    let mut state = init_state(config, &mut StdRng::seed_from_u64(seed));
    log::info!("session started with seed {}: {:?}", seed, config);

    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = TickInput::default();
        while let Ok(ev) = rx.try_recv() {
            keys.handle(&ev, frame, &mut input);
        }
        input.held = keys.held(frame);

        state = tick(&state, &input);
        log_events(&state);

        match state.status {
            GameStatus::Quit => {
                log::info!("quit at frame {} with score {}", state.frame, state.score.value);
                return Ok(state);
            }
            GameStatus::GameOver(_) => {
                display::render(out, &state, &sheet, Viewport::new(terminal::size()?))?;
                thread::sleep(Duration::from_millis(GAME_OVER_HOLD_MS));
                return Ok(state);
            }
            GameStatus::Running => {
                display::render(out, &state, &sheet, Viewport::new(terminal::size()?))?;
            }
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    // The capability query reads from stdin, so it runs before the input
    // thread starts.
    let keyboard_enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
    if !keyboard_enhanced {
        log::warn!("keyboard enhancement unavailable; held keys expire by timeout");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input thread stopped: {}", e);
                break;
            }
        }
    });

    let seed: u64 = rand::random();
    let result = game_loop(&mut out, &GameConfig::default(), seed, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match result {
        Ok(state) => {
            log::info!("session ended: {:?}, final score {}", state.status, state.score.value);
            Ok(())
        }
        Err(e) => {
            log::error!("session aborted: {}", e);
            Err(e)
        }
    }
}
