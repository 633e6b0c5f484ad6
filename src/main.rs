mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use castle_defense::assets::{spawn_loader, AssetEvent, AssetKind, AssetRequest, Sprite};
use castle_defense::config::Settings;
use castle_defense::entities::{CASTLE_SIZE, ENEMY_SIZE};
use castle_defense::game::{FrameOutcome, Game};
use castle_defense::input::{Action, InputState};
use display::Layout;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal is in raw mode while the game runs, so logs go to a file.
fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let file = File::create(&settings.log_file)
        .with_context(|| format!("failed to create log file {}", settings.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Cooperative main loop.  Each iteration drains input, collects loaded
/// assets, polls the spawn timers, runs one frame and redraws; callbacks
/// never overlap, so the game state needs no locking.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    settings: &Settings,
) -> anyhow::Result<()> {
    let (cols, rows) = terminal::size().context("failed to read terminal size")?;
    let layout = Layout::new(cols, rows, settings.cell_width, settings.cell_height);
    let mut game = Game::new(
        layout.world_width(),
        layout.world_height(),
        settings.spawn_intervals(),
    );
    info!(
        width = game.world.width,
        height = game.world.height,
        "play area ready"
    );

    let asset_rx = spawn_loader(asset_requests(settings, &layout));
    let mut sprites: HashMap<AssetKind, Sprite> = HashMap::new();

    let mut input = InputState::new();
    let mut rng = thread_rng();
    let frame_interval = settings.frame_interval();

    loop {
        let frame_start = Instant::now();
        input.next_frame();

        // ── Input (non-blocking) ──────────────────────────────────────────────
        while let Ok(event) = rx.try_recv() {
            if let Event::Key(key) = event {
                input.handle_key(key);
            }
        }
        for action in input.drain_actions() {
            if action == Action::Quit {
                info!(score = game.world.state.score, "quit");
                return Ok(());
            }
            game.apply(action, Instant::now());
        }

        // ── Asset readiness ───────────────────────────────────────────────────
        while let Ok(AssetEvent { kind, sprite }) = asset_rx.try_recv() {
            sprites.insert(kind, sprite);
            game.asset_ready(kind);
        }

        // ── Spawn timers, then the frame itself ───────────────────────────────
        game.poll_spawners(Instant::now(), &mut rng);
        if let FrameOutcome::GameOver { final_score } = game.frame(input.movement()) {
            info!(final_score, "game over");
        }

        display::render(out, &game, &layout, &sprites)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_interval {
            thread::sleep(frame_interval - elapsed);
        }
    }
}

fn asset_requests(settings: &Settings, layout: &Layout) -> Vec<AssetRequest> {
    let (castle_cols, castle_rows) = layout.footprint(CASTLE_SIZE, CASTLE_SIZE);
    let (knight_cols, knight_rows) = layout.footprint(ENEMY_SIZE, ENEMY_SIZE);
    vec![
        AssetRequest {
            kind: AssetKind::Castle,
            path: settings.castle_image.clone(),
            cols: castle_cols,
            rows: castle_rows,
        },
        AssetRequest {
            kind: AssetKind::Knight,
            path: settings.knight_image.clone(),
            cols: knight_cols,
            rows: knight_rows,
        },
    ]
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_tracing(&settings)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread to blocking event reads so the loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, &settings);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        let error = format!("{err:#}");
        tracing::error!(%error, "exited with error");
    }
    result
}
