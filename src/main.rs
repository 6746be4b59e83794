//! Coin Dash entry point
//!
//! Terminal setup, the fixed-timestep loop, and input mapping live here.
//! All gameplay is in [`coin_dash::sim`]; this binary only shuttles intents
//! in and snapshots out.

use std::collections::HashMap;
use std::io::{BufWriter, Stdout, stdout};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};

use coin_dash::consts::{MAX_SUBSTEPS, SIM_DT};
use coin_dash::highscores::HighScores;
use coin_dash::sim::{Arena, GameState, Snapshot, TickInput, tick};
use coin_dash::tui::{self, CELL_H, CELL_W};
use coin_dash::tuning::Tuning;

/// A key counts as held if its press/repeat event arrived within this many
/// frames; most terminals never deliver release events.
const HOLD_WINDOW: u64 = 4;

/// Frame pacing target (~60 FPS); the accumulator absorbs the jitter.
const FRAME: Duration = Duration::from_millis(16);

fn is_held(last_seen: &HashMap<KeyCode, u64>, key: KeyCode, frame: u64) -> bool {
    last_seen
        .get(&key)
        .map(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let tuning = std::env::args()
        .nth(1)
        .map(|path| Tuning::load_or_default(Path::new(&path)))
        .unwrap_or_default();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed);

    let (cols, rows) = terminal::size()?;
    let arena = Arena::new(cols as f32 * CELL_W, rows as f32 * CELL_H);
    let mut state = GameState::with_tuning(seed, arena, tuning);
    let mut scores = HighScores::new();

    terminal::enable_raw_mode()?;
    let mut out = BufWriter::new(stdout());
    execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut out, &mut state, &mut scores);

    // Always restore the terminal, even if the loop errored
    execute!(out, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    out: &mut BufWriter<Stdout>,
    state: &mut GameState,
    scores: &mut HighScores,
) -> std::io::Result<()> {
    let mut input = TickInput::default();
    let mut last_seen: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();
    let mut accumulator = 0.0f32;
    let mut was_game_over = false;

    loop {
        // Drain pending events without blocking the frame
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('r') => input.restart = true,
                    KeyCode::Left | KeyCode::Char('a') => {
                        last_seen.insert(KeyCode::Left, frame);
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        last_seen.insert(KeyCode::Right, frame);
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    input.resize = Some((cols as f32 * CELL_W, rows as f32 * CELL_H));
                }
                _ => {}
            }
        }

        input.move_left = is_held(&last_seen, KeyCode::Left, frame);
        input.move_right = is_held(&last_seen, KeyCode::Right, frame);

        let now = Instant::now();
        accumulator += now.duration_since(last).as_secs_f32().min(0.25);
        last = now;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;

            // One-shot intents are consumed by the first substep
            input.restart = false;
            input.resize = None;
        }

        let snap = Snapshot::capture(state);

        // Record the run once, at the moment it ends
        if snap.game_over && !was_game_over {
            if let Some(rank) = scores.record(snap.score, snap.level) {
                log::info!("run placed #{rank} with score {}", snap.score);
            }
        }
        was_game_over = snap.game_over;

        tui::render(out, &snap, scores)?;

        frame += 1;
        let spent = last.elapsed();
        if spent < FRAME {
            std::thread::sleep(FRAME - spent);
        }
    }
}
