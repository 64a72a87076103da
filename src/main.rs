//! Terminal pairs runner (default binary).
//!
//! This is the primary gameplay entrypoint. It wires the event sources
//! (keyboard taps, simulated tilt, adapter commands) into the core round,
//! drains render intents into the physics substrate, and draws frames.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_pairs::adapter::{ack_line, build_observation, Adapter, ClientCommand, OutboundMessage};
use tui_pairs::core::{Round, RoundSnapshot};
use tui_pairs::input::{handle_key_event, should_quit, InputEvent, TiltSimulator};
use tui_pairs::term::{
    home_positions, table_bounds, FieldSubstrate, TableView, TerminalRenderer, Viewport,
};
use tui_pairs::types::{DEFAULT_SLOT_COUNT, TICK_MS};

/// Ticks between observation heartbeats when no intents were emitted.
const OBS_HEARTBEAT_TICKS: u32 = 30;

fn main() -> Result<()> {
    let mut round = Round::deal(DEFAULT_SLOT_COUNT, seed_from_clock())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    // The field force is scoped to the session: zeroed on every exit path.
    round.set_field_active(true);
    let result = run(&mut term, &mut round);
    round.set_field_active(false);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed_from_clock() -> u32 {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    now.subsec_nanos() ^ now.as_secs() as u32
}

fn new_substrate(slot_count: usize) -> FieldSubstrate {
    FieldSubstrate::new(home_positions(slot_count), table_bounds(slot_count))
}

fn run(term: &mut TerminalRenderer, round: &mut Round) -> Result<()> {
    let mut adapter = Adapter::start_from_env(round.slot_count());
    let view = TableView::default();
    let mut substrate = new_substrate(round.slot_count());
    let mut tilt = TiltSimulator::new();
    let mut snapshot = RoundSnapshot::default();

    // Level table until the first nudge/sample arrives.
    let (ax, ay, orientation) = tilt.sample();
    round.orientation_sample(ax, ay, orientation);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut obs_seq: u64 = 0;
    let mut ticks_since_obs: u32 = 0;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        round.snapshot_into(&mut snapshot);
        let frame = view.render(&snapshot, &substrate, Viewport::new(w, h));
        term.draw(&frame)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    match handle_key_event(key) {
                        Some(InputEvent::Tap(slot)) => {
                            round.choose_slot(slot);
                        }
                        Some(InputEvent::TiltNudge { dx, dy }) => {
                            tilt.nudge(dx, dy);
                            let (ax, ay, orientation) = tilt.sample();
                            round.orientation_sample(ax, ay, orientation);
                        }
                        Some(InputEvent::Restart) => {
                            restart(round, &mut tilt, &mut substrate)?;
                        }
                        None => {}
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if let Some(adapter) = adapter.as_mut() {
                while let Some(inbound) = adapter.try_recv() {
                    let applied = match inbound.command {
                        ClientCommand::Tap(slot) => round.choose_slot(slot),
                        ClientCommand::Tilt {
                            ax,
                            ay,
                            orientation,
                        } => {
                            round.orientation_sample(ax, ay, orientation);
                            true
                        }
                        ClientCommand::Restart => {
                            restart(round, &mut tilt, &mut substrate)?;
                            true
                        }
                    };
                    adapter.send(OutboundMessage::ToClient {
                        client_id: inbound.client_id,
                        line: ack_line(inbound.seq, applied),
                    });
                }
            }

            let intents = round.take_intents();
            for intent in &intents {
                substrate.apply_intent(intent);
            }

            ticks_since_obs += 1;
            if let Some(adapter) = adapter.as_ref() {
                if !intents.is_empty() || ticks_since_obs >= OBS_HEARTBEAT_TICKS {
                    round.snapshot_into(&mut snapshot);
                    obs_seq += 1;
                    let obs = build_observation(&snapshot, &intents, obs_seq);
                    if let Ok(line) = serde_json::to_string(&obs) {
                        adapter.broadcast_line(line);
                    }
                    ticks_since_obs = 0;
                }
            }

            substrate.step(TICK_MS as f32 / 1000.0);
        }
    }
}

/// Re-deal with a fresh seed; the substrate rebuilds on its home grid.
fn restart(round: &mut Round, tilt: &mut TiltSimulator, substrate: &mut FieldSubstrate) -> Result<()> {
    round.restart(seed_from_clock())?;
    round.set_field_active(true);
    tilt.reset();
    let (ax, ay, orientation) = tilt.sample();
    round.orientation_sample(ax, ay, orientation);
    *substrate = new_substrate(round.slot_count());
    Ok(())
}
