//! The phase machine that drives rounds: setup, countdown, active ticks,
//! round over, and replay or exit

use std::time::Duration;

use crossterm::event::KeyCode;
use rand::Rng;

use super::camera::Camera;
use super::grid::Dir;
use super::port::{Display, Input, Weight};
use super::render;
use super::round::{RoundResult, RoundState, Timings};
use crate::config::{keyset, GameMode, Slot};
use crate::error::{GameError, Result};
use crate::scores::{RoundReport, ScoreStore};

/// Smallest usable viewport; the terminal needs one more row for the HUD
pub const MIN_VIEW_W: u16 = 30;
pub const MIN_VIEW_H: u16 = 16;

/// Camera worlds are 3x the viewport but never smaller than this
const MIN_WORLD_W: u16 = 150;
const MIN_WORLD_H: u16 = 80;

const COUNTDOWN_STEP: Duration = Duration::from_millis(600);
const COUNTDOWN_GO: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Setup,
    Countdown,
    Active,
    RoundOver,
    Exit,
}

/// What a key means during play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Restart,
    Turn(usize, Dir),
    Ignore,
}

/// Per-session knobs read once from settings and the command line
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub tick_ms: u64,
    /// Follow the action on an oversized world in AutoTron
    pub auto_camera: bool,
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Map a key to quit, restart, or the first human whose keyset binds it
pub fn classify(code: KeyCode, mode: GameMode, state: &RoundState) -> Command {
    let code = normalize(code);
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Command::Quit,
        KeyCode::Char('r') if mode != GameMode::Auto => return Command::Restart,
        _ => {}
    }
    for a in state.actors.iter().filter(|a| a.is_human() && a.is_racing()) {
        let keys = keyset(a.slot.keyset);
        let dir = match code {
            c if c == keys.up => Dir::Up,
            c if c == keys.down => Dir::Down,
            c if c == keys.left => Dir::Left,
            c if c == keys.right => Dir::Right,
            _ => continue,
        };
        return Command::Turn(a.index, dir);
    }
    Command::Ignore
}

/// World size and camera for a mode on a given viewport
pub fn world_for(mode: GameMode, view: (u16, u16), auto_camera: bool) -> ((u16, u16), Option<Camera>) {
    let (vw, vh) = view;
    let use_camera = mode == GameMode::Endless || (mode == GameMode::Auto && auto_camera);
    if use_camera {
        let world = (vw.saturating_mul(3).max(MIN_WORLD_W), vh.saturating_mul(3).max(MIN_WORLD_H));
        (world, Some(Camera::new(vw, vh, world.0 as i32, world.1 as i32)))
    } else {
        (view, None)
    }
}

/// Play rounds until the user quits. Returns the last decided result.
///
/// Fails fast with `ViewportTooSmall` before touching any state.
pub fn run<T, S, R>(
    term: &mut T,
    scores: &mut S,
    rng: &mut R,
    mode: GameMode,
    slots: &[Slot],
    options: SessionOptions,
) -> Result<Option<RoundResult>>
where
    T: Display + Input,
    S: ScoreStore,
    R: Rng,
{
    let (width, height) = term.size();
    let view = (width, height.saturating_sub(1));
    if view.0 < MIN_VIEW_W || view.1 < MIN_VIEW_H {
        return Err(GameError::ViewportTooSmall { width: view.0, height: view.1 });
    }

    let (world, camera) = world_for(mode, view, options.auto_camera);
    let timings = Timings::new(options.tick_ms, mode);
    let mut last = None;
    let mut round: Option<RoundState> = None;
    let mut phase = Phase::Setup;

    while phase != Phase::Exit {
        phase = match phase {
            Phase::Setup => {
                let state = round.insert(RoundState::new(mode, slots, world, camera, timings, rng));
                term.clear_region(0, 0, width as i32, height as i32);
                render::draw_frame(term, state);
                term.flush()?;
                if mode == GameMode::Auto {
                    state.start_clock();
                    Phase::Active
                } else {
                    Phase::Countdown
                }
            }
            Phase::Countdown => match round.as_mut() {
                Some(state) => {
                    countdown(term, state)?;
                    state.start_clock();
                    Phase::Active
                }
                None => Phase::Setup,
            },
            Phase::Active => match round.as_mut() {
                Some(state) => active_tick(term, state, rng)?,
                None => Phase::Setup,
            },
            Phase::RoundOver => match round.take() {
                Some(state) => round_over(term, scores, &state, &mut last)?,
                None => Phase::Setup,
            },
            Phase::Exit => Phase::Exit,
        };
    }
    Ok(last)
}

/// 3, 2, 1, GO! over a still frame with player labels
fn countdown<T: Display + Input>(term: &mut T, state: &RoundState) -> Result<()> {
    for n in (1..=3).rev() {
        render::draw_frame(term, state);
        render::draw_labels(term, state);
        render::draw_centered(term, state, 0, &format!(" {} ", n), Weight::Bold);
        term.flush()?;
        term.sleep(COUNTDOWN_STEP);
    }
    render::draw_centered(term, state, 0, " GO! ", Weight::Bold);
    term.flush()?;
    term.sleep(COUNTDOWN_GO);
    Ok(())
}

/// Input, simulation step, render, sleep
fn active_tick<T, R>(term: &mut T, state: &mut RoundState, rng: &mut R) -> Result<Phase>
where
    T: Display + Input,
    R: Rng,
{
    while let Some(code) = term.poll_key()? {
        match classify(code, state.mode, state) {
            Command::Quit => return Ok(Phase::Exit),
            Command::Restart => {
                tracing::info!(tick = state.tick, "round restarted");
                return Ok(Phase::Setup);
            }
            Command::Turn(i, dir) => state.queue_turn(i, dir),
            Command::Ignore => {}
        }
    }

    state.step(rng);
    render::draw_frame(term, state);
    term.flush()?;
    term.sleep(state.timings.tick);

    Ok(if state.over { Phase::RoundOver } else { Phase::Active })
}

/// Report the round, then replay or exit
fn round_over<T, S>(term: &mut T, scores: &mut S, state: &RoundState, last: &mut Option<RoundResult>) -> Result<Phase>
where
    T: Display + Input,
    S: ScoreStore,
{
    let result = state.result.unwrap_or(RoundResult::NoResult);
    *last = Some(result);
    let report = RoundReport {
        mode: state.mode,
        result,
        human_won: state.human_won(),
        elapsed: state.elapsed(),
    };
    if let Err(e) = scores.record_round(&report) {
        tracing::warn!("could not save scores: {}", e);
    }

    if state.mode == GameMode::Auto {
        return Ok(Phase::Setup);
    }

    loop {
        match normalize(term.wait_key()?) {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(Phase::Exit),
            KeyCode::Char('r') => return Ok(Phase::Setup),
            _ => {}
        }
    }
}
