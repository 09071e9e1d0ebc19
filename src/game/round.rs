//! Per-round simulation state and the fixed-tick step

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use rand::Rng;

use super::actor::Actor;
use super::ai::{self, AiProfile};
use super::camera::{self, Camera};
use super::collision::CollisionRule;
use super::grid::{Cell, Dir, Grid};
use super::spawn;
use crate::config::{GameMode, Slot, MAX_ACTORS};

/// Key presses buffered per human beyond this are dropped
const MAX_QUEUED_TURNS: usize = 4;

/// How a decided round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Winner(usize),
    Team(u8),
    Draw,
    /// Endless survival and AutoTron have no winner
    NoResult,
}

/// Tick counts derived from the configured tick length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub tick: Duration,
    pub flash_ticks: u64,
    pub flash_toggle: u64,
    pub respawn_ticks: u64,
}

impl Timings {
    pub fn new(tick_ms: u64, mode: GameMode) -> Self {
        let tick_ms = tick_ms.max(1);
        let flash_ticks = (2000 / tick_ms).max(2);
        let flash_toggle = (250 / tick_ms).max(1);
        let respawn_ms = if mode == GameMode::Auto { 3000 } else { 10000 };
        let respawn_ticks = (respawn_ms / tick_ms).max(flash_ticks + 2);
        Self {
            tick: Duration::from_millis(tick_ms),
            flash_ticks,
            flash_toggle,
            respawn_ticks,
        }
    }
}

/// Everything one round owns. Built in setup, dropped when the round ends.
pub struct RoundState {
    pub mode: GameMode,
    pub grid: Grid,
    pub actors: Vec<Actor>,
    pub rule: CollisionRule,
    pub timings: Timings,
    pub tick: u64,
    pub over: bool,
    pub result: Option<RoundResult>,
    pub camera: Option<Camera>,
    pub follow: usize,
    pending: Vec<VecDeque<Dir>>,
    started: Instant,
}

impl RoundState {
    /// Build the grid, seat one actor per slot and place them
    pub fn new<R: Rng>(
        mode: GameMode,
        slots: &[Slot],
        world: (u16, u16),
        camera: Option<Camera>,
        timings: Timings,
        rng: &mut R,
    ) -> Self {
        let count = mode.actor_count().min(slots.len()).min(MAX_ACTORS);
        let slots = &slots[..count];
        let teams: Vec<u8> = slots.iter().map(|s| s.team).collect();

        let mut grid = Grid::new(world.0, world.1);
        let mut actors: Vec<Actor> = slots
            .iter()
            .enumerate()
            .map(|(i, &slot)| Actor::new(i, slot))
            .collect();

        if mode.respawns() {
            for actor in actors.iter_mut() {
                spawn::spawn_random(&mut grid, actor, rng);
            }
        } else {
            spawn::spawn_fixed(&mut grid, &mut actors);
        }

        let mut state = Self {
            mode,
            grid,
            actors,
            rule: CollisionRule::new(mode, &teams),
            timings,
            tick: 1,
            over: false,
            result: None,
            camera,
            follow: 0,
            pending: vec![VecDeque::new(); count],
            started: Instant::now(),
        };
        if state.camera.is_some() {
            state.follow = match mode {
                GameMode::Endless => state.human_index().unwrap_or(0),
                _ => camera::pick_follow_target(&state.actors),
            };
            state.center_camera();
        }
        tracing::info!(mode = mode.name(), actors = count, w = world.0, h = world.1, "round setup");
        state
    }

    pub fn human_index(&self) -> Option<usize> {
        self.actors.iter().position(|a| a.is_human())
    }

    /// Restart the wall clock; called when the countdown ends
    pub fn start_clock(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Queue a human heading change. One queued request is applied per
    /// step, checked against the heading held when it is applied.
    pub fn queue_turn(&mut self, actor: usize, dir: Dir) {
        let Some(a) = self.actors.get(actor) else {
            return;
        };
        if !a.is_human() || !a.is_racing() || dir == Dir::None {
            return;
        }
        let queue = &mut self.pending[actor];
        if queue.len() < MAX_QUEUED_TURNS {
            queue.push_back(dir);
        }
    }

    /// Advance one tick: steer, move, mark deaths, respawn, follow, judge
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        for i in 0..self.actors.len() {
            if !self.actors[i].is_racing() {
                self.pending[i].clear();
                continue;
            }
            if let Some(dir) = self.pending[i].pop_front() {
                let held = self.actors[i].dir;
                self.actors[i].request_turn(held, dir);
            }
        }

        for i in 0..self.actors.len() {
            let a = &self.actors[i];
            if a.is_human() || !a.is_racing() {
                continue;
            }
            let profile = AiProfile::for_slot(a.slot.difficulty, self.mode);
            let dir = ai::steer(i, &self.actors, &self.grid, &self.rule, profile, rng);
            self.actors[i].dir = dir;
        }

        for i in 0..self.actors.len() {
            self.move_actor(i);
        }

        let tick = self.tick;
        for a in self.actors.iter_mut() {
            if a.mark_death(tick) {
                tracing::debug!(actor = a.index, tick, x = a.x, y = a.y, "actor died");
            }
        }

        if self.mode.respawns() {
            self.process_respawns(rng);
        }

        if self.camera.is_some() {
            if self.mode == GameMode::Auto {
                let next = camera::update_follow_target(self.follow, &self.actors);
                if next != self.follow {
                    tracing::debug!(from = self.follow, to = next, "camera switched target");
                    self.follow = next;
                }
            }
            self.center_camera();
        }

        if !self.over {
            if let Some(result) = self.judge() {
                self.over = true;
                self.result = Some(result);
                tracing::info!(?result, tick, "round over");
            }
        }

        self.tick += 1;
    }

    fn move_actor(&mut self, i: usize) {
        let a = &self.actors[i];
        if !a.is_racing() {
            return;
        }
        let dir = a.dir;
        let (nx, ny) = a.ahead(dir);
        if self.rule.is_blocked(&self.grid, nx, ny, a.team()) {
            self.actors[i].alive = false;
            return;
        }
        let a = &mut self.actors[i];
        a.x = nx;
        a.y = ny;
        a.trail.push((nx, ny));
        self.grid.claim(nx, ny, i, dir);
    }

    fn process_respawns<R: Rng>(&mut self, rng: &mut R) {
        let tick = self.tick;
        for i in 0..self.actors.len() {
            let a = &self.actors[i];
            if a.alive {
                continue;
            }
            let Some(since) = a.ticks_since_death(tick) else {
                continue;
            };

            if a.active {
                if since > self.timings.flash_ticks {
                    self.erase_trail(i);
                    self.actors[i].active = false;
                }
            } else if since >= self.timings.respawn_ticks {
                if self.mode == GameMode::Endless && a.is_human() {
                    continue;
                }
                spawn::spawn_random(&mut self.grid, &mut self.actors[i], rng);
                tracing::debug!(actor = i, tick, "actor respawned");
            }
        }
    }

    /// Clear cells the actor still owns and forget its trail
    fn erase_trail(&mut self, i: usize) {
        let trail = std::mem::take(&mut self.actors[i].trail);
        for (x, y) in trail {
            if self.grid.cell(x, y) == Cell::Owned(i) {
                self.grid.release(x, y);
            }
        }
    }

    /// Bright/normal phase for a trail inside its flash window
    pub fn flash_phase(&self, i: usize) -> Option<bool> {
        let a = self.actors.get(i)?;
        if !self.mode.respawns() || a.alive || !a.active {
            return None;
        }
        let since = a.ticks_since_death(self.tick)?;
        (since <= self.timings.flash_ticks).then(|| (since / self.timings.flash_toggle) % 2 == 0)
    }

    fn center_camera(&mut self) {
        if let (Some(cam), Some(target)) = (self.camera.as_mut(), self.actors.get(self.follow)) {
            cam.center_on(target.x, target.y);
        }
    }

    /// Win check for the current tick, `None` while the round goes on
    pub fn judge(&self) -> Option<RoundResult> {
        match self.mode {
            GameMode::Endless => self
                .actors
                .iter()
                .any(|a| a.is_human() && !a.alive)
                .then_some(RoundResult::NoResult),
            GameMode::Auto => None,
            GameMode::Teams => {
                let alive_in = |team: u8| self.actors.iter().any(|a| a.alive && a.team() == team);
                match (alive_in(0), alive_in(1)) {
                    (true, true) => None,
                    (false, false) => Some(RoundResult::Draw),
                    (true, false) => Some(RoundResult::Team(0)),
                    (false, true) => Some(RoundResult::Team(1)),
                }
            }
            GameMode::Duel | GameMode::FreeForAll => {
                let mut alive = self.actors.iter().filter(|a| a.alive);
                match (alive.next(), alive.next()) {
                    (None, _) => Some(RoundResult::Draw),
                    (Some(last), None) => Some(RoundResult::Winner(last.index)),
                    _ => None,
                }
            }
        }
    }

    /// Did a human take this round
    pub fn human_won(&self) -> bool {
        match self.result {
            Some(RoundResult::Winner(i)) => self.actors.get(i).is_some_and(|a| a.is_human()),
            Some(RoundResult::Team(t)) => self.actors.iter().any(|a| a.is_human() && a.team() == t),
            _ => false,
        }
    }
}
