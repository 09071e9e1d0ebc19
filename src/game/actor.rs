use super::grid::Dir;
use crate::config::Slot;

/// One light-cycle on the grid.
///
/// `alive == false && active == true` means the actor just died and its trail
/// is still on the grid (flashing in respawning modes). `active == false`
/// means the trail has been erased and the actor waits to respawn.
#[derive(Debug, Clone)]
pub struct Actor {
    pub index: usize,
    pub slot: Slot,
    pub x: i32,
    pub y: i32,
    pub dir: Dir,
    pub alive: bool,
    pub active: bool,
    pub death_tick: Option<u64>,
    pub trail: Vec<(i32, i32)>,
}

impl Actor {
    pub fn new(index: usize, slot: Slot) -> Self {
        Self {
            index,
            slot,
            x: 0,
            y: 0,
            dir: Dir::Right,
            alive: false,
            active: false,
            death_tick: None,
            trail: Vec::new(),
        }
    }

    #[inline]
    pub fn is_human(&self) -> bool {
        self.slot.human
    }

    #[inline]
    pub fn team(&self) -> u8 {
        self.slot.team
    }

    /// On the grid and still moving
    #[inline]
    pub fn is_racing(&self) -> bool {
        self.alive && self.active
    }

    /// Cell one step ahead along `dir`
    #[inline]
    pub fn ahead(&self, dir: Dir) -> (i32, i32) {
        (self.x + dir.dx(), self.y + dir.dy())
    }

    /// Accept a human heading change unless it reverses `held`
    pub fn request_turn(&mut self, held: Dir, wanted: Dir) -> bool {
        if wanted == Dir::None || wanted == held.opposite() {
            return false;
        }
        self.dir = wanted;
        true
    }

    /// Put the actor back on the grid at a fresh start cell
    pub fn place(&mut self, x: i32, y: i32, dir: Dir) {
        self.x = x;
        self.y = y;
        self.dir = dir;
        self.alive = true;
        self.active = true;
        self.death_tick = None;
        self.trail.clear();
        self.trail.push((x, y));
    }

    /// Record the tick of death once
    pub fn mark_death(&mut self, tick: u64) -> bool {
        if !self.alive && self.active && self.death_tick.is_none() {
            self.death_tick = Some(tick);
            return true;
        }
        false
    }

    pub fn ticks_since_death(&self, tick: u64) -> Option<u64> {
        self.death_tick.map(|t| tick.saturating_sub(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, PlayerColor};

    fn actor() -> Actor {
        Actor::new(0, Slot::ai(PlayerColor::Cyan, Difficulty::Easy))
    }

    #[test]
    fn reversal_is_refused() {
        let mut a = actor();
        a.place(5, 5, Dir::Right);
        assert!(!a.request_turn(Dir::Right, Dir::Left));
        assert_eq!(a.dir, Dir::Right);
        assert!(a.request_turn(Dir::Right, Dir::Up));
        assert_eq!(a.dir, Dir::Up);
    }

    #[test]
    fn turn_is_checked_against_held_heading() {
        let mut a = actor();
        a.place(5, 5, Dir::Right);
        assert!(a.request_turn(Dir::Right, Dir::Up));
        // Down reverses Up but not the heading held at the start of the tick
        assert!(a.request_turn(Dir::Right, Dir::Down));
        assert!(!a.request_turn(Dir::Right, Dir::Left));
        assert_eq!(a.dir, Dir::Down);
    }

    #[test]
    fn death_tick_recorded_once() {
        let mut a = actor();
        a.place(5, 5, Dir::Right);
        a.alive = false;
        assert!(a.mark_death(7));
        assert!(!a.mark_death(9));
        assert_eq!(a.death_tick, Some(7));
        assert_eq!(a.ticks_since_death(12), Some(5));
    }

    #[test]
    fn place_resets_trail() {
        let mut a = actor();
        a.trail.extend([(1, 1), (1, 2)]);
        a.place(3, 4, Dir::Down);
        assert_eq!(a.trail, vec![(3, 4)]);
        assert!(a.is_racing());
        assert_eq!(a.death_tick, None);
    }
}
