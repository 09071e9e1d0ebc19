//! Greedy single-ply steering for computer-controlled cycles

use super::actor::Actor;
use super::collision::CollisionRule;
use super::grid::{Dir, Grid};
use crate::config::{Difficulty, GameMode};
use rand::Rng;

/// Score added to headings that close in on the nearest opponent
const SEEK_BONUS: i32 = 8;

/// Tuning knobs for one AI actor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiProfile {
    pub lookahead: i32,
    pub inertia: u32,    // % chance to hold a safe heading
    pub aggression: u32, // % chance per heading to apply the seek bonus
    pub perpendicular: bool,
}

impl AiProfile {
    /// AutoTron overrides the slot's difficulty
    pub fn for_slot(difficulty: Difficulty, mode: GameMode) -> Self {
        if mode == GameMode::Auto {
            return Self { lookahead: 20, inertia: 30, aggression: 40, perpendicular: true };
        }
        match difficulty {
            Difficulty::Easy => Self { lookahead: 2, inertia: 85, aggression: 5, perpendicular: false },
            Difficulty::Medium => Self { lookahead: 5, inertia: 70, aggression: 15, perpendicular: false },
            Difficulty::Hard => Self { lookahead: 12, inertia: 50, aggression: 30, perpendicular: true },
        }
    }
}

/// Free cells along `dir` from (x, y), stopping at the first blocked cell
fn scan(grid: &Grid, rule: &CollisionRule, team: u8, x: i32, y: i32, dir: Dir, limit: i32) -> i32 {
    let (mut cx, mut cy) = (x, y);
    let mut space = 0;
    for _ in 0..limit {
        cx += dir.dx();
        cy += dir.dy();
        if rule.is_blocked(grid, cx, cy, team) {
            break;
        }
        space += 1;
    }
    space
}

/// Position of the closest other racing actor
fn nearest_opponent(me: &Actor, actors: &[Actor]) -> Option<(i32, i32)> {
    actors
        .iter()
        .filter(|a| a.index != me.index && a.is_racing())
        .min_by_key(|a| {
            let (dx, dy) = ((a.x - me.x) as i64, (a.y - me.y) as i64);
            dx * dx + dy * dy
        })
        .map(|a| (a.x, a.y))
}

#[inline]
fn dist2(x: i32, y: i32, tx: i32, ty: i32) -> i64 {
    let (dx, dy) = ((x - tx) as i64, (y - ty) as i64);
    dx * dx + dy * dy
}

/// Pick a heading for `actors[me]`. Never reverses, never picks a dead end
/// while an open heading exists.
pub fn steer<R: Rng>(
    me: usize,
    actors: &[Actor],
    grid: &Grid,
    rule: &CollisionRule,
    profile: AiProfile,
    rng: &mut R,
) -> Dir {
    let p = &actors[me];
    let team = p.team();

    let (ax, ay) = p.ahead(p.dir);
    if !rule.is_blocked(grid, ax, ay, team) && rng.gen_range(0..100) < profile.inertia {
        return p.dir;
    }

    let target = nearest_opponent(p, actors);

    let mut best = p.dir;
    let mut best_score = i32::MIN;
    for dir in Dir::CARDINALS {
        if dir == p.dir.opposite() {
            continue;
        }

        let mut space = scan(grid, rule, team, p.x, p.y, dir, profile.lookahead);
        if space == 0 {
            continue;
        }
        if profile.perpendicular {
            let (sx, sy) = p.ahead(dir);
            for side in dir.perpendicular() {
                space += scan(grid, rule, team, sx, sy, side, profile.lookahead / 2);
            }
        }

        let mut seek = 0;
        if let Some((tx, ty)) = target {
            if rng.gen_range(0..100) < profile.aggression {
                let (nx, ny) = p.ahead(dir);
                if dist2(nx, ny, tx, ty) < dist2(p.x, p.y, tx, ty) {
                    seek = SEEK_BONUS;
                }
            }
        }

        let score = space + seek;
        if score > best_score {
            best_score = score;
            best = dir;
        }
    }
    best
}
