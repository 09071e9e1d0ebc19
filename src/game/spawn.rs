//! Start positions: symmetric layouts for elimination modes, random free cells
//! for respawning modes

use super::actor::Actor;
use super::grid::{Cell, Dir, Grid};
use rand::Rng;

/// Random cell attempts before falling back to the grid center
const SPAWN_ATTEMPTS: usize = 500;
/// Random spawns keep this far from the walls
const SPAWN_MARGIN: i32 = 4;

/// Fractional start positions, filled in slot order
const LAYOUT: [(f32, f32, Dir); 8] = [
    (0.25, 0.50, Dir::Right),
    (0.75, 0.50, Dir::Left),
    (0.25, 0.25, Dir::Right),
    (0.75, 0.25, Dir::Left),
    (0.25, 0.75, Dir::Right),
    (0.75, 0.75, Dir::Left),
    (0.50, 0.25, Dir::Down),
    (0.50, 0.75, Dir::Up),
];

/// Fixed layout position for slot `i`, clamped off the wall ring
pub fn layout_position(grid: &Grid, i: usize) -> (i32, i32, Dir) {
    let (fx, fy, dir) = LAYOUT[i % LAYOUT.len()];
    let (w, h) = (grid.width(), grid.height());
    let x = ((fx * w as f32) as i32).clamp(2, (w - 3).max(2));
    let y = ((fy * h as f32) as i32).clamp(2, (h - 3).max(2));
    (x, y, dir)
}

/// Search for an empty interior cell with an empty interior neighbor.
/// Returns `None` once every attempt is used up.
pub fn find_free_cell<R: Rng>(grid: &Grid, rng: &mut R) -> Option<(i32, i32, Dir)> {
    let span_x = grid.width() - 2 * SPAWN_MARGIN;
    let span_y = grid.height() - 2 * SPAWN_MARGIN;
    if span_x <= 0 || span_y <= 0 {
        return None;
    }

    for _ in 0..SPAWN_ATTEMPTS {
        let x = SPAWN_MARGIN + rng.gen_range(0..span_x);
        let y = SPAWN_MARGIN + rng.gen_range(0..span_y);
        if grid.cell(x, y) != Cell::Empty {
            continue;
        }
        let open = Dir::CARDINALS.into_iter().find(|d| {
            let (nx, ny) = (x + d.dx(), y + d.dy());
            grid.is_interior(nx, ny) && grid.cell(nx, ny) == Cell::Empty
        });
        if let Some(dir) = open {
            return Some((x, y, dir));
        }
    }
    None
}

/// Place an actor at a random free cell, or the grid center when the grid is full.
/// The center fallback does not check occupancy.
pub fn spawn_random<R: Rng>(grid: &mut Grid, actor: &mut Actor, rng: &mut R) {
    let (x, y, dir) = find_free_cell(grid, rng).unwrap_or_else(|| {
        tracing::warn!(actor = actor.index, "no free spawn cell, using grid center");
        (grid.width() / 2, grid.height() / 2, Dir::Right)
    });
    place(grid, actor, x, y, dir);
}

/// Place every actor at its fixed layout position
pub fn spawn_fixed(grid: &mut Grid, actors: &mut [Actor]) {
    for actor in actors.iter_mut() {
        let (x, y, dir) = layout_position(grid, actor.index);
        place(grid, actor, x, y, dir);
    }
}

fn place(grid: &mut Grid, actor: &mut Actor, x: i32, y: i32, dir: Dir) {
    actor.place(x, y, dir);
    grid.claim(x, y, actor.index, dir);
}
