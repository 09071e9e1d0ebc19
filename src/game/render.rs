//! Glyph selection and frame composition. Everything is pushed through the
//! `Display` port; nothing is read back.

use super::camera;
use super::grid::{Cell, Dir, Grid};
use super::port::{Display, Ink, Weight};
use super::round::{RoundResult, RoundState};
use crate::config::GameMode;

const HEAD: char = '●';
const FLASH: char = '█';

/// Trail glyph for a cell entered heading `from` and left heading `to`
pub fn trail_glyph(from: Dir, to: Dir) -> char {
    let straight = if to.is_vertical() { '│' } else { '─' };
    match (from, to) {
        (Dir::Up, Dir::Right) | (Dir::Left, Dir::Down) => '╭',
        (Dir::Up, Dir::Left) | (Dir::Right, Dir::Down) => '╮',
        (Dir::Down, Dir::Right) | (Dir::Left, Dir::Up) => '╰',
        (Dir::Down, Dir::Left) | (Dir::Right, Dir::Up) => '╯',
        _ => straight,
    }
}

/// Rounded box glyph for a wall-ring cell
pub fn wall_glyph(grid: &Grid, x: i32, y: i32) -> char {
    let (top, bottom) = (y == 0, y == grid.height() - 1);
    let (left, right) = (x == 0, x == grid.width() - 1);
    match (top, bottom, left, right) {
        (true, _, true, _) => '╭',
        (true, _, _, true) => '╮',
        (_, true, true, _) => '╰',
        (_, true, _, true) => '╯',
        (true, _, _, _) | (_, true, _, _) => '─',
        _ => '│',
    }
}

/// Top-left world offset and size of the visible area
pub fn viewport(state: &RoundState) -> (i32, i32, i32, i32) {
    match &state.camera {
        Some(cam) => {
            let (w, h) = cam.view_size();
            (cam.x, cam.y, w, h)
        }
        None => (0, 0, state.grid.width(), state.grid.height()),
    }
}

/// Draw grid, trails, heads, and the endless proximity arrow
pub fn draw_world<D: Display>(out: &mut D, state: &RoundState) {
    let (ox, oy, vw, vh) = viewport(state);
    let grid = &state.grid;
    let flashing: Vec<Option<bool>> = (0..state.actors.len()).map(|i| state.flash_phase(i)).collect();

    for sy in 0..vh {
        for sx in 0..vw {
            let (wx, wy) = (ox + sx, oy + sy);
            match grid.cell(wx, wy) {
                _ if !grid.in_bounds(wx, wy) => out.draw_cell(sx, sy, ' ', Ink::Dim, Weight::Normal),
                Cell::Empty => out.draw_cell(sx, sy, ' ', Ink::Dim, Weight::Normal),
                Cell::Wall => out.draw_cell(sx, sy, wall_glyph(grid, wx, wy), Ink::Wall, Weight::Dim),
                Cell::Owned(i) => {
                    let color = state.actors.get(i).map(|a| a.slot.color).unwrap_or_default();
                    if flashing.get(i).copied().flatten() == Some(true) {
                        out.draw_cell(sx, sy, FLASH, Ink::Trail(color), Weight::Bold);
                    } else {
                        let entry = grid.dir(wx, wy);
                        let exit = grid.exit_dir(wx, wy).unwrap_or(entry);
                        out.draw_cell(sx, sy, trail_glyph(entry, exit), Ink::Trail(color), Weight::Bold);
                    }
                }
            }
        }
    }

    for a in state.actors.iter().filter(|a| a.is_racing()) {
        let visible = match &state.camera {
            Some(cam) => cam.on_screen(a.x, a.y),
            None => grid.in_bounds(a.x, a.y),
        };
        if visible {
            out.draw_cell(a.x - ox, a.y - oy, HEAD, Ink::Head(a.slot.color), Weight::Bold);
        }
    }

    if state.mode == GameMode::Endless && state.camera.is_some() {
        if let Some(arrow) = camera::proximity_arrow(state.follow, &state.actors, vw, vh) {
            let color = state.actors[arrow.target].slot.color;
            out.draw_cell(arrow.screen_x, arrow.screen_y, arrow.glyph, Ink::Trail(color), Weight::Bold);
        }
    }
}

/// Status line below the viewport
pub fn draw_hud<D: Display>(out: &mut D, state: &RoundState) {
    let (_, _, vw, vh) = viewport(state);
    out.clear_region(0, vh, vw, 1);
    let mut x = 1;

    if state.camera.is_some() && state.mode == GameMode::Auto {
        if let Some(target) = state.actors.get(state.follow) {
            let text = format!("[watching AI{}] ", target.index + 1);
            out.draw_str(x, vh, &text, Ink::Trail(target.slot.color), Weight::Dim);
            x += text.chars().count() as i32;
        }
    }

    for a in &state.actors {
        let kind = if a.is_human() { "P" } else { "AI" };
        let status = if a.alive {
            '●'
        } else if a.active {
            '~'
        } else {
            '✕'
        };
        let text = format!("{}{}{}", kind, a.index + 1, status);
        let weight = if a.alive { Weight::Bold } else { Weight::Dim };
        out.draw_str(x, vh, &text, Ink::Trail(a.slot.color), weight);
        x += text.chars().count() as i32 + 1;
        if state.mode == GameMode::Teams && a.index == 1 {
            out.draw_str(x, vh, "vs ", Ink::Dim, Weight::Normal);
            x += 3;
        }
    }

    if state.mode == GameMode::Endless {
        let text = format!("{:.1}s ", state.elapsed().as_secs_f64());
        out.draw_str(x + 1, vh, &text, Ink::Hud, Weight::Normal);
        x += text.len() as i32 + 1;
    }

    let keys = if state.mode == GameMode::Auto { "[Q]uit" } else { "[Q]uit [R]estart" };
    out.draw_str(x + 1, vh, keys, Ink::Dim, Weight::Normal);
}

/// Humans always get a label; CPUs only in a duel
fn wants_label(state: &RoundState, i: usize) -> bool {
    match state.mode {
        GameMode::Auto => false,
        GameMode::Duel => true,
        _ => state.actors[i].is_human(),
    }
}

/// `YOU`/`CPU` tags above the heads during the countdown
pub fn draw_labels<D: Display>(out: &mut D, state: &RoundState) {
    let (ox, oy, vw, _) = viewport(state);
    for a in &state.actors {
        if !a.active || !wants_label(state, a.index) {
            continue;
        }
        let text = if a.is_human() { "YOU" } else { "CPU" };
        let len = text.len() as i32;
        let mut sy = a.y - oy - 1;
        if sy < 0 {
            sy += 2;
        }
        let sx = (a.x - ox - len / 2).clamp(0, (vw - 1 - len).max(0));
        out.draw_str(sx, sy, text, Ink::Trail(a.slot.color), Weight::Bold);
    }
}

/// Horizontally centered text on a viewport row
pub fn draw_centered<D: Display>(out: &mut D, state: &RoundState, dy: i32, text: &str, weight: Weight) {
    let (_, _, vw, vh) = viewport(state);
    let x = (vw - text.chars().count() as i32) / 2;
    out.draw_str(x, vh / 2 + dy, text, Ink::Hud, weight);
}

/// Banner for a finished round
pub fn result_message(state: &RoundState) -> String {
    match state.result {
        Some(RoundResult::Winner(i)) => {
            let who = if state.actors[i].is_human() { "Player" } else { "CPU" };
            format!("  {} {} wins!  ", who, i + 1)
        }
        Some(RoundResult::Team(t)) => format!("  Team {} wins!  ", t + 1),
        Some(RoundResult::Draw) => "  DRAW!  ".to_string(),
        Some(RoundResult::NoResult) => format!("  Survived {:.1}s  ", state.elapsed().as_secs_f64()),
        None => String::new(),
    }
}

/// Full frame: world, HUD, and the result banner once the round is decided
pub fn draw_frame<D: Display>(out: &mut D, state: &RoundState) {
    draw_world(out, state);
    draw_hud(out, state);
    if state.over {
        draw_centered(out, state, 0, &result_message(state), Weight::Bold);
        draw_centered(out, state, 2, "[ R to replay | Q for menu ]", Weight::Normal);
    }
}
