//! Scrolling viewport for worlds larger than the terminal, and the choice of
//! which actor it follows

use super::actor::Actor;

/// A rival must lead the current target by this many trail cells to steal the camera
const SWITCH_MARGIN: usize = 20;

/// Top-left offset of the viewport in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    view_w: i32,
    view_h: i32,
    world_w: i32,
    world_h: i32,
}

impl Camera {
    pub fn new(view_w: u16, view_h: u16, world_w: i32, world_h: i32) -> Self {
        Self {
            x: 0,
            y: 0,
            view_w: view_w as i32,
            view_h: view_h as i32,
            world_w,
            world_h,
        }
    }

    pub fn view_size(&self) -> (i32, i32) {
        (self.view_w, self.view_h)
    }

    /// Center on a world position, clamped so the view stays inside the world
    pub fn center_on(&mut self, wx: i32, wy: i32) {
        self.x = (wx - self.view_w / 2).clamp(0, (self.world_w - self.view_w).max(0));
        self.y = (wy - self.view_h / 2).clamp(0, (self.world_h - self.view_h).max(0));
    }

    #[inline]
    pub fn to_screen(&self, wx: i32, wy: i32) -> (i32, i32) {
        (wx - self.x, wy - self.y)
    }

    pub fn on_screen(&self, wx: i32, wy: i32) -> bool {
        let (sx, sy) = self.to_screen(wx, wy);
        sx >= 0 && sx < self.view_w && sy >= 0 && sy < self.view_h
    }
}

/// Longest racing trail, else the dormant actor that died first, else actor 0
pub fn pick_follow_target(actors: &[Actor]) -> usize {
    let mut best: Option<(usize, usize)> = None;
    for a in actors.iter().filter(|a| a.is_racing()) {
        if best.map_or(true, |(_, len)| a.trail.len() > len) {
            best = Some((a.index, a.trail.len()));
        }
    }
    if let Some((i, _)) = best {
        return i;
    }

    actors
        .iter()
        .filter_map(|a| a.death_tick.map(|t| (t, a.index)))
        .min()
        .map(|(_, i)| i)
        .unwrap_or(0)
}

/// Keep the current target unless it stopped racing or a rival's trail is
/// more than `SWITCH_MARGIN` cells longer
pub fn update_follow_target(current: usize, actors: &[Actor]) -> usize {
    let Some(cur) = actors.get(current) else {
        return pick_follow_target(actors);
    };
    if !cur.is_racing() {
        return pick_follow_target(actors);
    }
    actors
        .iter()
        .find(|a| a.alive && a.trail.len() > cur.trail.len() + SWITCH_MARGIN)
        .map_or(current, |a| a.index)
}

/// Compass arrow for a direction vector, in 8 buckets
pub fn compass_arrow(dx: f64, dy: f64) -> char {
    let angle = dy.atan2(dx);
    match angle {
        a if a > -0.39 && a <= 0.39 => '→',
        a if a > 0.39 && a <= 1.18 => '↘',
        a if a > 1.18 && a <= 1.96 => '↓',
        a if a > 1.96 && a <= 2.75 => '↙',
        a if a > 2.75 || a <= -2.75 => '←',
        a if a > -2.75 && a <= -1.96 => '↖',
        a if a > -1.96 && a <= -1.18 => '↑',
        _ => '↗',
    }
}

/// Arrow pointing at the nearest racing opponent, placed toward the viewport edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityArrow {
    pub glyph: char,
    pub screen_x: i32,
    pub screen_y: i32,
    pub target: usize,
}

pub fn proximity_arrow(follow: usize, actors: &[Actor], view_w: i32, view_h: i32) -> Option<ProximityArrow> {
    let me = actors.get(follow)?;
    if !me.alive {
        return None;
    }
    let nearest = actors
        .iter()
        .filter(|a| a.index != follow && a.is_racing())
        .map(|a| {
            let (dx, dy) = ((a.x - me.x) as f64, (a.y - me.y) as f64);
            (dx.hypot(dy), a)
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))?;

    let (len, target) = nearest;
    if len < 1.0 {
        return None;
    }
    let dx = (target.x - me.x) as f64 / len;
    let dy = (target.y - me.y) as f64 / len;

    let margin = 3;
    let ax = (view_w / 2 + (dx * (view_w / 2 - margin) as f64) as i32).clamp(margin, (view_w - margin - 1).max(margin));
    let ay = (view_h / 2 + (dy * (view_h / 2 - margin) as f64) as i32).clamp(1, (view_h - 1).max(1));

    Some(ProximityArrow {
        glyph: compass_arrow(dx, dy),
        screen_x: ax,
        screen_y: ay,
        target: target.index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, PlayerColor, Slot};
    use crate::game::grid::Dir;
    use proptest::prelude::*;

    fn racer(index: usize, x: i32, y: i32, trail_len: usize) -> Actor {
        let mut a = Actor::new(index, Slot::ai(PlayerColor::for_index(index), Difficulty::Hard));
        a.place(x, y, Dir::Right);
        for i in 1..trail_len {
            a.trail.push((x - i as i32, y));
        }
        a
    }

    #[test]
    fn centers_and_clamps() {
        let mut cam = Camera::new(40, 20, 120, 60);
        cam.center_on(60, 30);
        assert_eq!((cam.x, cam.y), (40, 20));
        cam.center_on(2, 2);
        assert_eq!((cam.x, cam.y), (0, 0));
        cam.center_on(119, 59);
        assert_eq!((cam.x, cam.y), (80, 40));
        assert_eq!(cam.to_screen(100, 50), (20, 10));
        assert!(cam.on_screen(80, 40));
        assert!(!cam.on_screen(79, 40));
    }

    #[test]
    fn follows_longest_trail() {
        let actors = vec![racer(0, 10, 10, 3), racer(1, 20, 20, 9), racer(2, 30, 30, 5)];
        assert_eq!(pick_follow_target(&actors), 1);
    }

    #[test]
    fn nobody_racing_follows_earliest_death() {
        let mut actors = vec![racer(0, 10, 10, 3), racer(1, 20, 20, 9), racer(2, 30, 30, 5)];
        for (a, t) in actors.iter_mut().zip([40, 12, 30]) {
            a.alive = false;
            a.active = false;
            a.death_tick = Some(t);
        }
        assert_eq!(pick_follow_target(&actors), 1);
        for a in actors.iter_mut() {
            a.death_tick = None;
        }
        assert_eq!(pick_follow_target(&actors), 0);
    }

    #[test]
    fn switches_only_past_the_margin() {
        let actors = vec![racer(0, 10, 10, 10), racer(1, 20, 20, 30)];
        assert_eq!(update_follow_target(0, &actors), 0);
        let actors = vec![racer(0, 10, 10, 10), racer(1, 20, 20, 31)];
        assert_eq!(update_follow_target(0, &actors), 1);
    }

    #[test]
    fn dead_target_is_replaced() {
        let mut actors = vec![racer(0, 10, 10, 50), racer(1, 20, 20, 4)];
        actors[0].alive = false;
        assert_eq!(update_follow_target(0, &actors), 1);
    }

    #[test]
    fn compass_buckets() {
        assert_eq!(compass_arrow(1.0, 0.0), '→');
        assert_eq!(compass_arrow(0.0, 1.0), '↓');
        assert_eq!(compass_arrow(-1.0, 0.0), '←');
        assert_eq!(compass_arrow(0.0, -1.0), '↑');
        assert_eq!(compass_arrow(1.0, 1.0), '↘');
        assert_eq!(compass_arrow(-1.0, 1.0), '↙');
        assert_eq!(compass_arrow(-1.0, -1.0), '↖');
        assert_eq!(compass_arrow(1.0, -1.0), '↗');
    }

    #[test]
    fn arrow_points_at_nearest_racer() {
        let actors = vec![racer(0, 50, 50, 1), racer(1, 50, 10, 1), racer(2, 80, 50, 1)];
        let arrow = proximity_arrow(0, &actors, 60, 30).expect("arrow");
        assert_eq!(arrow.glyph, '→');
        assert_eq!(arrow.target, 2);
        assert!(arrow.screen_x > 30);
    }

    #[test]
    fn no_arrow_without_opponents() {
        let actors = vec![racer(0, 50, 50, 1)];
        assert!(proximity_arrow(0, &actors, 60, 30).is_none());
    }

    proptest! {
        #[test]
        fn viewport_never_leaves_the_world(
            vw in 10u16..100,
            vh in 10u16..60,
            scale in 1i32..4,
            tx in -50i32..500,
            ty in -50i32..300,
        ) {
            let (ww, wh) = (vw as i32 * scale, vh as i32 * scale);
            let mut cam = Camera::new(vw, vh, ww, wh);
            cam.center_on(tx, ty);
            prop_assert!(cam.x >= 0 && cam.y >= 0);
            prop_assert!(cam.x + vw as i32 <= ww);
            prop_assert!(cam.y + vh as i32 <= wh);
        }
    }
}
