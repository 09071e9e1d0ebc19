use super::grid::{Cell, Grid};
use crate::config::{GameMode, MAX_ACTORS};

/// Decides whether a cell stops a mover. Pure, so AI lookahead can share it.
#[derive(Debug, Clone, Copy)]
pub struct CollisionRule {
    mode: GameMode,
    teams: [u8; MAX_ACTORS],
}

impl CollisionRule {
    pub fn new(mode: GameMode, teams: &[u8]) -> Self {
        let mut table = [0u8; MAX_ACTORS];
        for (slot, &team) in table.iter_mut().zip(teams) {
            *slot = team;
        }
        Self { mode, teams: table }
    }

    pub fn team_of(&self, actor: usize) -> u8 {
        self.teams[actor % MAX_ACTORS]
    }

    pub fn is_blocked(&self, grid: &Grid, x: i32, y: i32, mover_team: u8) -> bool {
        if !grid.is_interior(x, y) {
            return true;
        }
        match grid.cell(x, y) {
            Cell::Empty => false,
            Cell::Wall => true,
            Cell::Owned(owner) => !(self.mode == GameMode::Teams && self.team_of(owner) == mover_team),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Dir;

    #[test]
    fn wall_ring_and_outside_are_blocked() {
        let g = Grid::new(10, 10);
        let rule = CollisionRule::new(GameMode::Duel, &[0, 1]);
        assert!(rule.is_blocked(&g, 0, 5, 0));
        assert!(rule.is_blocked(&g, 9, 5, 0));
        assert!(rule.is_blocked(&g, -3, 5, 0));
        assert!(rule.is_blocked(&g, 5, 40, 0));
        assert!(!rule.is_blocked(&g, 5, 5, 0));
    }

    #[test]
    fn trails_block_outside_team_mode() {
        let mut g = Grid::new(10, 10);
        g.claim(4, 4, 0, Dir::Up);
        let rule = CollisionRule::new(GameMode::FreeForAll, &[0, 0, 0, 0]);
        assert!(rule.is_blocked(&g, 4, 4, 0));
    }

    #[test]
    fn teammates_pass_through_each_other() {
        let mut g = Grid::new(10, 10);
        g.claim(4, 4, 1, Dir::Up);
        g.claim(5, 5, 2, Dir::Up);
        let rule = CollisionRule::new(GameMode::Teams, &[0, 0, 1, 1]);
        assert!(!rule.is_blocked(&g, 4, 4, 0));
        assert!(rule.is_blocked(&g, 5, 5, 0));
        assert!(rule.is_blocked(&g, 4, 4, 1));
    }

    #[test]
    fn enemy_trail_blocks_in_team_mode() {
        let mut g = Grid::new(10, 10);
        g.claim(3, 3, 3, Dir::Left);
        let rule = CollisionRule::new(GameMode::Teams, &[0, 0, 1, 1]);
        assert!(rule.is_blocked(&g, 3, 3, 0));
    }

    #[test]
    fn own_trail_is_passable_only_in_team_mode() {
        let mut g = Grid::new(10, 10);
        g.claim(6, 6, 2, Dir::Down);
        let teams = CollisionRule::new(GameMode::Teams, &[0, 0, 1, 1]);
        assert!(!teams.is_blocked(&g, 6, 6, 1));
        let ffa = CollisionRule::new(GameMode::FreeForAll, &[0, 0, 1, 1]);
        assert!(ffa.is_blocked(&g, 6, 6, 1));
    }
}
