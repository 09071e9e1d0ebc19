//! World grid: cell ownership plus the heading each trail cell was entered with

/// Cardinal heading. `None` marks cells that carry no trail direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Dir {
    /// Evaluation order used by the spawner and the AI
    pub const CARDINALS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::None => Dir::None,
        }
    }

    #[inline]
    pub fn dx(self) -> i32 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
            _ => 0,
        }
    }

    #[inline]
    pub fn dy(self) -> i32 {
        match self {
            Dir::Up => -1,
            Dir::Down => 1,
            _ => 0,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Dir::Up | Dir::Down)
    }

    /// The two headings at right angles to this one
    pub fn perpendicular(self) -> [Dir; 2] {
        if self.is_vertical() {
            [Dir::Left, Dir::Right]
        } else {
            [Dir::Up, Dir::Down]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Owned(usize),
}

/// Fixed-size arena, bordered by walls for its whole lifetime
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    dirs: Vec<Dir>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        let mut grid = Self {
            width: width as i32,
            height: height as i32,
            cells: vec![Cell::Empty; len],
            dirs: vec![Dir::None; len],
        };
        grid.reset();
        grid
    }

    /// Clear every cell and rebuild the wall ring
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
        self.dirs.fill(Dir::None);
        for x in 0..self.width {
            let (top, bottom) = (self.idx(x, 0), self.idx(x, self.height - 1));
            self.cells[top] = Cell::Wall;
            self.cells[bottom] = Cell::Wall;
        }
        for y in 0..self.height {
            let (left, right) = (self.idx(0, y), self.idx(self.width - 1, y));
            self.cells[left] = Cell::Wall;
            self.cells[right] = Cell::Wall;
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Strictly inside the wall ring
    #[inline]
    pub fn is_interior(&self, x: i32, y: i32) -> bool {
        x > 0 && x < self.width - 1 && y > 0 && y < self.height - 1
    }

    /// Out-of-bounds coordinates read as wall
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if self.in_bounds(x, y) {
            self.cells[self.idx(x, y)]
        } else {
            Cell::Wall
        }
    }

    pub fn dir(&self, x: i32, y: i32) -> Dir {
        if self.in_bounds(x, y) {
            self.dirs[self.idx(x, y)]
        } else {
            Dir::None
        }
    }

    /// Mark an interior cell as owned, remembering the heading it was entered with.
    /// The wall ring is never overwritten.
    pub fn claim(&mut self, x: i32, y: i32, owner: usize, dir: Dir) {
        if self.is_interior(x, y) {
            let i = self.idx(x, y);
            self.cells[i] = Cell::Owned(owner);
            self.dirs[i] = dir;
        }
    }

    /// Return an interior cell to empty
    pub fn release(&mut self, x: i32, y: i32) {
        if self.is_interior(x, y) {
            let i = self.idx(x, y);
            self.cells[i] = Cell::Empty;
            self.dirs[i] = Dir::None;
        }
    }

    /// Heading the owner left this cell with, if its next trail cell is known.
    /// A neighbor owned by the same actor and entered heading `d` away from
    /// this cell can only have been reached from here.
    pub fn exit_dir(&self, x: i32, y: i32) -> Option<Dir> {
        let owner = self.cell(x, y);
        if !matches!(owner, Cell::Owned(_)) {
            return None;
        }
        Dir::CARDINALS.into_iter().find(|&d| {
            let (nx, ny) = (x + d.dx(), y + d.dy());
            self.cell(nx, ny) == owner && self.dir(nx, ny) == d
        })
    }

    /// Count of cells for an owner
    #[cfg(test)]
    pub fn owned_count(&self, owner: usize) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Owned(owner)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_grid_has_wall_ring_and_empty_interior() {
        let g = Grid::new(10, 6);
        for x in 0..10 {
            assert_eq!(g.cell(x, 0), Cell::Wall);
            assert_eq!(g.cell(x, 5), Cell::Wall);
        }
        for y in 0..6 {
            assert_eq!(g.cell(0, y), Cell::Wall);
            assert_eq!(g.cell(9, y), Cell::Wall);
        }
        assert_eq!(g.cell(4, 3), Cell::Empty);
        assert_eq!(g.dir(4, 3), Dir::None);
    }

    #[test]
    fn claim_ignores_the_wall_ring() {
        let mut g = Grid::new(8, 8);
        g.claim(0, 3, 1, Dir::Left);
        g.claim(7, 7, 1, Dir::Down);
        assert_eq!(g.cell(0, 3), Cell::Wall);
        assert_eq!(g.cell(7, 7), Cell::Wall);
        g.claim(3, 3, 1, Dir::Up);
        assert_eq!(g.cell(3, 3), Cell::Owned(1));
        assert_eq!(g.dir(3, 3), Dir::Up);
    }

    #[test]
    fn reset_clears_trails() {
        let mut g = Grid::new(8, 8);
        g.claim(3, 3, 0, Dir::Right);
        g.reset();
        assert_eq!(g.cell(3, 3), Cell::Empty);
        assert_eq!(g.owned_count(0), 0);
    }

    #[test]
    fn exit_dir_follows_the_next_trail_cell() {
        let mut g = Grid::new(10, 10);
        g.claim(3, 3, 2, Dir::Right);
        g.claim(4, 3, 2, Dir::Right);
        g.claim(4, 2, 2, Dir::Up);
        assert_eq!(g.exit_dir(3, 3), Some(Dir::Right));
        assert_eq!(g.exit_dir(4, 3), Some(Dir::Up));
        assert_eq!(g.exit_dir(4, 2), None);
    }

    #[test]
    fn opposite_and_perpendicular() {
        assert_eq!(Dir::Up.opposite(), Dir::Down);
        assert_eq!(Dir::Left.opposite(), Dir::Right);
        assert_eq!(Dir::Up.perpendicular(), [Dir::Left, Dir::Right]);
        assert_eq!(Dir::Right.perpendicular(), [Dir::Up, Dir::Down]);
    }

    proptest! {
        #[test]
        fn border_survives_any_claims(
            w in 4u16..40,
            h in 4u16..30,
            claims in proptest::collection::vec((-2i32..42, -2i32..32, 0usize..8), 0..200),
        ) {
            let mut g = Grid::new(w, h);
            for (x, y, owner) in claims {
                g.claim(x, y, owner, Dir::Right);
            }
            for x in 0..w as i32 {
                prop_assert_eq!(g.cell(x, 0), Cell::Wall);
                prop_assert_eq!(g.cell(x, h as i32 - 1), Cell::Wall);
            }
            for y in 0..h as i32 {
                prop_assert_eq!(g.cell(0, y), Cell::Wall);
                prop_assert_eq!(g.cell(w as i32 - 1, y), Cell::Wall);
            }
        }
    }
}
