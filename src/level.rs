use crate::components::{Direction, Pos, Position};
use crate::constants::{PELLET_SCORE, POWER_SCORE, TILE_SIZE};
use crate::error::MazeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Pellet,
    Power,
}

/// Fixed 28x31 board. Rows 11 and 14 are tunnels: their edge cells are
/// open and connect to each other across the grid boundary.
const CLASSIC_LAYOUT: [&str; 31] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "      .##          ##.      ",
    "######.## ###  ### ##.######",
    "######.## #      # ##.######",
    "      .   #      #   .      ",
    "######.## #      # ##.######",
    "######.## ######## ##.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Result of eating whatever sits on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Consumed {
    pub score: u32,
    pub power: bool,
}

#[derive(Clone, Debug)]
pub struct Maze {
    width: usize,
    height: usize,
    grid: Vec<Vec<Tile>>,
    pellets_left: usize,
}

impl Maze {
    pub fn classic() -> Self {
        Self::parse(&CLASSIC_LAYOUT)
    }

    /// Builds a maze from text rows: `#` wall, `.` pellet, `o` power
    /// pellet, anything else empty. Short rows are padded with walls.
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Self {
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);
        let mut pellets_left = 0;
        let grid: Vec<Vec<Tile>> = rows
            .iter()
            .map(|row| {
                let mut cells: Vec<Tile> = row
                    .as_ref()
                    .chars()
                    .map(|ch| match ch {
                        '#' => Tile::Wall,
                        '.' => Tile::Pellet,
                        'o' => Tile::Power,
                        _ => Tile::Empty,
                    })
                    .collect();
                cells.resize(width, Tile::Wall);
                pellets_left += cells
                    .iter()
                    .filter(|cell| matches!(cell, Tile::Pellet | Tile::Power))
                    .count();
                cells
            })
            .collect();
        Self {
            width,
            height: grid.len(),
            grid,
            pellets_left,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pellets_left(&self) -> usize {
        self.pellets_left
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.grid.iter().map(Vec::as_slice)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Result<Tile, MazeError> {
        if !self.in_bounds(x, y) {
            return Err(MazeError::OutOfBounds { x, y });
        }
        Ok(self.grid[y as usize][x as usize])
    }

    /// A row whose leftmost and rightmost cells are both open wraps around.
    pub fn is_tunnel_row(&self, y: i32) -> bool {
        if y < 0 || y as usize >= self.height || self.width == 0 {
            return false;
        }
        let row = &self.grid[y as usize];
        row[0] != Tile::Wall && row[self.width - 1] != Tile::Wall
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        match self.cell_at(x, y) {
            Ok(cell) => cell != Tile::Wall,
            Err(_) => (x == -1 || x == self.width as i32) && self.is_tunnel_row(y),
        }
    }

    pub fn is_walkable_pos(&self, pos: Pos) -> bool {
        self.is_walkable(pos.x, pos.y)
    }

    /// Folds a horizontal pixel coordinate back onto the board.
    pub fn wrap_x(&self, px: i32) -> i32 {
        px.rem_euclid(self.width as i32 * TILE_SIZE)
    }

    /// Moves an actor one tick along `dir`. `None` when the tile ahead is
    /// blocked; the caller decides how to stop.
    pub fn advance(&self, from: Position, dir: Direction, speed: i32) -> Option<Position> {
        if dir == Direction::None {
            return Some(from);
        }
        let candidate = from.advance(dir, speed);
        if !self.is_walkable_pos(candidate.leading_tile(dir)) {
            return None;
        }
        Some(Position {
            px: self.wrap_x(candidate.px),
            py: candidate.py,
        })
    }

    pub fn consume(&mut self, x: i32, y: i32) -> Result<Consumed, MazeError> {
        let consumed = match self.cell_at(x, y)? {
            Tile::Pellet => Consumed {
                score: PELLET_SCORE,
                power: false,
            },
            Tile::Power => Consumed {
                score: POWER_SCORE,
                power: true,
            },
            Tile::Wall | Tile::Empty => return Ok(Consumed::default()),
        };
        self.grid[y as usize][x as usize] = Tile::Empty;
        self.pellets_left = self.pellets_left.saturating_sub(1);
        Ok(consumed)
    }
}
