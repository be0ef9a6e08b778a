use serde::Serialize;

use crate::constants::{HALF_TILE, TILE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl Direction {
    /// Enumeration order used whenever several directions tie.
    pub const CARDINALS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// A tile coordinate. Signed so that tunnel exits and unclamped
/// look-ahead targets can sit just off the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: Direction, tiles: i32) -> Pos {
        let (dx, dy) = dir.delta();
        Pos {
            x: self.x + dx * tiles,
            y: self.y + dy * tiles,
        }
    }

    pub fn clamp(self, width: usize, height: usize) -> Pos {
        Pos {
            x: self.x.clamp(0, width as i32 - 1),
            y: self.y.clamp(0, height as i32 - 1),
        }
    }

    pub fn distance_sq(self, other: Pos) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    pub fn distance(self, other: Pos) -> f64 {
        (self.distance_sq(other) as f64).sqrt()
    }
}

/// Continuous actor position in pixels. The tile is always derived from
/// the pixel, so the two can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub px: i32,
    pub py: i32,
}

impl Position {
    pub fn at_tile(tile: Pos) -> Self {
        Self {
            px: tile.x * TILE_SIZE + HALF_TILE,
            py: tile.y * TILE_SIZE + HALF_TILE,
        }
    }

    pub fn tile(self) -> Pos {
        Pos {
            x: self.px.div_euclid(TILE_SIZE),
            y: self.py.div_euclid(TILE_SIZE),
        }
    }

    /// Pixel offset from the center of the current tile.
    pub fn offset(self) -> (i32, i32) {
        (
            self.px.rem_euclid(TILE_SIZE) - HALF_TILE,
            self.py.rem_euclid(TILE_SIZE) - HALF_TILE,
        )
    }

    pub fn is_centered(self) -> bool {
        self.offset() == (0, 0)
    }

    pub fn snapped(self) -> Position {
        Position::at_tile(self.tile())
    }

    /// Moves up to `speed` pixels along `dir`, stopping early at the next
    /// tile center so that every actor passes through each center.
    pub fn advance(self, dir: Direction, speed: i32) -> Position {
        let (dx, dy) = dir.delta();
        let (ox, oy) = self.offset();
        let along = if dx != 0 { ox * dx } else { oy * dy };
        let to_center = if along < 0 { -along } else { TILE_SIZE - along };
        let step = speed.min(to_center);
        Position {
            px: self.px + dx * step,
            py: self.py + dy * step,
        }
    }

    /// Tile under the leading edge of an actor heading in `dir`. An actor
    /// covers the pixel span `[p - HALF_TILE, p + HALF_TILE - 1]`.
    pub fn leading_tile(self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        let reach = if dx + dy > 0 { HALF_TILE - 1 } else { HALF_TILE };
        Position {
            px: self.px + dx * reach,
            py: self.py + dy * reach,
        }
        .tile()
    }

    /// True when both axes are within half a tile of `other`.
    pub fn overlaps(self, other: Position) -> bool {
        (self.px - other.px).abs() < HALF_TILE && (self.py - other.py).abs() < HALF_TILE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution() {
        for dir in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::None,
        ] {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(Direction::None.opposite(), Direction::None);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
    }

    #[test]
    fn tile_follows_pixel_floor() {
        let pos = Position::at_tile(Pos::new(3, 5));
        assert_eq!(pos.tile(), Pos::new(3, 5));
        assert!(pos.is_centered());

        let moved = Position { px: 3 * TILE_SIZE - 1, py: pos.py };
        assert_eq!(moved.tile(), Pos::new(2, 5));

        let off_grid = Position { px: -2, py: pos.py };
        assert_eq!(off_grid.tile(), Pos::new(-1, 5));
    }

    #[test]
    fn advance_stops_at_next_center() {
        let start = Position::at_tile(Pos::new(4, 4));
        let nudged = start.advance(Direction::Right, 2);
        assert_eq!(nudged.offset(), (2, 0));

        // 22 pixels left to the next center: a speed-4 step cut short lands on it.
        let mut pos = nudged;
        for _ in 0..5 {
            pos = pos.advance(Direction::Right, 4);
        }
        assert_eq!(pos.offset(), (-2, 0));
        pos = pos.advance(Direction::Right, 4);
        assert!(pos.is_centered());
        assert_eq!(pos.tile(), Pos::new(5, 4));
    }

    #[test]
    fn leading_tile_looks_one_tile_ahead_from_center() {
        let center = Position::at_tile(Pos::new(6, 6));
        assert_eq!(center.leading_tile(Direction::Up), Pos::new(6, 6));
        let stepped = center.advance(Direction::Up, 1);
        assert_eq!(stepped.leading_tile(Direction::Up), Pos::new(6, 5));
        let stepped = center.advance(Direction::Left, 2);
        assert_eq!(stepped.leading_tile(Direction::Left), Pos::new(5, 6));
    }

    #[test]
    fn overlap_is_strictly_under_half_a_tile() {
        let a = Position::at_tile(Pos::new(1, 1));
        let near = Position { px: a.px + HALF_TILE - 1, py: a.py };
        let edge = Position { px: a.px + HALF_TILE, py: a.py };
        assert!(a.overlaps(near));
        assert!(!a.overlaps(edge));
    }

    #[test]
    fn clamp_keeps_targets_on_grid() {
        assert_eq!(Pos::new(-3, 40).clamp(28, 31), Pos::new(0, 30));
        assert_eq!(Pos::new(14, 10).clamp(15, 31), Pos::new(14, 10));
        assert_eq!(Pos::new(14, 10).clamp(12, 31), Pos::new(11, 10));
    }
}
