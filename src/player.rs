use crate::components::{Direction, Pos, Position};
use crate::constants::{PLAYER_SPEED, STARTING_LIVES};
use crate::level::Maze;

pub const PLAYER_START: Pos = Pos::new(14, 23);

#[derive(Clone, Debug)]
pub struct Player {
    pub position: Position,
    pub direction: Direction,
    pub next_direction: Option<Direction>,
    pub speed: i32,
    pub score: u32,
    pub lives: u32,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            position: Position::at_tile(PLAYER_START),
            direction: Direction::None,
            next_direction: None,
            speed: PLAYER_SPEED,
            score: 0,
            lives: STARTING_LIVES,
        }
    }

    /// A fresh actor at the start tile that keeps the running score and
    /// remaining lives.
    pub fn respawned(&self) -> Self {
        Self {
            score: self.score,
            lives: self.lives,
            ..Self::spawn()
        }
    }

    pub fn tile(&self) -> Pos {
        self.position.tile()
    }

    /// Queues a turn. `Direction::None` is not a request and is ignored.
    pub fn request(&mut self, dir: Direction) {
        if dir != Direction::None {
            self.next_direction = Some(dir);
        }
    }

    fn apply_request(&mut self, maze: &Maze) {
        let Some(next) = self.next_direction else {
            return;
        };
        let reversing = self.direction != Direction::None && next == self.direction.opposite();
        if reversing {
            // The way back is the way we came; always open.
            self.direction = next;
            self.next_direction = None;
            return;
        }
        if self.position.is_centered() && maze.is_walkable_pos(self.tile().step(next, 1)) {
            self.direction = next;
            self.next_direction = None;
        }
    }

    pub fn update(&mut self, maze: &Maze) {
        self.apply_request(maze);
        match maze.advance(self.position, self.direction, self.speed) {
            Some(next) => self.position = next,
            None => {
                self.position = self.position.snapped();
                self.direction = Direction::None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_into_a_wall_stops_in_place() {
        let maze = Maze::classic();
        let mut player = Player::spawn();
        player.direction = Direction::Up;
        player.update(&maze);
        assert_eq!(player.tile(), PLAYER_START);
        assert!(player.position.is_centered());
        assert_eq!(player.direction, Direction::None);
    }

    #[test]
    fn blocked_request_stays_queued_until_a_junction() {
        let maze = Maze::classic();
        let mut player = Player::spawn();
        player.request(Direction::Up);
        player.update(&maze);
        assert_eq!(player.direction, Direction::None);
        assert_eq!(player.next_direction, Some(Direction::Up));

        // Head left to column 12, where the way up is open.
        player.request(Direction::Left);
        player.update(&maze);
        assert_eq!(player.direction, Direction::Left);
        player.request(Direction::Up);
        let mut ticks = 0;
        while player.direction != Direction::Up {
            player.update(&maze);
            ticks += 1;
            assert!(ticks < 60, "never turned up");
        }
        assert_eq!(player.tile(), Pos::new(12, 23));
    }

    #[test]
    fn reversal_applies_mid_tile() {
        let maze = Maze::classic();
        let mut player = Player::spawn();
        player.request(Direction::Left);
        player.update(&maze);
        player.update(&maze);
        assert!(!player.position.is_centered());

        player.request(Direction::Right);
        player.update(&maze);
        assert_eq!(player.direction, Direction::Right);
        assert_eq!(player.position.offset(), (-2, 0));
    }

    #[test]
    fn none_is_not_a_request() {
        let mut player = Player::spawn();
        player.request(Direction::None);
        assert_eq!(player.next_direction, None);
    }

    #[test]
    fn respawn_keeps_score_and_lives() {
        let maze = Maze::classic();
        let mut player = Player::spawn();
        player.score = 420;
        player.lives = 2;
        player.request(Direction::Left);
        player.update(&maze);

        let fresh = player.respawned();
        assert_eq!(fresh.score, 420);
        assert_eq!(fresh.lives, 2);
        assert_eq!(fresh.tile(), PLAYER_START);
        assert_eq!(fresh.direction, Direction::None);
        assert_eq!(fresh.next_direction, None);
    }

    #[test]
    fn never_stands_inside_a_wall() {
        let maze = Maze::classic();
        let mut player = Player::spawn();
        let script = [
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Up,
            Direction::Left,
        ];
        for step in 0..1_200 {
            if step % 50 == 0 {
                player.request(script[(step / 50) % script.len()]);
            }
            player.update(&maze);
            let tile = player.tile();
            assert!(maze.is_walkable_pos(tile), "player in wall at {tile:?}");
            assert_eq!(tile.x, player.position.px.div_euclid(24));
            assert_eq!(tile.y, player.position.py.div_euclid(24));
        }
    }
}
