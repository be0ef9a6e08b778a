use rand::Rng;
use serde::Serialize;

use crate::components::{Direction, Pos, Position};
use crate::constants::{
    AMBUSH_LOOKAHEAD, EATEN_SPEED, FRIGHTENED_SPEED, GHOST_SPEED, OPPORTUNIST_RADIUS,
    PINCER_LOOKAHEAD,
};
use crate::level::Maze;
use crate::mode::GlobalMode;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Heads straight for the player.
    Direct,
    /// Aims four tiles ahead of the player.
    Ambusher,
    /// Mirrors the Direct pursuer around a point two tiles ahead of the player.
    Pincer,
    /// Chases from afar, retreats to its corner up close.
    Opportunist,
}

impl Personality {
    /// Creation order. Also the order overlaps are resolved in.
    pub const ALL: [Personality; 4] = [
        Personality::Direct,
        Personality::Ambusher,
        Personality::Pincer,
        Personality::Opportunist,
    ];

    pub fn home(self) -> Pos {
        match self {
            Personality::Direct => Pos::new(14, 11),
            Personality::Ambusher => Pos::new(13, 14),
            Personality::Pincer => Pos::new(14, 14),
            Personality::Opportunist => Pos::new(15, 14),
        }
    }

    pub fn scatter_corner(self, width: usize, height: usize) -> Pos {
        let right = width as i32 - 1;
        let bottom = height as i32 - 1;
        match self {
            Personality::Direct => Pos::new(right, 0),
            Personality::Ambusher => Pos::new(0, 0),
            Personality::Pincer => Pos::new(right, bottom),
            Personality::Opportunist => Pos::new(0, bottom),
        }
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostState {
    Normal,
    Frightened,
    Eaten,
}

/// What every pursuer sees when it picks a target. Built once per tick,
/// after the player has moved and before any pursuer does.
#[derive(Clone, Debug)]
pub struct TargetContext {
    pub player_tile: Pos,
    pub player_direction: Direction,
    pub pursuers: Vec<(Personality, Pos)>,
    pub mode: GlobalMode,
    pub width: usize,
    pub height: usize,
}

impl TargetContext {
    fn tile_of(&self, personality: Personality) -> Option<Pos> {
        self.pursuers
            .iter()
            .find(|(kind, _)| *kind == personality)
            .map(|(_, tile)| *tile)
    }
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub personality: Personality,
    pub state: GhostState,
    pub position: Position,
    pub direction: Direction,
    pub target: Pos,
    home: Pos,
    scatter: Pos,
}

impl Ghost {
    pub fn spawn(personality: Personality, maze: &Maze) -> Self {
        let home = personality.home();
        let scatter = personality.scatter_corner(maze.width(), maze.height());
        Self {
            personality,
            state: GhostState::Normal,
            position: Position::at_tile(home),
            direction: Direction::None,
            target: scatter,
            home,
            scatter,
        }
    }

    pub fn home(&self) -> Pos {
        self.home
    }

    pub fn tile(&self) -> Pos {
        self.position.tile()
    }

    pub fn speed(&self) -> i32 {
        match self.state {
            GhostState::Normal => GHOST_SPEED,
            GhostState::Frightened => FRIGHTENED_SPEED,
            GhostState::Eaten => EATEN_SPEED,
        }
    }

    pub fn frighten(&mut self) {
        if self.state == GhostState::Normal {
            self.state = GhostState::Frightened;
        }
    }

    pub fn calm(&mut self) {
        if self.state == GhostState::Frightened {
            self.state = GhostState::Normal;
        }
    }

    pub fn eaten(&mut self) {
        self.state = GhostState::Eaten;
        self.target = self.home;
    }

    /// The personality's own pick while chasing.
    pub fn chase_target(&self, ctx: &TargetContext) -> Pos {
        let player = ctx.player_tile;
        match self.personality {
            Personality::Direct => player,
            Personality::Ambusher => player
                .step(ctx.player_direction, AMBUSH_LOOKAHEAD)
                .clamp(ctx.width, ctx.height),
            Personality::Pincer => {
                let ahead = player.step(ctx.player_direction, PINCER_LOOKAHEAD);
                match ctx.tile_of(Personality::Direct) {
                    Some(anchor) => Pos::new(
                        anchor.x + 2 * (ahead.x - anchor.x),
                        anchor.y + 2 * (ahead.y - anchor.y),
                    )
                    .clamp(ctx.width, ctx.height),
                    None => player,
                }
            }
            Personality::Opportunist => {
                if self.tile().distance(player) >= OPPORTUNIST_RADIUS {
                    player
                } else {
                    self.scatter
                }
            }
        }
    }

    pub fn select_target(&self, ctx: &TargetContext, rng: &mut impl Rng) -> Pos {
        match self.state {
            GhostState::Frightened => Pos::new(
                rng.gen_range(0..ctx.width as i32),
                rng.gen_range(0..ctx.height as i32),
            ),
            GhostState::Eaten => self.home,
            GhostState::Normal => match ctx.mode {
                GlobalMode::Scatter => self.scatter,
                GlobalMode::Chase => self.chase_target(ctx),
            },
        }
    }

    /// Greedy step toward `target`: no reversing unless nothing else is
    /// open, ties resolved Up, Down, Left, Right.
    pub fn choose_direction(&self, maze: &Maze, target: Pos) -> Direction {
        let here = self.tile();
        let reverse = self.direction.opposite();
        let mut best = Direction::None;
        let mut best_dist = i64::MAX;
        for dir in Direction::CARDINALS {
            if dir == reverse {
                continue;
            }
            let next = here.step(dir, 1);
            if !maze.is_walkable_pos(next) {
                continue;
            }
            let dist = next.distance_sq(target);
            if dist < best_dist {
                best_dist = dist;
                best = dir;
            }
        }
        if best != Direction::None {
            return best;
        }
        if maze.is_walkable_pos(here.step(reverse, 1)) {
            reverse
        } else {
            Direction::None
        }
    }

    /// One tick of pursuer motion. Targets and headings only change on
    /// tile centers.
    pub fn update(&mut self, maze: &Maze, ctx: &TargetContext, rng: &mut impl Rng) {
        if self.position.is_centered() {
            self.target = self.select_target(ctx, rng);
            self.direction = self.choose_direction(maze, self.target);
        }

        match maze.advance(self.position, self.direction, self.speed()) {
            Some(next) => self.position = next,
            None => {
                self.position = self.position.snapped();
                self.direction = Direction::None;
            }
        }

        if self.state == GhostState::Eaten && self.tile() == self.home {
            self.state = GhostState::Normal;
        }
    }
}
