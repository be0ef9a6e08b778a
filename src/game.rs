use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::clock::Clock;
use crate::components::Direction;
use crate::constants::GHOST_SCORE;
use crate::error::MazeError;
use crate::ghost::{Ghost, GhostState, Personality, TargetContext};
use crate::level::Maze;
use crate::mode::{GlobalMode, PowerWindow};
use crate::player::Player;

/// Side effects of one tick, in the order they happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickEvent {
    PelletEaten(u32),
    PowerActivated,
    PowerExpired,
    PursuerEaten(u32),
    PlayerCaught(u32),
    GameOver(u32),
    MazeCleared,
}

/// Cue ids handed to whatever plays sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    Start,
    Waka,
    PowerPellet,
    GhostEaten,
    Death,
    Siren,
}

impl TickEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            TickEvent::PelletEaten(_) => Some(SoundCue::Waka),
            TickEvent::PowerActivated => Some(SoundCue::PowerPellet),
            TickEvent::PowerExpired => Some(SoundCue::Siren),
            TickEvent::PursuerEaten(_) => Some(SoundCue::GhostEaten),
            TickEvent::PlayerCaught(_) => Some(SoundCue::Death),
            TickEvent::GameOver(_) | TickEvent::MazeCleared => None,
        }
    }
}

/// Read-only view handed to renderers between ticks.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub maze: &'a Maze,
    pub player: &'a Player,
    pub ghosts: &'a [Ghost],
    pub score: u32,
    pub lives: u32,
    pub mode: GlobalMode,
    pub power_active: bool,
    pub game_over: bool,
    pub ticks: u64,
}

pub struct Game<C, R> {
    maze: Maze,
    player: Player,
    ghosts: Vec<Ghost>,
    power: PowerWindow,
    mode: GlobalMode,
    life_started_at: Duration,
    now: Duration,
    game_over: bool,
    ticks: u64,
    clock: C,
    rng: R,
}

fn spawn_ghosts(maze: &Maze) -> Vec<Ghost> {
    Personality::ALL
        .iter()
        .map(|personality| Ghost::spawn(*personality, maze))
        .collect()
}

impl<C: Clock, R: Rng> Game<C, R> {
    pub fn new(maze: Maze, clock: C, rng: R) -> Self {
        let now = clock.now();
        let ghosts = spawn_ghosts(&maze);
        Self {
            maze,
            player: Player::spawn(),
            ghosts,
            power: PowerWindow::default(),
            mode: GlobalMode::Scatter,
            life_started_at: now,
            now,
            game_over: false,
            ticks: 0,
            clock,
            rng,
        }
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// The jingle played before the first tick.
    pub fn opening_cue(&self) -> Option<SoundCue> {
        (self.ticks == 0 && !self.game_over).then_some(SoundCue::Start)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            maze: &self.maze,
            player: &self.player,
            ghosts: &self.ghosts,
            score: self.player.score,
            lives: self.player.lives,
            mode: self.mode,
            power_active: self.power.is_active(self.now),
            game_over: self.game_over,
            ticks: self.ticks,
        }
    }

    /// Advances the world by one step. Once the game is over this is a
    /// no-op that reports nothing.
    pub fn tick(&mut self, request: Option<Direction>) -> Result<Vec<TickEvent>, MazeError> {
        let mut events = Vec::new();
        if self.game_over {
            return Ok(events);
        }
        let now = self.clock.now();
        self.now = now;
        self.ticks += 1;

        if self.power.expire(now) {
            debug!("power window expired");
            events.push(TickEvent::PowerExpired);
        }

        if let Some(dir) = request {
            self.player.request(dir);
        }
        self.player.update(&self.maze);

        self.update_modes(now);

        let ctx = self.target_context();
        for ghost in &mut self.ghosts {
            ghost.update(&self.maze, &ctx, &mut self.rng);
        }

        self.resolve_interactions(now, &mut events)?;
        Ok(events)
    }

    fn update_modes(&mut self, now: Duration) {
        let mode = GlobalMode::at(now.saturating_sub(self.life_started_at));
        if mode != self.mode {
            debug!(?mode, "global mode changed");
            self.mode = mode;
        }
        let powered = self.power.is_active(now);
        for ghost in &mut self.ghosts {
            if powered {
                ghost.frighten();
            } else {
                ghost.calm();
            }
        }
    }

    /// Pursuer tiles are captured before any pursuer moves, so targeting
    /// does not depend on update order.
    fn target_context(&self) -> TargetContext {
        TargetContext {
            player_tile: self.player.tile(),
            player_direction: self.player.direction,
            pursuers: self
                .ghosts
                .iter()
                .map(|ghost| (ghost.personality, ghost.tile()))
                .collect(),
            mode: self.mode,
            width: self.maze.width(),
            height: self.maze.height(),
        }
    }

    fn resolve_interactions(
        &mut self,
        now: Duration,
        events: &mut Vec<TickEvent>,
    ) -> Result<(), MazeError> {
        let tile = self.player.tile();
        let consumed = self.maze.consume(tile.x, tile.y)?;
        if consumed.score > 0 {
            self.player.score += consumed.score;
            events.push(TickEvent::PelletEaten(consumed.score));
            if consumed.power {
                self.power.activate(now);
                for ghost in &mut self.ghosts {
                    ghost.frighten();
                }
                debug!(expires_at = ?self.power.expires_at(), "power window opened");
                events.push(TickEvent::PowerActivated);
            }
            if self.maze.pellets_left() == 0 {
                info!(score = self.player.score, "maze cleared");
                events.push(TickEvent::MazeCleared);
            }
        }

        let hit = self
            .ghosts
            .iter()
            .position(|ghost| {
                ghost.state != GhostState::Eaten && ghost.position.overlaps(self.player.position)
            });
        let Some(idx) = hit else {
            return Ok(());
        };

        match self.ghosts[idx].state {
            GhostState::Frightened => {
                let ghost = &mut self.ghosts[idx];
                ghost.eaten();
                self.player.score += GHOST_SCORE;
                debug!(personality = ?ghost.personality, "pursuer eaten");
                events.push(TickEvent::PursuerEaten(GHOST_SCORE));
            }
            GhostState::Normal => self.lose_life(now, events),
            GhostState::Eaten => {}
        }
        Ok(())
    }

    fn lose_life(&mut self, now: Duration, events: &mut Vec<TickEvent>) {
        self.player.lives = self.player.lives.saturating_sub(1);
        let lives = self.player.lives;
        info!(lives, "player caught");
        events.push(TickEvent::PlayerCaught(lives));

        if lives == 0 {
            self.game_over = true;
            info!(score = self.player.score, "game over");
            events.push(TickEvent::GameOver(self.player.score));
            return;
        }

        self.player = self.player.respawned();
        self.ghosts = spawn_ghosts(&self.maze);
        self.power.clear();
        self.life_started_at = now;
        self.mode = GlobalMode::Scatter;
    }
}
