use std::time::Duration;

pub const TILE_SIZE: i32 = 24;
pub const HALF_TILE: i32 = TILE_SIZE / 2;

pub const PLAYER_SPEED: i32 = 2;
pub const GHOST_SPEED: i32 = 2;
pub const FRIGHTENED_SPEED: i32 = 1;
pub const EATEN_SPEED: i32 = 4;

pub const STARTING_LIVES: u32 = 3;
pub const PELLET_SCORE: u32 = 10;
pub const POWER_SCORE: u32 = 50;
pub const GHOST_SCORE: u32 = 200;

pub const SCATTER_PERIOD: Duration = Duration::from_secs(7);
pub const MODE_CYCLE: Duration = Duration::from_secs(27);
pub const POWER_DURATION: Duration = Duration::from_secs(7);

pub const AMBUSH_LOOKAHEAD: i32 = 4;
pub const PINCER_LOOKAHEAD: i32 = 2;
pub const OPPORTUNIST_RADIUS: f64 = 8.0;
