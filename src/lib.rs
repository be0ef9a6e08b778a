//! Movement and behavior engine for a tile-grid chase game: one player
//! eating pellets, four pursuers with distinct targeting personalities.
//!
//! The host owns the frame loop and drives [`game::Game::tick`] once per
//! frame, then draws from [`game::Game::snapshot`].

pub mod autopilot;
pub mod clock;
pub mod components;
pub mod constants;
pub mod error;
pub mod game;
pub mod ghost;
pub mod level;
pub mod mode;
pub mod player;

pub use clock::{Clock, ManualClock, MonotonicClock, SteppedClock};
pub use components::{Direction, Pos, Position};
pub use error::MazeError;
pub use game::{Game, Snapshot, SoundCue, TickEvent};
pub use ghost::{Ghost, GhostState, Personality};
pub use level::{Maze, Tile};
pub use mode::GlobalMode;
pub use player::Player;
