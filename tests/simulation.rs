use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use tile_chase::{autopilot, Direction, Game, Maze, Pos, Position, SteppedClock, TickEvent};

const TILE: i32 = 24;

fn new_game(seed: u64) -> Game<SteppedClock, StdRng> {
    Game::new(
        Maze::classic(),
        SteppedClock::new(Duration::from_millis(16)),
        StdRng::seed_from_u64(seed),
    )
}

fn assert_consistent(position: Position, tile: Pos, maze: &Maze, who: &str) {
    assert_eq!(tile.x, position.px.div_euclid(TILE), "{who} x out of sync");
    assert_eq!(tile.y, position.py.div_euclid(TILE), "{who} y out of sync");
    assert!(maze.is_walkable_pos(tile), "{who} inside a wall at {tile:?}");
    assert!(maze.cell_at(tile.x, tile.y).is_ok(), "{who} off the grid at {tile:?}");
}

#[test]
fn actors_stay_on_open_tiles_for_a_whole_game() {
    let mut game = new_game(2024);
    let mut pilot = StdRng::seed_from_u64(2025);

    for _ in 0..15_000 {
        let request = autopilot::choose(&game.snapshot(), &mut pilot);
        game.tick(request).expect("tick");

        let snapshot = game.snapshot();
        assert_consistent(
            snapshot.player.position,
            snapshot.player.tile(),
            snapshot.maze,
            "player",
        );
        for ghost in snapshot.ghosts {
            let who = format!("{:?}", ghost.personality);
            assert_consistent(ghost.position, ghost.tile(), snapshot.maze, &who);
        }
        if snapshot.game_over {
            break;
        }
    }
}

#[test]
fn same_seed_replays_identically() {
    let run = |seed: u64| {
        let mut game = new_game(seed);
        let mut pilot = StdRng::seed_from_u64(seed ^ 0xA5A5);
        let mut trace = Vec::new();
        for _ in 0..4_000 {
            let request = autopilot::choose(&game.snapshot(), &mut pilot);
            let events = game.tick(request).expect("tick");
            let snapshot = game.snapshot();
            trace.push((
                snapshot.player.position,
                snapshot
                    .ghosts
                    .iter()
                    .map(|ghost| (ghost.position, ghost.state, ghost.target))
                    .collect::<Vec<_>>(),
                snapshot.score,
                snapshot.lives,
                events,
            ));
        }
        trace
    };

    let a = run(77);
    let b = run(77);
    assert_eq!(a.len(), b.len());
    for (tick, (left, right)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(left, right, "diverged at tick {tick}");
    }
}

#[test]
fn score_only_grows_and_matches_events() {
    let mut game = new_game(9);
    let mut pilot = StdRng::seed_from_u64(10);
    let mut expected = 0u32;
    let mut last_lives = game.snapshot().lives;

    for _ in 0..10_000 {
        let request = autopilot::choose(&game.snapshot(), &mut pilot);
        for event in game.tick(request).expect("tick") {
            match event {
                TickEvent::PelletEaten(delta) | TickEvent::PursuerEaten(delta) => {
                    expected += delta;
                }
                TickEvent::PlayerCaught(lives) => {
                    assert_eq!(lives + 1, last_lives);
                    last_lives = lives;
                }
                TickEvent::GameOver(score) => assert_eq!(score, expected),
                _ => {}
            }
        }
        assert_eq!(game.snapshot().score, expected);
        if game.is_over() {
            break;
        }
    }
}

#[test]
fn player_runs_through_the_tunnel() {
    let mut game = new_game(1);
    // Walk left from the start along row 23, up the left column to row 14,
    // then left into the tunnel.
    let route = [
        (Direction::Left, Pos::new(6, 23)),
        (Direction::Up, Pos::new(6, 14)),
        (Direction::Left, Pos::new(27, 14)),
    ];
    for (dir, goal) in route {
        let mut ticks = 0;
        while game.snapshot().player.tile() != goal {
            game.tick(Some(dir)).expect("tick");
            ticks += 1;
            assert!(ticks < 2_000, "never reached {goal:?}");
            if game.snapshot().lives < 3 {
                // A pursuer got in the way; the route is only meaningful on the first life.
                return;
            }
        }
    }
}
