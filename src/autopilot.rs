use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::Direction;
use crate::game::Snapshot;

const KEEP_HEADING_CHANCE: f64 = 0.7;

/// Picks a turn for the player at tile centers: mostly keep going, sometimes
/// take a side passage, reverse only when boxed in. Stands in for a human
/// during headless runs.
pub fn choose(snapshot: &Snapshot<'_>, rng: &mut impl Rng) -> Option<Direction> {
    let player = snapshot.player;
    if !player.position.is_centered() {
        return None;
    }
    let here = player.tile();
    let open: Vec<Direction> = Direction::CARDINALS
        .into_iter()
        .filter(|dir| snapshot.maze.is_walkable_pos(here.step(*dir, 1)))
        .collect();
    let forward: Vec<Direction> = open
        .iter()
        .copied()
        .filter(|dir| *dir != player.direction.opposite())
        .collect();

    if forward.contains(&player.direction) && rng.gen_bool(KEEP_HEADING_CHANCE) {
        return None;
    }
    forward.choose(rng).or_else(|| open.choose(rng)).copied()
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::clock::ManualClock;
    use crate::game::Game;
    use crate::level::Maze;

    #[test]
    fn picks_an_open_direction_from_the_start_tile() {
        let game = Game::new(Maze::classic(), ManualClock::new(), StdRng::seed_from_u64(5));
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let dir = choose(&game.snapshot(), &mut rng).expect("stopped player gets a heading");
            assert!(matches!(dir, Direction::Left | Direction::Right));
        }
    }
}
