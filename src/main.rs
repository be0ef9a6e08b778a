use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use tile_chase::{
    autopilot, Direction, Game, GhostState, GlobalMode, Maze, MonotonicClock, Personality, Pos,
    SoundCue, SteppedClock, TickEvent,
};

mod render;

use render::Renderer;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chase pellets through a maze while four pursuers hunt you")]
struct Cli {
    /// Milliseconds per logic tick; one tick is simulated per frame.
    #[arg(long, env = "TILE_CHASE_TICK_MS", default_value_t = 16)]
    tick_ms: u64,
    /// Seed for frightened-pursuer randomness. Random when omitted.
    #[arg(long, env = "TILE_CHASE_SEED")]
    seed: Option<u64>,
    /// Write tracing output here. The terminal is busy drawing the maze.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Tracing filter directive, e.g. `info` or `tile_chase=debug`.
    #[arg(long, env = "TILE_CHASE_LOG", default_value = "info")]
    log_filter: String,
    /// Run without a terminal, steering the player with the autopilot.
    #[arg(long)]
    headless: bool,
    /// Tick budget for a headless run.
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&cli.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if cli.headless {
        builder.with_writer(io::stderr).init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, tick_ms = cli.tick_ms, headless = cli.headless, "starting");

    if cli.headless {
        return run_headless(&cli, seed);
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    stdout
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    stdout.execute(Hide).context("failed to hide cursor")?;

    let result = run(&mut stdout, &cli, seed);

    if let Err(err) = stdout.execute(Show) {
        error!(?err, "failed to show cursor");
    }
    if let Err(err) = stdout.execute(LeaveAlternateScreen) {
        error!(?err, "failed to leave alternate screen");
    }
    if let Err(err) = terminal::disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    result
}

/// Stand-in for the sound collaborator: cues are logged, not synthesized.
fn play(cue: SoundCue) {
    debug!(?cue, "sound cue");
}

fn dispatch_audio(events: &[TickEvent]) {
    events.iter().filter_map(TickEvent::sound_cue).for_each(play);
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('k') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('j') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('h') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn run(stdout: &mut Stdout, cli: &Cli, seed: u64) -> anyhow::Result<()> {
    let maze = Maze::classic();
    let mut renderer = Renderer::new(maze.width(), maze.height());
    let mut game = Game::new(maze, MonotonicClock::new(), StdRng::seed_from_u64(seed));
    let frame_time = Duration::from_millis(cli.tick_ms.max(1));
    game.opening_cue().into_iter().for_each(play);

    loop {
        let frame_start = Instant::now();
        let mut request = None;
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if key.code == KeyCode::Char('q') {
                    info!("quit requested");
                    return Ok(());
                }
                if let Some(dir) = key_direction(key.code) {
                    request = Some(dir);
                }
            }
        }

        let events = game.tick(request)?;
        dispatch_audio(&events);
        renderer.render(stdout, &game.snapshot())?;
        if game.is_over() {
            renderer.render_game_over(stdout, &game.snapshot())?;
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

#[derive(Debug, Serialize)]
struct HeadlessSummary {
    seed: u64,
    ticks: u64,
    score: u32,
    lives: u32,
    pellets_left: usize,
    game_over: bool,
    mode: GlobalMode,
    player: Pos,
    pursuers: Vec<(Personality, GhostState, Pos)>,
    events: BTreeMap<String, u32>,
}

fn event_key(event: &TickEvent) -> &'static str {
    match event {
        TickEvent::PelletEaten(_) => "pellet_eaten",
        TickEvent::PowerActivated => "power_activated",
        TickEvent::PowerExpired => "power_expired",
        TickEvent::PursuerEaten(_) => "pursuer_eaten",
        TickEvent::PlayerCaught(_) => "player_caught",
        TickEvent::GameOver(_) => "game_over",
        TickEvent::MazeCleared => "maze_cleared",
    }
}

fn run_headless(cli: &Cli, seed: u64) -> anyhow::Result<()> {
    let clock = SteppedClock::new(Duration::from_millis(cli.tick_ms.max(1)));
    let mut game = Game::new(Maze::classic(), clock, StdRng::seed_from_u64(seed));
    let mut pilot = StdRng::seed_from_u64(seed.wrapping_add(1));
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    game.opening_cue().into_iter().for_each(play);

    for _ in 0..cli.ticks {
        let request = autopilot::choose(&game.snapshot(), &mut pilot);
        let events = game.tick(request)?;
        dispatch_audio(&events);
        for event in &events {
            *counts.entry(event_key(event).to_string()).or_insert(0) += 1;
        }
        if game.is_over() || game.snapshot().maze.pellets_left() == 0 {
            break;
        }
    }

    let snapshot = game.snapshot();
    let summary = HeadlessSummary {
        seed,
        ticks: snapshot.ticks,
        score: snapshot.score,
        lives: snapshot.lives,
        pellets_left: snapshot.maze.pellets_left(),
        game_over: snapshot.game_over,
        mode: snapshot.mode,
        player: snapshot.player.tile(),
        pursuers: snapshot
            .ghosts
            .iter()
            .map(|ghost| (ghost.personality, ghost.state, ghost.tile()))
            .collect(),
        events: counts,
    };
    info!(score = summary.score, ticks = summary.ticks, "headless run finished");
    println!(
        "{}",
        serde_json::to_string(&summary).context("failed to serialize summary")?
    );
    Ok(())
}
