use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use tile_chase::{GhostState, GlobalMode, Personality, Pos, Snapshot, Tile};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Ghost,
    Frightened,
    Eyes,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

/// Redraws only cells that changed since the previous frame.
pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                width * height
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
        }
    }

    pub fn render(&mut self, stdout: &mut Stdout, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let width = snapshot.maze.width();
        let height = snapshot.maze.height();

        let Some((origin_x, origin_y)) = board_origin(width, height)? else {
            let (needed_w, needed_h) = board_size(width, height);
            let (term_w, term_h) = terminal::size()?;
            stdout.queue(MoveTo(0, 0))?;
            stdout.queue(Clear(ClearType::All))?;
            stdout.queue(Print(format!(
                "Resize to at least {needed_w}x{needed_h} to see the maze (now {term_w}x{term_h})."
            )))?;
            stdout.flush()?;
            self.needs_full = true;
            return Ok(());
        };
        if (origin_x, origin_y) != (self.origin_x, self.origin_y) {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            stdout.queue(Clear(ClearType::All))?;
        }

        let mode = match snapshot.mode {
            GlobalMode::Scatter => "scatter",
            GlobalMode::Chase => "chase",
        };
        let hud = format!(
            "Score: {}  Lives: {}  Pellets: {}  Mode: {}{}  (q to quit)",
            snapshot.score,
            snapshot.lives,
            snapshot.maze.pellets_left(),
            mode,
            if snapshot.power_active { "  POWER" } else { "" },
        );
        if self.needs_full || hud != self.last_hud {
            stdout.queue(MoveTo(self.origin_x, self.origin_y - 1))?;
            stdout.queue(SetForegroundColor(Color::White))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(Print(&hud))?;
            stdout.queue(ResetColor)?;
            self.last_hud = hud;
        }

        for y in 0..height {
            for x in 0..width {
                let cell = cell_for(snapshot, Pos::new(x as i32, y as i32));
                let idx = y * width + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(stdout, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        stdout.flush()?;
        Ok(())
    }

    fn draw_cell(&self, stdout: &mut Stdout, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player => "😃",
            Glyph::Ghost => "👻",
            Glyph::Frightened => "😱",
            Glyph::Eyes => "👀",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        stdout.queue(MoveTo(x_pos, y_pos))?;
        stdout.queue(SetForegroundColor(cell.color))?;
        stdout.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                stdout.queue(Print(' '))?;
            }
        }
        stdout.queue(ResetColor)?;
        Ok(())
    }

    /// Writes the final tally under the board and blocks until the player
    /// dismisses it.
    pub fn render_game_over(&self, stdout: &mut Stdout, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let height = snapshot.maze.height();
        let row = match board_origin(snapshot.maze.width(), height)? {
            Some((_, origin_y)) => origin_y + height as u16,
            None => 1,
        };
        let lines = [
            format!(
                "GAME OVER  score {}  pellets left {}  survived {} ticks",
                snapshot.score,
                snapshot.maze.pellets_left(),
                snapshot.ticks
            ),
            "q or Esc to leave".to_string(),
        ];
        for (offset, line) in lines.iter().enumerate() {
            stdout.queue(MoveTo(self.origin_x, row + offset as u16))?;
            stdout.queue(Clear(ClearType::CurrentLine))?;
            stdout.queue(SetForegroundColor(Color::Red))?;
            stdout.queue(Print(line))?;
            stdout.queue(ResetColor)?;
        }
        stdout.flush()?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let leave = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc);
            if key.kind == KeyEventKind::Press && leave {
                return Ok(());
            }
        }
    }
}

/// Columns and rows the board plus its HUD and banner need.
fn board_size(width: usize, height: usize) -> (u16, u16) {
    ((width * CELL_W) as u16, (height + 3) as u16)
}

/// Top-left corner of a board centered in the terminal, or `None` when
/// the terminal is too small to hold it.
fn board_origin(width: usize, height: usize) -> io::Result<Option<(u16, u16)>> {
    let (needed_w, needed_h) = board_size(width, height);
    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        return Ok(None);
    }
    Ok(Some(((term_w - needed_w) / 2, (term_h - needed_h) / 2 + 1)))
}

fn personality_color(personality: Personality) -> Color {
    match personality {
        Personality::Direct => Color::Red,
        Personality::Ambusher => Color::Magenta,
        Personality::Pincer => Color::Cyan,
        Personality::Opportunist => Color::Rgb {
            r: 255,
            g: 184,
            b: 82,
        },
    }
}

fn cell_for(snapshot: &Snapshot<'_>, pos: Pos) -> Cell {
    if snapshot.player.tile() == pos {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snapshot.ghosts.iter().find(|g| g.tile() == pos) {
        return match ghost.state {
            GhostState::Normal => Cell {
                glyph: Glyph::Ghost,
                color: personality_color(ghost.personality),
            },
            GhostState::Frightened => Cell {
                glyph: Glyph::Frightened,
                color: Color::Blue,
            },
            GhostState::Eaten => Cell {
                glyph: Glyph::Eyes,
                color: Color::White,
            },
        };
    }
    match snapshot.maze.cell_at(pos.x, pos.y) {
        Ok(Tile::Wall) => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Ok(Tile::Pellet) => Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        },
        Ok(Tile::Power) => Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        },
        Ok(Tile::Empty) | Err(_) => Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        },
    }
}
