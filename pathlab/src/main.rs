//! pathlab — an interactive A* pathfinding playground for the terminal.
//!
//! Paint walls with the mouse, start a search, and watch the frontier
//! sweep across the board sixteen steps per frame.

mod colors;
mod mapgen;
mod model;
mod term;

use std::time::Duration;

use model::PathLab;
use term::{Canvas, Terminal};

/// Target frame time of the animation loop (~60 Hz).
const FRAME: Duration = Duration::from_millis(16);

/// Upper bound on board dimensions, whatever the terminal size.
const MAX_BOARD: i32 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut term = Terminal::new()?;
    term.init()?;
    let result = run(&mut term);
    term.close();
    result
}

fn run(term: &mut Terminal) -> Result<(), Box<dyn std::error::Error>> {
    let (cols, rows) = term.size();
    // Two terminal columns per cell; the bottom row is the status line.
    let width = (cols as i32 / 2).clamp(2, MAX_BOARD);
    let height = (rows as i32 - 1).clamp(2, MAX_BOARD);

    let mut lab = PathLab::new(width, height);
    let mut canvas = Canvas::new(cols, rows);

    loop {
        // Block for at most one frame, then drain whatever else queued up.
        let mut msg = term.poll(FRAME)?;
        while let Some(m) = msg {
            lab.update(m);
            msg = term.poll(Duration::ZERO)?;
        }
        if lab.wants_quit() {
            return Ok(());
        }
        lab.tick();
        lab.draw(&mut canvas);
        term.present(&canvas)?;
    }
}
