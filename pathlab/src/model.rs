//! The application model: obstacle editing, search animation, drawing.

use crossterm::style::Color;
use gridstar_core::{Grid, Point, SearchEvent};
use gridstar_search::{Search, SearchConfig, StepResult};

use crate::colors;
use crate::mapgen::FieldGen;
use crate::term::{Button, Canvas, Key, Msg, ScreenCell};

/// Search steps per rendered frame, the pace of a 60 Hz animation loop.
pub const STEPS_PER_FRAME: u32 = 16;

const HELP: &str = "left: wall  right: erase  middle/s: search  space: random  r: reset  q: quit";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    /// Obstacles may be edited; no search is active.
    Editing,
    /// A search run is being stepped and animated.
    Running,
    /// The run ended (either way); the result stays on screen.
    Finished,
}

/// Per-cell visualization overlay, painted from search events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mark {
    Clear,
    Frontier,
    Visited,
}

/// The interactive playground model.
pub struct PathLab {
    grid: Grid,
    start: Point,
    goal: Point,
    search: Option<Search>,
    marks: Vec<Mark>,
    path: Vec<Point>,
    mode: Mode,
    status: String,
    quit: bool,
}

impl PathLab {
    /// Create a playground over an open `width` x `height` grid, running
    /// from the top-left to the bottom-right corner.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            grid: Grid::new(width, height),
            start: Point::ZERO,
            goal: Point::new(width - 1, height - 1),
            search: None,
            marks: vec![Mark::Clear; (width * height) as usize],
            path: Vec::new(),
            mode: Mode::Editing,
            status: HELP.to_string(),
            quit: false,
        }
    }

    pub fn wants_quit(&self) -> bool {
        self.quit
    }

    /// Handle one input message.
    pub fn update(&mut self, msg: Msg) {
        match msg {
            Msg::KeyDown(Key::Escape | Key::Char('q')) => self.quit = true,
            Msg::KeyDown(Key::Char(' ')) => self.randomize(),
            Msg::KeyDown(Key::Char('s')) => self.begin_search(),
            Msg::KeyDown(Key::Char('r') | Key::F(5)) => self.reset(),
            Msg::KeyDown(_) => {}
            Msg::MouseDown { button, pos } => match button {
                Button::Left => self.paint(pos, true),
                Button::Right => self.paint(pos, false),
                Button::Middle => self.begin_search(),
            },
            // The grid keeps its startup dimensions; the driver already
            // forces a repaint.
            Msg::Resize { .. } => {}
        }
    }

    /// Advance the animation by one frame's worth of search steps.
    pub fn tick(&mut self) {
        if self.mode != Mode::Running {
            return;
        }
        let Some(search) = self.search.as_mut() else {
            return;
        };
        let mut events = Vec::new();
        let mut done = None;
        for _ in 0..STEPS_PER_FRAME {
            match search.advance(&mut events) {
                StepResult::InProgress => {}
                status => {
                    done = Some(status);
                    break;
                }
            }
        }
        for ev in events {
            self.apply_event(ev);
        }
        if let Some(status) = done {
            self.finish(status);
        }
    }

    /// Render the current state into `canvas`.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.clear();
        for y in 0..self.grid.height() {
            for x in 0..self.grid.width() {
                let p = Point::new(x, y);
                let bg = if self.grid.is_blocked(p) {
                    colors::WALL
                } else {
                    match self.marks[self.mark_idx(p)] {
                        Mark::Clear => colors::FLOOR,
                        Mark::Frontier => colors::frontier(p, self.start, self.goal),
                        Mark::Visited => colors::visited(p, self.start, self.goal),
                    }
                };
                self.put_cell(canvas, p, bg);
            }
        }
        for &p in &self.path {
            self.put_cell(canvas, p, colors::PATH);
        }
        self.put_marker(canvas, self.start, 'S', colors::START);
        self.put_marker(canvas, self.goal, 'G', colors::GOAL);
        self.put_status(canvas);
    }

    // -------------------------------------------------------------------
    // Input handling
    // -------------------------------------------------------------------

    fn paint(&mut self, screen: Point, wall: bool) {
        // The obstacle map is frozen while a run is active or displayed.
        if self.mode != Mode::Editing {
            return;
        }
        let cell = Point::new(screen.x / 2, screen.y);
        self.grid.set_blocked(cell, wall);
    }

    fn randomize(&mut self) {
        if self.mode == Mode::Running {
            return;
        }
        self.clear_run();
        let walls = FieldGen::new(rand::rng()).scatter(&mut self.grid, self.start, self.goal);
        self.status = format!("scattered {walls} walls");
    }

    fn begin_search(&mut self) {
        if self.mode == Mode::Running {
            return;
        }
        self.clear_run();
        match Search::new(SearchConfig {
            grid: self.grid.clone(),
            start: self.start,
            goal: self.goal,
        }) {
            Ok(search) => {
                self.search = Some(search);
                self.mode = Mode::Running;
                self.status = "searching".to_string();
            }
            Err(err) => self.status = format!("cannot start: {err}"),
        }
    }

    fn reset(&mut self) {
        self.clear_run();
        self.grid.fill(false);
        self.status = HELP.to_string();
    }

    /// Drop any active or displayed run, keeping the obstacle map.
    fn clear_run(&mut self) {
        self.search = None;
        self.marks.fill(Mark::Clear);
        self.path.clear();
        self.mode = Mode::Editing;
    }

    // -------------------------------------------------------------------
    // Search animation
    // -------------------------------------------------------------------

    fn apply_event(&mut self, ev: SearchEvent) {
        match ev {
            SearchEvent::Discovered(p) => self.set_mark(p, Mark::Frontier),
            SearchEvent::Finalized(p) => self.set_mark(p, Mark::Visited),
            SearchEvent::Completed(path) => self.path = path,
            SearchEvent::Exhausted => {}
        }
    }

    fn finish(&mut self, status: StepResult) {
        self.mode = Mode::Finished;
        self.status = match status {
            StepResult::Completed => {
                let cost = self
                    .search
                    .as_ref()
                    .and_then(|s| s.cost_to(s.goal()))
                    .unwrap_or(0.0);
                format!("path found: {} cells, cost {cost:.2}", self.path.len())
            }
            _ => "no path exists".to_string(),
        };
    }

    fn set_mark(&mut self, p: Point, mark: Mark) {
        let idx = self.mark_idx(p);
        self.marks[idx] = mark;
    }

    #[inline]
    fn mark_idx(&self, p: Point) -> usize {
        (p.y * self.grid.width() + p.x) as usize
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    /// Each grid cell covers two terminal columns so cells come out
    /// roughly square.
    fn put_cell(&self, canvas: &mut Canvas, p: Point, bg: Color) {
        let (x, y) = ((p.x * 2) as u16, p.y as u16);
        let cell = ScreenCell {
            ch: ' ',
            fg: colors::TEXT,
            bg,
        };
        canvas.set(x, y, cell);
        canvas.set(x + 1, y, cell);
    }

    /// Overlay a marker glyph on whatever is already drawn at `p`.
    fn put_marker(&self, canvas: &mut Canvas, p: Point, glyph: char, fg: Color) {
        let (x, y) = ((p.x * 2) as u16, p.y as u16);
        if let Some(cell) = canvas.get(x, y) {
            canvas.set(x, y, ScreenCell { ch: glyph, fg, bg: cell.bg });
        }
    }

    fn put_status(&self, canvas: &mut Canvas) {
        let y = self.grid.height() as u16;
        for (i, ch) in self.status.chars().enumerate() {
            canvas.set(
                i as u16,
                y,
                ScreenCell {
                    ch,
                    fg: colors::STATUS,
                    bg: Color::Reset,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> Msg {
        Msg::KeyDown(Key::Char(c))
    }

    fn run_until_finished(lab: &mut PathLab) {
        for _ in 0..10_000 {
            lab.tick();
            if lab.mode == Mode::Finished {
                return;
            }
        }
        panic!("search never finished");
    }

    #[test]
    fn painting_maps_terminal_columns_to_cells() {
        let mut lab = PathLab::new(10, 8);
        lab.update(Msg::MouseDown {
            button: Button::Left,
            pos: Point::new(7, 3),
        });
        assert!(lab.grid.is_blocked(Point::new(3, 3)));
        lab.update(Msg::MouseDown {
            button: Button::Right,
            pos: Point::new(6, 3),
        });
        assert!(!lab.grid.is_blocked(Point::new(3, 3)));
    }

    #[test]
    fn search_animates_to_completion() {
        let mut lab = PathLab::new(10, 8);
        lab.update(Msg::MouseDown {
            button: Button::Middle,
            pos: Point::ZERO,
        });
        assert_eq!(lab.mode, Mode::Running);
        run_until_finished(&mut lab);
        assert!(!lab.path.is_empty());
        assert_eq!(lab.path.first(), Some(&lab.goal));
        assert_eq!(lab.path.last(), Some(&lab.start));
        assert!(lab.status.starts_with("path found"));
    }

    #[test]
    fn painting_is_rejected_while_running() {
        let mut lab = PathLab::new(10, 8);
        lab.update(key('s'));
        assert_eq!(lab.mode, Mode::Running);
        lab.update(Msg::MouseDown {
            button: Button::Left,
            pos: Point::new(8, 4),
        });
        assert!(!lab.grid.is_blocked(Point::new(4, 4)));
    }

    #[test]
    fn blocked_start_reports_instead_of_running() {
        let mut lab = PathLab::new(10, 8);
        lab.update(Msg::MouseDown {
            button: Button::Left,
            pos: Point::new(0, 0),
        });
        lab.update(key('s'));
        assert_eq!(lab.mode, Mode::Editing);
        assert!(lab.status.starts_with("cannot start"));
    }

    #[test]
    fn walled_off_goal_reports_no_path() {
        let mut lab = PathLab::new(10, 8);
        // Wall off the column next to the goal side.
        for y in 0..8 {
            lab.update(Msg::MouseDown {
                button: Button::Left,
                pos: Point::new(14, y),
            });
        }
        lab.update(key('s'));
        run_until_finished(&mut lab);
        assert!(lab.path.is_empty());
        assert_eq!(lab.status, "no path exists");
    }

    #[test]
    fn reset_clears_walls_and_run_state() {
        let mut lab = PathLab::new(10, 8);
        lab.update(key(' '));
        lab.update(key('s'));
        run_until_finished(&mut lab);
        lab.update(key('r'));
        assert_eq!(lab.mode, Mode::Editing);
        assert!(lab.path.is_empty());
        assert_eq!(lab.grid, Grid::new(10, 8));
        assert_eq!(lab.status, HELP);
    }

    #[test]
    fn quit_keys() {
        for msg in [key('q'), Msg::KeyDown(Key::Escape)] {
            let mut lab = PathLab::new(4, 4);
            lab.update(msg);
            assert!(lab.wants_quit());
        }
    }

    #[test]
    fn draw_fills_canvas_and_status_line() {
        let mut lab = PathLab::new(4, 3);
        lab.update(Msg::MouseDown {
            button: Button::Left,
            pos: Point::new(2, 1),
        });
        let mut canvas = Canvas::new(8, 4);
        lab.draw(&mut canvas);
        // Wall at cell (1,1) covers terminal columns 2 and 3.
        assert_eq!(canvas.get(2, 1).unwrap().bg, colors::WALL);
        assert_eq!(canvas.get(3, 1).unwrap().bg, colors::WALL);
        // Start and goal markers.
        assert_eq!(canvas.get(0, 0).unwrap().ch, 'S');
        assert_eq!(canvas.get(6, 2).unwrap().ch, 'G');
        // Status line on the row below the map.
        assert_eq!(canvas.get(0, 3).unwrap().ch, HELP.chars().next().unwrap());
    }
}
