//! Crossterm terminal driver: raw-mode input polling and diff-based cell
//! output.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use gridstar_core::Point;

/// A keyboard key the app cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    F(u8),
}

/// A mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    Left,
    Right,
    Middle,
}

/// An input message delivered to the model. Mouse positions are raw
/// terminal coordinates; the model maps them to grid cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Msg {
    KeyDown(Key),
    /// A button pressed or dragged over a terminal position.
    MouseDown { button: Button, pos: Point },
    Resize { width: u16, height: u16 },
}

/// One rendered terminal cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScreenCell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for ScreenCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

/// Off-screen buffer the model draws a whole frame into.
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<ScreenCell>,
}

impl Canvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![ScreenCell::default(); width as usize * height as usize],
        }
    }

    /// Reset every cell to the default (blank) cell.
    pub fn clear(&mut self) {
        self.cells.fill(ScreenCell::default());
    }

    /// Write one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: ScreenCell) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = cell;
        }
    }

    /// Read one cell back, if in bounds.
    pub fn get(&self, x: u16, y: u16) -> Option<ScreenCell> {
        (x < self.width && y < self.height)
            .then(|| self.cells[y as usize * self.width as usize + x as usize])
    }
}

/// The terminal back-end: owns raw mode, mouse capture, and the previously
/// flushed frame used for diffing.
pub struct Terminal {
    size: (u16, u16),
    prev: Vec<ScreenCell>,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            size: terminal::size()?,
            prev: Vec::new(),
        })
    }

    /// Terminal size in columns and rows, as of the last resize.
    pub fn size(&self) -> (u16, u16) {
        self.size
    }

    /// Enter raw mode, the alternate screen, and mouse capture.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            EnableMouseCapture
        )?;
        Ok(())
    }

    /// Restore the terminal.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }

    /// Wait up to `timeout` for one input event and translate it to a
    /// [`Msg`]. Returns `None` on timeout or for events the app ignores.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Msg>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        let msg = match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if kind == KeyEventKind::Release {
                    None
                } else {
                    match code {
                        // Ctrl+C quits like Escape.
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(Msg::KeyDown(Key::Escape))
                        }
                        KeyCode::Char(c) => Some(Msg::KeyDown(Key::Char(c))),
                        KeyCode::Esc => Some(Msg::KeyDown(Key::Escape)),
                        KeyCode::F(n) => Some(Msg::KeyDown(Key::F(n))),
                        _ => None,
                    }
                }
            }
            Event::Mouse(me) => {
                let pos = Point::new(me.column as i32, me.row as i32);
                match me.kind {
                    MouseEventKind::Down(b) | MouseEventKind::Drag(b) => {
                        let button = match b {
                            MouseButton::Left => Button::Left,
                            MouseButton::Right => Button::Right,
                            MouseButton::Middle => Button::Middle,
                        };
                        Some(Msg::MouseDown { button, pos })
                    }
                    _ => None,
                }
            }
            Event::Resize(width, height) => {
                self.size = (width, height);
                // Dropping the previous frame forces a full repaint.
                self.prev.clear();
                Some(Msg::Resize { width, height })
            }
            _ => None,
        };
        Ok(msg)
    }

    /// Flush `canvas` to the screen, writing only cells that changed since
    /// the previous frame.
    pub fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.prev.len() != canvas.cells.len() {
            // First frame or resize: repaint everything.
            self.prev = vec![
                ScreenCell {
                    ch: '\u{0}',
                    fg: Color::Reset,
                    bg: Color::Reset,
                };
                canvas.cells.len()
            ];
            queue!(stdout, Clear(ClearType::All))?;
        }
        for (i, cell) in canvas.cells.iter().enumerate() {
            if self.prev[i] == *cell {
                continue;
            }
            let x = (i % canvas.width as usize) as u16;
            let y = (i / canvas.width as usize) as u16;
            queue!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(cell.fg),
                SetBackgroundColor(cell.bg),
                Print(cell.ch)
            )?;
            self.prev[i] = *cell;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_set_and_get() {
        let mut canvas = Canvas::new(4, 2);
        let cell = ScreenCell {
            ch: '#',
            fg: Color::Reset,
            bg: Color::Rgb { r: 1, g: 2, b: 3 },
        };
        canvas.set(3, 1, cell);
        assert_eq!(canvas.get(3, 1), Some(cell));
        assert_eq!(canvas.get(0, 0), Some(ScreenCell::default()));
        assert_eq!(canvas.get(4, 0), None);
    }

    #[test]
    fn canvas_ignores_out_of_bounds_writes() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(5, 5, ScreenCell {
            ch: 'x',
            fg: Color::Reset,
            bg: Color::Reset,
        });
        assert!((0..2).all(|y| (0..2).all(|x| canvas.get(x, y) == Some(ScreenCell::default()))));
    }

    #[test]
    fn canvas_clear_resets_cells() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(1, 1, ScreenCell {
            ch: 'x',
            fg: Color::Reset,
            bg: Color::Reset,
        });
        canvas.clear();
        assert_eq!(canvas.get(1, 1), Some(ScreenCell::default()));
    }
}
