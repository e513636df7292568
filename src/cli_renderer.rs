use crate::geom::Size;
use crate::paddle::Side;
use crate::renderer::{Color, Input, Renderer, Surface};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute, queue,
    style::{self, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Simulation units covered by one terminal cell. Rows cover twice as much
/// as columns to compensate for the 1:2 glyph aspect ratio.
const UNITS_PER_COL: f64 = 10.0;
const UNITS_PER_ROW: f64 = 20.0;

const INPUT_POLL: Duration = Duration::from_millis(5);

pub struct CliRenderer {
    cols: u16,
    rows: u16,
    cells: Vec<Color>,
    last_present: Instant,
    target_frame_time: Duration,
    enhanced_keys: bool,
}

impl CliRenderer {
    pub fn new() -> Self {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        Self {
            cols,
            rows,
            cells: Vec::new(),
            last_present: Instant::now(),
            // Target 30 FPS for smooth rendering
            target_frame_time: Duration::from_millis(33),
            enhanced_keys: false,
        }
    }

    fn paint(&mut self, col: i32, row: i32, color: Color) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        if idx < self.cells.len() {
            self.cells[idx] = color;
        }
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for CliRenderer {
    fn clear(&mut self, color: Color) -> io::Result<()> {
        // Frame start: pick up any terminal size change before rasterizing
        let (cols, rows) = terminal::size().unwrap_or((self.cols, self.rows));
        self.cols = cols;
        self.rows = rows;
        self.cells.clear();
        self.cells
            .resize(cols as usize * rows as usize, color);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) -> io::Result<()> {
        let col0 = (x / UNITS_PER_COL).floor() as i32;
        let col1 = ((x + w) / UNITS_PER_COL).ceil() as i32;
        let row0 = (y / UNITS_PER_ROW).floor() as i32;
        let row1 = ((y + h) / UNITS_PER_ROW).ceil() as i32;
        for row in row0..row1 {
            for col in col0..col1 {
                self.paint(col, row, color);
            }
        }
        Ok(())
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color) -> io::Result<()> {
        let col0 = ((x - radius) / UNITS_PER_COL).floor() as i32;
        let col1 = ((x + radius) / UNITS_PER_COL).ceil() as i32;
        let row0 = ((y - radius) / UNITS_PER_ROW).floor() as i32;
        let row1 = ((y + radius) / UNITS_PER_ROW).ceil() as i32;
        for row in row0..=row1 {
            for col in col0..=col1 {
                let dx = (col as f64 + 0.5) * UNITS_PER_COL - x;
                let dy = (row as f64 + 0.5) * UNITS_PER_ROW - y;
                if dx * dx + dy * dy <= radius * radius {
                    self.paint(col, row, color);
                }
            }
        }
        Ok(())
    }

    fn stroke_line(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    ) -> io::Result<()> {
        let dx = x2 - x1;
        let dy = y2 - y1;
        let len = (dx * dx + dy * dy).sqrt();
        let steps = (len / UNITS_PER_COL.min(UNITS_PER_ROW)).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let col = ((x1 + dx * t) / UNITS_PER_COL).floor() as i32;
            let row = ((y1 + dy * t) / UNITS_PER_ROW).floor() as i32;
            self.paint(col, row, color);
        }
        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        // Key release events need the kitty protocol; without it held keys
        // just auto-repeat as presses, which still plays fine.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            self.enhanced_keys = true;
        }
        Ok(())
    }

    fn viewport(&self) -> Size {
        let (cols, rows) = terminal::size().unwrap_or((self.cols, self.rows));
        Size::new(cols as f64 * UNITS_PER_COL, rows as f64 * UNITS_PER_ROW)
    }

    fn resize(&mut self, _size: Size) -> io::Result<()> {
        // The terminal grid is sized by the user; `clear` picks it up
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(KeyEvent { code, kind, .. }) => {
                    let pressed = kind != KeyEventKind::Release;
                    let input = match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if pressed => {
                            Some(Input::Quit)
                        }
                        KeyCode::Char('w') | KeyCode::Char('W') => Some(if pressed {
                            Input::AccelUp(Side::Left)
                        } else {
                            Input::AccelRelease(Side::Left)
                        }),
                        KeyCode::Char('s') | KeyCode::Char('S') => Some(if pressed {
                            Input::AccelDown(Side::Left)
                        } else {
                            Input::AccelRelease(Side::Left)
                        }),
                        KeyCode::Up => Some(if pressed {
                            Input::AccelUp(Side::Right)
                        } else {
                            Input::AccelRelease(Side::Right)
                        }),
                        KeyCode::Down => Some(if pressed {
                            Input::AccelDown(Side::Right)
                        } else {
                            Input::AccelRelease(Side::Right)
                        }),
                        _ => None,
                    };
                    return Ok(input);
                }
                Event::Resize(_, _) => return Ok(Some(Input::Resized)),
                _ => {}
            }
        }
        Ok(None)
    }

    fn present(&mut self) -> io::Result<()> {
        // Frame rate limiting: skip flushing if not enough time has passed
        if self.last_present.elapsed() < self.target_frame_time {
            return Ok(());
        }
        self.last_present = Instant::now();

        let mut stdout = io::stdout();
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            queue!(stdout, cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let idx = row as usize * self.cols as usize + col as usize;
                let Some(&color) = self.cells.get(idx) else {
                    continue;
                };
                if current != Some(color) {
                    queue!(
                        stdout,
                        SetBackgroundColor(style::Color::Rgb {
                            r: color.r,
                            g: color.g,
                            b: color.b,
                        })
                    )?;
                    current = Some(color);
                }
                queue!(stdout, Print(" "))?;
            }
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.enhanced_keys {
            execute!(stdout, PopKeyboardEnhancementFlags)?;
            self.enhanced_keys = false;
        }
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
