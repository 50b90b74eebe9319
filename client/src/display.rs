use std::{
    collections::BTreeSet,
    io::{self, Write},
    mem,
    time::Duration,
};

use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
};
use engine::{
    direction::Point,
    game_state::ArenaConfig,
    input::{InputEvent, InputSource},
    surface::{Color, PixelGrid, Rect, Surface},
    GameError, BACKGROUND,
};

/// Wall thickness when every pixel is half a character cell.
pub const TERMINAL_BORDER: u32 = 1;

const UPPER_HALF_BLOCK: char = '▀';

/// The whole terminal is the arena, two pixels stacked in each cell.
pub fn arena_for_size(columns: u16, rows: u16) -> Result<ArenaConfig, GameError> {
    ArenaConfig::new(u32::from(columns), u32::from(rows) * 2, TERMINAL_BORDER)
}

/// Pixel surface drawn with upper half blocks: the foreground colours the
/// upper pixel of a cell, the background the lower one. Pixels live in a
/// [`PixelGrid`] and only cells touched since the last `present` are redrawn.
pub struct TerminalSurface<W: Write> {
    out: W,
    grid: PixelGrid,
    dirty: BTreeSet<(u16, u16)>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, columns: u16, rows: u16) -> Self {
        Self {
            out,
            grid: PixelGrid::new(u32::from(columns), u32::from(rows) * 2, BACKGROUND),
            dirty: BTreeSet::new(),
        }
    }

    // (row, column) of the cell holding pixel (x, y).
    fn mark(&mut self, x: u32, y: u32) {
        self.dirty.insert(((y / 2) as u16, x as u16));
    }

    fn draw_cell(&mut self, row: u16, column: u16) -> io::Result<()> {
        let x = i32::from(column);
        let upper = self.grid.get(Point::new(x, i32::from(row) * 2));
        let lower = self.grid.get(Point::new(x, i32::from(row) * 2 + 1));
        queue!(
            self.out,
            MoveTo(column, row),
            SetForegroundColor(to_terminal(upper.unwrap_or(BACKGROUND))),
            SetBackgroundColor(to_terminal(lower.unwrap_or(BACKGROUND))),
            Print(UPPER_HALF_BLOCK),
        )
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        let Some((x0, y0, x1, y1)) = self.grid.clip(rect) else {
            return Ok(());
        };
        self.grid.fill(rect, color);
        for y in y0..y1 {
            for x in x0..x1 {
                self.mark(x, y);
            }
        }
        Ok(())
    }

    fn plot(&mut self, point: Point, color: Color) -> io::Result<()> {
        if self.grid.set(point, color) {
            self.mark(point.x as u32, point.y as u32);
        }
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        for (row, column) in mem::take(&mut self.dirty) {
            self.draw_cell(row, column)?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()
    }

    fn pixel_at(&self, point: Point) -> Option<Color> {
        self.grid.get(point)
    }
}

fn to_terminal(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Reads whatever crossterm has queued without blocking.
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(event) = translate(event::read()?) {
                events.push(event);
            }
        }
        Ok(events)
    }
}

/// Ctrl-C and Esc quit, plain characters are passed on lower-cased, the rest
/// is dropped.
pub fn translate(event: Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = event
    else {
        return None;
    };
    if kind != KeyEventKind::Press {
        return None;
    }
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            Some(InputEvent::KeyPressed(c.to_ascii_lowercase()))
        }
        _ => None,
    }
}
