use std::io;

use crate::direction::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A fixed-size drawable surface that can be read back.
///
/// Drawing outside the surface is clipped. Reads outside it return `None`.
/// Whatever was drawn is visible to `pixel_at` no later than the next `present`.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()>;

    fn plot(&mut self, point: Point, color: Color) -> io::Result<()>;

    fn present(&mut self) -> io::Result<()>;

    fn pixel_at(&self, point: Point) -> Option<Color>;
}

/// Row-major in-memory framebuffer.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        if point.x < 0 || point.y < 0 {
            return None;
        }
        let (x, y) = (point.x as u32, point.y as u32);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Sets a single pixel, returning whether it was on the grid.
    pub fn set(&mut self, point: Point, color: Color) -> bool {
        match self.index(point) {
            Some(idx) => {
                self.pixels[idx] = color;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, point: Point) -> Option<Color> {
        self.index(point).map(|idx| self.pixels[idx])
    }

    /// Clips `rect` to the grid. Returns the visible `(x0, y0, x1, y1)` with
    /// exclusive upper bounds, or `None` when nothing is visible.
    pub fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(rect.x).max(0);
        let y0 = i64::from(rect.y).max(0);
        let x1 = (i64::from(rect.x) + i64::from(rect.width)).min(i64::from(self.width));
        let y1 = (i64::from(rect.y) + i64::from(rect.height)).min(i64::from(self.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    pub fn fill(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }
}

impl Surface for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> io::Result<()> {
        self.fill(rect, color);
        Ok(())
    }

    fn plot(&mut self, point: Point, color: Color) -> io::Result<()> {
        self.set(point, color);
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn pixel_at(&self, point: Point) -> Option<Color> {
        self.get(point)
    }
}
