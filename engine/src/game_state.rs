use std::fmt::Display;

use crate::{
    direction::{Direction, Point},
    surface::Rect,
    GameError,
};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 700;
pub const DEFAULT_BORDER: u32 = 10;

/// Dimensions of the arena and thickness of the wall drawn around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaConfig {
    width: u32,
    height: u32,
    border: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            border: DEFAULT_BORDER,
        }
    }
}

impl ArenaConfig {
    /// Both start points must sit strictly inside the wall, which guarantees
    /// that every path out of the arena crosses a wall pixel first.
    pub fn new(width: u32, height: u32, border: u32) -> Result<Self, GameError> {
        if border == 0 {
            return Err(GameError::InvalidArena("border must be at least 1".to_owned()));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(GameError::InvalidArena(format!(
                "{width}x{height} exceeds the coordinate range"
            )));
        }
        let arena = Self {
            width,
            height,
            border,
        };
        let one = arena.start_position(PlayerId::One);
        let two = arena.start_position(PlayerId::Two);
        if !arena.is_interior(one) || !arena.is_interior(two) || one == two {
            return Err(GameError::InvalidArena(format!(
                "{width}x{height} with a border of {border} leaves no room for both players"
            )));
        }
        Ok(arena)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn border(&self) -> u32 {
        self.border
    }

    pub fn start_position(&self, player: PlayerId) -> Point {
        let width = i64::from(self.width);
        let x = match player {
            PlayerId::One => width / 4,
            PlayerId::Two => width * 3 / 4,
        };
        Point::new(x as i32, (self.height / 2) as i32)
    }

    /// Whether `point` lies inside the wall.
    pub fn is_interior(&self, point: Point) -> bool {
        let b = self.border as i64;
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        x >= b && y >= b && x < i64::from(self.width) - b && y < i64::from(self.height) - b
    }

    /// Top, bottom, left and right wall segments.
    pub fn border_rects(&self) -> [Rect; 4] {
        let (w, h, b) = (self.width, self.height, self.border);
        [
            Rect::new(0, 0, w, b),
            Rect::new(0, (h - b) as i32, w, b),
            Rect::new(0, 0, b, h),
            Rect::new((w - b) as i32, 0, b, h),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerId {
    One,
    Two,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: Point,
    pub direction: Direction,
    pub alive: bool,
}

impl Player {
    pub fn new(position: Point) -> Self {
        Self {
            position,
            direction: Direction::Up,
            alive: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub arena: ArenaConfig,
    pub one: Player,
    pub two: Player,
    pub tick: u64,
}

impl GameState {
    pub fn new(arena: ArenaConfig) -> Self {
        Self {
            arena,
            one: Player::new(arena.start_position(PlayerId::One)),
            two: Player::new(arena.start_position(PlayerId::Two)),
            tick: 0,
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.one,
            PlayerId::Two => &self.two,
        }
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::One => &mut self.one,
            PlayerId::Two => &mut self.two,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Draw,
    OneWon,
    TwoWon,
}

impl Outcome {
    /// Classifies a tick's collisions. Simultaneous deaths are a draw.
    pub fn decide(one_dead: bool, two_dead: bool) -> Option<Outcome> {
        match (one_dead, two_dead) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::TwoWon),
            (false, true) => Some(Outcome::OneWon),
            (false, false) => None,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Draw => Display::fmt("Draw", f),
            Outcome::OneWon => Display::fmt("One won", f),
            Outcome::TwoWon => Display::fmt("Two won", f),
        }
    }
}
