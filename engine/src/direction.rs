#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn turn(self, turn: Turn) -> Direction {
        match turn {
            Turn::Right => right_turn(self),
            Turn::Left => left_turn(self),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// Clockwise quarter turn.
pub fn right_turn(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Right,
        Direction::Right => Direction::Down,
        Direction::Down => Direction::Left,
        Direction::Left => Direction::Up,
    }
}

/// Counter-clockwise quarter turn.
pub fn left_turn(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Left,
        Direction::Left => Direction::Down,
        Direction::Down => Direction::Right,
        Direction::Right => Direction::Up,
    }
}

/// Integer grid coordinate. Signed so that a step off the top or left edge
/// yields a negative coordinate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Moves `pos` exactly one cell in `direction`. The y axis grows downwards.
pub fn update_position(pos: Point, direction: Direction) -> Point {
    match direction {
        Direction::Up => Point::new(pos.x, pos.y - 1),
        Direction::Down => Point::new(pos.x, pos.y + 1),
        Direction::Left => Point::new(pos.x - 1, pos.y),
        // last arm doubles as the fallback, same as an unknown heading moving right.
        Direction::Right => Point::new(pos.x + 1, pos.y),
    }
}
