use std::{io, time::Duration};

use surface::Color;

pub mod direction;
pub mod game;
pub mod game_state;
pub mod input;
pub mod surface;

/// Fixed delay between two ticks, giving a tick rate of about 50 Hz.
pub const TICK_INTERVAL: Duration = Duration::from_millis(20);

pub const BACKGROUND: Color = Color::rgb(0, 0, 0);
pub const BORDER_COLOR: Color = Color::rgb(0, 0, 255);
pub const PLAYER_ONE_COLOR: Color = Color::rgb(0, 255, 0);
pub const PLAYER_TWO_COLOR: Color = Color::rgb(255, 0, 0);

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid arena: {0}")]
    InvalidArena(String),
    #[error("display or input failure: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
#[macro_export]
macro_rules! assert_pixel {
    ($surface:expr, ($x:expr, $y:expr), $expected:expr $(,)?) => {{
        use $crate::surface::Surface as _;
        assert_eq!(
            $surface.pixel_at($crate::direction::Point::new($x, $y)),
            Some($expected)
        )
    }};
}
