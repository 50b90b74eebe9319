use std::io;

use crate::{direction::Turn, game_state::PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyPressed(char),
}

/// Non-blocking source of discrete input events.
pub trait InputSource {
    /// Returns everything queued since the last call, possibly nothing.
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn { player: PlayerId, turn: Turn },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    pub one_right: char,
    pub one_left: char,
    pub two_right: char,
    pub two_left: char,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            one_right: 'x',
            one_left: 'z',
            two_right: '.',
            two_left: ',',
        }
    }
}

impl KeyBindings {
    pub fn command_for(&self, key: char) -> Option<Command> {
        let (player, turn) = match key {
            k if k == self.one_right => (PlayerId::One, Turn::Right),
            k if k == self.one_left => (PlayerId::One, Turn::Left),
            k if k == self.two_right => (PlayerId::Two, Turn::Right),
            k if k == self.two_left => (PlayerId::Two, Turn::Left),
            _ => return None,
        };
        Some(Command::Turn { player, turn })
    }
}
