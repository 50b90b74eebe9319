use std::{thread::sleep, time::Duration};

use tracing::{debug, info, trace};

use crate::{
    direction::update_position,
    game_state::{ArenaConfig, GameState, Outcome, PlayerId},
    input::{Command, InputEvent, InputSource, KeyBindings},
    surface::{Rect, Surface},
    GameError, BACKGROUND, BORDER_COLOR, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR, TICK_INTERVAL,
};

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Continue,
    Quit,
    Over(Outcome),
}

/// How a whole game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    Quit,
    Finished(Outcome),
}

/// Fixed-step game loop. The surface doubles as the occupancy map: any pixel
/// that is not background is deadly.
pub struct Game<S, I> {
    surface: S,
    input: I,
    bindings: KeyBindings,
    state: GameState,
    tick_interval: Duration,
}

impl<S: Surface, I: InputSource> Game<S, I> {
    /// Clears the surface and draws the arena wall.
    pub fn new(
        mut surface: S,
        input: I,
        arena: ArenaConfig,
        bindings: KeyBindings,
    ) -> Result<Self, GameError> {
        if surface.width() < arena.width() || surface.height() < arena.height() {
            return Err(GameError::InvalidArena(format!(
                "{}x{} arena does not fit on a {}x{} surface",
                arena.width(),
                arena.height(),
                surface.width(),
                surface.height()
            )));
        }
        let whole = Rect::new(0, 0, surface.width(), surface.height());
        surface.fill_rect(whole, BACKGROUND)?;
        for rect in arena.border_rects() {
            surface.fill_rect(rect, BORDER_COLOR)?;
        }
        surface.present()?;
        info!(
            width = arena.width(),
            height = arena.height(),
            border = arena.border(),
            "arena ready"
        );
        Ok(Self {
            surface,
            input,
            bindings,
            state: GameState::new(arena),
            tick_interval: TICK_INTERVAL,
        })
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Runs ticks until a player dies or a quit arrives, sleeping a fixed
    /// interval between ticks.
    pub fn run(&mut self) -> Result<Ending, GameError> {
        loop {
            match self.step()? {
                Tick::Continue => sleep(self.tick_interval),
                Tick::Quit => return Ok(Ending::Quit),
                Tick::Over(outcome) => return Ok(Ending::Finished(outcome)),
            }
        }
    }

    /// One tick: input, draw current positions, present, advance, collide.
    pub fn step(&mut self) -> Result<Tick, GameError> {
        for event in self.input.poll_events()? {
            match event {
                InputEvent::Quit => {
                    info!(tick = self.state.tick, "quit requested");
                    return Ok(Tick::Quit);
                }
                InputEvent::KeyPressed(key) => {
                    if let Some(command) = self.bindings.command_for(key) {
                        self.apply(command);
                    }
                }
            }
        }

        self.surface.plot(self.state.one.position, PLAYER_ONE_COLOR)?;
        self.surface.plot(self.state.two.position, PLAYER_TWO_COLOR)?;
        self.surface.present()?;

        let one_dead = self.advance(PlayerId::One);
        let two_dead = self.advance(PlayerId::Two);
        self.state.tick += 1;
        trace!(
            tick = self.state.tick,
            one = ?self.state.one.position,
            two = ?self.state.two.position,
            "tick"
        );

        match Outcome::decide(one_dead, two_dead) {
            Some(outcome) => {
                info!(tick = self.state.tick, %outcome, "game over");
                Ok(Tick::Over(outcome))
            }
            None => Ok(Tick::Continue),
        }
    }

    // dead players still turn; the game ends on the tick a death happens anyway.
    fn apply(&mut self, command: Command) {
        match command {
            Command::Turn { player, turn } => {
                let player_state = self.state.player_mut(player);
                player_state.direction = player_state.direction.turn(turn);
                debug!(?player, ?turn, direction = ?player_state.direction, "turned");
            }
        }
    }

    /// Moves one player a cell and returns whether it crashed.
    fn advance(&mut self, id: PlayerId) -> bool {
        let player = self.state.player_mut(id);
        player.position = update_position(player.position, player.direction);
        // off-surface reads are `None` and count as a crash.
        player.alive = self.surface.pixel_at(player.position) == Some(BACKGROUND);
        if !player.alive {
            debug!(player = ?id, position = ?player.position, "crashed");
        }
        !player.alive
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io, time::Duration};

    use crate::{
        assert_pixel,
        direction::{Direction, Point},
        game::{Ending, Game, Tick},
        game_state::{ArenaConfig, Outcome},
        input::{InputEvent, InputSource, KeyBindings},
        surface::PixelGrid,
        GameError, BACKGROUND, BORDER_COLOR, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR,
    };

    /// Hands out one queued batch per poll, then nothing.
    struct ScriptedInput {
        batches: VecDeque<Vec<InputEvent>>,
    }

    impl ScriptedInput {
        fn new(batches: Vec<Vec<InputEvent>>) -> Self {
            Self {
                batches: batches.into(),
            }
        }
    }

    impl InputSource for ScriptedInput {
        fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
            Ok(self.batches.pop_front().unwrap_or_default())
        }
    }

    struct BrokenInput;

    impl InputSource for BrokenInput {
        fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
            Err(io::Error::new(io::ErrorKind::Other, "input gone"))
        }
    }

    fn game_on(
        width: u32,
        height: u32,
        batches: Vec<Vec<InputEvent>>,
    ) -> Game<PixelGrid, ScriptedInput> {
        let arena = ArenaConfig::new(width, height, 2).unwrap();
        Game::new(
            PixelGrid::new(width, height, BACKGROUND),
            ScriptedInput::new(batches),
            arena,
            KeyBindings::default(),
        )
        .unwrap()
        .with_tick_interval(Duration::ZERO)
    }

    // P1 starts at (10, 15), P2 at (30, 15), wall is 2 thick.
    fn small_game(batches: Vec<Vec<InputEvent>>) -> Game<PixelGrid, ScriptedInput> {
        game_on(40, 30, batches)
    }

    fn run_to_end(game: &mut Game<PixelGrid, ScriptedInput>) -> (Outcome, u64) {
        loop {
            match game.step().unwrap() {
                Tick::Continue => continue,
                Tick::Over(outcome) => return (outcome, game.state().tick),
                Tick::Quit => panic!("unexpected quit"),
            }
        }
    }

    fn key(c: char) -> InputEvent {
        InputEvent::KeyPressed(c)
    }

    #[test]
    fn new_draws_the_wall() {
        let game = small_game(vec![]);
        let grid = game.surface();
        assert_pixel!(grid, (0, 0), BORDER_COLOR);
        assert_pixel!(grid, (1, 1), BORDER_COLOR);
        assert_pixel!(grid, (39, 29), BORDER_COLOR);
        assert_pixel!(grid, (20, 0), BORDER_COLOR);
        assert_pixel!(grid, (20, 28), BORDER_COLOR);
        assert_pixel!(grid, (0, 15), BORDER_COLOR);
        assert_pixel!(grid, (38, 15), BORDER_COLOR);
        assert_pixel!(grid, (2, 2), BACKGROUND);
        assert_pixel!(grid, (37, 27), BACKGROUND);
        assert_pixel!(grid, (10, 15), BACKGROUND);
        assert_ne!(BORDER_COLOR, BACKGROUND);
    }

    #[test]
    fn new_rejects_small_surface() {
        let result = Game::new(
            PixelGrid::new(10, 10, BACKGROUND),
            ScriptedInput::new(vec![]),
            ArenaConfig::default(),
            KeyBindings::default(),
        );
        assert!(matches!(result, Err(GameError::InvalidArena(_))));
    }

    #[test]
    fn straight_up_is_a_draw() {
        let mut game = small_game(vec![]);
        // y goes from 15 to 1, the inner edge of the top wall.
        assert_eq!(run_to_end(&mut game), (Outcome::Draw, 14));
        let state = game.state();
        assert_eq!(state.one.position, Point::new(10, 1));
        assert_eq!(state.two.position, Point::new(30, 1));
        assert!(!state.one.alive && !state.two.alive);
        for y in 2..=15 {
            assert_pixel!(game.surface(), (10, y), PLAYER_ONE_COLOR);
            assert_pixel!(game.surface(), (30, y), PLAYER_TWO_COLOR);
        }
    }

    #[test]
    fn default_arena_is_a_draw_without_input() {
        let mut game = Game::new(
            PixelGrid::new(1000, 700, BACKGROUND),
            ScriptedInput::new(vec![]),
            ArenaConfig::default(),
            KeyBindings::default(),
        )
        .unwrap()
        .with_tick_interval(Duration::ZERO);
        assert_eq!(game.run().unwrap(), Ending::Finished(Outcome::Draw));
        // from y = 350 up to y = 9, the lowest wall row.
        assert_eq!(game.state().tick, 341);
    }

    #[test]
    fn one_turning_right_lets_one_win() {
        let mut game = small_game(vec![vec![key('x')]]);
        assert_eq!(run_to_end(&mut game), (Outcome::OneWon, 14));
        let state = game.state();
        assert_eq!(state.one.direction, Direction::Right);
        assert_eq!(state.one.position, Point::new(24, 15));
        assert!(state.one.alive);
        assert!(!state.two.alive);
    }

    #[test]
    fn two_turning_into_the_side_wall_lets_one_win() {
        let mut game = small_game(vec![vec![key('.')]]);
        // x goes from 30 to 38, the inner edge of the right wall.
        assert_eq!(run_to_end(&mut game), (Outcome::OneWon, 8));
        assert_eq!(game.state().two.position, Point::new(38, 15));
    }

    #[test]
    fn one_turning_left_into_the_side_wall_lets_two_win() {
        let mut game = small_game(vec![vec![key('z')]]);
        // x goes from 10 to 1.
        assert_eq!(run_to_end(&mut game), (Outcome::TwoWon, 9));
    }

    #[test]
    fn reversing_into_own_trail_is_a_single_death() {
        // tick 1 moves P1 to (10, 14); tick 2 turns it around onto (10, 15).
        let mut game = small_game(vec![vec![], vec![key('x'), key('x')]]);
        assert_eq!(run_to_end(&mut game), (Outcome::TwoWon, 2));
        let state = game.state();
        assert_eq!(state.one.direction, Direction::Down);
        assert_eq!(state.one.position, Point::new(10, 15));
        assert!(!state.one.alive);
        assert!(state.two.alive);
    }

    #[test]
    fn crossing_the_opponents_trail_is_deadly() {
        // P1 starts at (10, 30), P2 at (30, 30). P2 heads left along y = 30 into
        // P1's first trail pixel while P1 still climbs towards the top wall.
        let mut game = game_on(40, 60, vec![vec![key(',')]]);
        assert_eq!(run_to_end(&mut game), (Outcome::OneWon, 20));
        let state = game.state();
        assert_eq!(state.two.position, Point::new(10, 30));
        assert!(state.one.alive);
        assert_pixel!(game.surface(), (10, 30), PLAYER_ONE_COLOR);
    }

    #[test]
    fn head_on_is_a_draw() {
        // both meet on (20, 15) and then each runs into the other's trail.
        let mut game = small_game(vec![vec![key('x'), key(',')]]);
        assert_eq!(run_to_end(&mut game), (Outcome::Draw, 11));
    }

    #[test]
    fn turns_in_one_batch_apply_in_order() {
        let mut game = small_game(vec![vec![key('x'), key('z')]]);
        assert_eq!(game.step().unwrap(), Tick::Continue);
        assert_eq!(game.state().one.direction, Direction::Up);
        assert_eq!(game.state().one.position, Point::new(10, 14));

        let mut game = small_game(vec![vec![key('z'), key('z'), key('z')]]);
        assert_eq!(game.step().unwrap(), Tick::Continue);
        assert_eq!(game.state().one.direction, Direction::Right);
    }

    #[test]
    fn unbound_keys_do_nothing() {
        let mut game = small_game(vec![vec![key('q'), key('X')]]);
        assert_eq!(game.step().unwrap(), Tick::Continue);
        assert_eq!(game.state().one.direction, Direction::Up);
        assert_eq!(game.state().two.direction, Direction::Up);
    }

    #[test]
    fn quit_stops_before_drawing() {
        let mut game = small_game(vec![vec![InputEvent::Quit, key('x')]]);
        assert_eq!(game.step().unwrap(), Tick::Quit);
        let state = game.state();
        assert_eq!(state.tick, 0);
        assert_eq!(state.one.direction, Direction::Up);
        assert_eq!(state.one.position, Point::new(10, 15));
        assert_pixel!(game.surface(), (10, 15), BACKGROUND);
        assert_pixel!(game.surface(), (30, 15), BACKGROUND);
    }

    #[test]
    fn quit_mid_game_ends_the_run() {
        let mut game = small_game(vec![vec![], vec![], vec![InputEvent::Quit]]);
        assert_eq!(game.run().unwrap(), Ending::Quit);
        assert_eq!(game.state().tick, 2);
        assert!(game.state().one.alive && game.state().two.alive);
    }

    #[test]
    fn input_failure_is_an_error() {
        let mut game = Game::new(
            PixelGrid::new(40, 30, BACKGROUND),
            BrokenInput,
            ArenaConfig::new(40, 30, 2).unwrap(),
            KeyBindings::default(),
        )
        .unwrap();
        assert!(matches!(game.step(), Err(GameError::Io(_))));
    }
}
