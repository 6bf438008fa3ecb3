use crate::*;

/// Owns the game being played and applies one move at a time.
///
/// With a seed, every game of the session is reproducible: the n-th game uses `seed + n`.
#[derive(Clone, Debug)]
pub struct Session {
    options: GameOptions,
    next_seed: Option<u64>,
    state: GameState,
}

impl Session {
    pub fn new(options: GameOptions) -> Self {
        Self::start(options, None)
    }

    pub fn with_seed(options: GameOptions, seed: u64) -> Self {
        Self::start(options, Some(seed))
    }

    fn start(options: GameOptions, mut next_seed: Option<u64>) -> Self {
        let options = GameOptions::new(options.width, options.height, options.mines);
        let state = Self::generate(options, &mut next_seed);
        Self {
            options,
            next_seed,
            state,
        }
    }

    fn generate(options: GameOptions, next_seed: &mut Option<u64>) -> GameState {
        let generator = match next_seed {
            Some(seed) => {
                let generator = RandomMineGenerator::new(*seed);
                *seed = seed.wrapping_add(1);
                generator
            }
            None => RandomMineGenerator::from_entropy(),
        };
        log::info!(
            "Starting {}x{} game with {} mines (seed {})",
            options.width,
            options.height,
            options.mines,
            generator.seed()
        );
        GameState::with_generator(options, generator)
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Starts a new game with different options.
    pub fn create(&mut self, options: GameOptions) {
        self.options = GameOptions::new(options.width, options.height, options.mines);
        self.state = Self::generate(self.options, &mut self.next_seed);
    }

    /// Starts a new game with the current options.
    pub fn reset(&mut self) {
        self.create(self.options);
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let outcome = self.state.apply_reveal(coords);
        self.log_finish(outcome.has_update());
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        let outcome = self.state.apply_toggle_flag(coords);
        self.log_finish(outcome.has_update());
        outcome
    }

    fn log_finish(&self, updated: bool) {
        if updated && self.state.is_finished() {
            log::info!(
                "Game {:?} after {}s",
                self.state.status(),
                self.state.elapsed().num_seconds()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn safe_cells(state: &GameState) -> Vec<Coord2> {
        state
            .cells()
            .indexed_iter()
            .filter(|(_, cell)| !cell.mined)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    #[test]
    fn seeded_sessions_replay_the_same_games() {
        let options = GameOptions::new(9, 9, 10);
        let mut first = Session::with_seed(options, 5);
        let mut second = Session::with_seed(options, 5);

        assert_eq!(first.state().cells(), second.state().cells());

        first.reset();
        second.reset();
        assert_eq!(first.state().cells(), second.state().cells());
    }

    #[test]
    fn reset_keeps_options_and_starts_fresh() {
        let mut session = Session::with_seed(GameOptions::new(4, 3, 2), 1);
        let target = safe_cells(session.state())[0];
        session.reveal(target);

        session.reset();

        assert_eq!(session.options(), GameOptions::new_unchecked(4, 3, 2));
        assert_eq!(session.state().size(), (3, 4));
        assert_eq!(session.state().mine_count(), 2);
        assert!(session.state().cells().iter().all(|cell| !cell.revealed));
        assert_eq!(session.state().status(), GameStatus::Pending);
    }

    #[test]
    fn create_switches_options_and_clamps() {
        let mut session = Session::new(GameOptions::default());

        session.create(GameOptions::new_unchecked(2, 2, 10));

        assert_eq!(session.options(), GameOptions::new_unchecked(2, 2, 4));
        assert_eq!(session.state().mine_count(), 4);
    }

    #[test]
    fn moves_update_the_held_state() {
        let mut session = Session::with_seed(GameOptions::new(5, 5, 3), 11);
        let mines: Vec<_> = session
            .state()
            .cells()
            .indexed_iter()
            .filter(|(_, cell)| cell.mined)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect();

        assert_eq!(session.toggle_flag(mines[0]), FlagOutcome::Flagged);
        assert_eq!(session.state().flag_count(), 1);

        assert_eq!(session.reveal(mines[1]), RevealOutcome::HitMine);
        assert_eq!(session.state().status(), GameStatus::Lost);
        assert_eq!(session.reveal(mines[2]), RevealOutcome::NoChange);
    }
}
