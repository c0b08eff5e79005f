use alloc::string::String;
use rand::prelude::*;

use crate::*;

/// Owns the grid, the guess budget, and the store they are persisted to.
///
/// Grid and budget are always loaded, replaced, and saved together. A host shares the engine with the ambient
/// sweep through a `RefCell`, every mutation here completes within a single borrow.
#[derive(Debug)]
pub struct JackpotEngine<S> {
    config: GameConfig,
    grid: Option<Grid>,
    guesses: GuessBudget,
    store: S,
    rng: SmallRng,
}

impl<S: GridStore> JackpotEngine<S> {
    pub fn new(config: GameConfig, store: S, seed: u64) -> Self {
        let config = config.sanitized();
        Self {
            guesses: config.initial_guesses(),
            config,
            grid: None,
            store,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.grid.is_some()
    }

    pub fn guesses(&self) -> GuessBudget {
        self.guesses
    }

    pub fn remaining_guesses(&self) -> u32 {
        self.guesses.remaining()
    }

    pub fn can_user_open_cell(&self) -> bool {
        self.guesses.can_spend()
    }

    pub fn cell(&self, index: CellIndex) -> Option<&Cell> {
        self.grid.as_ref()?.cell(index)
    }

    pub fn amount_for(&self, state: CellState) -> Amount {
        self.config.amounts.amount_for(state)
    }

    pub fn formatted_amount(&self, state: CellState) -> String {
        format_price(self.amount_for(state))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Establishes the grid and budget, restoring them when the store holds a valid pair and generating a fresh
    /// pair otherwise. Returns the ambient sweep over every still-closed cell, or `None` when a grid was already
    /// established.
    pub fn initialize(&mut self) -> Option<AmbientSweep> {
        if self.grid.is_some() {
            log::debug!("Grid already initialized");
            return None;
        }

        match self.restore() {
            Ok((grid, guesses)) => {
                log::info!(
                    "Restored grid with {} closed cells and {} guesses left",
                    grid.closed_count(),
                    guesses.remaining()
                );
                self.grid = Some(grid);
                self.guesses = guesses;
            }
            Err(err) => {
                match err {
                    GameError::MissingSnapshot => log::debug!("No saved grid, starting fresh"),
                    err => log::warn!("Discarding saved grid: {}", err),
                }
                let grid = RandomGridGenerator::new(self.rng.random()).generate(&self.config);
                self.grid = Some(grid);
                self.guesses = self.config.initial_guesses();
                self.persist();
            }
        }

        let closed = self.grid.as_ref().map(Grid::closed_indices).unwrap_or_default();
        Some(AmbientSweep::new(
            closed,
            self.config.reveal_delay,
            self.config.checkpoint_interval,
            SmallRng::seed_from_u64(self.rng.random()),
        ))
    }

    fn restore(&self) -> Result<(Grid, GuessBudget)> {
        let snapshot = self
            .store
            .load_cell_snapshot()
            .ok_or(GameError::MissingSnapshot)?;
        let guesses = self
            .store
            .load_guess_count()
            .ok_or(GameError::MissingGuessCount)?;
        let grid = Grid::from_snapshot(&snapshot, self.config.size)?;
        Ok((grid, guesses))
    }

    /// Opens a cell on the player's behalf, returns `false` without changing anything when no guesses are left or
    /// the cell is missing or already open.
    pub fn open_user_cell(&mut self, index: CellIndex) -> bool {
        self.reveal_for_user(index).is_revealed()
    }

    pub fn reveal_for_user(&mut self, index: CellIndex) -> UserRevealOutcome {
        use UserRevealOutcome::*;

        if !self.can_user_open_cell() {
            return NoGuessesLeft;
        }
        let Some(grid) = self.grid.as_mut() else {
            return InvalidCell;
        };

        let outcome = match grid.reveal(index) {
            CellReveal::Opened(prize) => {
                self.guesses.spend();
                Revealed(prize)
            }
            CellReveal::AlreadyOpen => AlreadyOpen,
            CellReveal::Invalid => InvalidCell,
        };

        if outcome.is_revealed() {
            log::debug!(
                "Player opened cell {}: {:?}, {} guesses left",
                index,
                outcome,
                self.guesses.remaining()
            );
            self.persist();
        }
        outcome
    }

    /// Drops the current game and wipes its saved pair. Until the next `initialize` nothing is persisted, so a sweep
    /// still running against this engine finds no cells to open and writes nothing back.
    pub fn discard(&mut self) {
        self.grid = None;
        self.guesses = self.config.initial_guesses();
        match self.store.clear_saved() {
            Ok(()) => log::info!("Saved game discarded"),
            Err(err) => log::error!("Could not clear saved game: {}", err),
        }
    }

    /// Opens a cell without touching the guess budget.
    pub(crate) fn reveal_ambient(&mut self, index: CellIndex) -> CellReveal {
        self.grid
            .as_mut()
            .map_or(CellReveal::Invalid, |grid| grid.reveal(index))
    }

    /// Writes the grid and then the guess count. Failures are logged and reported, in-memory state is kept either
    /// way and the next successful write catches the store up.
    pub fn persist(&mut self) -> bool {
        let Some(grid) = &self.grid else {
            return false;
        };
        let snapshot = grid.to_snapshot();

        if let Err(err) = self.store.save_cell_snapshot(&snapshot) {
            log::error!("Could not save grid: {}", err);
            return false;
        }
        if let Err(err) = self.store.save_guess_count(self.guesses) {
            log::error!("Could not save guess count: {}", err);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_config() -> GameConfig {
        GameConfig::DEFAULT
            .with_size((5, 5))
            .with_prizes(1, 3)
            .with_guesses(2, 10)
            .with_reveal_delay(DelayRange::new(0, 0))
            .with_checkpoint_interval(4)
    }

    fn engine(store: MemoryStore, seed: u64) -> JackpotEngine<MemoryStore> {
        JackpotEngine::new(scenario_config(), store, seed)
    }

    fn assert_prizes(grid: &Grid) {
        assert_eq!(grid.total_cells(), 25);
        assert_eq!(grid.prize_count(Prize::Jackpot), 1);
        assert_eq!(grid.prize_count(Prize::SmallJackpot), 3);
        assert_eq!(grid.prize_count(Prize::Empty), 21);
    }

    #[test]
    fn initialize_generates_and_persists_fresh_grid() {
        let mut engine = engine(MemoryStore::new(), 1);

        let sweep = engine.initialize().unwrap();

        let grid = engine.grid().unwrap();
        assert_prizes(grid);
        assert_eq!(grid.closed_count(), 25);
        assert_eq!(sweep.len(), 25);
        assert_eq!(engine.remaining_guesses(), 2);
        assert!(engine.store().load_cell_snapshot().is_some());
        assert_eq!(engine.store().load_guess_count(), Some(GuessBudget::new(2)));
    }

    #[test]
    fn initialize_twice_is_a_no_op() {
        let mut engine = engine(MemoryStore::new(), 1);
        engine.initialize().unwrap();
        let grid = engine.grid().cloned();

        assert!(engine.initialize().is_none());
        assert_eq!(engine.grid().cloned(), grid);
    }

    #[test]
    fn debug_mode_uses_debug_guess_limit() {
        let config = scenario_config().with_mode(Mode::Debug);
        let mut engine = JackpotEngine::new(config, MemoryStore::new(), 1);

        engine.initialize();

        assert_eq!(engine.remaining_guesses(), 10);
    }

    #[test]
    fn user_reveals_spend_budget_until_exhausted() {
        let mut engine = engine(MemoryStore::new(), 3);
        engine.initialize();

        assert!(engine.open_user_cell(0));
        assert!(engine.open_user_cell(1));
        assert_eq!(engine.remaining_guesses(), 0);
        assert!(!engine.can_user_open_cell());

        let grid = engine.grid().cloned();
        let writes = engine.store().write_count();

        assert!(!engine.open_user_cell(2));
        assert_eq!(engine.reveal_for_user(2), UserRevealOutcome::NoGuessesLeft);
        assert_eq!(engine.grid().cloned(), grid);
        assert_eq!(engine.store().write_count(), writes);
        assert!(engine.cell(2).unwrap().is_closed());
    }

    #[test]
    fn user_reveal_shows_hidden_prize_and_persists() {
        let mut engine = engine(MemoryStore::new(), 5);
        engine.initialize();
        let hidden = engine.cell(7).unwrap().hidden();

        let outcome = engine.reveal_for_user(7);
        assert_eq!(outcome, UserRevealOutcome::Revealed(hidden));
        assert_eq!(outcome.revealed_prize(), Some(hidden));
        assert_eq!(outcome.is_winning(), hidden.is_winning());
        assert_eq!(engine.cell(7).unwrap().visible(), CellState::from(hidden));
        assert_eq!(engine.remaining_guesses(), 1);

        let saved = engine.store().load_cell_snapshot().unwrap();
        assert_eq!(saved.cells[7].visible_state, CellState::from(hidden));
        assert_eq!(engine.store().load_guess_count(), Some(GuessBudget::new(1)));
    }

    #[test]
    fn open_or_missing_cells_are_refused_without_spending() {
        let mut engine = engine(MemoryStore::new(), 5);
        engine.initialize();
        assert!(engine.open_user_cell(3));

        assert_eq!(engine.reveal_for_user(3), UserRevealOutcome::AlreadyOpen);
        assert_eq!(engine.reveal_for_user(3).revealed_prize(), None);
        assert_eq!(engine.reveal_for_user(25), UserRevealOutcome::InvalidCell);
        assert!(!engine.open_user_cell(CellIndex::MAX));
        assert_eq!(engine.remaining_guesses(), 1);
    }

    #[test]
    fn uninitialized_engine_refuses_reveals() {
        let mut engine = engine(MemoryStore::new(), 5);

        assert_eq!(engine.reveal_for_user(0), UserRevealOutcome::InvalidCell);
        assert_eq!(engine.remaining_guesses(), 2);
        assert!(!engine.persist());
    }

    #[test]
    fn initialize_resumes_saved_pair() {
        let mut first = engine(MemoryStore::new(), 11);
        first.initialize();
        assert!(first.open_user_cell(12));
        let saved_grid = first.grid().cloned().unwrap();

        let mut second = engine(first.into_store(), 99);
        let sweep = second.initialize().unwrap();

        assert_eq!(second.grid(), Some(&saved_grid));
        assert_eq!(second.remaining_guesses(), 1);
        assert_eq!(sweep.len(), 24);
        assert!(!sweep.order().contains(&12));
    }

    #[test]
    fn corrupt_snapshot_regenerates_both_values() {
        let mut store = MemoryStore::new();
        store.set_raw(GridSnapshot::KEY, r#"[{"id":"zero","visibleState":7}]"#);
        store.set_raw(GuessBudget::KEY, "0");
        let mut engine = engine(store, 2);

        let sweep = engine.initialize().unwrap();

        assert_prizes(engine.grid().unwrap());
        assert_eq!(sweep.len(), 25);
        assert_eq!(engine.remaining_guesses(), 2);
    }

    #[test]
    fn missing_guess_count_regenerates_grid() {
        let mut first = engine(MemoryStore::new(), 4);
        first.initialize();
        first.open_user_cell(0);
        let mut store = first.into_store();
        store.remove(GuessBudget::KEY);

        let mut second = engine(store, 8);
        second.initialize();

        assert_eq!(second.grid().unwrap().closed_count(), 25);
        assert_eq!(second.remaining_guesses(), 2);
    }

    #[test]
    fn snapshot_of_another_grid_size_regenerates() {
        let mut small = JackpotEngine::new(
            scenario_config().with_size((2, 2)).with_prizes(1, 1),
            MemoryStore::new(),
            4,
        );
        small.initialize();

        let mut engine = engine(small.into_store(), 4);
        engine.initialize();

        assert_prizes(engine.grid().unwrap());
    }

    #[test]
    fn failed_writes_do_not_interrupt_play() {
        let mut store = MemoryStore::new();
        store.set_read_only(true);
        let mut engine = engine(store, 6);

        assert!(engine.initialize().is_some());
        assert!(engine.open_user_cell(4));
        assert_eq!(engine.remaining_guesses(), 1);
        assert!(!engine.persist());
        assert_eq!(engine.store().load_cell_snapshot(), None);
    }

    #[test]
    fn discard_clears_memory_and_store() {
        let mut engine = engine(MemoryStore::new(), 9);
        engine.initialize();
        assert!(engine.open_user_cell(0));

        engine.discard();

        assert!(!engine.is_initialized());
        assert_eq!(engine.remaining_guesses(), 2);
        assert_eq!(engine.store().get_raw(GridSnapshot::KEY), None);
        assert_eq!(engine.store().get_raw(GuessBudget::KEY), None);
        assert!(!engine.persist());

        let sweep = engine.initialize().unwrap();
        assert_eq!(sweep.len(), 25);
        assert!(engine.store().load_cell_snapshot().is_some());
    }

    #[test]
    fn amounts_are_formatted_per_state() {
        let engine = engine(MemoryStore::new(), 0);

        assert_eq!(engine.formatted_amount(CellState::Jackpot), "10k");
        assert_eq!(engine.formatted_amount(CellState::SmallJackpot), "250");
        assert_eq!(engine.formatted_amount(CellState::Closed), "0");
        assert_eq!(engine.amount_for(CellState::Empty), 0);
    }
}
