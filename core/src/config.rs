use core::time::Duration;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Operating mode, chosen once when the host starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Normal,
    Debug,
}

impl Default for Mode {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeAmounts {
    pub jackpot: Amount,
    pub small_jackpot: Amount,
    pub empty: Amount,
}

impl PrizeAmounts {
    /// Closed cells display the same amount as empty ones.
    pub const fn amount_for(&self, state: CellState) -> Amount {
        match state {
            CellState::Jackpot => self.jackpot,
            CellState::SmallJackpot => self.small_jackpot,
            CellState::Closed | CellState::Empty => self.empty,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessLimits {
    pub normal: u32,
    pub debug: u32,
}

impl GuessLimits {
    pub const fn for_mode(&self, mode: Mode) -> GuessBudget {
        match mode {
            Mode::Normal => GuessBudget::new(self.normal),
            Mode::Debug => GuessBudget::new(self.debug),
        }
    }
}

/// Inclusive range of milliseconds to wait between two ambient reveals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_ms: u32,
    pub max_ms: u32,
}

impl DelayRange {
    pub const fn new(min_ms: u32, max_ms: u32) -> Self {
        Self { min_ms, max_ms }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let millis = if self.min_ms >= self.max_ms {
            self.min_ms
        } else {
            rng.random_range(self.min_ms..=self.max_ms)
        };
        Duration::from_millis(millis.into())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub jackpots: CellCount,
    pub small_jackpots: CellCount,
    pub amounts: PrizeAmounts,
    pub guesses: GuessLimits,
    pub mode: Mode,
    pub reveal_delay: DelayRange,
    /// Persist every this many ambient reveals.
    pub checkpoint_interval: CellCount,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        size: (20, 25),
        jackpots: 1,
        small_jackpots: 100,
        amounts: PrizeAmounts {
            jackpot: 10_000,
            small_jackpot: 250,
            empty: 0,
        },
        guesses: GuessLimits {
            normal: 3,
            debug: 50,
        },
        mode: Mode::Normal,
        reveal_delay: DelayRange::new(100, 600),
        checkpoint_interval: 20,
    };

    pub const fn with_size(mut self, size: Coord2) -> Self {
        self.size = size;
        self
    }

    pub const fn with_prizes(mut self, jackpots: CellCount, small_jackpots: CellCount) -> Self {
        self.jackpots = jackpots;
        self.small_jackpots = small_jackpots;
        self
    }

    pub const fn with_guesses(mut self, normal: u32, debug: u32) -> Self {
        self.guesses = GuessLimits { normal, debug };
        self
    }

    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_reveal_delay(mut self, reveal_delay: DelayRange) -> Self {
        self.reveal_delay = reveal_delay;
        self
    }

    pub const fn with_checkpoint_interval(mut self, checkpoint_interval: CellCount) -> Self {
        self.checkpoint_interval = checkpoint_interval;
        self
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn initial_guesses(&self) -> GuessBudget {
        self.guesses.for_mode(self.mode)
    }

    /// Clamps values so the grid is non-empty, at least one cell stays empty, and the reveal pacing is usable.
    pub fn sanitized(self) -> Self {
        let mut config = self;

        let size = (config.size.0.max(1), config.size.1.max(1));
        if size != config.size {
            log::warn!("Grid size {:?} is degenerate, using {:?}", config.size, size);
            config.size = size;
        }

        let capacity = config.total_cells().saturating_sub(1);
        if config.jackpots > capacity {
            log::warn!(
                "Requested {} jackpots but only {} fit",
                config.jackpots,
                capacity
            );
            config.jackpots = capacity;
        }
        let small_capacity = capacity - config.jackpots;
        if config.small_jackpots > small_capacity {
            log::warn!(
                "Requested {} small jackpots but only {} fit",
                config.small_jackpots,
                small_capacity
            );
            config.small_jackpots = small_capacity;
        }

        let DelayRange { min_ms, max_ms } = config.reveal_delay;
        if min_ms > max_ms {
            log::warn!("Reveal delay range {}..{} is inverted", min_ms, max_ms);
            config.reveal_delay = DelayRange::new(max_ms, min_ms);
        }

        if config.checkpoint_interval == 0 {
            log::warn!("Checkpoint interval cannot be zero, persisting every reveal");
            config.checkpoint_interval = 1;
        }

        config
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
