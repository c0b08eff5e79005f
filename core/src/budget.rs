use serde::{Deserialize, Serialize};

/// Number of on-demand reveals the player has left. Stored as a bare integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuessBudget(u32);

impl GuessBudget {
    pub const fn new(remaining: u32) -> Self {
        Self(remaining)
    }

    pub const fn remaining(self) -> u32 {
        self.0
    }

    pub const fn can_spend(self) -> bool {
        self.0 > 0
    }

    /// Uses up one guess, refusing once the budget is exhausted.
    pub(crate) fn spend(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(remaining) => {
                self.0 = remaining;
                true
            }
            None => false,
        }
    }
}
