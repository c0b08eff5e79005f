use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::*;

/// Associates a persisted value with the key it lives under.
pub trait StorageKey {
    const KEY: &'static str;
}

/// Stored form of one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub id: CellIndex,
    #[serde(alias = "state")]
    pub visible_state: CellState,
    pub hidden_state: Prize,
    pub row: Coord,
    pub col: Coord,
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            id: cell.id(),
            visible_state: cell.visible(),
            hidden_state: cell.hidden(),
            row: cell.row(),
            col: cell.col(),
        }
    }
}

/// Stored form of a whole grid, a JSON array of cell records in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GridSnapshot {
    pub cells: Vec<CellRecord>,
}

impl StorageKey for GridSnapshot {
    const KEY: &'static str = "jackpot-cells";
}

impl StorageKey for GuessBudget {
    const KEY: &'static str = "jackpot-guesses";
}

/// Durable home for the grid and guess budget. Loads return `None` for anything missing or unreadable.
pub trait GridStore {
    fn load_cell_snapshot(&self) -> Option<GridSnapshot>;
    fn load_guess_count(&self) -> Option<GuessBudget>;
    fn save_cell_snapshot(&mut self, snapshot: &GridSnapshot) -> core::result::Result<(), StorageError>;
    fn save_guess_count(&mut self, guesses: GuessBudget) -> core::result::Result<(), StorageError>;
    /// Removes both saved values.
    fn clear_saved(&mut self) -> core::result::Result<(), StorageError>;
}

/// In-memory key-value store holding the same JSON strings a browser would keep in `localStorage`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    read_only: bool,
    write_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    /// Makes every write fail, the way a full or disabled storage area would.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    fn load<T: StorageKey + DeserializeOwned>(&self) -> Option<T> {
        let raw = self.entries.get(T::KEY)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("Ignoring unreadable {}: {}", T::KEY, err);
                None
            }
        }
    }

    fn save<T: StorageKey + Serialize>(&mut self, value: &T) -> core::result::Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|err| StorageError::Encode {
            key: T::KEY,
            reason: err.to_string(),
        })?;
        if self.read_only {
            return Err(StorageError::Write {
                key: T::KEY,
                reason: "storage is read-only".to_string(),
            });
        }
        self.entries.insert(T::KEY.to_string(), raw);
        self.write_count += 1;
        Ok(())
    }
}

impl GridStore for MemoryStore {
    fn load_cell_snapshot(&self) -> Option<GridSnapshot> {
        self.load()
    }

    fn load_guess_count(&self) -> Option<GuessBudget> {
        self.load()
    }

    fn save_cell_snapshot(&mut self, snapshot: &GridSnapshot) -> core::result::Result<(), StorageError> {
        self.save(snapshot)
    }

    fn save_guess_count(&mut self, guesses: GuessBudget) -> core::result::Result<(), StorageError> {
        self.save(&guesses)
    }

    fn clear_saved(&mut self) -> core::result::Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write {
                key: GridSnapshot::KEY,
                reason: "storage is read-only".to_string(),
            });
        }
        self.entries.remove(GridSnapshot::KEY);
        self.entries.remove(GuessBudget::KEY);
        Ok(())
    }
}
