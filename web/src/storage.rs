use gloo::storage::errors::StorageError as LocalStorageError;
use gloo::storage::{LocalStorage, Storage};
use jackpot_core::{GridSnapshot, GridStore, GuessBudget, StorageError, StorageKey};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Keeps the grid and guess budget in the browser's `localStorage`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BrowserStore;

impl BrowserStore {
    fn load<T: StorageKey + DeserializeOwned>() -> Option<T> {
        match LocalStorage::get(T::KEY) {
            Ok(value) => Some(value),
            Err(LocalStorageError::KeyNotFound(_)) => None,
            Err(err) => {
                log::warn!("Ignoring unreadable {}: {}", T::KEY, err);
                None
            }
        }
    }

    fn save<T: StorageKey + Serialize>(value: &T) -> Result<(), StorageError> {
        LocalStorage::set(T::KEY, value).map_err(|err| match err {
            LocalStorageError::SerdeError(err) => StorageError::Encode {
                key: T::KEY,
                reason: err.to_string(),
            },
            err => StorageError::Write {
                key: T::KEY,
                reason: err.to_string(),
            },
        })
    }

    /// Forgets the saved game so the next start generates a fresh grid.
    pub fn clear() {
        LocalStorage::delete(GridSnapshot::KEY);
        LocalStorage::delete(GuessBudget::KEY);
    }
}

impl GridStore for BrowserStore {
    fn load_cell_snapshot(&self) -> Option<GridSnapshot> {
        Self::load()
    }

    fn load_guess_count(&self) -> Option<GuessBudget> {
        Self::load()
    }

    fn save_cell_snapshot(&mut self, snapshot: &GridSnapshot) -> Result<(), StorageError> {
        Self::save(snapshot)
    }

    fn save_guess_count(&mut self, guesses: GuessBudget) -> Result<(), StorageError> {
        Self::save(&guesses)
    }

    fn clear_saved(&mut self) -> Result<(), StorageError> {
        Self::clear();
        Ok(())
    }
}
