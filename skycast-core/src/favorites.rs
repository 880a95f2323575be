use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;

const STORAGE_KEY: &str = "favorites";

/// One remembered city with the temperature it had when first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub city: String,
    pub temperature: i32,
}

/// Persisted, de-duplicated list of favorite cities.
///
/// City identity is case-insensitive; the stored casing is whatever the first
/// add used. Every mutation reads the whole list, updates it, and writes it
/// back, which is safe under the single-process access model.
#[derive(Debug)]
pub struct Favorites<S> {
    storage: S,
}

impl<S: KeyValueStorage> Favorites<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Record a city unless one with the same case-insensitive name exists.
    ///
    /// First write wins: a later `add` for the same city keeps the original
    /// casing and temperature. The temperature is rounded on the way in.
    pub fn add(&mut self, city: &str, temperature: f64) -> Result<()> {
        let mut entries = self.load()?;
        let normalized = city.to_lowercase();
        if entries.iter().any(|entry| entry.city.to_lowercase() == normalized) {
            return Ok(());
        }

        entries.push(FavoriteEntry {
            city: city.to_string(),
            temperature: temperature.round() as i32,
        });
        self.store(&entries)
    }

    /// Remove every entry matching the name case-insensitively.
    pub fn remove(&mut self, city: &str) -> Result<()> {
        let mut entries = self.load()?;
        let normalized = city.to_lowercase();
        entries.retain(|entry| entry.city.to_lowercase() != normalized);
        self.store(&entries)
    }

    /// Entries in insertion order.
    pub fn list(&self) -> Result<Vec<FavoriteEntry>> {
        self.load()
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store(&[])
    }

    fn load(&self) -> Result<Vec<FavoriteEntry>> {
        let Some(raw) = self.storage.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                // An unreadable list is dropped; the next mutation rewrites it.
                tracing::warn!(error = %err, "stored favorites unreadable, starting over");
                Ok(Vec::new())
            }
        }
    }

    fn store(&mut self, entries: &[FavoriteEntry]) -> Result<()> {
        let raw = serde_json::to_string(entries).context("Failed to serialize favorites")?;
        self.storage.set(STORAGE_KEY, &raw)
    }
}
