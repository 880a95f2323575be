use anyhow::Result;

use crate::storage::KeyValueStorage;

const STORAGE_KEY: &str = "theme";

/// Display theme preference. Defaults to light when nothing is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_stored(value: &str) -> Self {
        match value {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the persisted theme, defaulting to light when absent.
pub fn load(storage: &impl KeyValueStorage) -> Result<Theme> {
    Ok(storage
        .get(STORAGE_KEY)?
        .map(|raw| Theme::from_stored(raw.trim()))
        .unwrap_or_default())
}

/// Flip the persisted theme and return the new value.
pub fn toggle(storage: &mut impl KeyValueStorage) -> Result<Theme> {
    let next = load(storage)?.flipped();
    storage.set(STORAGE_KEY, next.as_str())?;
    Ok(next)
}
