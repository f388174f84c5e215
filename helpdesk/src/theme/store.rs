//! [`ThemeStore`] implementations.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ThemeMode, ThemeStore, ThemeStoreError};

/// On-disk shape of the preference file.
#[derive(Debug, Serialize, Deserialize)]
struct ThemeFile {
    theme: ThemeMode,
}

/// Stores the preference as `{"theme": "dark"}` in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonThemeStore {
    path: PathBuf,
}

impl JsonThemeStore {
    /// A store backed by `path`. The file is created on first save.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data dir>/helpdesk/theme.json`, if the platform has a data directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("helpdesk").join("theme.json"))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for JsonThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: ThemeFile = serde_json::from_str(&contents)?;
        Ok(Some(file.theme))
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&ThemeFile { theme: mode })?;
        std::fs::write(&self.path, data)?;
        Ok(())
    }
}

/// In-memory store for tests and for running without a data directory.
///
/// Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    slot: Arc<parking_lot::Mutex<Option<ThemeMode>>>,
}

impl MemoryThemeStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored value.
    #[must_use]
    pub fn stored(&self) -> Option<ThemeMode> {
        *self.slot.lock()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError> {
        Ok(self.stored())
    }

    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError> {
        *self.slot.lock() = Some(mode);
        Ok(())
    }
}
