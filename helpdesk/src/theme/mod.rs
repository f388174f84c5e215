//! Light/dark theme preference and its persistence.
//!
//! The current mode lives in a [`ThemeContext`] that is passed to whoever
//! needs it. Persistence goes through the [`ThemeStore`] port, which reads
//! and writes a single value.

pub mod store;

use serde::{Deserialize, Serialize};

pub use store::{JsonThemeStore, MemoryThemeStore};

/// Errors from a [`ThemeStore`].
#[derive(Debug, thiserror::Error)]
pub enum ThemeStoreError {
    /// The preference file could not be read or written.
    #[error("theme file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The preference file is not valid JSON.
    #[error("theme file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background.
    #[default]
    Light,
    /// Dark background.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable storage for the theme preference.
pub trait ThemeStore: Send + Sync {
    /// Read the stored mode. `None` if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeStoreError`] if the stored value is unreadable.
    fn load(&self) -> Result<Option<ThemeMode>, ThemeStoreError>;

    /// Store `mode`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeStoreError`] if the value cannot be persisted.
    fn save(&self, mode: ThemeMode) -> Result<(), ThemeStoreError>;
}

/// The current theme plus the store it is written through to.
pub struct ThemeContext {
    mode: ThemeMode,
    store: Box<dyn ThemeStore>,
}

impl ThemeContext {
    /// Load the stored preference. Falls back to the default mode if the
    /// store is empty or unreadable.
    #[must_use]
    pub fn load(store: Box<dyn ThemeStore>) -> Self {
        let mode = match store.load() {
            Ok(Some(mode)) => mode,
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme preference, using default");
                ThemeMode::default()
            }
        };
        Self { mode, store }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Switch to `mode` and persist it.
    ///
    /// A persistence failure is logged; the in-memory mode still changes.
    pub fn set(&mut self, mode: ThemeMode) {
        self.mode = mode;
        if let Err(e) = self.store.save(mode) {
            tracing::warn!(error = %e, %mode, "could not persist theme preference");
        } else {
            tracing::info!(%mode, "theme changed");
        }
    }

    /// Flip between light and dark. Returns the new mode.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggled();
        self.set(next);
        next
    }
}

impl std::fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeContext")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
