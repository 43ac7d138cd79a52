//! User preferences: platform-conditioned defaults, one-shot migration of
//! the old flat storage keys, and best-effort persistence.

use serde::{Deserialize, Serialize};

use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub has_tray: bool,
    pub has_menus: bool,
    pub has_sidebar: bool,
    pub show_window_on_unread_changed: bool,
    pub enabled_dictionaries: Vec<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            // Linux trays are unreliable enough that the icon is opt-in there.
            has_tray: cfg!(not(target_os = "linux")),
            has_menus: true,
            has_sidebar: true,
            show_window_on_unread_changed: false,
            enabled_dictionaries: vec![default_dictionary()],
        }
    }
}

/// Spell-check locale from the process environment, `en_US` when unset.
fn default_dictionary() -> String {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| lang.split('.').next().map(str::to_string))
        .filter(|tag| !tag.is_empty() && tag != "C" && tag != "POSIX")
        .unwrap_or_else(|| "en_US".to_string())
}

/// Read persisted preferences. Missing fields take their defaults; legacy
/// flat keys override the stored table, then the document is rewritten
/// without them so each legacy key is read at most once.
pub fn load(storage: &Storage) -> Preferences {
    let mut document = storage.load();
    let mut preferences = document.preferences.take().unwrap_or_default();

    let mut migrated = false;
    if let Some(hidden) = document.hide_tray.take() {
        preferences.has_tray = !hidden;
        migrated = true;
    }
    if let Some(hidden) = document.autohide_menu.take() {
        preferences.has_menus = !hidden;
        migrated = true;
    }
    if let Some(closed) = document.sidebar_closed.take() {
        preferences.has_sidebar = !closed;
        migrated = true;
    }
    if let Some(enabled) = document.show_window_on_unread_changed.take() {
        preferences.show_window_on_unread_changed = enabled;
        migrated = true;
    }

    if migrated {
        document.preferences = Some(preferences.clone());
        if let Err(err) = storage.save(&document) {
            tracing::warn!("failed to persist migrated preferences: {}", err);
        }
    }

    preferences
}

/// Write the full record. Failures are logged, never fatal: lost preferences
/// degrade to defaults on the next launch.
pub fn persist(storage: &Storage, preferences: &Preferences) {
    let mut document = storage.load();
    document.preferences = Some(preferences.clone());
    if let Err(err) = storage.save(&document) {
        tracing::warn!("failed to persist preferences: {}", err);
    }
}
