use crate::preferences::Preferences;
use crate::server::Server;

/// Every mutation of [`AppState`](crate::store::AppState) flows through one
/// of these, applied by the pure reducers in `store/`.
#[derive(Debug, Clone)]
pub enum Action {
    // Server registry snapshots
    ServersLoaded(Vec<Server>),

    // Preferences
    PreferencesLoaded(Preferences),
    SetPreference(PreferenceUpdate),

    // Initial-load lifecycle
    StartLoading,
    StopLoading,

    // Native window visibility
    WindowShown,
    WindowHidden,
}

/// Single-field preference change, as toggled from the menu or tray.
#[derive(Debug, Clone, PartialEq)]
pub enum PreferenceUpdate {
    HasTray(bool),
    HasMenus(bool),
    HasSidebar(bool),
    ShowWindowOnUnreadChanged(bool),
    EnabledDictionaries(Vec<String>),
}
