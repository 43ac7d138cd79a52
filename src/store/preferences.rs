use crate::action::{Action, PreferenceUpdate};
use crate::preferences::Preferences;

pub(super) fn reduce(state: Preferences, action: &Action) -> Preferences {
    match action {
        Action::PreferencesLoaded(preferences) => preferences.clone(),
        Action::SetPreference(update) => {
            let mut next = state;
            match update {
                PreferenceUpdate::HasTray(value) => next.has_tray = *value,
                PreferenceUpdate::HasMenus(value) => next.has_menus = *value,
                PreferenceUpdate::HasSidebar(value) => next.has_sidebar = *value,
                PreferenceUpdate::ShowWindowOnUnreadChanged(value) => {
                    next.show_window_on_unread_changed = *value;
                }
                PreferenceUpdate::EnabledDictionaries(dictionaries) => {
                    next.enabled_dictionaries = dictionaries.clone();
                }
            }
            next
        }
        _ => state,
    }
}
