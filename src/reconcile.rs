//! Projection of the canonical state onto every UI surface.
//!
//! `project` is pure; the [`Reconciler`] runs it after each store change and
//! pushes the result to the collaborators. The focused view's edit flags are
//! an external input merged into the same projection, since the store does
//! not track per-view edit state.

use crate::server::{Badge, Server};
use crate::store::AppState;
use crate::surfaces::{
    DockState, EditFlags, LandingState, MenuState, NavFlags, SidebarState, Surfaces,
    TouchBarState, TrayState, ViewHostState,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub menu: MenuState,
    pub tray: TrayState,
    pub dock: DockState,
    pub sidebar: SidebarState,
    pub landing: LandingState,
    pub touch_bar: TouchBarState,
    pub views: ViewHostState,
}

/// Collection-wide unread indicator: the sum of numeric badges when any
/// exist, a dot when only countless activity exists, nothing otherwise.
pub fn aggregate_badge(servers: &[Server]) -> Option<Badge> {
    let mut total: Option<u32> = None;
    for badge in servers.iter().filter_map(|server| server.badge) {
        if let Badge::Count(count) = badge {
            total = Some(total.unwrap_or(0) + count);
        }
    }
    if let Some(total) = total {
        return Some(Badge::Count(total));
    }
    if servers.iter().any(|server| server.badge.is_some()) {
        return Some(Badge::Dot);
    }
    None
}

pub fn project(state: &AppState, edit_flags: EditFlags, nav_flags: NavFlags) -> Projection {
    let badge = aggregate_badge(&state.servers);
    let any_active = state.servers.iter().any(|server| server.active);
    let preferences = &state.preferences;

    Projection {
        menu: MenuState {
            show_tray_icon: preferences.has_tray,
            show_menu_bar: preferences.has_menus,
            show_server_list: preferences.has_sidebar,
            show_window_on_unread_changed: preferences.show_window_on_unread_changed,
            servers: state.servers.clone(),
            edit_flags,
            nav_flags,
        },
        tray: TrayState {
            show_icon: preferences.has_tray,
            badge,
            window_visible: state.window_visible,
        },
        dock: DockState {
            has_tray_icon: preferences.has_tray,
            badge,
        },
        sidebar: SidebarState {
            visible: !state.loading && preferences.has_sidebar,
            servers: state.servers.clone(),
        },
        landing: LandingState {
            visible: !state.loading && !any_active,
        },
        touch_bar: TouchBarState {
            servers: state.servers.clone(),
        },
        views: ViewHostState {
            has_sidebar: preferences.has_sidebar,
            servers: state.servers.clone(),
        },
    }
}

/// Pushes projections out. Holds the focused view's edit flags between
/// store changes.
pub struct Reconciler {
    edit_flags: EditFlags,
    nav_flags: NavFlags,
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            edit_flags: EditFlags::default(),
            nav_flags: NavFlags::default(),
        }
    }

    pub fn set_edit_flags(&mut self, edit_flags: EditFlags, nav_flags: NavFlags) {
        self.edit_flags = edit_flags;
        self.nav_flags = nav_flags;
    }

    /// Push the current projection to every surface. A failing surface is
    /// logged and skipped; the sweep always visits all of them.
    pub fn sync(&self, state: &AppState, surfaces: &mut Surfaces) {
        let projection = project(state, self.edit_flags, self.nav_flags);

        if let Err(err) = surfaces.menu.set_state(projection.menu) {
            tracing::warn!("menu state push failed: {}", err);
        }
        if let Err(err) = surfaces.tray.set_state(projection.tray) {
            tracing::warn!("tray state push failed: {}", err);
        }
        if let Err(err) = surfaces.dock.set_state(projection.dock) {
            tracing::warn!("dock state push failed: {}", err);
        }
        if let Err(err) = surfaces.sidebar.set_state(projection.sidebar) {
            tracing::warn!("sidebar state push failed: {}", err);
        }
        if let Err(err) = surfaces.landing.set_state(projection.landing) {
            tracing::warn!("landing state push failed: {}", err);
        }
        if let Err(err) = surfaces.touch_bar.set_state(projection.touch_bar) {
            tracing::warn!("touch bar state push failed: {}", err);
        }
        if let Err(err) = surfaces.views.set_state(projection.views) {
            tracing::warn!("view host state push failed: {}", err);
        }
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
