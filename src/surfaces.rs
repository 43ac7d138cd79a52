//! Collaborator contracts.
//!
//! Every UI surface, dialog host, and platform service the core talks to is
//! reached through one of these traits. The shell owns the trait objects and
//! passes them by reference to the router and reconciler; nothing here is a
//! global. Implementations are RPC-shaped wrappers over native widgets: a
//! command aimed at something that no longer exists is a no-op, and a failed
//! call is reported as [`ShellError::Surface`] for the caller to log.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::server::{Badge, Server};

/// A state-driven surface. The reconciler pushes the full desired state on
/// every relevant store change; surfaces are free to diff internally.
pub trait Surface {
    type State;

    fn set_state(&mut self, state: Self::State) -> Result<()>;

    fn mount(&mut self) -> Result<()> {
        Ok(())
    }

    fn unmount(&mut self) -> Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-surface projections
// ─────────────────────────────────────────────────────────────────────────────

/// Edit capabilities of the focused embedded view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditFlags {
    pub can_undo: bool,
    pub can_redo: bool,
    pub can_cut: bool,
    pub can_copy: bool,
    pub can_paste: bool,
    pub can_select_all: bool,
}

/// History position of the focused embedded view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavFlags {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub show_tray_icon: bool,
    pub show_menu_bar: bool,
    pub show_server_list: bool,
    pub show_window_on_unread_changed: bool,
    pub servers: Vec<Server>,
    pub edit_flags: EditFlags,
    pub nav_flags: NavFlags,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrayState {
    pub show_icon: bool,
    pub badge: Option<Badge>,
    pub window_visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DockState {
    pub has_tray_icon: bool,
    pub badge: Option<Badge>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarState {
    pub visible: bool,
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingState {
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchBarState {
    pub servers: Vec<Server>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewHostState {
    pub has_sidebar: bool,
    pub servers: Vec<Server>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Embedded-view host
// ─────────────────────────────────────────────────────────────────────────────

/// Which embedded view a relayed command is aimed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewTarget {
    Active,
    Server(Url),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomAction {
    Reset,
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Undo,
    Redo,
    Cut,
    Copy,
    Paste,
    SelectAll,
}

/// Message-formatting buttons relayed from the touch bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatButton {
    Bold,
    Italic,
    Strike,
    InlineCode,
    MultiLine,
}

/// Host of the embedded content views, one per server. Commands aimed at a
/// target with no matching view are no-ops.
pub trait ViewHost: Surface<State = ViewHostState> + Send {
    fn reload(&mut self, target: ViewTarget, ignoring_cache: bool) -> Result<()>;
    fn adjust_zoom(&mut self, target: ViewTarget, action: ZoomAction) -> Result<()>;
    fn go_back(&mut self, target: ViewTarget) -> Result<()>;
    fn go_forward(&mut self, target: ViewTarget) -> Result<()>;
    fn open_devtools(&mut self, target: ViewTarget) -> Result<()>;
    /// Edit command for the focused view, falling back to the window chrome.
    fn apply_edit(&mut self, command: EditCommand) -> Result<()>;
    fn trigger_format(&mut self, target: ViewTarget, button: FormatButton) -> Result<()>;
    /// Answer a pending screen-share request with the chosen capture source.
    fn provide_screenshare_source(&mut self, url: &Url, source_id: &str) -> Result<()>;
    /// Navigate a view back to its server's base URL.
    fn load_server(&mut self, url: &Url) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Modals
// ─────────────────────────────────────────────────────────────────────────────

/// Partial update; `None` leaves a field as the modal last showed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AboutModalState {
    pub visible: Option<bool>,
    pub checking: Option<bool>,
    pub can_update: Option<bool>,
    pub can_auto_update: Option<bool>,
    pub can_set_auto_update: Option<bool>,
}

pub trait AboutModal: Surface<State = AboutModalState> + Send {
    fn show_update_error(&mut self) -> Result<()>;
    fn show_no_update_available(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateModalState {
    pub visible: Option<bool>,
    pub new_version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScreenshareModalState {
    pub visible: Option<bool>,
    pub url: Option<Url>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocking confirmations and notices
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallTiming {
    Now,
    Later,
}

/// Certificate details shown when asking the user to trust an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateTrustRequest {
    pub request_url: Url,
    pub error: String,
    pub issuer_name: String,
    /// True when a previously trusted certificate changed.
    pub replacing: bool,
}

/// Native dialogs. Each call blocks its own flow until the user answers;
/// the router keeps at most one confirmation of a kind outstanding.
#[async_trait]
pub trait Dialogs: Send + Sync {
    async fn confirm_server_addition(&self, host: &str) -> bool;
    async fn confirm_app_data_reset(&self) -> bool;
    async fn ask_when_to_install_update(&self) -> InstallTiming;
    async fn warn_delayed_install(&self);
    async fn warn_certificate_error(&self, request: &CertificateTrustRequest) -> bool;
    async fn warn_skipped_version(&self);
    async fn notify_update_download(&self);
    /// Validation failed for `host`; state is unchanged.
    async fn show_server_error(&self, host: &str);
}

// ─────────────────────────────────────────────────────────────────────────────
// Window, updater, platform services
// ─────────────────────────────────────────────────────────────────────────────

pub trait WindowHandle: Send {
    fn show(&mut self) -> Result<()>;
    /// Surface the window without stealing focus.
    fn show_inactive(&mut self) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
    fn focus(&mut self) -> Result<()>;
    fn reload(&mut self) -> Result<()>;
    fn toggle_devtools(&mut self) -> Result<()>;
}

/// Auto-update mechanics. Commands are fire-and-forget; progress comes back
/// as [`UpdateEvent`](crate::event::UpdateEvent)s.
pub trait UpdateChecker: Send + Sync {
    fn check_for_updates(&self) -> Result<()>;
    fn set_auto_update(&self, enabled: bool) -> Result<()>;
    fn download_update(&self) -> Result<()>;
    fn skip_version(&self, version: &str) -> Result<()>;
    fn quit_and_install(&self) -> Result<()>;
}

pub trait CertificateStore: Send {
    fn clear(&mut self) -> Result<()>;
}

/// Process-level host operations.
pub trait HostApp: Send + Sync {
    fn quit(&self) -> Result<()>;
    /// Relaunch with the app-data reset flag set.
    fn relaunch_with_reset(&self) -> Result<()>;
    fn open_external(&self, url: &Url) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Composition
// ─────────────────────────────────────────────────────────────────────────────

/// Every surface the shell owns, passed by reference into the router and
/// reconciler.
pub struct Surfaces {
    pub menu: Box<dyn Surface<State = MenuState> + Send>,
    pub tray: Box<dyn Surface<State = TrayState> + Send>,
    pub dock: Box<dyn Surface<State = DockState> + Send>,
    pub touch_bar: Box<dyn Surface<State = TouchBarState> + Send>,
    pub sidebar: Box<dyn Surface<State = SidebarState> + Send>,
    pub landing: Box<dyn Surface<State = LandingState> + Send>,
    pub views: Box<dyn ViewHost>,
    pub about: Box<dyn AboutModal>,
    pub update_modal: Box<dyn Surface<State = UpdateModalState> + Send>,
    pub screenshare: Box<dyn Surface<State = ScreenshareModalState> + Send>,
    pub window: Box<dyn WindowHandle>,
    pub certificates: Box<dyn CertificateStore>,
}

impl Surfaces {
    /// Mount the state-driven surfaces in presentation order.
    pub fn mount_all(&mut self) -> Result<()> {
        self.sidebar.mount()?;
        self.landing.mount()?;
        self.views.mount()?;
        self.touch_bar.mount()?;
        self.about.mount()?;
        self.screenshare.mount()?;
        self.update_modal.mount()?;
        self.menu.mount()?;
        self.tray.mount()?;
        self.dock.mount()?;
        Ok(())
    }

    /// Unmount the native chrome. Failures are logged and never stop the
    /// sweep; teardown must finish even when a surface is already gone.
    pub fn teardown(&mut self) {
        if let Err(err) = self.menu.unmount() {
            tracing::error!("menu unmount failed: {}", err);
        }
        if let Err(err) = self.tray.unmount() {
            tracing::error!("tray unmount failed: {}", err);
        }
        if let Err(err) = self.dock.unmount() {
            tracing::error!("dock unmount failed: {}", err);
        }
    }
}
