//! The inbound event vocabulary.
//!
//! Every collaborator pushes its outbound events into the shell's channel as
//! a [`ShellEvent`]; the router translates each into a registry/store
//! operation or a collaborator command. Events that need an answer (basic
//! auth, certificate trust, landing validation) carry a oneshot reply;
//! dropping the sender reads as a decline.

use tokio::sync::oneshot;
use url::Url;

use crate::action::PreferenceUpdate;
use crate::server::{Badge, SidebarStyle};
use crate::surfaces::{CertificateTrustRequest, EditCommand, EditFlags, FormatButton, NavFlags};

#[derive(Debug)]
pub enum ShellEvent {
    Menu(MenuEvent),
    Tray(TrayEvent),
    Sidebar(SidebarEvent),
    Landing(LandingEvent),
    TouchBar(TouchBarEvent),
    View(ViewEvent),
    About(AboutModalEvent),
    UpdateModal(UpdateModalEvent),
    Screenshare(ScreenshareModalEvent),
    Update(UpdateEvent),
    Certificate(CertificateEvent),
    BasicAuth(BasicAuthEvent),
    DeepLink(DeepLinkEvent),
    Window(WindowEvent),
    /// Tear the chrome down and hand control to the updater. Emitted by the
    /// update-downloaded flow once the user opts for immediate installation.
    InstallUpdate,
}

/// Menu-bar actions.
#[derive(Debug)]
pub enum MenuEvent {
    Quit,
    About,
    OpenUrl(Url),
    Edit(EditCommand),
    ResetZoom,
    ZoomIn,
    ZoomOut,
    AddNewServer,
    SelectServer(Url),
    Reload {
        ignoring_cache: bool,
        clear_certificates: bool,
    },
    OpenDevtoolsForServer,
    GoBack,
    GoForward,
    ReloadApp,
    ToggleDevtools,
    ResetAppData,
    TogglePreference(PreferenceUpdate),
}

#[derive(Debug)]
pub enum TrayEvent {
    SetWindowVisibility(bool),
    Quit,
}

#[derive(Debug)]
pub enum SidebarEvent {
    SelectServer(Url),
    ReloadServer(Url),
    RemoveServer(Url),
    OpenDevtoolsForServer(Url),
    AddServer,
    ServersSorted(Vec<Url>),
}

#[derive(Debug)]
pub enum LandingEvent {
    AddServer(Url),
    /// Pre-flight check of a typed URL; answered without touching state.
    ValidationRequested {
        url: Url,
        reply: oneshot::Sender<bool>,
    },
}

#[derive(Debug)]
pub enum TouchBarEvent {
    SelectServer(Url),
    Format(FormatButton),
}

/// Lifecycle events reported by the embedded views.
#[derive(Debug)]
pub enum ViewEvent {
    BadgeChanged { url: Url, badge: Option<Badge> },
    TitleChanged { url: Url, title: String },
    SidebarStyleChanged { url: Url, style: Option<SidebarStyle> },
    Focused(Url),
    Navigated { url: Url, path: String },
    ScreenshareSourceRequested(Url),
    ReloadRequested(Url),
    EditFlagsChanged { flags: EditFlags, nav: NavFlags },
    Ready,
}

#[derive(Debug)]
pub enum AboutModalEvent {
    CheckForUpdates,
    SetAutoUpdate(bool),
}

#[derive(Debug)]
pub enum UpdateModalEvent {
    Install,
    RemindLater,
    Skip { version: String },
}

#[derive(Debug)]
pub enum ScreenshareModalEvent {
    SourceSelected { id: String, url: Url },
}

/// Progress reported by the update checker.
#[derive(Debug)]
pub enum UpdateEvent {
    ConfigurationSet {
        can_update: bool,
        can_auto_update: bool,
        can_set_auto_update: bool,
    },
    Checking,
    Available { version: String },
    NotAvailable,
    Error,
    Downloaded,
}

#[derive(Debug)]
pub enum CertificateEvent {
    AskForTrust {
        request: CertificateTrustRequest,
        reply: oneshot::Sender<bool>,
    },
}

#[derive(Debug)]
pub enum BasicAuthEvent {
    LoginRequested {
        request_url: Url,
        reply: oneshot::Sender<Option<(String, String)>>,
    },
}

#[derive(Debug)]
pub enum DeepLinkEvent {
    Auth { server_url: Url },
}

#[derive(Debug)]
pub enum WindowEvent {
    Shown,
    Hidden,
    /// The window is going away; tear the chrome down.
    BeforeUnload,
}
