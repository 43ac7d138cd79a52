//! Recording fakes for the collaborator seams, shared across test modules.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::surfaces::{
    AboutModal, AboutModalState, CertificateStore, CertificateTrustRequest, Dialogs, DockState,
    EditCommand, FormatButton, HostApp, InstallTiming, LandingState, MenuState,
    ScreenshareModalState, SidebarState, Surface, Surfaces, TouchBarState, TrayState,
    UpdateChecker, UpdateModalState, ViewHost, ViewHostState, ViewTarget, ZoomAction,
};
use crate::validation::{ProbeError, ServerProbe};

/// Shared call journal; entries are appended in call order so tests can
/// assert cross-collaborator ordering.
pub type Journal = Arc<Mutex<Vec<String>>>;

pub fn new_journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

fn record(journal: &Journal, entry: impl Into<String>) {
    journal.lock().unwrap().push(entry.into());
}

pub struct RecordingSurface<S> {
    name: &'static str,
    journal: Journal,
    states: Arc<Mutex<Vec<S>>>,
}

impl<S> RecordingSurface<S> {
    pub fn new(name: &'static str, journal: &Journal) -> (Self, Arc<Mutex<Vec<S>>>) {
        let states = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                name,
                journal: Arc::clone(journal),
                states: Arc::clone(&states),
            },
            states,
        )
    }
}

impl<S> Surface for RecordingSurface<S> {
    type State = S;

    fn set_state(&mut self, state: S) -> Result<()> {
        record(&self.journal, format!("{}.set_state", self.name));
        self.states.lock().unwrap().push(state);
        Ok(())
    }

    fn mount(&mut self) -> Result<()> {
        record(&self.journal, format!("{}.mount", self.name));
        Ok(())
    }

    fn unmount(&mut self) -> Result<()> {
        record(&self.journal, format!("{}.unmount", self.name));
        Ok(())
    }
}

pub struct RecordingAboutModal {
    inner: RecordingSurface<AboutModalState>,
}

impl Surface for RecordingAboutModal {
    type State = AboutModalState;

    fn set_state(&mut self, state: AboutModalState) -> Result<()> {
        self.inner.set_state(state)
    }

    fn mount(&mut self) -> Result<()> {
        self.inner.mount()
    }

    fn unmount(&mut self) -> Result<()> {
        self.inner.unmount()
    }
}

impl AboutModal for RecordingAboutModal {
    fn show_update_error(&mut self) -> Result<()> {
        record(&self.inner.journal, "about.show_update_error");
        Ok(())
    }

    fn show_no_update_available(&mut self) -> Result<()> {
        record(&self.inner.journal, "about.show_no_update_available");
        Ok(())
    }
}

pub struct RecordingViewHost {
    journal: Journal,
    states: Arc<Mutex<Vec<ViewHostState>>>,
}

impl Surface for RecordingViewHost {
    type State = ViewHostState;

    fn set_state(&mut self, state: ViewHostState) -> Result<()> {
        record(&self.journal, "views.set_state");
        self.states.lock().unwrap().push(state);
        Ok(())
    }

    fn mount(&mut self) -> Result<()> {
        record(&self.journal, "views.mount");
        Ok(())
    }
}

fn target_label(target: &ViewTarget) -> String {
    match target {
        ViewTarget::Active => "active".to_string(),
        ViewTarget::Server(url) => url.to_string(),
    }
}

impl ViewHost for RecordingViewHost {
    fn reload(&mut self, target: ViewTarget, ignoring_cache: bool) -> Result<()> {
        record(
            &self.journal,
            format!("views.reload({}, {ignoring_cache})", target_label(&target)),
        );
        Ok(())
    }

    fn adjust_zoom(&mut self, target: ViewTarget, action: ZoomAction) -> Result<()> {
        record(
            &self.journal,
            format!("views.zoom({}, {action:?})", target_label(&target)),
        );
        Ok(())
    }

    fn go_back(&mut self, target: ViewTarget) -> Result<()> {
        record(&self.journal, format!("views.go_back({})", target_label(&target)));
        Ok(())
    }

    fn go_forward(&mut self, target: ViewTarget) -> Result<()> {
        record(&self.journal, format!("views.go_forward({})", target_label(&target)));
        Ok(())
    }

    fn open_devtools(&mut self, target: ViewTarget) -> Result<()> {
        record(&self.journal, format!("views.devtools({})", target_label(&target)));
        Ok(())
    }

    fn apply_edit(&mut self, command: EditCommand) -> Result<()> {
        record(&self.journal, format!("views.edit({command:?})"));
        Ok(())
    }

    fn trigger_format(&mut self, target: ViewTarget, button: FormatButton) -> Result<()> {
        record(
            &self.journal,
            format!("views.format({}, {button:?})", target_label(&target)),
        );
        Ok(())
    }

    fn provide_screenshare_source(&mut self, url: &Url, source_id: &str) -> Result<()> {
        record(
            &self.journal,
            format!("views.screenshare_source({url}, {source_id})"),
        );
        Ok(())
    }

    fn load_server(&mut self, url: &Url) -> Result<()> {
        record(&self.journal, format!("views.load_server({url})"));
        Ok(())
    }
}

pub struct FakeWindow {
    journal: Journal,
}

impl crate::surfaces::WindowHandle for FakeWindow {
    fn show(&mut self) -> Result<()> {
        record(&self.journal, "window.show");
        Ok(())
    }

    fn show_inactive(&mut self) -> Result<()> {
        record(&self.journal, "window.show_inactive");
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        record(&self.journal, "window.hide");
        Ok(())
    }

    fn focus(&mut self) -> Result<()> {
        record(&self.journal, "window.focus");
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        record(&self.journal, "window.reload");
        Ok(())
    }

    fn toggle_devtools(&mut self) -> Result<()> {
        record(&self.journal, "window.toggle_devtools");
        Ok(())
    }
}

pub struct FakeCertificates {
    journal: Journal,
}

impl CertificateStore for FakeCertificates {
    fn clear(&mut self) -> Result<()> {
        record(&self.journal, "certificates.clear");
        Ok(())
    }
}

pub struct FakeUpdateChecker {
    journal: Journal,
}

impl FakeUpdateChecker {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Arc::clone(journal),
        }
    }
}

impl UpdateChecker for FakeUpdateChecker {
    fn check_for_updates(&self) -> Result<()> {
        record(&self.journal, "updates.check");
        Ok(())
    }

    fn set_auto_update(&self, enabled: bool) -> Result<()> {
        record(&self.journal, format!("updates.set_auto_update({enabled})"));
        Ok(())
    }

    fn download_update(&self) -> Result<()> {
        record(&self.journal, "updates.download");
        Ok(())
    }

    fn skip_version(&self, version: &str) -> Result<()> {
        record(&self.journal, format!("updates.skip_version({version})"));
        Ok(())
    }

    fn quit_and_install(&self) -> Result<()> {
        record(&self.journal, "updates.quit_and_install");
        Ok(())
    }
}

pub struct FakeHost {
    journal: Journal,
}

impl FakeHost {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Arc::clone(journal),
        }
    }
}

impl HostApp for FakeHost {
    fn quit(&self) -> Result<()> {
        record(&self.journal, "host.quit");
        Ok(())
    }

    fn relaunch_with_reset(&self) -> Result<()> {
        record(&self.journal, "host.relaunch_with_reset");
        Ok(())
    }

    fn open_external(&self, url: &Url) -> Result<()> {
        record(&self.journal, format!("host.open_external({url})"));
        Ok(())
    }
}

/// Scripted dialog answers; every call lands in the journal.
pub struct FakeDialogs {
    pub journal: Journal,
    pub add_server: bool,
    pub reset: bool,
    pub install: InstallTiming,
    pub trust: bool,
}

impl FakeDialogs {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: Arc::clone(journal),
            add_server: true,
            reset: true,
            install: InstallTiming::Later,
            trust: true,
        }
    }
}

#[async_trait]
impl Dialogs for FakeDialogs {
    async fn confirm_server_addition(&self, host: &str) -> bool {
        record(&self.journal, format!("dialog.confirm_server_addition({host})"));
        self.add_server
    }

    async fn confirm_app_data_reset(&self) -> bool {
        record(&self.journal, "dialog.confirm_app_data_reset");
        self.reset
    }

    async fn ask_when_to_install_update(&self) -> InstallTiming {
        record(&self.journal, "dialog.ask_when_to_install_update");
        self.install
    }

    async fn warn_delayed_install(&self) {
        record(&self.journal, "dialog.warn_delayed_install");
    }

    async fn warn_certificate_error(&self, request: &CertificateTrustRequest) -> bool {
        record(
            &self.journal,
            format!("dialog.warn_certificate_error({})", request.issuer_name),
        );
        self.trust
    }

    async fn warn_skipped_version(&self) {
        record(&self.journal, "dialog.warn_skipped_version");
    }

    async fn notify_update_download(&self) {
        record(&self.journal, "dialog.notify_update_download");
    }

    async fn show_server_error(&self, host: &str) {
        record(&self.journal, format!("dialog.show_server_error({host})"));
    }
}

/// Probe with a fixed verdict.
pub struct StaticProbe {
    ok: bool,
}

impl StaticProbe {
    pub fn ok() -> Self {
        Self { ok: true }
    }

    pub fn failing() -> Self {
        Self { ok: false }
    }
}

#[async_trait]
impl ServerProbe for StaticProbe {
    async fn probe(&self, _url: &Url) -> std::result::Result<(), ProbeError> {
        if self.ok {
            Ok(())
        } else {
            Err(ProbeError::Incompatible("probe scripted to fail".to_string()))
        }
    }
}

/// Recorded `set_state` histories for every surface built by
/// [`recording_surfaces`].
pub struct SurfaceStates {
    pub menu: Arc<Mutex<Vec<MenuState>>>,
    pub tray: Arc<Mutex<Vec<TrayState>>>,
    pub dock: Arc<Mutex<Vec<DockState>>>,
    pub touch_bar: Arc<Mutex<Vec<TouchBarState>>>,
    pub sidebar: Arc<Mutex<Vec<SidebarState>>>,
    pub landing: Arc<Mutex<Vec<LandingState>>>,
    pub views: Arc<Mutex<Vec<ViewHostState>>>,
    pub about: Arc<Mutex<Vec<AboutModalState>>>,
    pub update_modal: Arc<Mutex<Vec<UpdateModalState>>>,
    pub screenshare: Arc<Mutex<Vec<ScreenshareModalState>>>,
}

pub fn recording_surfaces(journal: &Journal) -> (Surfaces, SurfaceStates) {
    let (menu, menu_states) = RecordingSurface::new("menu", journal);
    let (tray, tray_states) = RecordingSurface::new("tray", journal);
    let (dock, dock_states) = RecordingSurface::new("dock", journal);
    let (touch_bar, touch_bar_states) = RecordingSurface::new("touch_bar", journal);
    let (sidebar, sidebar_states) = RecordingSurface::new("sidebar", journal);
    let (landing, landing_states) = RecordingSurface::new("landing", journal);
    let (about_inner, about_states) = RecordingSurface::new("about", journal);
    let (update_modal, update_modal_states) = RecordingSurface::new("update_modal", journal);
    let (screenshare, screenshare_states) = RecordingSurface::new("screenshare", journal);

    let views_states = Arc::new(Mutex::new(Vec::new()));
    let views = RecordingViewHost {
        journal: Arc::clone(journal),
        states: Arc::clone(&views_states),
    };

    let surfaces = Surfaces {
        menu: Box::new(menu),
        tray: Box::new(tray),
        dock: Box::new(dock),
        touch_bar: Box::new(touch_bar),
        sidebar: Box::new(sidebar),
        landing: Box::new(landing),
        views: Box::new(views),
        about: Box::new(RecordingAboutModal { inner: about_inner }),
        update_modal: Box::new(update_modal),
        screenshare: Box::new(screenshare),
        window: Box::new(FakeWindow {
            journal: Arc::clone(journal),
        }),
        certificates: Box::new(FakeCertificates {
            journal: Arc::clone(journal),
        }),
    };

    let states = SurfaceStates {
        menu: menu_states,
        tray: tray_states,
        dock: dock_states,
        touch_bar: touch_bar_states,
        sidebar: sidebar_states,
        landing: landing_states,
        views: views_states,
        about: about_states,
        update_modal: update_modal_states,
        screenshare: screenshare_states,
    };

    (surfaces, states)
}
