//! Composition root.
//!
//! The shell owns the store, the registry, the router, the reconciler, and
//! every collaborator trait object. `run` performs the startup sequence
//! (mount, registry load, preferences load) and then drives the single
//! feedback loop: collaborator event → router → store mutation → snapshot →
//! reconciler → `set_state` pushes.

use std::sync::Arc;

use tokio::sync::mpsc;
use url::Url;

use crate::action::{Action, PreferenceUpdate};
use crate::error::Result;
use crate::event::{ShellEvent, WindowEvent};
use crate::preferences::{self, Preferences};
use crate::reconcile::Reconciler;
use crate::registry::ServerRegistry;
use crate::router::EventRouter;
use crate::storage::Storage;
use crate::store::{AppState, Store, Subscription};
use crate::surfaces::{Dialogs, HostApp, Surfaces, UpdateChecker};
use crate::validation::{HttpProbe, ServerProbe};

pub struct ShellBuilder {
    surfaces: Surfaces,
    dialogs: Arc<dyn Dialogs>,
    host: Arc<dyn HostApp>,
    updates: Arc<dyn UpdateChecker>,
    storage: Option<Storage>,
    probe: Option<Arc<dyn ServerProbe>>,
    default_servers: Vec<Url>,
}

impl ShellBuilder {
    pub fn new(
        surfaces: Surfaces,
        dialogs: Arc<dyn Dialogs>,
        host: Arc<dyn HostApp>,
        updates: Arc<dyn UpdateChecker>,
    ) -> Self {
        Self {
            surfaces,
            dialogs,
            host,
            updates,
            storage: None,
            probe: None,
            default_servers: Vec::new(),
        }
    }

    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn probe(mut self, probe: Arc<dyn ServerProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    /// Entries seeded into an empty profile on first launch.
    pub fn default_servers(mut self, urls: Vec<Url>) -> Self {
        self.default_servers = urls;
        self
    }

    /// Wire everything together. Returns the shell and the sender every
    /// collaborator uses to push its events in.
    pub fn build(self) -> Result<(Shell, mpsc::UnboundedSender<ShellEvent>)> {
        let storage = match self.storage {
            Some(storage) => storage,
            None => Storage::new()?,
        };
        let probe = match self.probe {
            Some(probe) => probe,
            None => Arc::new(HttpProbe::new()?),
        };

        let store = Store::new();
        let subscription = store.subscribe();
        let registry = Arc::new(ServerRegistry::new(
            store.clone(),
            storage.clone(),
            probe,
            self.default_servers,
        ));
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let router = EventRouter::new(
            store.clone(),
            Arc::clone(&registry),
            self.dialogs,
            self.host,
            self.updates,
            events_tx.clone(),
        );

        let shell = Shell {
            store,
            registry,
            router,
            reconciler: Reconciler::new(),
            surfaces: self.surfaces,
            storage,
            events: events_rx,
            subscription,
            last_persisted: None,
        };
        Ok((shell, events_tx))
    }
}

enum Wake {
    Event(Option<ShellEvent>),
    Snapshot(Option<AppState>),
}

pub struct Shell {
    store: Store,
    registry: Arc<ServerRegistry>,
    router: EventRouter,
    reconciler: Reconciler,
    surfaces: Surfaces,
    storage: Storage,
    events: mpsc::UnboundedReceiver<ShellEvent>,
    subscription: Subscription,
    last_persisted: Option<Preferences>,
}

impl Shell {
    pub fn store(&self) -> Store {
        self.store.clone()
    }

    pub fn registry(&self) -> Arc<ServerRegistry> {
        Arc::clone(&self.registry)
    }

    /// Startup sequence and feedback loop. Returns once the window unloads,
    /// an update install takes over, or the event channel closes; remaining
    /// state transitions are flushed to the surfaces before returning.
    pub async fn run(&mut self) -> Result<()> {
        self.surfaces.mount_all()?;

        let initial = self.registry.initialize();
        self.store
            .dispatch(Action::PreferencesLoaded(preferences::load(&self.storage)));
        if initial.seeded_from_defaults && initial.count <= 1 {
            // A single seeded entry needs no server list next to it.
            self.store
                .dispatch(Action::SetPreference(PreferenceUpdate::HasSidebar(false)));
        }

        loop {
            let wake = tokio::select! {
                event = self.events.recv() => Wake::Event(event),
                snapshot = self.subscription.recv() => Wake::Snapshot(snapshot),
            };

            match wake {
                Wake::Event(Some(event)) => {
                    let closing = matches!(
                        event,
                        ShellEvent::Window(WindowEvent::BeforeUnload) | ShellEvent::InstallUpdate
                    );
                    self.router
                        .handle(event, &mut self.surfaces, &mut self.reconciler)?;
                    if closing {
                        self.flush_snapshots();
                        break;
                    }
                }
                Wake::Event(None) => {
                    self.flush_snapshots();
                    self.surfaces.teardown();
                    break;
                }
                Wake::Snapshot(Some(snapshot)) => self.apply_snapshot(snapshot),
                Wake::Snapshot(None) => break,
            }
        }

        Ok(())
    }

    fn flush_snapshots(&mut self) {
        while let Some(snapshot) = self.subscription.try_recv() {
            self.apply_snapshot(snapshot);
        }
    }

    fn apply_snapshot(&mut self, snapshot: AppState) {
        self.reconciler.sync(&snapshot, &mut self.surfaces);
        if self.last_persisted.as_ref() != Some(&snapshot.preferences) {
            preferences::persist(&self.storage, &snapshot.preferences);
            self.last_persisted = Some(snapshot.preferences);
        }
    }
}
