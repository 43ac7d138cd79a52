//! State-synchronization and event-routing core for a multi-account desktop
//! shell.
//!
//! One authoritative [`store::Store`] holds the canonical state; the
//! [`registry::ServerRegistry`] owns the server collection and is its only
//! writer; the [`reconcile::Reconciler`] projects every state change onto the
//! UI surfaces; the [`router::EventRouter`] turns surface events back into
//! domain operations. The [`shell::Shell`] wires all of it to the
//! collaborator traits in [`surfaces`] and drives the single feedback loop.

pub mod action;
pub mod error;
pub mod event;
pub mod preferences;
pub mod reconcile;
pub mod registry;
pub mod router;
pub mod server;
pub mod shell;
pub mod storage;
pub mod store;
pub mod surfaces;
pub mod validation;

#[cfg(test)]
mod test_util;

pub use action::{Action, PreferenceUpdate};
pub use error::{Result, ShellError};
pub use event::ShellEvent;
pub use preferences::Preferences;
pub use registry::ServerRegistry;
pub use server::{Badge, Server, ServerPatch, SidebarStyle};
pub use shell::{Shell, ShellBuilder};
pub use store::{AppState, Store, Subscription};
