use crate::action::Action;
use crate::server::Server;

/// The registry re-dispatches its full list after every mutation; the slice
/// just mirrors the latest snapshot.
pub(super) fn reduce(state: Vec<Server>, action: &Action) -> Vec<Server> {
    match action {
        Action::ServersLoaded(servers) => servers.clone(),
        _ => state,
    }
}
