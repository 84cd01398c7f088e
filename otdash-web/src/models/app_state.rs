use client::Session;
use yewdux::Store;

/// Mirror of the session manager's state, kept current through its subscription.
#[derive(Debug, Default, Clone, PartialEq, Store)]
pub struct AppState {
    pub session: Session,
}
