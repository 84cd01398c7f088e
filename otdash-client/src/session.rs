//! The Session Manager: sole owner of the access token and the signed-in user.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use futures::future::{FutureExt, LocalBoxFuture, Shared};
use shared::models::{AuthResponse, LoginRequest, User};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::transport::{AUTH_LOGIN, AUTH_LOGOUT, AUTH_REFRESH, ApiRequest, HttpTransport};

type RefreshOutcome = ClientResult<AuthResponse>;
pub(crate) type SharedRefresh = Shared<LocalBoxFuture<'static, RefreshOutcome>>;
type Listener = Rc<dyn Fn(&Session)>;

/// Access token and user, always held together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    user: User,
}

impl From<AuthResponse> for Credentials {
    fn from(auth: AuthResponse) -> Self {
        Self {
            access_token: auth.access_token,
            user: auth.user,
        }
    }
}

/// Where the session lifecycle currently stands, for the loading screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub step: u8,
    pub total: u8,
    pub percent: u8,
    pub label: &'static str,
}

impl LoadProgress {
    const fn at(step: u8, total: u8, label: &'static str) -> Self {
        Self {
            step,
            total,
            percent: step * 100 / total,
            label,
        }
    }

    pub const STARTING: Self = Self::at(0, 2, "Starting");
    pub const REFRESHING: Self = Self::at(1, 2, "Refreshing session");
    pub const READY: Self = Self::at(2, 2, "Ready");
    pub const NOT_LOGGED_IN: Self = Self::at(2, 2, "Not logged in");
    pub const LOGGING_IN: Self = Self::at(1, 2, "Logging in");
    pub const LOGGED_IN: Self = Self::at(2, 2, "Logged in");
    pub const LOGGING_OUT: Self = Self::at(1, 2, "Logging out");
    pub const LOGGED_OUT: Self = Self::at(2, 2, "Logged out");
    pub const REFRESHING_AFTER_401: Self = Self::at(1, 2, "Refreshing session (401)");
    pub const REFRESHED: Self = Self::at(2, 2, "Session refreshed");
    pub const EXPIRED: Self = Self::at(2, 2, "Session expired");
}

/// Read-only snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
    loading: bool,
    progress: LoadProgress,
}

impl Default for Session {
    /// Bootstrap has not run yet, so the session starts out loading.
    fn default() -> Self {
        Self {
            credentials: None,
            loading: true,
            progress: LoadProgress::STARTING,
        }
    }
}

impl Session {
    #[cfg(test)]
    pub(crate) fn signed_in(access_token: &str, user: User) -> Self {
        Self {
            credentials: Some(Credentials {
                access_token: access_token.to_string(),
                user,
            }),
            loading: false,
            progress: LoadProgress::READY,
        }
    }

    #[cfg(test)]
    pub(crate) fn signed_out() -> Self {
        Self {
            credentials: None,
            loading: false,
            progress: LoadProgress::NOT_LOGGED_IN,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.credentials
            .as_ref()
            .map(|credentials| credentials.access_token.as_str())
    }

    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|credentials| &credentials.user)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn progress(&self) -> LoadProgress {
        self.progress
    }

    /// Whether the signed-in user's role grants `permission`. False when signed out.
    pub fn has(&self, permission: impl AsRef<str>) -> bool {
        self.user()
            .is_some_and(|user| user.role.grants(permission.as_ref()))
    }
}

/// Handle returned by [`SessionManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct SessionInner {
    transport: Rc<dyn HttpTransport>,
    state: RefCell<Session>,
    listeners: RefCell<Vec<(SubscriptionId, Listener)>>,
    next_listener: Cell<u64>,
    refresh_in_flight: RefCell<Option<SharedRefresh>>,
    /// Bumped by every login and logout. A refresh that started under an older
    /// epoch settles without touching the session.
    epoch: Cell<u64>,
}

/// Owns the session and every transition of it.
///
/// Clones share the same state. All mutation happens through `bootstrap`, `login`,
/// `logout` and the refresh that the request pipeline triggers on a 401.
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<SessionInner>,
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("session", &*self.inner.state.borrow())
            .field("listeners", &self.inner.listeners.borrow().len())
            .field(
                "refresh_in_flight",
                &self.inner.refresh_in_flight.borrow().is_some(),
            )
            .field("epoch", &self.inner.epoch.get())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(transport: Rc<dyn HttpTransport>) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                transport,
                state: RefCell::new(Session::default()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                refresh_in_flight: RefCell::new(None),
                epoch: Cell::new(0),
            }),
        }
    }

    pub(crate) fn transport(&self) -> Rc<dyn HttpTransport> {
        Rc::clone(&self.inner.transport)
    }

    fn epoch(&self) -> u64 {
        self.inner.epoch.get()
    }

    fn advance_epoch(&self) {
        self.inner.epoch.set(self.inner.epoch.get() + 1);
    }

    pub fn snapshot(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.state.borrow().access_token().map(str::to_string)
    }

    pub fn user(&self) -> Option<User> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Permission lookup against the current role. False when signed out.
    pub fn has(&self, permission: impl AsRef<str>) -> bool {
        self.inner.state.borrow().has(permission)
    }

    /// Register a listener called with the new session after every change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_listener.get());
        self.inner.next_listener.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(existing, _)| *existing != id);
    }

    /// Restore a session from the refresh cookie. Never fails; a missing or
    /// rejected cookie simply leaves the user signed out.
    ///
    /// A login or logout that completes first takes precedence over the outcome.
    pub async fn bootstrap(&self) {
        let started = self.epoch();
        self.update(|session| {
            session.loading = true;
            session.progress = LoadProgress::REFRESHING;
        });

        let outcome = self.refresh().await;
        if self.epoch() != started {
            debug!("session changed during bootstrap, outcome dropped");
            return;
        }
        match outcome {
            Ok(auth) => {
                info!(user = %auth.user.username, "session restored");
                self.update(|session| {
                    session.loading = false;
                    session.progress = LoadProgress::READY;
                });
            }
            Err(err) => {
                debug!(error = %err, "no session to restore");
                self.update(|session| {
                    session.loading = false;
                    session.progress = LoadProgress::NOT_LOGGED_IN;
                });
            }
        }
    }

    /// Sign in with email and password. On failure the session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<User> {
        let previous = self.inner.state.borrow().progress;
        self.update(|session| {
            session.loading = true;
            session.progress = LoadProgress::LOGGING_IN;
        });

        let result = self.request_login(email, password).await;
        match &result {
            Ok(auth) => {
                info!(user = %auth.user.username, "logged in");
                let credentials = Credentials::from(auth.clone());
                self.advance_epoch();
                self.update(|session| {
                    session.credentials = Some(credentials);
                    session.loading = false;
                    session.progress = LoadProgress::LOGGED_IN;
                });
            }
            Err(err) => {
                debug!(error = %err, "login rejected");
                self.update(|session| {
                    session.loading = false;
                    session.progress = previous;
                });
            }
        }

        result.map(|auth| auth.user)
    }

    async fn request_login(&self, email: &str, password: &str) -> RefreshOutcome {
        let request = ApiRequest::post(AUTH_LOGIN).json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response = self.inner.transport.send(&request).await?;
        if !response.status.is_success() {
            return Err(ClientError::from_response(&request, &response));
        }
        response.json()
    }

    /// Best-effort server logout, then the local session is cleared regardless.
    pub async fn logout(&self) {
        self.advance_epoch();
        self.update(|session| {
            session.loading = true;
            session.progress = LoadProgress::LOGGING_OUT;
        });

        match self.inner.transport.send(&ApiRequest::post(AUTH_LOGOUT)).await {
            Ok(response) if response.status.is_success() => debug!("server session closed"),
            Ok(response) => warn!(status = response.status.as_u16(), "logout rejected by server"),
            Err(err) => warn!(error = %err, "logout request failed"),
        }

        info!("logged out");
        self.update(|session| {
            session.credentials = None;
            session.loading = false;
            session.progress = LoadProgress::LOGGED_OUT;
        });
    }

    /// Join the refresh in flight, or start one.
    ///
    /// At most one refresh call is outstanding at any time. The in-flight handle
    /// is cleared when it settles, and the outcome is applied to the session once:
    /// success installs the new credentials, failure clears them. Nothing is applied
    /// when a login or logout happened while the call was out.
    pub(crate) fn refresh(&self) -> SharedRefresh {
        if let Some(in_flight) = self.inner.refresh_in_flight.borrow().as_ref() {
            debug!("joining refresh in flight");
            return in_flight.clone();
        }

        let weak: Weak<SessionInner> = Rc::downgrade(&self.inner);
        let transport = self.transport();
        let started = self.epoch();
        let refresh = async move {
            let outcome = request_refresh(transport.as_ref()).await;
            if let Some(inner) = weak.upgrade() {
                let manager = SessionManager { inner };
                manager.inner.refresh_in_flight.borrow_mut().take();
                if manager.epoch() == started {
                    manager.apply_refresh(&outcome);
                } else {
                    debug!("session changed during refresh, outcome dropped");
                }
            }
            outcome
        }
        .boxed_local()
        .shared();

        *self.inner.refresh_in_flight.borrow_mut() = Some(refresh.clone());
        refresh
    }

    /// Refresh after a 401, with the matching progress labels.
    pub(crate) async fn refresh_after_unauthorized(&self) -> RefreshOutcome {
        let started = self.epoch();
        self.update(|session| session.progress = LoadProgress::REFRESHING_AFTER_401);
        let outcome = self.refresh().await;
        if self.epoch() != started {
            return outcome;
        }
        let progress = if outcome.is_ok() {
            LoadProgress::REFRESHED
        } else {
            LoadProgress::EXPIRED
        };
        self.update(|session| session.progress = progress);
        outcome
    }

    fn apply_refresh(&self, outcome: &RefreshOutcome) {
        match outcome {
            Ok(auth) => {
                let credentials = Credentials::from(auth.clone());
                self.update(|session| session.credentials = Some(credentials));
            }
            Err(err) => {
                if self.is_authenticated() {
                    warn!(error = %err, "session expired");
                }
                self.update(|session| session.credentials = None);
            }
        }
    }

    fn update(&self, mutate: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

async fn request_refresh(transport: &dyn HttpTransport) -> RefreshOutcome {
    info!("refreshing access token");
    let request = ApiRequest::post(AUTH_REFRESH);
    let response = transport.send(&request).await?;
    if !response.status.is_success() {
        debug!(status = response.status.as_u16(), "refresh rejected");
        return Err(ClientError::AuthExpired);
    }
    response.json()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::user_with;

    #[test]
    fn default_session_is_loading_and_signed_out() {
        let session = Session::default();
        assert!(session.is_loading());
        assert!(!session.is_authenticated());
        assert_eq!(session.progress().label, "Starting");
    }

    #[test]
    fn token_and_user_travel_together() {
        let session = Session::signed_in("tok", user_with(&[]));
        assert_eq!(session.access_token(), Some("tok"));
        assert!(session.user().is_some());

        let session = Session::signed_out();
        assert!(session.access_token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn has_is_false_without_user() {
        assert!(!Session::signed_out().has("ot.read"));
        assert!(!Session::default().has(shared::models::Permission::OT_READ));
    }

    #[test]
    fn has_checks_role_membership() {
        let session = Session::signed_in("tok", user_with(&["ot.read", "ot.approve"]));
        assert!(session.has("ot.approve"));
        assert!(session.has(&shared::models::Permission::OT_READ));
        assert!(!session.has("ot.reject"));
    }

    #[test]
    fn progress_percentages() {
        assert_eq!(LoadProgress::STARTING.percent, 0);
        assert_eq!(LoadProgress::REFRESHING.percent, 50);
        assert_eq!(LoadProgress::READY.percent, 100);
    }
}
