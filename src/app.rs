//! Top-level application controller.
//!
//! [`App`] owns the session context and, while a user is logged in, that
//! user's [`Dashboard`]. The session is an explicit value held here and
//! never an ambient global.

use crate::clock::SystemClock;
use crate::dashboard::Dashboard;
use crate::error::ValidationError;
use crate::session::{KeySpace, SessionStore};
use crate::tasks::{MillisIdGenerator, TaskRepository};
use crate::traits::{Clock, IdGenerator, KeyValueStore};
use crate::validation::validate_username;
use std::rc::Rc;

/// The active user, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    username: Option<String>,
}

impl SessionContext {
    /// A context with the given user active.
    #[must_use]
    pub fn with_user(username: impl Into<String>) -> Self {
        Self { username: Some(username.into()) }
    }

    /// The active username, as entered at login.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.username.is_some()
    }
}

/// Application controller: login, logout and the active dashboard.
pub struct App<S> {
    store: S,
    keys: KeySpace,
    sessions: SessionStore<S>,
    clock: Rc<dyn Clock>,
    ids: Rc<dyn IdGenerator>,
    context: SessionContext,
    dashboard: Option<Dashboard<S>>,
}

impl<S> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("keys", &self.keys)
            .field("context", &self.context)
            .field("dashboard", &self.dashboard)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore + Clone> App<S> {
    /// Start the application, restoring any saved session.
    pub fn start(store: S, keys: KeySpace, clock: Rc<dyn Clock>, ids: Rc<dyn IdGenerator>) -> Self {
        let sessions = SessionStore::new(store.clone(), keys.clone());
        let mut app = Self {
            store,
            keys,
            sessions,
            clock,
            ids,
            context: SessionContext::default(),
            dashboard: None,
        };

        if let Some(username) = app.sessions.load_username() {
            tracing::info!(username = %username, "restoring saved session");
            app.activate(username);
        }
        app
    }

    /// Start with the system clock and millisecond IDs.
    pub fn start_default(store: S, keys: KeySpace) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(SystemClock::new());
        let ids = Rc::new(MillisIdGenerator::new(Rc::clone(&clock)));
        Self::start(store, keys, clock, ids)
    }

    /// Log in as `raw_username` (trimmed), switching dashboards if another
    /// user was active.
    ///
    /// # Errors
    ///
    /// Returns a validation error, changing nothing, if the name is too short.
    pub fn login(&mut self, raw_username: &str) -> Result<(), ValidationError> {
        let username = validate_username(raw_username)?;
        tracing::info!(username = %username, "user logging in");
        self.sessions.save_username(&username);
        self.activate(username);
        Ok(())
    }

    /// End the session. Stored task lists are kept.
    pub fn logout(&mut self) {
        tracing::info!(username = ?self.context.username(), "user logging out");
        self.sessions.clear_session();
        self.context = SessionContext::default();
        self.dashboard = None;
    }

    /// The session context.
    #[must_use]
    pub const fn session(&self) -> &SessionContext {
        &self.context
    }

    /// The session store, for listing users and diagnostics.
    #[must_use]
    pub const fn sessions(&self) -> &SessionStore<S> {
        &self.sessions
    }

    /// The active dashboard, if logged in.
    #[must_use]
    pub const fn dashboard(&self) -> Option<&Dashboard<S>> {
        self.dashboard.as_ref()
    }

    /// The active dashboard, mutably, if logged in.
    pub fn dashboard_mut(&mut self) -> Option<&mut Dashboard<S>> {
        self.dashboard.as_mut()
    }

    fn activate(&mut self, username: String) {
        self.context = SessionContext::with_user(username.clone());
        match self.dashboard.as_mut() {
            Some(dashboard) => dashboard.switch_user(username),
            None => {
                let repo = TaskRepository::new(self.store.clone(), self.keys.clone());
                self.dashboard = Some(Dashboard::open(
                    repo,
                    Rc::clone(&self.clock),
                    Rc::clone(&self.ids),
                    username,
                ));
            }
        }
    }
}
