// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! The inventory dashboard: a small logged-out / logged-in state machine
//! deciding when inventory data is fetched and shown.

pub mod export;
pub mod filter;
pub mod screen;

pub use self::export::{ExportSink, XlsxExport};
pub use self::filter::FilterCriteria;
pub use self::screen::{render_rows, Cell, Row, Screen, Table};

use std::sync::{Arc, Mutex};

use futures::*;

use crate::inv;
use crate::inv::api::Backend;
use crate::inv::error::ErrorKind;
use crate::inv::model::AccessToken;
use crate::inv::session::{Clock, Session, SessionStore};
use crate::inv::util::futures::into_future_trait;

/// Whether the user is authenticated, as far as the client can tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    LoggedOut,
    LoggedIn,
}

/// The outcome of an inventory fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fetch {
    /// The table body was replaced with this many rows.
    Rendered(usize),
    /// The fetch failed; the table still shows whatever it showed before.
    Stale,
}

struct DashboardImpl {
    store: Box<dyn SessionStore>,
    screen: Screen,
    state: SessionState,
    login_in_flight: bool,
}

// Marks a login as in flight until dropped. Held by the login future, so
// abandoning that future releases the guard too.
struct LoginGuard {
    inner: Arc<Mutex<DashboardImpl>>,
}

impl LoginGuard {
    fn acquire(inner: &Arc<Mutex<DashboardImpl>>) -> Option<Self> {
        let mut locked = inner.lock().unwrap();
        if locked.login_in_flight {
            return None;
        }
        locked.login_in_flight = true;
        Some(Self {
            inner: Arc::clone(inner),
        })
    }
}

impl Drop for LoginGuard {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.login_in_flight = false;
        }
    }
}

/// The dashboard controller.
pub struct Dashboard {
    backend: Arc<dyn Backend>,
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<DashboardImpl>>,
}

impl Clone for Dashboard {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            clock: Arc::clone(&self.clock),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Dashboard {
    /// Create a dashboard. It starts logged out on the login view; call
    /// `check_login_status` to evaluate any stored session.
    pub fn new<B, C, S>(backend: B, clock: C, store: S) -> Self
    where
        B: 'static + Backend,
        C: 'static + Clock,
        S: 'static + SessionStore,
    {
        Self {
            backend: Arc::new(backend),
            clock: Arc::new(clock),
            inner: Arc::new(Mutex::new(DashboardImpl {
                store: Box::new(store),
                screen: Screen::default(),
                state: SessionState::LoggedOut,
                login_in_flight: false,
            })),
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state
    }

    /// A snapshot of everything currently shown.
    pub fn screen(&self) -> Screen {
        self.inner.lock().unwrap().screen.clone()
    }

    /// The session currently held in storage, if any.
    pub fn session(&self) -> Option<Session> {
        Session::load(&*self.inner.lock().unwrap().store)
    }

    /// Evaluate the stored session, as on page load. An unexpired session
    /// shows the dashboard and loads inventory data; anything else logs off.
    pub fn check_login_status(&self) -> inv::Future<SessionState> {
        let now = self.clock.now();
        match self.session() {
            Some(ref session) if !session.is_expired_at(now) => {
                info!("token is valid until {}", session.expires_at());
                self.enter_logged_in();
                into_future_trait(self.fetch_inventory().map(|_| SessionState::LoggedIn))
            }
            Some(ref session) => {
                info!("token expired at {}", session.expires_at());
                into_future_trait(future::result(self.logoff()))
            }
            None => {
                info!("no stored token");
                into_future_trait(future::result(self.logoff()))
            }
        }
    }

    /// Submit credentials. On success the session is stored for ten minutes,
    /// the dashboard is shown, and inventory data is loaded. Any failure
    /// leaves the user logged out with the login error shown.
    ///
    /// A login submitted while another is still in flight fails with
    /// `ErrorKind::LoginInProgress` and changes nothing. Dropping the
    /// returned future before it settles ends the attempt.
    pub fn login(&self, username: &str, password: &str) -> inv::Future<SessionState> {
        let guard = match LoginGuard::acquire(&self.inner) {
            Some(guard) => guard,
            None => {
                warn!("login already in flight; ignoring resubmission");
                return into_future_trait(future::err(ErrorKind::LoginInProgress.into()));
            }
        };

        let this = self.clone();
        into_future_trait(
            self.backend
                .authenticate(username, password)
                .then(move |result| -> inv::Future<SessionState> {
                    drop(guard);
                    if this.complete_login(result) {
                        into_future_trait(
                            this.fetch_inventory().map(|_| SessionState::LoggedIn),
                        )
                    } else {
                        into_future_trait(future::ok(SessionState::LoggedOut))
                    }
                }),
        )
    }

    // Apply the outcome of an authentication attempt; true if logged in.
    fn complete_login(&self, result: inv::Result<AccessToken>) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let token = match result {
            Ok(token) => token,
            Err(err) => {
                error!("login failed: {}", err);
                inner.screen.show_login_error();
                return false;
            }
        };

        let session = Session::starting_at(token, self.clock.now());
        if let Err(err) = session.save(&mut *inner.store) {
            error!("login failed: could not store session: {}", err);
            // Never leave half a session behind:
            if let Err(err) = Session::clear(&mut *inner.store) {
                warn!("could not clear partial session: {}", err);
            }
            inner.screen.show_login_error();
            return false;
        }

        info!("login successful, session expires at {}", session.expires_at());
        inner.state = SessionState::LoggedIn;
        inner.screen.show_dashboard();
        true
    }

    fn enter_logged_in(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.state = SessionState::LoggedIn;
        inner.screen.show_dashboard();
    }

    /// Forget the session and return to the login view. The view is
    /// restored even if clearing storage fails; the error is still reported.
    pub fn logoff(&self) -> inv::Result<SessionState> {
        info!("logging off");
        let mut inner = self.inner.lock().unwrap();
        let cleared = Session::clear(&mut *inner.store);
        inner.state = SessionState::LoggedOut;
        inner.screen.show_login();
        cleared.map(|_| SessionState::LoggedOut)
    }

    /// Fetch inventory records with the stored token and replace the table
    /// body with them. Failures are logged and leave the table untouched.
    pub fn fetch_inventory(&self) -> inv::Future<Fetch> {
        info!("fetching inventory data");
        let token = match self.session() {
            Some(session) => session.token().clone(),
            None => {
                warn!("no stored token; inventory not fetched");
                return into_future_trait(future::ok(Fetch::Stale));
            }
        };

        let this = self.clone();
        into_future_trait(self.backend.fetch_inventory(&token).then(
            move |result| -> inv::Result<Fetch> {
                match result {
                    Ok(records) => {
                        info!("inventory data received: {} records", records.len());
                        let rows = render_rows(&records);
                        let mut inner = this.inner.lock().unwrap();
                        inner.screen.table.replace_body(rows);
                        Ok(Fetch::Rendered(records.len()))
                    }
                    Err(err) => {
                        error!("error fetching inventory data: {}", err);
                        Ok(Fetch::Stale)
                    }
                }
            },
        ))
    }

    /// Show only the table rows matching `criteria`; returns how many are shown.
    pub fn filter(&self, criteria: &FilterCriteria) -> usize {
        let mut inner = self.inner.lock().unwrap();
        criteria.apply(&mut inner.screen.table)
    }

    /// Hand the table to an export sink.
    pub fn export(&self, sink: &dyn ExportSink) -> inv::Result<()> {
        let inner = self.inner.lock().unwrap();
        sink.export(&inner.screen.table)
    }
}
