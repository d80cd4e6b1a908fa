//! Session slice: authentication status and account identity.

use pegawai_api::types::User;

use crate::op::Op;

/// What the app currently believes about its authentication state.
/// `Unknown` holds only until the restoration check at startup has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthStatus {
    #[default]
    Unknown,
    Checking,
    Authenticated,
    Unauthenticated,
}

/// Session state. Invariant: `status == Authenticated` exactly when both
/// `user` and `access_token` are present; the transition methods below are
/// the only writers.
#[derive(Debug, Default)]
pub struct SessionState {
    pub status: AuthStatus,
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub check: Op<()>,
    pub login: Op<()>,
    pub logout: Op<()>,
}

impl SessionState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.check.is_pending() || self.login.is_pending() || self.logout.is_pending()
    }

    /// The login error, if the last login attempt failed. Restoration
    /// failures settle silently into `Unauthenticated` and are only
    /// inspectable through `check`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.login.error()
    }

    pub fn clear_error(&mut self) {
        self.login.clear_error();
    }

    /// Replaces the account identity (e.g. after an account update).
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    pub fn check_started(&mut self) {
        self.status = AuthStatus::Checking;
        self.check.start();
    }

    pub fn check_settled(&mut self, restored: Option<(User, String)>) {
        match restored {
            Some((user, access_token)) => {
                self.status = AuthStatus::Authenticated;
                self.user = Some(user);
                self.access_token = Some(access_token);
            }
            None => self.status = AuthStatus::Unauthenticated,
        }
        self.check.settle(Ok(()));
    }

    /// A restoration error also means "not authenticated".
    pub fn check_failed(&mut self, error: String) {
        self.status = AuthStatus::Unauthenticated;
        self.check.settle(Err(error));
    }

    pub fn login_started(&mut self) {
        self.login.start();
    }

    pub fn login_succeeded(&mut self, user: User, access_token: String) {
        self.status = AuthStatus::Authenticated;
        self.user = Some(user);
        self.access_token = Some(access_token);
        self.login.settle(Ok(()));
    }

    pub fn login_failed(&mut self, error: String) {
        self.status = AuthStatus::Unauthenticated;
        self.login.settle(Err(error));
    }

    /// No optimistic change; the settled transition does all the work.
    pub fn logout_started(&mut self) {
        self.logout.start();
    }

    /// Unconditional: logout succeeds by definition.
    pub fn logout_settled(&mut self) {
        self.status = AuthStatus::Unauthenticated;
        self.user = None;
        self.access_token = None;
        self.login.reset();
        self.check.reset();
        self.logout.settle(Ok(()));
    }
}
