//! The application store: owns both slices and dispatches operations.
//!
//! Constructed once at the application root and passed by reference; there
//! are no ambient singletons. Dispatches on the same operation are neither
//! queued nor cancelled (whichever settles last wins), so callers that
//! need ordering gate on `is_loading()`/`is_updating()`.

use pegawai_api::profile::{ProfilePatch, ProfileService};
use pegawai_api::session::{AccountPatch, SessionService};
use pegawai_api::validate;
use tracing::debug;

use crate::profile::{ProfileForm, ProfileState};
use crate::session::SessionState;

/// Result of an `update_profile` dispatch. Details of a failure are in the
/// profile slice's error field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The backend applied the update; `update_success` is set.
    Saved,
    /// Nothing differed from the server state; nothing was dispatched.
    NoChanges,
    /// Validation or the backend rejected the update.
    Failed,
}

/// Coordinating layer over the session and profile domains.
pub struct AppStore {
    session: SessionState,
    profile: ProfileState,
    auth: SessionService,
    employees: ProfileService,
}

impl AppStore {
    pub fn new(auth: SessionService, employees: ProfileService) -> Self {
        Self {
            session: SessionState::default(),
            profile: ProfileState::default(),
            auth,
            employees,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileState {
        &self.profile
    }

    pub fn clear_session_error(&mut self) {
        self.session.clear_error();
    }

    pub fn clear_profile_error(&mut self) {
        self.profile.clear_error();
    }

    pub fn clear_update_success(&mut self) {
        self.profile.clear_update_success();
    }

    /// Restores the session from local storage. Dispatched once at process
    /// start; performs no network call.
    pub async fn check_session(&mut self) {
        self.session.check_started();
        match self.auth.restore_session().await {
            Ok(Some(restored)) => {
                debug!(user_id = restored.user.id, "session restored from storage");
                self.session
                    .check_settled(Some((restored.user, restored.access_token)));
            }
            Ok(None) => self.session.check_settled(None),
            Err(err) => self.session.check_failed(err.to_string()),
        }
    }

    /// Validates and dispatches a login. Outcome lands in the session slice.
    pub async fn login(&mut self, email: &str, password: &str) {
        if let Err(err) = validate::login_input(email, password) {
            self.session.login_failed(err.to_string());
            return;
        }

        self.session.login_started();
        match self.auth.login(email, password).await {
            Ok(response) => {
                self.session
                    .login_succeeded(response.user, response.access_token);
            }
            Err(err) => self.session.login_failed(err.to_string()),
        }
    }

    /// Ends the session. Always settles into `Unauthenticated` with cleared
    /// credentials, and invalidates the profile slice as a direct
    /// consequence rather than a side effect consumers must remember.
    pub async fn logout(&mut self) {
        self.session.logout_started();
        self.auth.logout().await;
        self.session.logout_settled();
        self.profile.clear();
        debug!("session ended, profile state invalidated");
    }

    /// Fetches the employee profile for the current user. Skipped when no
    /// user is present.
    pub async fn fetch_profile(&mut self) {
        let Some(user_id) = self.session.user.as_ref().map(|user| user.id) else {
            debug!("fetch_profile skipped: no current user");
            return;
        };

        self.profile.fetch_started();
        match self.employees.fetch_profile(user_id).await {
            Ok(profile) if profile.user_id != user_id => {
                // A record for a different account is stale and must not be kept.
                self.profile
                    .fetch_failed("data profil tidak sesuai dengan akun".to_string());
            }
            Ok(profile) => self.profile.fetch_succeeded(profile),
            Err(err) => self.profile.fetch_failed(err.to_string()),
        }
    }

    /// Validates, dirty-checks and dispatches a profile update. An email
    /// change goes through the account endpoint first; the remaining fields
    /// go through the employee endpoint. An unchanged form dispatches
    /// nothing at all.
    pub async fn update_profile(&mut self, form: &ProfileForm) -> UpdateOutcome {
        let (Some(user), Some(current)) =
            (self.session.user.clone(), self.profile.current.clone())
        else {
            self.profile
                .update_failed("Data tidak ditemukan".to_string());
            return UpdateOutcome::Failed;
        };

        if let Err(err) = validate::profile_form(&form.email, &form.full_name, &form.phone) {
            self.profile.update_failed(err.to_string());
            return UpdateOutcome::Failed;
        }

        if !form.differs_from(&user.email, &current) {
            debug!("update_profile skipped: no changes");
            return UpdateOutcome::NoChanges;
        }

        self.profile.update_started();

        if form.email != user.email {
            let patch = AccountPatch {
                email: Some(form.email.trim().to_string()),
                role: Some(user.role.clone()),
            };
            match self.auth.update_account(user.id, &patch).await {
                Ok(updated) => self.session.set_user(updated),
                Err(err) => {
                    self.profile.update_failed(err.to_string());
                    return UpdateOutcome::Failed;
                }
            }
        }

        let patch = ProfilePatch {
            full_name: Some(form.full_name.clone()),
            department: Some(form.department.clone()),
            position: Some(form.position.clone()),
            phone: Some(form.phone.clone()),
            hire_date: Some(current.hire_date.clone()),
        };
        match self.employees.update_profile(current.id, &patch).await {
            Ok(profile) => {
                self.profile.update_succeeded(profile);
                UpdateOutcome::Saved
            }
            Err(err) => {
                self.profile.update_failed(err.to_string());
                UpdateOutcome::Failed
            }
        }
    }
}
