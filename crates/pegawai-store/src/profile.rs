//! Profile slice: the employee record for the current session.

use pegawai_api::types::{EmployeeProfile, User};

use crate::op::Op;

/// Profile state. The record is replaced wholesale on successful fetch or
/// update (the server is authoritative); a failed fetch keeps the previous
/// value, stale but present.
#[derive(Debug, Default)]
pub struct ProfileState {
    pub current: Option<EmployeeProfile>,
    pub fetch: Op<()>,
    pub update: Op<()>,
    /// One-shot signal that the last update was applied; consumers clear it
    /// after acting on it.
    pub update_success: bool,
}

impl ProfileState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.fetch.is_pending()
    }

    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.update.is_pending()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.update.error().or_else(|| self.fetch.error())
    }

    pub fn clear_error(&mut self) {
        self.fetch.clear_error();
        self.update.clear_error();
    }

    pub fn clear_update_success(&mut self) {
        self.update_success = false;
    }

    pub fn fetch_started(&mut self) {
        self.fetch.start();
    }

    pub fn fetch_succeeded(&mut self, profile: EmployeeProfile) {
        self.current = Some(profile);
        self.fetch.settle(Ok(()));
    }

    /// Keeps the previous profile value.
    pub fn fetch_failed(&mut self, error: String) {
        self.fetch.settle(Err(error));
    }

    pub fn update_started(&mut self) {
        self.update_success = false;
        self.update.start();
    }

    pub fn update_succeeded(&mut self, profile: EmployeeProfile) {
        self.current = Some(profile);
        self.update_success = true;
        self.update.settle(Ok(()));
    }

    pub fn update_failed(&mut self, error: String) {
        self.update_success = false;
        self.update.settle(Err(error));
    }

    /// Session ended: drop everything, including errors and outcomes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Edited profile form, compared field-by-field against the last-fetched
/// state to decide whether an update is worth dispatching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub email: String,
    pub full_name: String,
    pub department: String,
    pub position: String,
    pub phone: String,
}

impl ProfileForm {
    /// Pre-fills the form from the current session user and profile.
    #[must_use]
    pub fn from_state(user: &User, profile: &EmployeeProfile) -> Self {
        Self {
            email: user.email.clone(),
            full_name: profile.full_name.clone(),
            department: profile.department.clone(),
            position: profile.position.clone(),
            phone: profile.phone.clone(),
        }
    }

    /// Dirty check: true when any field differs from the last-known server
    /// state.
    #[must_use]
    pub fn differs_from(&self, account_email: &str, profile: &EmployeeProfile) -> bool {
        self.email != account_email
            || self.full_name != profile.full_name
            || self.department != profile.department
            || self.position != profile.position
            || self.phone != profile.phone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> EmployeeProfile {
        EmployeeProfile {
            id: 10,
            user_id: 1,
            employee_code: "EMP-001".to_string(),
            full_name: "Budi Santoso".to_string(),
            department: "Engineering".to_string(),
            position: "Developer".to_string(),
            phone: "0812345678".to_string(),
            hire_date: "2023-01-15".to_string(),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    fn user() -> User {
        User {
            id: 1,
            email: "user@x.com".to_string(),
            role: "employee".to_string(),
        }
    }

    #[test]
    fn fetch_failure_keeps_stale_profile() {
        let mut state = ProfileState::default();
        state.fetch_started();
        state.fetch_succeeded(profile());

        state.fetch_started();
        state.fetch_failed("Gagal mengambil data employee".to_string());
        assert!(state.current.is_some());
        assert_eq!(state.error(), Some("Gagal mengambil data employee"));
    }

    #[test]
    fn update_pending_clears_error_and_success_flag() {
        let mut state = ProfileState::default();
        state.update_failed("boom".to_string());
        state.update_success = true;

        state.update_started();
        assert!(state.is_updating());
        assert_eq!(state.error(), None);
        assert!(!state.update_success);
    }

    #[test]
    fn update_success_is_one_shot() {
        let mut state = ProfileState::default();
        state.update_started();
        state.update_succeeded(profile());
        assert!(state.update_success);

        state.clear_update_success();
        assert!(!state.update_success);
        assert!(state.current.is_some());
    }

    #[test]
    fn clear_drops_everything() {
        let mut state = ProfileState::default();
        state.fetch_succeeded(profile());
        state.update_failed("boom".to_string());
        state.clear();
        assert!(state.current.is_none());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn unchanged_form_is_not_dirty() {
        let form = ProfileForm::from_state(&user(), &profile());
        assert!(!form.differs_from("user@x.com", &profile()));
    }

    #[test]
    fn any_field_change_makes_the_form_dirty() {
        let mut form = ProfileForm::from_state(&user(), &profile());
        form.phone = "0899999999".to_string();
        assert!(form.differs_from("user@x.com", &profile()));

        let mut form = ProfileForm::from_state(&user(), &profile());
        form.email = "new@x.com".to_string();
        assert!(form.differs_from("user@x.com", &profile()));
    }
}
