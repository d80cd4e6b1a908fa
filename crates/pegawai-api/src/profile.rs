//! Profile service: employee record lookup and updates.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::error::Result;
use crate::http::ApiClient;
use crate::types::EmployeeProfile;

/// Profile fields that can be patched. Serialized camelCase, as the update
/// endpoint expects.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub full_name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
}

impl ProfilePatch {
    /// Builds the request body, omitting absent and empty fields entirely.
    /// The backend treats a present-but-empty field as "clear this field",
    /// which this client never intends.
    fn to_body(&self) -> Value {
        let mut body = Map::new();
        insert_present(&mut body, "fullName", self.full_name.as_deref());
        insert_present(&mut body, "department", self.department.as_deref());
        insert_present(&mut body, "position", self.position.as_deref());
        insert_present(&mut body, "phone", self.phone.as_deref());
        insert_present(&mut body, "hireDate", self.hire_date.as_deref());
        Value::Object(body)
    }
}

fn insert_present(body: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            body.insert(key.to_string(), json!(trimmed));
        }
    }
}

// Failure messages are extracted by the HTTP layer; the envelopes here only
// need the payload fields.
#[derive(Debug, Deserialize)]
struct EmployeeEnvelope {
    employee: EmployeeProfile,
}

#[derive(Debug, Deserialize)]
struct EmployeeListEnvelope {
    employees: Vec<EmployeeProfile>,
}

/// Fetches and updates the employee record tied to an account.
#[derive(Debug)]
pub struct ProfileService {
    api: Arc<ApiClient>,
}

impl ProfileService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Looks up the profile keyed by account id.
    ///
    /// # Errors
    /// Returns the backend's message, or a generic failure message.
    pub async fn fetch_profile(&self, user_id: u64) -> Result<EmployeeProfile> {
        let envelope: EmployeeEnvelope = self
            .api
            .get(&format!("/employees/user/{user_id}"))
            .await
            .map_err(|err| err.or_fallback("Gagal mengambil data employee"))?;
        Ok(envelope.employee)
    }

    /// Replaces profile fields. The server's record is authoritative; the
    /// returned profile supersedes whatever the caller held.
    ///
    /// # Errors
    /// Returns the backend's message, or a generic failure message.
    pub async fn update_profile(
        &self,
        employee_id: u64,
        patch: &ProfilePatch,
    ) -> Result<EmployeeProfile> {
        let envelope: EmployeeEnvelope = self
            .api
            .put(&format!("/employees/{employee_id}"), &patch.to_body())
            .await
            .map_err(|err| err.or_fallback("Gagal memperbarui data employee"))?;
        Ok(envelope.employee)
    }

    /// Lists all employee profiles.
    ///
    /// # Errors
    /// Returns the backend's message, or a generic failure message.
    pub async fn list_profiles(&self) -> Result<Vec<EmployeeProfile>> {
        let envelope: EmployeeListEnvelope = self
            .api
            .get("/employees")
            .await
            .map_err(|err| err.or_fallback("Gagal mengambil data employees"))?;
        Ok(envelope.employees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_body_omits_absent_and_empty_fields() {
        let patch = ProfilePatch {
            full_name: Some("Budi Santoso".to_string()),
            department: Some("".to_string()),
            position: Some("   ".to_string()),
            phone: None,
            hire_date: Some("2023-01-15".to_string()),
        };

        let body = patch.to_body();
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["fullName"], "Budi Santoso");
        assert_eq!(object["hireDate"], "2023-01-15");
    }

    #[test]
    fn patch_body_trims_kept_fields() {
        let patch = ProfilePatch {
            phone: Some(" 0812345678 ".to_string()),
            ..ProfilePatch::default()
        };

        let body = patch.to_body();
        assert_eq!(body.as_object().unwrap()["phone"], "0812345678");
    }
}
