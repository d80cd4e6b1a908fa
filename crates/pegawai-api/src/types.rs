//! Wire records shared across services.

use serde::{Deserialize, Serialize};

/// Account identity as the backend reports it and as it is persisted under
/// the `user` credential key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub role: String,
}

/// Work-profile record for one account. Field names match the backend's
/// snake_case wire shape; `hire_date` and the audit timestamps are opaque
/// strings the client echoes back without interpreting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub id: u64,
    pub user_id: u64,
    pub employee_code: String,
    pub full_name: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub phone: String,
    pub hire_date: String,
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}
