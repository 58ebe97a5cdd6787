use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminProfile {
    pub id: i32,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
}

impl From<Admin> for AdminProfile {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            full_name: admin.full_name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminProfile,
}

/// Identity attached to requests that passed the admin cookie gate. The gate
/// only checks the cookie flag, so this is always the same fixed identity.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub id: i32,
    pub username: &'static str,
    pub role: &'static str,
}

impl AdminIdentity {
    pub const fn fixed() -> Self {
        Self {
            id: 1,
            username: "admin",
            role: "admin",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub products: i64,
    pub messages: i64,
    pub unread_messages: i64,
}
