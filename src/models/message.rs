use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub language_code: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    #[serde(alias = "languageCode", alias = "lang")]
    pub language_code: Option<String>,
}

/// A contact submission with every required field present and trimmed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub language_code: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub unread: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub messages: Vec<ContactMessage>,
    pub total: i64,
    pub unread: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkReadRequest {
    #[serde(alias = "read", alias = "isRead")]
    pub is_read: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_read_accepts_legacy_field_names() {
        let a: MarkReadRequest = serde_json::from_str(r#"{"read": false}"#).unwrap();
        let b: MarkReadRequest = serde_json::from_str(r#"{"isRead": true}"#).unwrap();
        let c: MarkReadRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(a.is_read, Some(false));
        assert_eq!(b.is_read, Some(true));
        assert_eq!(c.is_read, None);
    }
}
