use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user attached to a session
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// Opaque user id, stable for the session
    pub id: String,
    /// Account email, display only
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed in session as returned by the auth service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for REST calls
    pub access_token: String,
    /// Token used to obtain a new access token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// User the session belongs to
    pub user: SessionUser,
}

impl Session {
    /// Email to display, empty when the account has none
    pub fn email(&self) -> &str {
        self.user.email.as_deref().unwrap_or_default()
    }
}

/// Row of the `profiles` table as selected by the profile screen
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRecord {
    /// Display name, may be unset
    #[serde(default)]
    pub username: Option<String>,
}

/// Upsert payload for the `profiles` table
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Row key, the user id
    pub id: String,
    /// New display name
    pub username: Option<String>,
    /// Write time
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_null_username() {
        let record: ProfileRecord = serde_json::from_str(r#"{"username":null}"#).unwrap();
        assert_eq!(record.username, None);
    }

    #[test]
    fn test_session_decodes_auth_response_fields() {
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "refresh_token": "ref",
            "user": {"id": "u-1", "email": "a@example.com", "aud": "authenticated"}
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.user.id, "u-1");
        assert_eq!(session.email(), "a@example.com");
        assert_eq!(session.refresh_token.as_deref(), Some("ref"));
    }

    #[test]
    fn test_update_serializes_rfc3339_timestamp() {
        let update = ProfileUpdate {
            id: "u-1".to_string(),
            username: Some("bob".to_string()),
            updated_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["id"], "u-1");
        assert_eq!(value["username"], "bob");
        assert_eq!(value["updated_at"], "2024-05-01T10:00:00Z");
    }
}
