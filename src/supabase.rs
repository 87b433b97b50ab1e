//! Supabase REST client.
//!
//! Profiles live in the PostgREST `profiles` table, sessions come from the
//! GoTrue auth endpoints.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header::ACCEPT};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    backend::{AuthService, ProfileStore},
    config::SupabaseConfig,
    error::AppError,
    profile::{ProfileRecord, ProfileUpdate, Session},
};

const PROFILES_TABLE: &str = "profiles";
/// Makes PostgREST return a single object, and 406 when no row matches
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// Error payloads of PostgREST and GoTrue share none of their field names
#[derive(Debug, Deserialize, Default)]
struct ErrorBody {
    message: Option<String>,
    msg: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for a single Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: Client,
    config: SupabaseConfig,
}

impl SupabaseClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn with_key(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", &self.config.anon_key)
    }

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        self.with_key(request).bearer_auth(&session.access_token)
    }

    /// Signs in with email and password
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AppError> {
        let response = self
            .with_key(self.client.post(self.config.auth_url("token")))
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        let (status, body) = read(response).await?;
        if !status.is_success() {
            return Err(AppError::Auth(error_message(status, &body)));
        }

        let session: Session = serde_json::from_str(&body)?;
        info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }
}

async fn read(response: Response) -> Result<(StatusCode, String), AppError> {
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

/// Extracts a readable message from an error response
pub fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.msg)
        .or(parsed.error_description)
        .or(parsed.error)
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
        })
}

/// Maps a single-row select response onto a record or a store error
pub fn interpret_fetch(
    id: &str,
    status: StatusCode,
    body: &str,
) -> Result<ProfileRecord, AppError> {
    if status == StatusCode::NOT_ACCEPTABLE {
        return Err(AppError::ProfileNotFound(id.to_string()));
    }
    if !status.is_success() {
        return Err(AppError::Store {
            status: status.as_u16(),
            message: error_message(status, body),
        });
    }
    Ok(serde_json::from_str(body)?)
}

/// Maps an upsert response onto success or a store error
pub fn interpret_upsert(status: StatusCode, body: &str) -> Result<(), AppError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(AppError::Store {
            status: status.as_u16(),
            message: error_message(status, body),
        })
    }
}

#[async_trait]
impl ProfileStore for SupabaseClient {
    async fn fetch_profile(&self, session: &Session, id: &str) -> Result<ProfileRecord, AppError> {
        let id_filter = format!("eq.{id}");
        let request = self
            .client
            .get(self.config.rest_url(PROFILES_TABLE))
            .query(&[("select", "username"), ("id", id_filter.as_str())])
            .header(ACCEPT, SINGLE_OBJECT);
        let response = self.authorized(request, session).send().await?;

        let (status, body) = read(response).await?;
        debug!(user_id = id, status = status.as_u16(), "fetched profile");
        interpret_fetch(id, status, &body)
    }

    async fn upsert_profile(
        &self,
        session: &Session,
        update: &ProfileUpdate,
    ) -> Result<(), AppError> {
        let request = self
            .client
            .post(self.config.rest_url(PROFILES_TABLE))
            .header("Prefer", UPSERT_PREFER)
            .json(update);
        let response = self.authorized(request, session).send().await?;

        let (status, body) = read(response).await?;
        debug!(user_id = %update.id, status = status.as_u16(), "upserted profile");
        interpret_upsert(status, &body)
    }
}

#[async_trait]
impl AuthService for SupabaseClient {
    async fn sign_out(&self, session: &Session) -> Result<(), AppError> {
        let request = self.client.post(self.config.auth_url("logout"));
        let response = self.authorized(request, session).send().await?;

        let (status, body) = read(response).await?;
        if !status.is_success() {
            return Err(AppError::Auth(error_message(status, &body)));
        }
        info!(user_id = %session.user.id, "signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_found() {
        let record = interpret_fetch("u-1", StatusCode::OK, r#"{"username":"alice"}"#).unwrap();
        assert_eq!(record.username.as_deref(), Some("alice"));
    }

    #[test]
    fn test_fetch_not_acceptable_is_not_found() {
        let body = concat!(
            r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"#,
            r#""message":"JSON object requested, multiple (or no) rows returned"}"#,
        );
        let result = interpret_fetch("u-1", StatusCode::NOT_ACCEPTABLE, body);
        assert!(matches!(result, Err(AppError::ProfileNotFound(id)) if id == "u-1"));
    }

    #[test]
    fn test_fetch_error_uses_store_message() {
        let body = r#"{"code":"42501","message":"permission denied for table profiles"}"#;
        let err = interpret_fetch("u-1", StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, AppError::Store { status: 401, .. }));
        assert_eq!(err.to_string(), "permission denied for table profiles");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
            ),
            "Invalid login credentials"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(error_message(StatusCode::SERVICE_UNAVAILABLE, ""), "Service Unavailable");
    }

    #[test]
    fn test_upsert_status() {
        assert!(interpret_upsert(StatusCode::CREATED, "").is_ok());
        let err = interpret_upsert(StatusCode::CONFLICT, r#"{"message":"duplicate key"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "duplicate key");
    }
}
