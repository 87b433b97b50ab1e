use crate::error::AppError;

/// Connection settings for a Supabase project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash, e.g. `https://xyz.supabase.co`
    pub url: String,
    /// Public anon API key
    pub anon_key: String,
}

impl SupabaseConfig {
    pub fn new(url: &str, anon_key: &str) -> Result<Self, AppError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(AppError::Config("supabase url is not set".to_string()));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AppError::Config(format!("supabase url must be http(s): '{url}'")));
        }
        if anon_key.trim().is_empty() {
            return Err(AppError::Config("supabase anon key is not set".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.trim().to_string(),
        })
    }

    /// URL of a PostgREST table endpoint
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    /// URL of a GoTrue auth endpoint
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = SupabaseConfig::new("https://demo.supabase.co/", "key").unwrap();
        assert_eq!(config.rest_url("profiles"), "https://demo.supabase.co/rest/v1/profiles");
        assert_eq!(config.auth_url("logout"), "https://demo.supabase.co/auth/v1/logout");
    }

    #[test]
    fn test_rejects_missing_values() {
        assert!(matches!(SupabaseConfig::new("", "key"), Err(AppError::Config(_))));
        assert!(matches!(SupabaseConfig::new("demo.supabase.co", "key"), Err(AppError::Config(_))));
        assert!(matches!(
            SupabaseConfig::new("https://demo.supabase.co", " "),
            Err(AppError::Config(_))
        ));
    }
}
