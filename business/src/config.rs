use bizdesk_states::State;
use serde::Deserialize;
use ustr::Ustr;

use crate::error::ConfigError;
use crate::table::DEFAULT_PAGE_SIZE;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4008/api";

/// Prefix of every environment variable read by [`BusinessConfig::from_env`].
pub const ENV_PREFIX: &str = "BIZDESK_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Backend root, without a trailing slash (e.g. `http://localhost:4008/api`).
    pub api_base_url: Ustr,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub auth_token: Option<String>,
    /// Fills the `{user_id}` segment of per-user endpoints.
    pub user_id: Option<String>,
    pub page_size: usize,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl State for BusinessConfig {}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    page_size: Option<usize>,
}

impl BusinessConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            api_base_url: Ustr::from(base_url.as_ref().trim_end_matches('/')),
            auth_token: None,
            user_id: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Reads `BIZDESK_API_BASE_URL`, `BIZDESK_AUTH_TOKEN`, `BIZDESK_USER_ID` and
    /// `BIZDESK_PAGE_SIZE`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Result<Self, ConfigError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scoped: Vec<(String, String)> = vars
            .into_iter()
            .filter_map(|(key, value)| {
                key.as_ref()
                    .strip_prefix(ENV_PREFIX)
                    .map(|key| (key.to_owned(), value.as_ref().to_owned()))
            })
            .collect();

        let raw: RawConfig = serde_env::from_iter(scoped)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let mut config = match raw.api_base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::Invalid(format!(
                        "API base URL must start with http:// or https://, got `{url}`"
                    )));
                }
                Self::new(url)
            }
            _ => Self::default(),
        };

        config.auth_token = raw.auth_token.filter(|token| !token.trim().is_empty());
        config.user_id = raw.user_id.filter(|id| !id.trim().is_empty());

        if let Some(page_size) = raw.page_size {
            if page_size == 0 {
                return Err(ConfigError::Invalid("page size must be at least 1".to_owned()));
            }
            config.page_size = page_size;
        }

        Ok(config)
    }

    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Joins a resolved endpoint path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.api_base_url)
        } else {
            format!("{}/{path}", self.api_base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = BusinessConfig::default();
        assert_eq!(config.api_base_url.as_str(), "http://localhost:4008/api");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = BusinessConfig::new("https://example.com/api/");
        assert_eq!(config.url("/invoices"), "https://example.com/api/invoices");
        assert_eq!(config.url("tasks"), "https://example.com/api/tasks");
    }

    #[test]
    fn reads_prefixed_variables_only() {
        let config = BusinessConfig::from_vars(vec![
            ("BIZDESK_API_BASE_URL", "https://crm.example.com/api"),
            ("BIZDESK_AUTH_TOKEN", "secret"),
            ("BIZDESK_PAGE_SIZE", "25"),
            ("PAGE_SIZE", "99"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://crm.example.com/api");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));
        assert_eq!(config.page_size, 25);
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = BusinessConfig::from_vars(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config, BusinessConfig::default());
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = BusinessConfig::from_vars(vec![("BIZDESK_PAGE_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_base_url_without_scheme() {
        let err =
            BusinessConfig::from_vars(vec![("BIZDESK_API_BASE_URL", "localhost:4008")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
