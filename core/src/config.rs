//! Outbound backend constants.
//!
//! Every literal the backend expects lives here so tests (and deployments
//! pointing at a staging host) can override them without touching the
//! request builder. `Default` reproduces the production values.

/// Fixed values stamped onto every outbound remote action request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Scheme and authority, no trailing slash.
    pub base_url: String,
    pub action_path: String,
    /// Sent as the `url` query parameter.
    pub page_url: String,
    pub referer: String,
    pub origin: String,
    pub host: String,
    pub user_agent: String,
    pub accept_language: String,
    pub csrf_token: String,
    /// Cookie carrying the session token. Two deployments of the backend
    /// disagree on this name (`JWTToken` vs `jwt_token`).
    pub session_cookie_name: String,
    pub username_cookie_name: String,
}

pub const DEFAULT_BASE_URL: &str = "https://owners.hyundaiusa.com";
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "JWTToken";

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            action_path: "/bin/common/remoteAction".to_string(),
            page_url: "https://owners.hyundaiusa.com/us/en/page/blue-link.html".to_string(),
            referer: "https://owners.hyundaiusa.com/content/myhyundai/us/en/page/dashboard.html"
                .to_string(),
            origin: "https://owners.hyundaiusa.com".to_string(),
            host: "owners.hyundaiusa.com".to_string(),
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.2 Safari/605.1.15".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            csrf_token: "undefined".to_string(),
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            username_cookie_name: "s_name".to_string(),
        }
    }
}

impl BackendConfig {
    /// Production constants with a different scheme and authority.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Absolute action endpoint, before query parameters.
    pub fn action_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.action_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_action_url() {
        assert_eq!(
            BackendConfig::default().action_url(),
            "https://owners.hyundaiusa.com/bin/common/remoteAction"
        );
    }

    #[test]
    fn with_base_url_strips_trailing_slash_and_keeps_host() {
        let config = BackendConfig::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.action_url(), "http://127.0.0.1:8080/bin/common/remoteAction");
        assert_eq!(config.host, "owners.hyundaiusa.com");
    }
}
