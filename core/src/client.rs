//! Stateless request builder and reply parser for the remote action endpoint.
//!
//! # Design
//! `RemoteActionClient` holds only a `BackendConfig` and carries no mutable
//! state between calls. `build_toggle_lock` produces an `HttpRequest`;
//! `parse_toggle_lock` consumes an `HttpResponse`. The caller executes the
//! round-trip in between, keeping the core deterministic and free of I/O.
//!
//! The backend takes every parameter in the query string of a `POST` with no
//! body, and expects browser-like headers. Both are reproduced exactly.

use url::{form_urlencoded, Url};

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::normalize::normalize;
use crate::types::{ActionOutcome, AuthContext, LockDirective, VehicleRef};

/// Synchronous, stateless client for the remote lock/unlock endpoint.
#[derive(Debug, Clone, Default)]
pub struct RemoteActionClient {
    config: BackendConfig,
}

impl RemoteActionClient {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Build the outbound request for a lock or unlock.
    ///
    /// `pin` is appended only for [`LockDirective::Unlock`], whatever
    /// `auth.pin` holds. Fails only when the configured action URL does not
    /// parse.
    pub fn build_toggle_lock(
        &self,
        auth: &AuthContext,
        vehicle: &VehicleRef,
        directive: LockDirective,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = Url::parse(&self.config.action_url())
            .map_err(|e| ApiError::RequestConstruction(format!("invalid action URL: {e}")))?;

        // Keys in byte order: the encoding the backend has always received.
        let mut pairs: Vec<(&str, &str)> = vec![("gen", vehicle.generation.as_str())];
        if directive.sends_pin() {
            pairs.push(("pin", auth.pin.as_str()));
        }
        pairs.extend([
            ("regId", vehicle.registration_id.as_str()),
            ("service", directive.service_token()),
            ("token", auth.session_token.as_str()),
            ("url", self.config.page_url.as_str()),
            ("username", auth.username.as_str()),
            ("vin", vehicle.vin.as_str()),
        ]);
        url.set_query(Some(&encode_query(&pairs)));

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: request_headers(&self.config, auth),
            body: None,
        })
    }

    /// Normalize the backend reply. The status code is not consulted: the
    /// backend reports rejections in the body, and a non-JSON body fails
    /// decoding regardless of status.
    pub fn parse_toggle_lock(&self, response: HttpResponse) -> Result<ActionOutcome, ApiError> {
        normalize(&response.body)
    }
}

/// `k=v&k=v` with Go's query escaping: form encoding, except `~` stays
/// literal and `*` is escaped.
pub fn encode_query(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", query_escape(key), query_escape(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn query_escape(raw: &str) -> String {
    // A literal `%` is emitted as `%25`, so `%7E` can only come from `~`.
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Fixed browser headers plus the credential cookie.
pub fn request_headers(config: &BackendConfig, auth: &AuthContext) -> Vec<(String, String)> {
    vec![
        ("CSRF-Token".to_string(), config.csrf_token.clone()),
        ("accept-language".to_string(), config.accept_language.clone()),
        ("X-Requested-With".to_string(), "XMLHttpRequest".to_string()),
        ("Referer".to_string(), config.referer.clone()),
        ("User-Agent".to_string(), config.user_agent.clone()),
        ("Host".to_string(), config.host.clone()),
        (
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded; charset=UTF-8".to_string(),
        ),
        ("Origin".to_string(), config.origin.clone()),
        ("Cookie".to_string(), session_cookie(config, auth)),
    ]
}

/// `<session-cookie>=<token>; <username-cookie>=<username>`
pub fn session_cookie(config: &BackendConfig, auth: &AuthContext) -> String {
    format!(
        "{}={}; {}={}",
        config.session_cookie_name, auth.session_token, config.username_cookie_name, auth.username
    )
}
