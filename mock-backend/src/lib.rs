use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const ACTION_PATH: &str = "/bin/common/remoteAction";
pub const DEFAULT_PIN: &str = "1234";

/// How the mock fills `responseString`, mirroring the shapes seen in the wild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplyShape {
    /// Plain diagnostic string.
    #[default]
    Message,
    /// Structured error record.
    Structured,
    /// No `responseString` member at all.
    Bare,
    /// An HTML error page instead of JSON.
    Garbage,
}

/// What the mock saw on one call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub query: Vec<(String, String)>,
    pub cookie: Option<String>,
    pub host: Option<String>,
    pub user_agent: Option<String>,
    pub body_len: usize,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct BackendState {
    pub expected_pin: String,
    pub shape: ReplyShape,
    pub session_cookie_name: String,
    pub received: Vec<RecordedRequest>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            expected_pin: DEFAULT_PIN.to_string(),
            shape: ReplyShape::default(),
            session_cookie_name: "JWTToken".to_string(),
            received: Vec::new(),
        }
    }
}

pub type SharedState = Arc<RwLock<BackendState>>;

pub fn state() -> SharedState {
    Arc::new(RwLock::new(BackendState::default()))
}

pub fn state_with_shape(shape: ReplyShape) -> SharedState {
    Arc::new(RwLock::new(BackendState {
        shape,
        ..BackendState::default()
    }))
}

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route(ACTION_PATH, post(remote_action))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: SharedState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

const REQUIRED_PARAMS: [&str; 7] = ["username", "token", "service", "url", "regId", "vin", "gen"];

async fn remote_action(
    State(state): State<SharedState>,
    Query(query): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = RecordedRequest {
        query,
        cookie: header_string(&headers, header::COOKIE),
        host: header_string(&headers, header::HOST),
        user_agent: header_string(&headers, header::USER_AGENT),
        body_len: body.len(),
    };

    let mut backend = state.write().await;
    backend.received.push(recorded.clone());
    let shape = backend.shape;
    let verdict = judge(&backend, &recorded);
    drop(backend);

    if shape == ReplyShape::Garbage {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::CONTENT_TYPE, "text/html")],
            "<html><body>Service Unavailable</body></html>",
        )
            .into_response();
    }

    let service = recorded.param("service").unwrap_or_default().to_string();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        reply_body(shape, &service, verdict).to_string(),
    )
        .into_response()
}

/// `Ok(())` for an accepted action, otherwise `(errorCode, message)`.
fn judge(backend: &BackendState, req: &RecordedRequest) -> Result<(), (i32, String)> {
    if let Some(missing) = REQUIRED_PARAMS.iter().find(|p| req.param(p).is_none()) {
        return Err((400, format!("missing parameter {missing}")));
    }

    let token = req.param("token").unwrap_or_default();
    let expected_cookie = format!("{}={token}", backend.session_cookie_name);
    let cookie_ok = req
        .cookie
        .as_deref()
        .is_some_and(|c| c.split("; ").any(|part| part == expected_cookie));
    if !cookie_ok {
        return Err((401, "invalid session".to_string()));
    }

    match (req.param("service"), req.param("pin")) {
        (Some("remotelock"), None) => Ok(()),
        (Some("remotelock"), Some(_)) => Err((422, "unexpected pin".to_string())),
        (Some("remoteunlock"), Some(pin)) if pin == backend.expected_pin => Ok(()),
        (Some("remoteunlock"), _) => Err((403, "invalid pin".to_string())),
        (Some(other), _) => Err((404, format!("unsupported service {other}"))),
        (None, _) => Err((400, "missing parameter service".to_string())),
    }
}

fn reply_body(shape: ReplyShape, service: &str, verdict: Result<(), (i32, String)>) -> Value {
    let (result, fail_msg, code, message) = match verdict {
        Ok(()) => ("success", String::new(), 0, format!("{service} request accepted")),
        Err((code, message)) => ("failure", message.clone(), code, message),
    };

    match shape {
        ReplyShape::Message => json!({
            "result": result,
            "failMsg": fail_msg,
            "responseString": message,
        }),
        ReplyShape::Structured => json!({
            "result": result,
            "failMsg": fail_msg,
            "responseString": {
                "errorSubCode": if code == 0 { String::new() } else { format!("E{code}") },
                "systemName": "BLUELINK",
                "functionName": "remoteAction",
                "errorMessage": message,
                "errorCode": code,
                "serviceName": service,
            },
        }),
        ReplyShape::Bare | ReplyShape::Garbage => json!({
            "result": result,
            "failMsg": fail_msg,
        }),
    }
}

fn header_string(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
