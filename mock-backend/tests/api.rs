use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_backend::{app, state, state_with_shape, ReplyShape, SharedState};
use tower::ServiceExt;

const QUERY_LOCK: &str = "gen=2&regId=H1&service=remotelock&token=tok&url=page&username=alice&vin=VIN1";

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn action_request(query: &str, cookie: Option<&str>) -> Request<String> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/bin/common/remoteAction?{query}"));
    if let Some(cookie) = cookie {
        builder = builder.header(http::header::COOKIE, cookie);
    }
    builder.body(String::new()).unwrap()
}

async fn call(state: SharedState, query: &str, cookie: Option<&str>) -> axum::response::Response {
    app(state).oneshot(action_request(query, cookie)).await.unwrap()
}

// --- lock ---

#[tokio::test]
async fn lock_accepted() {
    let resp = call(state(), QUERY_LOCK, Some("JWTToken=tok; s_name=alice")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["result"], "success");
    assert_eq!(body["failMsg"], "");
    assert_eq!(body["responseString"], "remotelock request accepted");
}

#[tokio::test]
async fn lock_with_pin_rejected() {
    let query = format!("{QUERY_LOCK}&pin=1234");
    let resp = call(state(), &query, Some("JWTToken=tok; s_name=alice")).await;
    let body = body_json(resp).await;
    assert_eq!(body["result"], "failure");
    assert_eq!(body["failMsg"], "unexpected pin");
}

// --- unlock ---

#[tokio::test]
async fn unlock_with_correct_pin_accepted() {
    let query = "gen=2&pin=1234&regId=H1&service=remoteunlock&token=tok&url=page&username=alice&vin=VIN1";
    let resp = call(state(), query, Some("JWTToken=tok; s_name=alice")).await;
    let body = body_json(resp).await;
    assert_eq!(body["result"], "success");
}

#[tokio::test]
async fn unlock_with_wrong_pin_structured() {
    let query = "gen=2&pin=0000&regId=H1&service=remoteunlock&token=tok&url=page&username=alice&vin=VIN1";
    let resp = call(
        state_with_shape(ReplyShape::Structured),
        query,
        Some("JWTToken=tok; s_name=alice"),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["result"], "failure");
    assert_eq!(body["failMsg"], "invalid pin");
    assert_eq!(body["responseString"]["errorCode"], 403);
    assert_eq!(body["responseString"]["errorSubCode"], "E403");
    assert_eq!(body["responseString"]["serviceName"], "remoteunlock");
}

// --- session and parameters ---

#[tokio::test]
async fn missing_cookie_rejected() {
    let resp = call(state(), QUERY_LOCK, None).await;
    let body = body_json(resp).await;
    assert_eq!(body["failMsg"], "invalid session");
}

#[tokio::test]
async fn cookie_with_other_token_rejected() {
    let resp = call(state(), QUERY_LOCK, Some("JWTToken=other; s_name=alice")).await;
    let body = body_json(resp).await;
    assert_eq!(body["failMsg"], "invalid session");
}

#[tokio::test]
async fn missing_vin_rejected() {
    let query = "gen=2&regId=H1&service=remotelock&token=tok&url=page&username=alice";
    let resp = call(state(), query, Some("JWTToken=tok")).await;
    let body = body_json(resp).await;
    assert_eq!(body["failMsg"], "missing parameter vin");
}

#[tokio::test]
async fn unsupported_service_rejected() {
    let query = "gen=2&regId=H1&service=remotestart&token=tok&url=page&username=alice&vin=VIN1";
    let resp = call(state(), query, Some("JWTToken=tok")).await;
    let body = body_json(resp).await;
    assert_eq!(body["failMsg"], "unsupported service remotestart");
}

// --- shapes ---

#[tokio::test]
async fn bare_shape_omits_response_string() {
    let resp = call(
        state_with_shape(ReplyShape::Bare),
        QUERY_LOCK,
        Some("JWTToken=tok"),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["result"], "success");
    assert!(body.get("responseString").is_none());
}

#[tokio::test]
async fn garbage_shape_is_not_json() {
    let resp = call(
        state_with_shape(ReplyShape::Garbage),
        QUERY_LOCK,
        Some("JWTToken=tok"),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&body).is_err());
}

// --- recording ---

#[tokio::test]
async fn requests_are_recorded() {
    let shared = state();
    call(shared.clone(), QUERY_LOCK, Some("JWTToken=tok; s_name=alice")).await;

    let backend = shared.read().await;
    assert_eq!(backend.received.len(), 1);
    let recorded = &backend.received[0];
    assert_eq!(recorded.param("service"), Some("remotelock"));
    assert_eq!(recorded.param("pin"), None);
    assert_eq!(recorded.cookie.as_deref(), Some("JWTToken=tok; s_name=alice"));
    assert_eq!(recorded.body_len, 0);
}

#[tokio::test]
async fn get_is_not_routed() {
    let resp = app(state())
        .oneshot(
            Request::builder()
                .uri(format!("/bin/common/remoteAction?{QUERY_LOCK}"))
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
