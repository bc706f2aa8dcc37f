use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, RawQuery, State};
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, error};

use eldorado_core::dedup::dedupe_by_identity;
use eldorado_core::UserRecord;

use crate::body::{
    merge_sources, pick_first, LOGIN_ID_KEYS, NICKNAME_KEYS, PASSWORD_KEYS, SIGNUP_EMAIL_KEYS,
};
use crate::AppState;

const DEMO_EMAIL: &str = "test@example.com";
const DEMO_PASSWORD: &str = "pass1234";
const DEMO_NICKNAME: &str = "테스트유저";

const ENDPOINTS: &[&str] = &[
    "/api/health",
    "/api/news?date=YYYYMMDD",
    "/api/signup",
    "/api/login",
    "/api/_echo",
];

fn content_type_of(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string()
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// Mirrors back what the body-merging layer saw, for debugging clients that
/// send credentials in unexpected shapes.
pub async fn echo(headers: HeaderMap, RawQuery(query): RawQuery, body: Bytes) -> impl IntoResponse {
    let content_type = content_type_of(&headers);
    let merged = merge_sources(Some(&content_type), &body, query.as_deref());
    debug!(%content_type, keys = ?merged.keys().collect::<Vec<_>>(), "echo request");
    Json(json!({ "content_type": content_type, "merged": Value::Object(merged) }))
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    date: Option<String>,
    debug: Option<String>,
}

fn is_valid_date(date: &str) -> bool {
    date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit())
}

/// GET /api/news?date=YYYYMMDD&debug=true
pub async fn news(State(state): State<Arc<AppState>>, Query(params): Query<NewsQuery>) -> Response {
    if let Some(date) = params.date.as_deref() {
        if !is_valid_date(date) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "INVALID_DATE_FORMAT", "hint": "YYYYMMDD" })),
            )
                .into_response();
        }
    }
    let debug = params
        .debug
        .as_deref()
        .map(|flag| flag.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    match state.crawler.fetch_titles(params.date.as_deref(), debug).await {
        Ok(records) => {
            let items = dedupe_by_identity(records);
            Json(json!({ "count": items.len(), "items": items })).into_response()
        }
        Err(e) => {
            error!(error = %e, "news fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// POST /api/signup — accepts JSON, form or query-string fields.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let content_type = content_type_of(&headers);
    let merged = merge_sources(Some(&content_type), &body, query.as_deref());

    let email = pick_first(&merged, SIGNUP_EMAIL_KEYS);
    let password = pick_first(&merged, PASSWORD_KEYS);
    let nickname = pick_first(&merged, NICKNAME_KEYS);

    if email.is_empty() || password.is_empty() || nickname.is_empty() {
        let merged_keys: Vec<&String> = merged.keys().collect();
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "MISSING_FIELDS", "merged_keys": merged_keys })),
        )
            .into_response();
    }

    let email = email.to_lowercase();
    let user = UserRecord {
        email: email.clone(),
        nickname: nickname.clone(),
        password,
    };
    match state.users.insert_user(user).await {
        Ok(true) => (
            StatusCode::CREATED,
            Json(json!({ "ok": true, "user": { "email": email, "nickname": nickname } })),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::CONFLICT,
            Json(json!({ "ok": false, "error": "ALREADY_EXISTS" })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "signup store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// POST /api/login — plaintext comparison against the store, with the demo
/// account as a fallback.
pub async fn login(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    let content_type = content_type_of(&headers);
    let merged = merge_sources(Some(&content_type), &body, query.as_deref());

    let email_raw = pick_first(&merged, LOGIN_ID_KEYS);
    let password = pick_first(&merged, PASSWORD_KEYS);
    let email = email_raw.to_lowercase();
    debug!(%content_type, %email_raw, keys = ?merged.keys().collect::<Vec<_>>(), "login attempt");

    if email.is_empty() || password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "MISSING_CREDENTIALS" })),
        )
            .into_response();
    }

    match state.users.get_user(&email).await {
        Ok(Some(user)) if user.password == password => {
            return Json(
                json!({ "ok": true, "user": { "nickname": user.nickname, "email": user.email } }),
            )
            .into_response();
        }
        Ok(_) => {}
        Err(e) => {
            error!(error = %e, "login store failure");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    }

    if email == DEMO_EMAIL && password == DEMO_PASSWORD {
        return Json(
            json!({ "ok": true, "user": { "nickname": DEMO_NICKNAME, "email": email_raw } }),
        )
        .into_response();
    }

    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "ok": false, "error": "INVALID_CREDENTIALS" })),
    )
        .into_response()
}

/// GET / — JSON service index, or a small HTML page for browsers.
pub async fn index(headers: HeaderMap) -> Response {
    let accept = headers
        .get(ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    if accept.contains("text/html") {
        let links: String = ENDPOINTS
            .iter()
            .map(|path| format!("<li><a href=\"{path}\">{path}</a></li>"))
            .collect();
        return Html(format!(
            "<!doctype html><html lang=\"ko\"><meta charset=\"utf-8\">\
             <title>Eldorado API</title><body>\
             <h1>Eldorado API 서버</h1>\
             <p>서버가 실행 중입니다.</p>\
             <ul>{links}</ul>\
             </body></html>"
        ))
        .into_response();
    }
    Json(json!({ "service": "eldorado-api", "status": "ok", "endpoints": ENDPOINTS })).into_response()
}

pub async fn api_index() -> impl IntoResponse {
    Json(json!({ "ok": true, "message": "Eldorado API root", "see": ["/api/health", "/api/news"] }))
}

pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "NOT_FOUND", "path": uri.path() })),
    )
}
