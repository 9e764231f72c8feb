use axum::{
    body::Bytes,
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::fixtures::ScriptedResponse;
use crate::server::{RecordedRequest, SharedState};

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "judge-mock"
    }))
}

pub async fn create_submission(
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let payload = serde_json::from_slice::<Value>(&body).ok();
    let source_code = payload
        .as_ref()
        .and_then(|p| p["source_code"].as_str())
        .unwrap_or_default()
        .to_string();

    let mut state = state.lock().await;
    state.requests.push(record(Method::POST, "/submissions", query, &headers, payload));

    let scripted_submit = state.script.submit.clone();
    let response = match scripted_submit {
        Some(scripted) => {
            if let Some(token) = token_in(&scripted) {
                state.sources.insert(token, source_code);
            }
            scripted
        }
        None => {
            let token = uuid::Uuid::new_v4().to_string();
            state.sources.insert(token.clone(), source_code);
            ScriptedResponse::token(&token)
        }
    };

    tracing::debug!("create_submission -> {}", response.status);
    into_response(response)
}

pub async fn get_submission(
    Path(token): Path<String>,
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().await;
    let path = format!("/submissions/{}", token);
    state.requests.push(record(Method::GET, &path, query, &headers, None));

    let next = state.script.polls.pop_front();
    let response = match next {
        Some(scripted) => scripted,
        None => match state.sources.get(&token) {
            Some(source) => ScriptedResponse::accepted(source, "0.01", 1024),
            None => ScriptedResponse::json(404, json!({ "error": "Not found" })),
        },
    };

    tracing::debug!("get_submission {} -> {}", token, response.status);
    into_response(response)
}

fn record(
    method: Method,
    path: &str,
    query: Option<String>,
    headers: &HeaderMap,
    body: Option<Value>,
) -> RecordedRequest {
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    RecordedRequest {
        method: method.to_string(),
        path: path.to_string(),
        query,
        api_key: header_value(API_KEY_HEADER),
        api_host: header_value(API_HOST_HEADER),
        body,
    }
}

fn token_in(response: &ScriptedResponse) -> Option<String> {
    serde_json::from_str::<Value>(&response.body)
        .ok()?
        .get("token")?
        .as_str()
        .map(str::to_string)
}

fn into_response(scripted: ScriptedResponse) -> Response {
    let status = StatusCode::from_u16(scripted.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = if scripted.is_json() {
        "application/json"
    } else {
        "text/plain; charset=utf-8"
    };

    (status, [(header::CONTENT_TYPE, content_type)], scripted.body).into_response()
}
