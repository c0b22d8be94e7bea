use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;
use grocery_ai::commands::CategorizeResponse;

pub const ITEM_REQUIRED: &str = "Item is required";

/// Pull a non-blank `item` string out of a JSON body
fn parse_item(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    let item = value.get("item")?.as_str()?;
    if item.trim().is_empty() {
        return None;
    }
    Some(item.to_string())
}

pub async fn categorize(State(state): State<AppState>, body: Bytes) -> Response {
    let Some(item) = parse_item(&body) else {
        log::warn!("Rejected categorize request without a usable item");
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": ITEM_REQUIRED }))).into_response();
    };

    let section = state.classifier.classify(&item).await;
    Json(CategorizeResponse { section }).into_response()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
