use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use clubboard_shared::{
    ColorLookup, MemberCard, RuleGroup, UpdateCard, project_members, project_rules,
    project_updates,
};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MembersView {
    pub status: &'static str,
    pub error: String,
    pub members: Vec<MemberCard>,
}

#[derive(Debug, Serialize)]
pub struct UpdatesView {
    pub status: &'static str,
    pub error: String,
    pub updates: Vec<UpdateCard>,
}

#[derive(Debug, Serialize)]
pub struct RulesView {
    pub status: &'static str,
    pub error: String,
    pub rules: Vec<RuleGroup>,
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub status: &'static str,
    pub error: String,
    pub loaded_at: Option<DateTime<Utc>>,
    pub members: usize,
    pub updates: usize,
    pub rules: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "endpoint_configured": state.loader.endpoint().is_some(),
    }))
}

pub async fn get_members(State(state): State<AppState>) -> Response {
    let current = state.loader.current().await;
    no_store(MembersView {
        status: current.status.label(),
        error: current.status.message().to_owned(),
        members: project_members(&current.snapshot.members),
    })
}

/// Relative times depend on the request instant, so this view is never cached.
pub async fn get_updates(State(state): State<AppState>) -> Response {
    let current = state.loader.current().await;
    let colors = ColorLookup::from_members(&current.snapshot.members);
    no_store(UpdatesView {
        status: current.status.label(),
        error: current.status.message().to_owned(),
        updates: project_updates(&current.snapshot.updates, &colors, Utc::now()),
    })
}

pub async fn get_rules(State(state): State<AppState>) -> Response {
    let current = state.loader.current().await;
    no_store(RulesView {
        status: current.status.label(),
        error: current.status.message().to_owned(),
        rules: project_rules(&current.snapshot.rules),
    })
}

pub async fn get_status(State(state): State<AppState>) -> Response {
    let current = state.loader.current().await;
    no_store(StatusView {
        status: current.status.label(),
        error: current.status.message().to_owned(),
        loaded_at: current.loaded_at,
        members: current.snapshot.members.len(),
        updates: current.snapshot.updates.len(),
        rules: current.snapshot.rules.len(),
    })
}

fn no_store<T: Serialize>(body: T) -> Response {
    ([(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
}
