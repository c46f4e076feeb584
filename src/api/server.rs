// Copyright 2026 Cardbox Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use serde_json::Value;
use serde_json::json;
use tokio::net::TcpListener;

use crate::api::decks;
use crate::api::history;
use crate::api::review;
use crate::db::Database;
use crate::error::AppError;
use crate::error::Fallible;

#[derive(Clone)]
pub struct ServerState {
    pub db: Database,
}

pub fn router(state: ServerState) -> Router {
    let app = Router::new();
    let app = app.route("/decks", get(decks::list_decks));
    let app = app.route("/decks", post(decks::create_deck));
    let app = app.route("/decks/{id}", get(decks::get_deck));
    let app = app.route("/decks/{id}", put(decks::edit_deck));
    let app = app.route("/decks/{id}", delete(decks::delete_deck));
    let app = app.route("/cards/{id}/review", post(review::submit_review));
    let app = app.route("/history", get(history::list_history));
    let app = app.route("/history", delete(history::clear_history));
    let app = app.fallback(not_found_handler);
    app.with_state(state)
}

pub async fn start_server(database_path: PathBuf, port: u16) -> Fallible<()> {
    let database_path = database_path
        .to_str()
        .ok_or_else(|| AppError::Validation("invalid database path".to_string()))?;
    let db = Database::new(database_path)?;
    let state = ServerState { db };
    let app = router(state);
    let bind = format!("0.0.0.0:{port}");

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}

async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}
