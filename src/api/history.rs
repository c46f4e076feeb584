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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::auth::Owner;
use crate::api::server::ServerState;
use crate::error::Fallible;
use crate::types::history::HistoryEntry;

pub async fn list_history(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
) -> Fallible<Json<Vec<HistoryEntry>>> {
    let entries = state.db.list_history(owner_id)?;
    Ok(Json(entries))
}

pub async fn clear_history(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
) -> Fallible<StatusCode> {
    state.db.clear_history(owner_id)?;
    Ok(StatusCode::NO_CONTENT)
}
