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
use axum::extract::Path;
use axum::extract::State;
use serde::Deserialize;
use serde::Serialize;

use crate::api::auth::Owner;
use crate::api::server::ServerState;
use crate::error::Fallible;
use crate::error::fail;
use crate::scheduler::compute_review;
use crate::types::card::CardId;
use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

#[derive(Deserialize)]
pub struct ReviewRequest {
    difficulty: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub next_review_date: Timestamp,
    pub interval: i64,
    pub message: &'static str,
}

/// Submit a difficulty rating for one card.
///
/// The endpoint rejects a missing or unrecognized difficulty outright;
/// the scheduler's own one-minute fallback is never reachable from here.
pub async fn submit_review(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
    Path(card_id): Path<CardId>,
    Json(payload): Json<ReviewRequest>,
) -> Fallible<Json<ReviewResponse>> {
    let difficulty = match payload.difficulty.as_deref() {
        None => return fail("missing difficulty"),
        Some(value) => match Difficulty::parse(value) {
            Some(d) => d,
            None => return fail(format!("invalid difficulty: {value}")),
        },
    };
    let now = Timestamp::now();
    let schedule = compute_review(Some(difficulty), now);
    state
        .db
        .record_review(owner_id, card_id, difficulty, schedule, now)?;
    Ok(Json(ReviewResponse {
        next_review_date: schedule.next_review_date,
        interval: schedule.interval,
        message: "review recorded",
    }))
}
