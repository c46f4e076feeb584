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
use axum::http::StatusCode;
use serde::Serialize;

use crate::api::auth::Owner;
use crate::api::server::ServerState;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::DeckId;
use crate::types::deck::Deck;
use crate::types::deck::DeckEdit;
use crate::types::deck::NewDeck;
use crate::types::timestamp::Timestamp;

/// A deck together with its full card list.
#[derive(Serialize)]
pub struct DeckResponse {
    #[serde(flatten)]
    pub deck: Deck,
    pub cards: Vec<Card>,
}

pub async fn create_deck(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
    Json(payload): Json<NewDeck>,
) -> Fallible<(StatusCode, Json<DeckResponse>)> {
    let (deck, cards) = state.db.create_deck(owner_id, payload, Timestamp::now())?;
    Ok((StatusCode::CREATED, Json(DeckResponse { deck, cards })))
}

pub async fn list_decks(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
) -> Fallible<Json<Vec<Deck>>> {
    let decks = state.db.list_decks(owner_id)?;
    Ok(Json(decks))
}

pub async fn get_deck(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
    Path(deck_id): Path<DeckId>,
) -> Fallible<Json<DeckResponse>> {
    let (deck, cards) = state.db.get_deck(owner_id, deck_id)?;
    Ok(Json(DeckResponse { deck, cards }))
}

/// The deck-edit operation: partial deck-level fields plus, when a card
/// list is present, full-list reconciliation applied atomically.
pub async fn edit_deck(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
    Path(deck_id): Path<DeckId>,
    Json(payload): Json<DeckEdit>,
) -> Fallible<Json<DeckResponse>> {
    let (deck, cards) = state.db.edit_deck(owner_id, deck_id, payload)?;
    Ok(Json(DeckResponse { deck, cards }))
}

pub async fn delete_deck(
    State(state): State<ServerState>,
    Owner(owner_id): Owner,
    Path(deck_id): Path<DeckId>,
) -> Fallible<StatusCode> {
    state.db.delete_deck(owner_id, deck_id)?;
    Ok(StatusCode::NO_CONTENT)
}
