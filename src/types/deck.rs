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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::CardDraft;
use crate::types::card::DeckId;
use crate::types::card::IncomingCard;
use crate::types::timestamp::Timestamp;

pub type OwnerId = i64;

/// A persisted deck. Visible to and mutable by its owner only.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: DeckId,
    pub owner_id: OwnerId,
    pub title: String,
    pub category: String,
    pub language: String,
    pub created_at: Timestamp,
    pub last_studied: Option<Timestamp>,
}

/// Payload for creating a deck, optionally with initial cards.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeck {
    pub title: String,
    pub category: String,
    pub language: String,
    #[serde(default)]
    pub cards: Vec<CardDraft>,
}

/// Payload for a deck edit.
///
/// Deck-level fields are partial: an absent field keeps the stored value,
/// a present one (including an empty string) overwrites it. The card list
/// is all-or-nothing: when present it is authoritative and complete, and
/// omission of a persisted card means deletion.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckEdit {
    pub title: Option<String>,
    pub category: Option<String>,
    pub language: Option<String>,
    /// RFC 3339 timestamp, or the sentinel `"never"` to keep the stored
    /// value untouched.
    pub last_studied: Option<String>,
    pub cards: Option<Vec<IncomingCard>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deck_edit_partial() {
        let edit: DeckEdit = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert_eq!(edit.title.as_deref(), Some(""));
        assert!(edit.category.is_none());
        assert!(edit.cards.is_none());
    }

    #[test]
    fn test_deck_edit_with_cards() {
        let edit: DeckEdit = serde_json::from_str(
            r#"{"lastStudied": "never", "cards": [{"question": "q", "answer": "a"}]}"#,
        )
        .unwrap();
        assert_eq!(edit.last_studied.as_deref(), Some("never"));
        assert_eq!(edit.cards.unwrap().len(), 1);
    }
}
