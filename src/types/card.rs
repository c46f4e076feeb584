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

use crate::types::difficulty::Difficulty;
use crate::types::patch::Patch;
use crate::types::timestamp::Timestamp;

pub type CardId = i64;
pub type DeckId = i64;

/// A persisted card.
///
/// A freshly created card has no difficulty, no review timestamps, and an
/// interval of zero; `last_reviewed`, `next_review` and `interval_minutes`
/// are set together by a single review event.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    pub question: String,
    pub answer: String,
    pub difficulty: Option<Difficulty>,
    pub interval: Option<i64>,
    pub last_reviewed: Option<Timestamp>,
    pub next_review_date: Option<Timestamp>,
}

/// One entry of a client-submitted full card list.
///
/// The id decides classification: absent or outside the 32-bit signed range
/// means create, anything else means update-by-id. The optional fields are
/// tri-state so a client can clear a schedule (explicit null) without every
/// other submission touching it (omission).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCard {
    pub id: Option<i64>,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Patch<Difficulty>,
    #[serde(default)]
    pub interval: Patch<i64>,
    #[serde(default)]
    pub last_reviewed: Patch<Timestamp>,
    #[serde(default)]
    pub next_review_date: Patch<Timestamp>,
}

impl IncomingCard {
    /// Whether this entry refers to a persisted card. Ids beyond the 32-bit
    /// signed range are client-generated placeholders, not row references.
    pub fn existing_id(&self) -> Option<CardId> {
        match self.id {
            Some(id) if i32::try_from(id).is_ok() => Some(id),
            _ => None,
        }
    }
}

/// The fields written when reconciliation updates a persisted card.
#[derive(Clone, Debug)]
pub struct CardPatch {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub difficulty: Patch<Difficulty>,
    pub interval: Patch<i64>,
    pub last_reviewed: Patch<Timestamp>,
    pub next_review_date: Patch<Timestamp>,
}

/// A card to insert, either from deck creation or from reconciliation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub interval: Option<i64>,
    #[serde(default)]
    pub last_reviewed: Option<Timestamp>,
    #[serde(default)]
    pub next_review_date: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_id_in_range() {
        let card: IncomingCard =
            serde_json::from_str(r#"{"id": 42, "question": "q", "answer": "a"}"#).unwrap();
        assert_eq!(card.existing_id(), Some(42));
    }

    #[test]
    fn test_existing_id_absent() {
        let card: IncomingCard =
            serde_json::from_str(r#"{"question": "q", "answer": "a"}"#).unwrap();
        assert_eq!(card.existing_id(), None);
    }

    #[test]
    fn test_existing_id_placeholder() {
        // A Date.now()-style client placeholder, beyond i32::MAX.
        let card: IncomingCard =
            serde_json::from_str(r#"{"id": 1767312000000, "question": "q", "answer": "a"}"#)
                .unwrap();
        assert_eq!(card.existing_id(), None);
    }

    #[test]
    fn test_tri_state_fields() {
        let card: IncomingCard = serde_json::from_str(
            r#"{"id": 1, "question": "q", "answer": "a",
                "nextReviewDate": null,
                "interval": 10}"#,
        )
        .unwrap();
        assert_eq!(card.next_review_date, Patch::Clear);
        assert_eq!(card.interval, Patch::Set(10));
        assert!(card.last_reviewed.is_keep());
        assert!(card.difficulty.is_keep());
    }
}
