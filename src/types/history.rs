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

use serde::Serialize;

use crate::types::deck::OwnerId;
use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

/// An immutable record of one completed review.
///
/// Deck title and card text are snapshots, not references: the entry stays
/// meaningful after the source deck or card is edited or deleted.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub owner_id: OwnerId,
    pub deck_title: String,
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    pub reviewed_at: Timestamp,
}
