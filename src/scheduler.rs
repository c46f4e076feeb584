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

use crate::types::difficulty::Difficulty;
use crate::types::timestamp::Timestamp;

/// The scheduler's output: when the card is next due, and in how many
/// minutes.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSchedule {
    pub next_review_date: Timestamp,
    pub interval: i64,
}

/// Minutes until the next review for each difficulty.
///
/// This is a fixed lookup, not an adaptive curve. `Hard` yields zero
/// (review again immediately); the interactive review flow's own copy of
/// this table uses one minute for that case, pending product
/// clarification.
fn interval_minutes(difficulty: Option<Difficulty>) -> i64 {
    match difficulty {
        Some(Difficulty::Hard) => 0,
        Some(Difficulty::Medium) => 10,
        Some(Difficulty::Good) => 2880,
        Some(Difficulty::Easy) => 5760,
        None => 1,
    }
}

/// Map a difficulty rating to a next-review timestamp and interval.
///
/// Pure function of the difficulty and the supplied clock reading; never
/// fails. An unrecognized difficulty (`None`) falls back to one minute.
pub fn compute_review(difficulty: Option<Difficulty>, now: Timestamp) -> ReviewSchedule {
    let interval = interval_minutes(difficulty);
    ReviewSchedule {
        next_review_date: now.add_minutes(interval),
        interval,
    }
}
