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

//! Deck reconciliation.
//!
//! A deck edit submits the full card list. Classification is by id: an
//! entry carrying an id within the 32-bit signed range refers to a
//! persisted card; every other entry is a create. Persisted cards the
//! submission does not reference are deleted — the submitted list is
//! authoritative and complete.

use std::collections::HashSet;

use crate::types::card::CardDraft;
use crate::types::card::CardId;
use crate::types::card::CardPatch;
use crate::types::card::IncomingCard;

/// The storage mutations derived from one submitted card list.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub to_delete: Vec<CardId>,
    pub to_update: Vec<CardPatch>,
    pub to_create: Vec<CardDraft>,
}

/// Diff an incoming card list against the persisted card ids of one deck.
///
/// Pure: no storage access. The caller applies the plan inside a single
/// transaction.
pub fn reconcile(persisted_ids: &HashSet<CardId>, incoming: Vec<IncomingCard>) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();
    let mut referenced: HashSet<CardId> = HashSet::new();

    for entry in incoming {
        match entry.existing_id() {
            Some(id) => {
                referenced.insert(id);
                plan.to_update.push(CardPatch {
                    id,
                    question: entry.question,
                    answer: entry.answer,
                    difficulty: entry.difficulty,
                    interval: entry.interval,
                    last_reviewed: entry.last_reviewed,
                    next_review_date: entry.next_review_date,
                });
            }
            None => {
                plan.to_create.push(CardDraft {
                    question: entry.question,
                    answer: entry.answer,
                    difficulty: entry.difficulty.into_option(),
                    // Interval defaults to zero on creation.
                    interval: Some(entry.interval.into_option().unwrap_or(0)),
                    last_reviewed: entry.last_reviewed.into_option(),
                    next_review_date: entry.next_review_date.into_option(),
                });
            }
        }
    }

    // Every persisted card the submission does not reference is deleted.
    let mut to_delete: Vec<CardId> = persisted_ids.difference(&referenced).copied().collect();
    to_delete.sort_unstable();
    plan.to_delete = to_delete;
    plan
}
