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

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::config::DbConfig;

use crate::error::AppError;
use crate::error::Fallible;
use crate::scheduler::ReviewSchedule;
use crate::sync::reconcile;
use crate::types::card::Card;
use crate::types::card::CardDraft;
use crate::types::card::CardId;
use crate::types::card::CardPatch;
use crate::types::card::DeckId;
use crate::types::deck::Deck;
use crate::types::deck::DeckEdit;
use crate::types::deck::NewDeck;
use crate::types::deck::OwnerId;
use crate::types::difficulty::Difficulty;
use crate::types::history::HistoryEntry;
use crate::types::timestamp::Timestamp;

/// The deck/card/history store.
///
/// One connection behind a mutex: every read-compute-write sequence runs
/// exclusively, so concurrent requests serialize instead of racing
/// (last-write-wins is not accepted here). Multi-row work additionally
/// runs inside a transaction, so a failed deck edit rolls back whole.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(mut conn: Connection) -> Fallible<Self> {
        conn.set_db_config(DbConfig::SQLITE_DBCONFIG_ENABLE_FKEY, true)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// Create a deck with its initial cards.
    pub fn create_deck(
        &self,
        owner_id: OwnerId,
        deck: NewDeck,
        now: Timestamp,
    ) -> Fallible<(Deck, Vec<Card>)> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let deck_id: DeckId = tx.query_row(
            "insert into decks (owner_id, title, category, language, created_at) values (?, ?, ?, ?, ?) returning deck_id;",
            (owner_id, &deck.title, &deck.category, &deck.language, now),
            |row| row.get(0),
        )?;
        for draft in &deck.cards {
            insert_card(&tx, deck_id, draft)?;
        }
        let result = read_deck(&tx, deck_id)?;
        let cards = read_cards(&tx, deck_id)?;
        tx.commit()?;
        log::debug!("Created deck {deck_id} with {} cards", cards.len());
        Ok((result, cards))
    }

    /// List the owner's decks.
    pub fn list_decks(&self, owner_id: OwnerId) -> Fallible<Vec<Deck>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare(
            "select deck_id, owner_id, title, category, language, created_at, last_studied from decks where owner_id = ? order by deck_id;",
        )?;
        let mut rows = stmt.query([owner_id])?;
        let mut decks = Vec::new();
        while let Some(row) = rows.next()? {
            decks.push(deck_from_row(row)?);
        }
        Ok(decks)
    }

    /// Get one deck with its full card list.
    ///
    /// Reports not-found both when the deck does not exist and when it
    /// belongs to another owner, so deck ids do not leak across users.
    pub fn get_deck(&self, owner_id: OwnerId, deck_id: DeckId) -> Fallible<(Deck, Vec<Card>)> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let deck = read_owned_deck(&tx, owner_id, deck_id)?;
        let cards = read_cards(&tx, deck_id)?;
        tx.commit()?;
        Ok((deck, cards))
    }

    /// Delete a deck. Cards cascade.
    pub fn delete_deck(&self, owner_id: OwnerId, deck_id: DeckId) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        read_owned_deck(&tx, owner_id, deck_id)?;
        tx.execute("delete from decks where deck_id = ?;", [deck_id])?;
        tx.commit()?;
        log::debug!("Deleted deck {deck_id}");
        Ok(())
    }

    /// Apply a deck edit: partial deck-level fields, plus full-list card
    /// reconciliation when a card list is present.
    ///
    /// All card mutations and the deck-field update are one transaction:
    /// any failure (such as an in-range card id that matches nothing in
    /// this deck) rolls the whole request back.
    pub fn edit_deck(
        &self,
        owner_id: OwnerId,
        deck_id: DeckId,
        edit: DeckEdit,
    ) -> Fallible<(Deck, Vec<Card>)> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let stored = read_owned_deck(&tx, owner_id, deck_id)?;

        if let Some(incoming) = edit.cards {
            let persisted: HashSet<CardId> = read_card_ids(&tx, deck_id)?;
            let plan = reconcile(&persisted, incoming);
            log::debug!(
                "Deck {deck_id}: {} deletes, {} updates, {} creates",
                plan.to_delete.len(),
                plan.to_update.len(),
                plan.to_create.len()
            );
            for card_id in &plan.to_delete {
                tx.execute(
                    "delete from cards where card_id = ? and deck_id = ?;",
                    (card_id, deck_id),
                )?;
            }
            for patch in &plan.to_update {
                update_card(&tx, deck_id, patch)?;
            }
            for draft in &plan.to_create {
                insert_card(&tx, deck_id, draft)?;
            }
        }

        // Deck-level fields are partial: absent keeps the stored value.
        let title = edit.title.unwrap_or(stored.title);
        let category = edit.category.unwrap_or(stored.category);
        let language = edit.language.unwrap_or(stored.language);
        let last_studied = match edit.last_studied.as_deref() {
            None | Some("never") => stored.last_studied,
            Some(value) => match Timestamp::parse(value) {
                Some(ts) => Some(ts),
                None => {
                    return Err(AppError::Validation(format!(
                        "invalid lastStudied timestamp: {value}"
                    )));
                }
            },
        };
        tx.execute(
            "update decks set title = ?, category = ?, language = ?, last_studied = ? where deck_id = ?;",
            (&title, &category, &language, last_studied, deck_id),
        )?;

        let deck = read_deck(&tx, deck_id)?;
        let cards = read_cards(&tx, deck_id)?;
        tx.commit()?;
        Ok((deck, cards))
    }

    /// Record a completed review: write the scheduling result onto the
    /// card and append the history snapshot, in one transaction.
    pub fn record_review(
        &self,
        owner_id: OwnerId,
        card_id: CardId,
        difficulty: Difficulty,
        schedule: ReviewSchedule,
        now: Timestamp,
    ) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let target = tx
            .query_row(
                "select c.question, c.answer, d.owner_id, d.title from cards c join decks d on d.deck_id = c.deck_id where c.card_id = ?;",
                [card_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, OwnerId>(2)?,
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        let (question, answer, deck_owner, deck_title) = match target {
            Some(t) => t,
            None => return Err(AppError::NotFound("card not found".to_string())),
        };
        if deck_owner != owner_id {
            return Err(AppError::NotOwned(
                "card belongs to another user's deck".to_string(),
            ));
        }
        tx.execute(
            "update cards set difficulty = ?, interval_minutes = ?, last_reviewed = ?, next_review = ? where card_id = ?;",
            (difficulty, schedule.interval, now, schedule.next_review_date, card_id),
        )?;
        tx.execute(
            "insert into history (owner_id, deck_title, question, answer, difficulty, reviewed_at) values (?, ?, ?, ?, ?, ?);",
            (owner_id, &deck_title, &question, &answer, difficulty, now),
        )?;
        tx.commit()?;
        log::debug!(
            "Reviewed card {card_id}: {} due={}",
            difficulty.as_str(),
            schedule.next_review_date.to_rfc3339()
        );
        Ok(())
    }

    /// The owner's review history, newest first.
    pub fn list_history(&self, owner_id: OwnerId) -> Fallible<Vec<HistoryEntry>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare(
            "select history_id, owner_id, deck_title, question, answer, difficulty, reviewed_at from history where owner_id = ? order by history_id desc;",
        )?;
        let mut rows = stmt.query([owner_id])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(HistoryEntry {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                deck_title: row.get(2)?,
                question: row.get(3)?,
                answer: row.get(4)?,
                difficulty: row.get(5)?,
                reviewed_at: row.get(6)?,
            });
        }
        Ok(entries)
    }

    /// Bulk clear of the owner's history.
    pub fn clear_history(&self, owner_id: OwnerId) -> Fallible<()> {
        let conn = self.acquire();
        conn.execute("delete from history where owner_id = ?;", [owner_id])?;
        Ok(())
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

fn insert_card(tx: &Transaction, deck_id: DeckId, draft: &CardDraft) -> Fallible<CardId> {
    let interval = draft.interval.unwrap_or(0);
    check_interval(interval)?;
    let card_id: CardId = tx.query_row(
        "insert into cards (deck_id, question, answer, difficulty, interval_minutes, last_reviewed, next_review) values (?, ?, ?, ?, ?, ?, ?) returning card_id;",
        (
            deck_id,
            &draft.question,
            &draft.answer,
            draft.difficulty,
            interval,
            draft.last_reviewed,
            draft.next_review_date,
        ),
        |row| row.get(0),
    )?;
    Ok(card_id)
}

fn update_card(tx: &Transaction, deck_id: DeckId, patch: &CardPatch) -> Fallible<()> {
    // Scoped to the deck: an id belonging to another deck reads as absent.
    let stored = tx
        .query_row(
            "select question, answer, difficulty, interval_minutes, last_reviewed, next_review from cards where card_id = ? and deck_id = ?;",
            (patch.id, deck_id),
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<Difficulty>>(2)?,
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, Option<Timestamp>>(4)?,
                    row.get::<_, Option<Timestamp>>(5)?,
                ))
            },
        )
        .optional()?;
    let (question, answer, difficulty, mut interval, mut last_reviewed, mut next_review) =
        match stored {
            Some(s) => s,
            None => {
                return Err(AppError::NotFound(format!(
                    "card {} not found in deck",
                    patch.id
                )));
            }
        };

    // Edited text re-enters the review queue: changing the question or
    // answer clears the schedule before the entry's explicit patches
    // apply, so a client-supplied schedule still wins.
    if patch.question != question || patch.answer != answer {
        interval = None;
        last_reviewed = None;
        next_review = None;
    }

    let difficulty = patch.difficulty.apply(difficulty);
    let interval = patch.interval.apply(interval);
    let last_reviewed = patch.last_reviewed.apply(last_reviewed);
    let next_review = patch.next_review_date.apply(next_review);
    if let Some(interval) = interval {
        check_interval(interval)?;
    }

    tx.execute(
        "update cards set question = ?, answer = ?, difficulty = ?, interval_minutes = ?, last_reviewed = ?, next_review = ? where card_id = ? and deck_id = ?;",
        (
            &patch.question,
            &patch.answer,
            difficulty,
            interval,
            last_reviewed,
            next_review,
            patch.id,
            deck_id,
        ),
    )?;
    Ok(())
}

fn check_interval(interval: i64) -> Fallible<()> {
    if interval < 0 {
        return Err(AppError::Validation(format!(
            "interval must be non-negative, got {interval}"
        )));
    }
    Ok(())
}

fn read_owned_deck(tx: &Transaction, owner_id: OwnerId, deck_id: DeckId) -> Fallible<Deck> {
    let deck = tx
        .query_row(
            "select deck_id, owner_id, title, category, language, created_at, last_studied from decks where deck_id = ?;",
            [deck_id],
            deck_from_row,
        )
        .optional()?;
    match deck {
        Some(deck) if deck.owner_id == owner_id => Ok(deck),
        // Absent and foreign-owned report alike.
        _ => Err(AppError::NotFound("deck not found".to_string())),
    }
}

fn read_deck(tx: &Transaction, deck_id: DeckId) -> Fallible<Deck> {
    let deck = tx.query_row(
        "select deck_id, owner_id, title, category, language, created_at, last_studied from decks where deck_id = ?;",
        [deck_id],
        deck_from_row,
    )?;
    Ok(deck)
}

fn deck_from_row(row: &rusqlite::Row) -> rusqlite::Result<Deck> {
    Ok(Deck {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        category: row.get(3)?,
        language: row.get(4)?,
        created_at: row.get(5)?,
        last_studied: row.get(6)?,
    })
}

fn read_card_ids(tx: &Transaction, deck_id: DeckId) -> Fallible<HashSet<CardId>> {
    let mut ids = HashSet::new();
    let mut stmt = tx.prepare("select card_id from cards where deck_id = ?;")?;
    let mut rows = stmt.query([deck_id])?;
    while let Some(row) = rows.next()? {
        ids.insert(row.get(0)?);
    }
    Ok(ids)
}

fn read_cards(tx: &Transaction, deck_id: DeckId) -> Fallible<Vec<Card>> {
    let mut stmt = tx.prepare(
        "select card_id, deck_id, question, answer, difficulty, interval_minutes, last_reviewed, next_review from cards where deck_id = ? order by card_id;",
    )?;
    let mut rows = stmt.query([deck_id])?;
    let mut cards = Vec::new();
    while let Some(row) = rows.next()? {
        cards.push(Card {
            id: row.get(0)?,
            deck_id: row.get(1)?,
            question: row.get(2)?,
            answer: row.get(3)?,
            difficulty: row.get(4)?,
            interval: row.get(5)?,
            last_reviewed: row.get(6)?,
            next_review_date: row.get(7)?,
        });
    }
    Ok(cards)
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["decks"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::scheduler::compute_review;
    use crate::types::card::IncomingCard;
    use crate::types::patch::Patch;

    const OWNER: OwnerId = 1;
    const STRANGER: OwnerId = 2;

    fn now() -> Timestamp {
        Timestamp::parse("2026-03-01T12:00:00+00:00").unwrap()
    }

    fn new_deck(cards: Vec<CardDraft>) -> NewDeck {
        NewDeck {
            title: "Spanish".to_string(),
            category: "Languages".to_string(),
            language: "es".to_string(),
            cards,
        }
    }

    fn draft(question: &str, answer: &str) -> CardDraft {
        CardDraft {
            question: question.to_string(),
            answer: answer.to_string(),
            difficulty: None,
            interval: None,
            last_reviewed: None,
            next_review_date: None,
        }
    }

    fn incoming(id: Option<i64>, question: &str, answer: &str) -> IncomingCard {
        IncomingCard {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
            difficulty: Patch::Keep,
            interval: Patch::Keep,
            last_reviewed: Patch::Keep,
            next_review_date: Patch::Keep,
        }
    }

    fn edit_with_cards(cards: Vec<IncomingCard>) -> DeckEdit {
        DeckEdit {
            title: None,
            category: None,
            language: None,
            last_studied: None,
            cards: Some(cards),
        }
    }

    #[test]
    fn test_create_deck_with_cards() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q1", "a1")]), now())?;
        assert_eq!(deck.title, "Spanish");
        assert_eq!(cards.len(), 1);
        // A fresh card is in the "new" state with a zero interval.
        assert_eq!(cards[0].interval, Some(0));
        assert!(cards[0].difficulty.is_none());
        assert!(cards[0].last_reviewed.is_none());
        assert!(cards[0].next_review_date.is_none());
        Ok(())
    }

    #[test]
    fn test_deck_invisible_to_stranger() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, _) = db.create_deck(OWNER, new_deck(vec![]), now())?;
        assert!(matches!(
            db.get_deck(STRANGER, deck.id),
            Err(AppError::NotFound(_))
        ));
        assert!(db.list_decks(STRANGER)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_delete_deck_cascades() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        db.delete_deck(OWNER, deck.id)?;
        let schedule = compute_review(Some(Difficulty::Good), now());
        let result = db.record_review(OWNER, cards[0].id, Difficulty::Good, schedule, now());
        assert!(matches!(result, Err(AppError::NotFound(_))));
        Ok(())
    }

    #[test]
    fn test_edit_deck_omission_deletes() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(
            OWNER,
            new_deck(vec![draft("q1", "a1"), draft("q2", "a2"), draft("q3", "a3")]),
            now(),
        )?;
        let keep: Vec<IncomingCard> = vec![
            incoming(Some(cards[0].id), "q1", "a1"),
            incoming(Some(cards[2].id), "q3", "a3"),
            incoming(None, "q4", "a4"),
        ];
        let (_, after) = db.edit_deck(OWNER, deck.id, edit_with_cards(keep))?;
        let questions: Vec<&str> = after.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["q1", "q3", "q4"]);
        Ok(())
    }

    #[test]
    fn test_edit_deck_tri_state() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        let card_id = cards[0].id;
        // Seed a schedule through a review.
        let schedule = compute_review(Some(Difficulty::Good), now());
        db.record_review(OWNER, card_id, Difficulty::Good, schedule, now())?;

        // Omitted: stored value unchanged.
        let (_, after) = db.edit_deck(
            OWNER,
            deck.id,
            edit_with_cards(vec![incoming(Some(card_id), "q", "a")]),
        )?;
        assert_eq!(after[0].next_review_date, Some(schedule.next_review_date));

        // Concrete value: overwritten.
        let replacement = Timestamp::parse("2026-04-01T00:00:00+00:00").unwrap();
        let mut entry = incoming(Some(card_id), "q", "a");
        entry.next_review_date = Patch::Set(replacement);
        let (_, after) = db.edit_deck(OWNER, deck.id, edit_with_cards(vec![entry]))?;
        assert_eq!(after[0].next_review_date, Some(replacement));

        // Explicit null: cleared.
        let mut entry = incoming(Some(card_id), "q", "a");
        entry.next_review_date = Patch::Clear;
        let (_, after) = db.edit_deck(OWNER, deck.id, edit_with_cards(vec![entry]))?;
        assert_eq!(after[0].next_review_date, None);
        Ok(())
    }

    #[test]
    fn test_edit_deck_text_change_resets_schedule() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        let card_id = cards[0].id;
        let schedule = compute_review(Some(Difficulty::Easy), now());
        db.record_review(OWNER, card_id, Difficulty::Easy, schedule, now())?;

        let (_, after) = db.edit_deck(
            OWNER,
            deck.id,
            edit_with_cards(vec![incoming(Some(card_id), "q edited", "a")]),
        )?;
        assert!(after[0].last_reviewed.is_none());
        assert!(after[0].next_review_date.is_none());
        assert!(after[0].interval.is_none());
        Ok(())
    }

    #[test]
    fn test_edit_deck_unknown_id_rolls_back() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        // An in-range id that matches nothing in the deck classifies as an
        // update and must fail, leaving the deck untouched.
        let edit = edit_with_cards(vec![incoming(Some(999), "new q", "new a")]);
        assert!(matches!(
            db.edit_deck(OWNER, deck.id, edit),
            Err(AppError::NotFound(_))
        ));
        let (_, after) = db.get_deck(OWNER, deck.id)?;
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].id, cards[0].id);
        assert_eq!(after[0].question, "q");
        Ok(())
    }

    #[test]
    fn test_edit_deck_fields_partial() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, _) = db.create_deck(OWNER, new_deck(vec![]), now())?;
        let edit = DeckEdit {
            title: Some("Castilian".to_string()),
            category: None,
            language: None,
            last_studied: Some("never".to_string()),
            cards: None,
        };
        let (after, _) = db.edit_deck(OWNER, deck.id, edit)?;
        assert_eq!(after.title, "Castilian");
        assert_eq!(after.category, "Languages");
        assert!(after.last_studied.is_none());

        // An empty string is a legitimate overwrite, not a fallback.
        let edit = DeckEdit {
            title: None,
            category: Some("".to_string()),
            language: None,
            last_studied: Some("2026-03-01T13:00:00+00:00".to_string()),
            cards: None,
        };
        let (after, _) = db.edit_deck(OWNER, deck.id, edit)?;
        assert_eq!(after.category, "");
        assert_eq!(
            after.last_studied.unwrap().to_rfc3339(),
            "2026-03-01T13:00:00+00:00"
        );
        Ok(())
    }

    #[test]
    fn test_edit_deck_rejects_bad_last_studied() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, _) = db.create_deck(OWNER, new_deck(vec![]), now())?;
        let edit = DeckEdit {
            title: None,
            category: None,
            language: None,
            last_studied: Some("not a date".to_string()),
            cards: None,
        };
        assert!(matches!(
            db.edit_deck(OWNER, deck.id, edit),
            Err(AppError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_edit_deck_rejects_negative_interval() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        let mut entry = incoming(Some(cards[0].id), "q", "a");
        entry.interval = Patch::Set(-5);
        assert!(matches!(
            db.edit_deck(OWNER, deck.id, edit_with_cards(vec![entry])),
            Err(AppError::Validation(_))
        ));
        Ok(())
    }

    #[test]
    fn test_record_review_overwrites() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        let card_id = cards[0].id;

        let first = compute_review(Some(Difficulty::Good), now());
        db.record_review(OWNER, card_id, Difficulty::Good, first, now())?;
        let (_, after) = db.get_deck(OWNER, deck.id)?;
        assert_eq!(after[0].interval, Some(2880));
        assert_eq!(after[0].last_reviewed, Some(now()));

        // A second review overwrites; nothing accumulates.
        let later = now().add_minutes(60);
        let second = compute_review(Some(Difficulty::Hard), later);
        db.record_review(OWNER, card_id, Difficulty::Hard, second, later)?;
        let (_, after) = db.get_deck(OWNER, deck.id)?;
        assert_eq!(after[0].interval, Some(0));
        assert_eq!(after[0].difficulty, Some(Difficulty::Hard));
        assert_eq!(after[0].last_reviewed, Some(later));
        assert_eq!(after[0].next_review_date, Some(later));
        Ok(())
    }

    #[test]
    fn test_record_review_authorization() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (_, cards) = db.create_deck(OWNER, new_deck(vec![draft("q", "a")]), now())?;
        let schedule = compute_review(Some(Difficulty::Good), now());
        assert!(matches!(
            db.record_review(STRANGER, cards[0].id, Difficulty::Good, schedule, now()),
            Err(AppError::NotOwned(_))
        ));
        assert!(matches!(
            db.record_review(OWNER, 999, Difficulty::Good, schedule, now()),
            Err(AppError::NotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn test_history_snapshots_survive_deletion() -> Fallible<()> {
        let db = Database::in_memory()?;
        let (deck, cards) = db.create_deck(OWNER, new_deck(vec![draft("hola", "hello")]), now())?;
        let schedule = compute_review(Some(Difficulty::Medium), now());
        db.record_review(OWNER, cards[0].id, Difficulty::Medium, schedule, now())?;
        db.delete_deck(OWNER, deck.id)?;

        let history = db.list_history(OWNER)?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].deck_title, "Spanish");
        assert_eq!(history[0].question, "hola");
        assert_eq!(history[0].difficulty, Difficulty::Medium);
        assert!(db.list_history(STRANGER)?.is_empty());

        db.clear_history(OWNER)?;
        assert!(db.list_history(OWNER)?.is_empty());
        Ok(())
    }
}
