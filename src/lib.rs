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

//! cardbox: a multi-user flashcard review backend.
//!
//! Decks own cards; a card's review schedule is driven by a fixed
//! difficulty-to-interval lookup ([`scheduler`]), and deck edits submit
//! the full card list, which is reconciled against the persisted set
//! ([`sync`]).

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod scheduler;
pub mod sync;
pub mod types;
