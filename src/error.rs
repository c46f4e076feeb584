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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The error type for everything in cardbox.
///
/// Validation and ownership failures are produced deliberately and carry a
/// message meant for the caller. Storage failures wrap whatever the backend
/// reported; the detail is logged, never shown.
#[derive(Debug)]
pub enum AppError {
    /// The request payload is missing or malformed. Rejected before any
    /// storage access.
    Validation(String),
    /// The named deck or card has no matching row visible to the caller.
    NotFound(String),
    /// The row exists but belongs to a different owner.
    NotOwned(String),
    /// A transient backend failure. Propagates opaquely.
    Storage(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "{msg}"),
            AppError::NotFound(msg) => write!(f, "{msg}"),
            AppError::NotOwned(msg) => write!(f, "{msg}"),
            AppError::Storage(msg) => write!(f, "storage failure: {msg}"),
        }
    }
}

impl Error for AppError {}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

pub type Fallible<T> = Result<T, AppError>;

/// Shorthand for returning a validation failure.
pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(AppError::Validation(msg.into()))
}
