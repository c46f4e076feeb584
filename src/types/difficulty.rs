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

use rusqlite::ToSql;
use rusqlite::types::FromSql;
use rusqlite::types::FromSqlError;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ToSqlOutput;
use rusqlite::types::ValueRef;
use serde::Deserialize;
use serde::Serialize;

use crate::error::AppError;
use crate::error::fail;

/// A caller-supplied judgment of recall ease.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Hard,
    Medium,
    Good,
    Easy,
}

impl Difficulty {
    pub fn as_str(&self) -> &str {
        match self {
            Difficulty::Hard => "hard",
            Difficulty::Medium => "medium",
            Difficulty::Good => "good",
            Difficulty::Easy => "easy",
        }
    }

    /// Parse a difficulty string. Unrecognized values map to `None` rather
    /// than an error: the scheduler treats them as a fallback case.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "hard" => Some(Difficulty::Hard),
            "medium" => Some(Difficulty::Medium),
            "good" => Some(Difficulty::Good),
            "easy" => Some(Difficulty::Easy),
            _ => None,
        }
    }
}

impl TryFrom<String> for Difficulty {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match Difficulty::parse(&value) {
            Some(d) => Ok(d),
            None => fail(format!("invalid difficulty: {}", value)),
        }
    }
}

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let string: String = FromSql::column_result(value)?;
        Difficulty::try_from(string).map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
