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
use serde::Deserializer;

/// A tri-state field patch.
///
/// Distinguishes a field omitted from the payload (keep the stored value),
/// submitted as an explicit `null` (clear it), and submitted with a value
/// (overwrite it). Deserialize with `#[serde(default)]` so absence maps to
/// `Keep`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Patch<T> {
    Keep,
    Clear,
    Set(T),
}

// Not derived: the derive would demand `T: Default` for no reason.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    /// Resolve this patch against the stored value.
    pub fn apply(self, stored: Option<T>) -> Option<T> {
        match self {
            Patch::Keep => stored,
            Patch::Clear => None,
            Patch::Set(value) => Some(value),
        }
    }

    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// The submitted value for a freshly created card, where there is no
    /// stored value to keep or clear.
    pub fn into_option(self) -> Option<T> {
        match self {
            Patch::Set(value) => Some(value),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<T>::deserialize(deserializer)? {
            None => Ok(Patch::Clear),
            Some(value) => Ok(Patch::Set(value)),
        }
    }
}
