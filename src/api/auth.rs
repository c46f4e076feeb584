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

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde_json::Value;
use serde_json::json;

use crate::types::deck::OwnerId;

/// The authenticated caller.
///
/// Session management is an external collaborator: the auth layer in front
/// of this service validates the bearer credential and forwards the
/// resolved identity as the `x-user-id` header. This extractor only reads
/// it; a request without one is rejected before any storage access.
pub struct Owner(pub OwnerId);

impl<S> FromRequestParts<S> for Owner
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<OwnerId>().ok());
        match owner_id {
            Some(id) => Ok(Owner(id)),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "missing or invalid x-user-id header" })),
            )),
        }
    }
}
