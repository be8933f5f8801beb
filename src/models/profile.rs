// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User profile model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Patient profile. Unknown fields supplied by the caller are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub profile_complete: bool,
    pub joined_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Free-form details (age, concerns, emergency contact, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    /// Merge `patch` over the current fields.
    ///
    /// Any update marks the profile complete and stamps `updated_at`,
    /// regardless of what the patch says about those two fields.
    pub fn merge(
        &mut self,
        patch: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> serde_json::Result<()> {
        let mut fields = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        fields.extend(patch);
        fields.insert("profileComplete".to_string(), Value::Bool(true));
        fields.insert("updatedAt".to_string(), serde_json::to_value(now)?);

        *self = serde_json::from_value(Value::Object(fields))?;
        Ok(())
    }
}
