// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Anxiety self-assessment inputs and results.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Answers from the self-assessment questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct AnxietyInput {
    /// Self-rated stress, 1 (calm) to 10 (extreme)
    #[validate(range(min = 1.0, max = 10.0), custom(function = "finite"))]
    pub stress: f64,
    /// Hours of sleep last night
    #[validate(range(min = 0.0, max = 24.0), custom(function = "finite"))]
    pub sleep: f64,
    pub overwhelmed: bool,
}

/// Range checks compare, and NaN compares false with everything.
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum AnxietyLevel {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct AnxietyPrediction {
    pub anxiety_level: AnxietyLevel,
    /// 0..=100, rounded
    pub score: u8,
    pub recommendations: Vec<String>,
}
