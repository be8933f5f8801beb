// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Anxiety prediction endpoint.

use crate::error::{AppError, Result};
use crate::models::{AnxietyInput, PredictionResponse};
use crate::services::anxiety;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, routing::post, Json, Router};
use chrono::Utc;
use serde::{de, Deserialize, Deserializer};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ml/predict-anxiety", post(predict_anxiety))
}

/// Questionnaire answers as sent; any of them may be missing.
///
/// Form clients post numbers as strings, so `"5"` is read as 5.
#[derive(Debug, Default, Deserialize)]
struct PredictRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    stress: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    sleep: Option<f64>,
    #[serde(default)]
    overwhelmed: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(n)) => Ok(Some(n)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("expected a number, got {:?}", text))),
    }
}

impl PredictRequest {
    fn into_input(self) -> Option<AnxietyInput> {
        Some(AnxietyInput {
            stress: self.stress?,
            sleep: self.sleep?,
            overwhelmed: self.overwhelmed?,
        })
    }
}

async fn predict_anxiety(
    payload: std::result::Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResponse>> {
    let Json(request) = payload?;
    let input = request.into_input().ok_or_else(|| {
        AppError::BadRequest("Missing required inputs: stress, sleep, overwhelmed".to_string())
    })?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(format!("Invalid inputs: {}", e)))?;

    let prediction = anxiety::predict(&input);
    tracing::debug!(
        score = prediction.score,
        level = ?prediction.anxiety_level,
        "Anxiety prediction"
    );

    Ok(Json(PredictionResponse {
        message: "ML Prediction successful".to_string(),
        prediction,
        timestamp: Utc::now(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_rejected() {
        let partial = PredictRequest {
            stress: Some(4.0),
            sleep: None,
            overwhelmed: Some(false),
        };
        assert!(partial.into_input().is_none());
        assert!(PredictRequest::default().into_input().is_none());
    }

    #[test]
    fn test_complete_request_converts() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"stress": 6, "sleep": 5.5, "overwhelmed": true}"#).unwrap();
        let input = request.into_input().unwrap();
        assert_eq!(input.stress, 6.0);
        assert_eq!(input.sleep, 5.5);
        assert!(input.overwhelmed);
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"stress": "5", "sleep": " 7.5 ", "overwhelmed": false}"#)
                .unwrap();
        let input = request.into_input().unwrap();
        assert_eq!(input.stress, 5.0);
        assert_eq!(input.sleep, 7.5);
    }

    #[test]
    fn test_non_numeric_text_rejected() {
        let parsed = serde_json::from_str::<PredictRequest>(
            r#"{"stress": "very", "sleep": 7, "overwhelmed": false}"#,
        );
        assert!(parsed.is_err());

        let parsed = serde_json::from_str::<PredictRequest>(
            r#"{"stress": "NaN", "sleep": 7, "overwhelmed": false}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_null_counts_as_missing() {
        let request: PredictRequest =
            serde_json::from_str(r#"{"stress": null, "sleep": 7, "overwhelmed": true}"#).unwrap();
        assert!(request.into_input().is_none());
    }
}
