// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based anxiety scoring.
//!
//! Shared by the simulation backend and the reference server so both
//! produce identical results for identical answers.

use crate::models::{AnxietyInput, AnxietyLevel, AnxietyPrediction};
use validator::Validate;

/// Sleep duration with zero penalty (hours).
const OPTIMAL_SLEEP_HOURS: f64 = 7.5;

const STRESS_WEIGHT: f64 = 40.0;
const SLEEP_WEIGHT: f64 = 30.0;
const OVERWHELMED_WEIGHT: f64 = 30.0;

/// Scores below this are `Low`.
const MODERATE_THRESHOLD: f64 = 35.0;
/// Scores at or above this are `High`.
const HIGH_THRESHOLD: f64 = 65.0;

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Maintain your current healthy habits",
    "Continue regular sleep schedule",
    "Practice daily mindfulness for prevention",
    "Stay connected with support network",
];

const MODERATE_RECOMMENDATIONS: &[&str] = &[
    "Consider booking a session with one of our spiritual doctors",
    "Practice daily meditation (15-20 minutes)",
    "Improve sleep hygiene - aim for 7-9 hours",
    "Try breathing exercises when feeling stressed",
    "Engage in regular physical activity",
];

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "⚠️ We recommend booking an immediate consultation with a doctor",
    "Practice grounding techniques (5-4-3-2-1 method)",
    "Reach out to a trusted friend or family member",
    "Consider professional counseling services",
    "Use our guided meditation resources in the Kids Zone",
    "Avoid caffeine and maintain regular meals",
];

/// Unrounded score in `[0, 100]`.
pub fn raw_score(input: &AnxietyInput) -> f64 {
    let stress = (input.stress / 10.0) * STRESS_WEIGHT;
    let sleep = ((input.sleep - OPTIMAL_SLEEP_HOURS).abs() / OPTIMAL_SLEEP_HOURS) * SLEEP_WEIGHT;
    let overwhelmed = if input.overwhelmed {
        OVERWHELMED_WEIGHT
    } else {
        0.0
    };

    (stress + sleep + overwhelmed).clamp(0.0, 100.0)
}

/// Band for an unrounded score.
pub fn level_for(score: f64) -> AnxietyLevel {
    if score < MODERATE_THRESHOLD {
        AnxietyLevel::Low
    } else if score < HIGH_THRESHOLD {
        AnxietyLevel::Moderate
    } else {
        AnxietyLevel::High
    }
}

/// Fixed advice for a band.
pub fn recommendations_for(level: AnxietyLevel) -> &'static [&'static str] {
    match level {
        AnxietyLevel::Low => LOW_RECOMMENDATIONS,
        AnxietyLevel::Moderate => MODERATE_RECOMMENDATIONS,
        AnxietyLevel::High => HIGH_RECOMMENDATIONS,
    }
}

/// Score a questionnaire.
///
/// The band is chosen from the unrounded score; the reported score is
/// rounded to the nearest integer.
///
/// `input` must already pass `AnxietyInput::validate` with finite values.
/// Callers that accept outside input validate first; a NaN here would
/// land in the high band while reporting a score of 0.
pub fn predict(input: &AnxietyInput) -> AnxietyPrediction {
    debug_assert!(
        input.stress.is_finite() && input.sleep.is_finite() && input.validate().is_ok(),
        "unvalidated anxiety input: {:?}",
        input
    );
    let score = raw_score(input);
    let level = level_for(score);

    AnxietyPrediction {
        anxiety_level: level,
        // clamped to [0, 100] above
        score: score.round() as u8,
        recommendations: recommendations_for(level)
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
