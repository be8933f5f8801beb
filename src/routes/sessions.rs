// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Doctor consultations: booking and listing.
//!
//! The bearer token's subject is the caller. Patients see sessions they
//! booked; doctors see sessions booked with them.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Booking, DoctorBookingRequest, DoctorBookingResponse, SessionsResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Session routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/doctors/{doctor_id}/book", post(book_doctor))
        .route("/sessions", get(patient_sessions))
        .route("/doctors/sessions", get(doctor_sessions))
}

/// Book a consultation with a doctor.
async fn book_doctor(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(doctor_id): Path<String>,
    payload: std::result::Result<Json<DoctorBookingRequest>, JsonRejection>,
) -> Result<Json<DoctorBookingResponse>> {
    let Json(request) = payload?;
    let now = Utc::now();
    let session = request
        .into_session(
            state.store.next_id("session"),
            user.user_id.clone(),
            doctor_id,
            now,
        )
        .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let booking = Booking::confirmed(
        state.store.next_id("booking"),
        user.user_id,
        None,
        Some(session.id.clone()),
        now,
    );

    tracing::info!(
        session_id = %session.id,
        doctor_id = ?session.doctor_id,
        date = %session.session_date,
        "Doctor session booked"
    );

    state.store.insert_session(session.clone(), booking.clone());

    Ok(Json(DoctorBookingResponse {
        message: "Doctor session booked successfully".to_string(),
        session,
        booking,
    }))
}

async fn patient_sessions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.store.sessions_for_patient(&user.user_id),
    })
}

async fn doctor_sessions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<SessionsResponse> {
    Json(SessionsResponse {
        sessions: state.store.sessions_for_doctor(&user.user_id),
    })
}
