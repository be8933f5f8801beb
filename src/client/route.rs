// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Maps API endpoints onto simulation backend operations.

use crate::error::ClientError;
use crate::models::{BookingRequest, CapturePaymentRequest, ConfirmPaymentRequest};
use crate::services::SimulationBackend;
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

/// Simulation operation selected for a method and endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockRoute<'a> {
    Classes,
    Sessions,
    Bookings,
    UserClasses,
    Profile,
    DoctorSessions,
    CreatePayPalPayment,
    CapturePayPalPayment(&'a str),
    CreatePaymentIntent,
    ConfirmPayment(&'a str),
    BookClass(&'a str),
    BookSession(&'a str),
    BookDoctor(&'a str),
    UpdateProfile,
    PredictAnxiety,
    /// No simulated counterpart; answered with a generic success body
    Unknown,
}

impl<'a> MockRoute<'a> {
    /// Resolve an endpoint such as `/payments/abc/confirm?x=1`.
    ///
    /// Every method other than GET is treated as a write.
    pub fn resolve(method: &Method, endpoint: &'a str) -> Self {
        let path = endpoint.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&'a str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if method == Method::GET {
            return match segments.as_slice() {
                ["classes"] => Self::Classes,
                ["sessions"] => Self::Sessions,
                ["bookings"] => Self::Bookings,
                ["user-classes"] => Self::UserClasses,
                ["profile"] => Self::Profile,
                ["doctors", "sessions"] => Self::DoctorSessions,
                _ => Self::Unknown,
            };
        }

        match segments.as_slice() {
            ["payments", "paypal", "create"] => Self::CreatePayPalPayment,
            ["payments", "paypal", id, "capture"] => Self::CapturePayPalPayment(*id),
            ["payments", "create-intent"] => Self::CreatePaymentIntent,
            ["payments", id, "confirm"] => Self::ConfirmPayment(*id),
            ["classes", id, "book"] => Self::BookClass(*id),
            ["sessions", id, "book"] => Self::BookSession(*id),
            ["doctors", id, "book"] => Self::BookDoctor(*id),
            ["profile", "complete"] => Self::UpdateProfile,
            ["profile"] if method == Method::PUT => Self::UpdateProfile,
            ["ml", "predict-anxiety"] => Self::PredictAnxiety,
            _ => Self::Unknown,
        }
    }
}

/// Serve one request from the simulation, returning the JSON body the
/// remote API would have sent.
pub async fn dispatch(
    sim: &SimulationBackend,
    method: &Method,
    endpoint: &str,
    body: Value,
) -> Result<Value, ClientError> {
    let route = MockRoute::resolve(method, endpoint);
    tracing::debug!(%method, endpoint, ?route, "Serving request from simulation backend");

    match route {
        MockRoute::Classes => to_json(sim.get_classes().await),
        MockRoute::Sessions => to_json(sim.get_sessions().await),
        MockRoute::Bookings => to_json(sim.get_bookings().await),
        MockRoute::UserClasses => to_json(sim.get_user_classes().await),
        MockRoute::Profile => to_json(sim.get_profile().await),
        MockRoute::DoctorSessions => to_json(sim.get_doctor_sessions().await),
        MockRoute::CreatePayPalPayment => {
            to_json(sim.create_paypal_payment(parse_body(body)?).await?)
        }
        MockRoute::CapturePayPalPayment(payment_id) => {
            let request: CapturePaymentRequest = parse_body_or_default(body)?;
            to_json(
                sim.capture_paypal_payment(payment_id, request.paypal_order_id.as_deref())
                    .await?,
            )
        }
        MockRoute::CreatePaymentIntent => {
            to_json(sim.create_payment_intent(parse_body(body)?).await?)
        }
        MockRoute::ConfirmPayment(payment_id) => {
            let request: ConfirmPaymentRequest = parse_body_or_default(body)?;
            to_json(
                sim.confirm_payment(payment_id, request.payment_method_id.as_deref())
                    .await?,
            )
        }
        MockRoute::BookClass(class_id) => to_json(
            sim.create_booking(BookingRequest {
                class_id: Some(class_id.to_string()),
                session_id: None,
            })
            .await,
        ),
        MockRoute::BookSession(session_id) => to_json(
            sim.create_booking(BookingRequest {
                class_id: None,
                session_id: Some(session_id.to_string()),
            })
            .await,
        ),
        MockRoute::BookDoctor(doctor_id) => {
            to_json(sim.book_doctor(doctor_id, parse_body_or_default(body)?).await?)
        }
        MockRoute::UpdateProfile => to_json(sim.update_profile(body).await?),
        MockRoute::PredictAnxiety => to_json(sim.predict_anxiety(parse_body(body)?).await?),
        MockRoute::Unknown if method == Method::GET => Ok(json!({
            "data": [],
            "success": true
        })),
        MockRoute::Unknown => Ok(json!({
            "message": "Mock response",
            "data": body,
            "success": true
        })),
    }
}

fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| ClientError::BadRequest(e.to_string()))
}

fn parse_body_or_default<T: DeserializeOwned + Default>(body: Value) -> Result<T, ClientError> {
    if body.is_null() {
        return Ok(T::default());
    }
    parse_body(body)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ClientError> {
    serde_json::to_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
