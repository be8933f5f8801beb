// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory stand-in for the remote API.
//!
//! Used by the API client once the remote is unreachable. State lives only
//! as long as the backend value:
//! - Payments and bookings keyed by synthetic `mock_*_<millis>` ids
//! - Doctor sessions booked through the simulation
//! - A single demo profile, created on first use
//!
//! Every operation sleeps for a short artificial delay so callers see
//! network-like timing.

use crate::error::ClientError;
use crate::models::{
    seed_classes, AnxietyInput, Booking, BookingRequest, BookingResponse, BookingStatus,
    BookingsResponse, ClassesResponse, DoctorBookingRequest, DoctorBookingResponse, DoctorSession,
    Payment, PaymentInitiation, PaymentMethod, PaymentRequest, PaymentResponse, PaymentStatus,
    PredictionResponse, Profile, ProfileResponse, SessionStatus, SessionsResponse,
};
use crate::services::anxiety;
use crate::time_utils::{format_date, MonotonicMillis};
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::Mutex;
use validator::Validate;

const READ_DELAY: Duration = Duration::from_millis(500);
const CARD_INTENT_DELAY: Duration = Duration::from_millis(800);
const PAYPAL_DELAY: Duration = Duration::from_millis(1000);
const CONFIRM_DELAY: Duration = Duration::from_millis(1500);
const PREDICTION_DELAY: Duration = Duration::from_millis(1500);

const DEMO_EMAIL: &str = "demo@soulcare.com";
const DEMO_NAME: &str = "Demo User";
const DEMO_PHONE: &str = "+91 9876543210";

/// Whether simulated calls pause to mimic network round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    #[default]
    Realistic,
    Disabled,
}

/// Stateful simulation of the booking/payment API.
#[derive(Debug)]
pub struct SimulationBackend {
    user_id: String,
    payments: DashMap<String, Payment>,
    bookings: DashMap<String, Booking>,
    sessions: DashMap<String, DoctorSession>,
    profile: Mutex<Option<Profile>>,
    clock: MonotonicMillis,
    latency: Latency,
}

impl SimulationBackend {
    pub fn new(latency: Latency) -> Self {
        let clock = MonotonicMillis::default();
        let user_id = format!("mock_user_{}", clock.next(Utc::now()));
        Self {
            user_id,
            payments: DashMap::new(),
            bookings: DashMap::new(),
            sessions: DashMap::new(),
            profile: Mutex::new(None),
            clock,
            latency,
        }
    }

    /// Id of the simulated signed-in user.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn pause(&self, delay: Duration) {
        if self.latency == Latency::Realistic {
            tokio::time::sleep(delay).await;
        }
    }

    fn next_id(&self, kind: &str) -> String {
        format!("{}_{}", kind, self.clock.next(Utc::now()))
    }

    // ─── Reads ───────────────────────────────────────────────────

    pub async fn get_classes(&self) -> ClassesResponse {
        tracing::debug!("Simulation: listing classes");
        self.pause(READ_DELAY).await;
        ClassesResponse {
            classes: seed_classes(),
        }
    }

    /// Doctor sessions booked through the simulation.
    pub async fn get_sessions(&self) -> SessionsResponse {
        tracing::debug!("Simulation: listing sessions");
        self.pause(READ_DELAY).await;
        let mut sessions: Vec<_> = self.sessions.iter().map(|s| s.value().clone()).collect();
        sessions.sort_by(|a, b| a.id.cmp(&b.id));
        SessionsResponse { sessions }
    }

    pub async fn get_bookings(&self) -> BookingsResponse {
        tracing::debug!("Simulation: listing bookings");
        self.pause(READ_DELAY).await;
        BookingsResponse {
            bookings: self.bookings_snapshot(),
        }
    }

    /// Catalog classes the simulated user holds a confirmed booking for.
    pub async fn get_user_classes(&self) -> ClassesResponse {
        tracing::debug!("Simulation: listing user classes");
        self.pause(READ_DELAY).await;

        let booked: HashSet<String> = self
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .filter_map(|b| b.class_id.clone())
            .collect();

        ClassesResponse {
            classes: seed_classes()
                .into_iter()
                .filter(|c| booked.contains(&c.id))
                .collect(),
        }
    }

    /// Canned schedule for the doctor dashboard, dated today.
    pub async fn get_doctor_sessions(&self) -> SessionsResponse {
        tracing::debug!("Simulation: listing doctor sessions");
        self.pause(READ_DELAY).await;

        let today = format_date(Utc::now());
        let canned = |id: &str, patient: &str, session_type: &str, time: &str| DoctorSession {
            id: id.to_string(),
            user_id: patient.to_string(),
            doctor_id: None,
            session_date: today.clone(),
            session_time: time.to_string(),
            session_type: session_type.to_string(),
            notes: None,
            status: SessionStatus::Scheduled,
            booked_at: None,
            payment_status: None,
        };

        SessionsResponse {
            sessions: vec![
                canned("session_1", "patient_001", "Anxiety Management", "10:00"),
                canned("session_2", "patient_002", "Meditation Session", "11:30"),
            ],
        }
    }

    fn bookings_snapshot(&self) -> Vec<Booking> {
        let mut bookings: Vec<_> = self.bookings.iter().map(|b| b.value().clone()).collect();
        bookings.sort_by(|a, b| a.id.cmp(&b.id));
        bookings
    }

    // ─── Profile ─────────────────────────────────────────────────

    fn demo_profile(&self) -> Profile {
        Profile {
            id: self.user_id.clone(),
            email: DEMO_EMAIL.to_string(),
            full_name: DEMO_NAME.to_string(),
            phone: DEMO_PHONE.to_string(),
            profile_complete: false,
            joined_at: Utc::now(),
            updated_at: None,
            extra: Map::new(),
        }
    }

    pub async fn get_profile(&self) -> ProfileResponse {
        tracing::debug!("Simulation: fetching profile");
        self.pause(READ_DELAY).await;

        let mut slot = self.profile.lock().await;
        let profile = slot.get_or_insert_with(|| self.demo_profile()).clone();
        ProfileResponse {
            message: None,
            profile,
        }
    }

    /// Merge `patch` into the profile, creating the demo profile first if
    /// it was never fetched.
    pub async fn update_profile(&self, patch: Value) -> Result<ProfileResponse, ClientError> {
        tracing::debug!("Simulation: updating profile");
        self.pause(READ_DELAY).await;

        let patch = match patch {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ClientError::BadRequest(format!(
                    "Profile update must be a JSON object, got {}",
                    other
                )))
            }
        };

        let mut slot = self.profile.lock().await;
        let mut profile = slot.clone().unwrap_or_else(|| self.demo_profile());
        profile
            .merge(patch, Utc::now())
            .map_err(|e| ClientError::BadRequest(format!("Invalid profile field: {}", e)))?;
        *slot = Some(profile.clone());

        Ok(ProfileResponse {
            message: Some("Profile updated successfully".to_string()),
            profile,
        })
    }

    // ─── Payments ────────────────────────────────────────────────

    fn record_payment(
        &self,
        request: PaymentRequest,
        method: PaymentMethod,
    ) -> Result<Payment, ClientError> {
        request
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;

        let id = self.next_id("mock_payment");
        let paypal_order_id =
            (method == PaymentMethod::Paypal).then(|| self.next_id("PAYPAL"));

        let payment = Payment {
            id: id.clone(),
            user_id: self.user_id.clone(),
            booking_id: request.booking_id,
            amount: request.amount,
            currency: request.currency,
            description: request.description,
            status: PaymentStatus::Pending,
            payment_method: method,
            created_at: Utc::now(),
            approval_url: None,
            paypal_order_id,
        };
        self.payments.insert(id, payment.clone());

        tracing::info!(
            payment_id = %payment.id,
            booking_id = %payment.booking_id,
            method = ?method,
            "Simulation: payment created"
        );
        Ok(payment)
    }

    /// Card payment intent.
    pub async fn create_payment_intent(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentResponse<PaymentInitiation>, ClientError> {
        self.pause(CARD_INTENT_DELAY).await;
        let payment = self.record_payment(request, PaymentMethod::Card)?;

        Ok(PaymentResponse {
            payment: PaymentInitiation {
                id: payment.id,
                status: payment.status,
                client_secret: Some(self.next_id("mock_secret")),
                paypal_order_id: None,
                approval_url: None,
            },
        })
    }

    /// PayPal order. No buyer approval step is simulated.
    pub async fn create_paypal_payment(
        &self,
        request: PaymentRequest,
    ) -> Result<PaymentResponse<PaymentInitiation>, ClientError> {
        self.pause(PAYPAL_DELAY).await;
        let payment = self.record_payment(request, PaymentMethod::Paypal)?;

        Ok(PaymentResponse {
            payment: PaymentInitiation {
                id: payment.id,
                status: payment.status,
                client_secret: None,
                paypal_order_id: payment.paypal_order_id,
                approval_url: None,
            },
        })
    }

    pub async fn confirm_payment(
        &self,
        payment_id: &str,
        payment_method_id: Option<&str>,
    ) -> Result<PaymentResponse, ClientError> {
        self.pause(CONFIRM_DELAY).await;
        tracing::debug!(payment_id, payment_method_id, "Simulation: confirming payment");
        Ok(PaymentResponse {
            payment: self.settle_payment(payment_id)?,
        })
    }

    pub async fn capture_paypal_payment(
        &self,
        payment_id: &str,
        paypal_order_id: Option<&str>,
    ) -> Result<PaymentResponse, ClientError> {
        self.pause(PAYPAL_DELAY).await;
        tracing::debug!(payment_id, paypal_order_id, "Simulation: capturing PayPal payment");
        Ok(PaymentResponse {
            payment: self.settle_payment(payment_id)?,
        })
    }

    /// Mark a payment succeeded and its booking paid.
    ///
    /// Settling an already-succeeded payment changes nothing.
    fn settle_payment(&self, payment_id: &str) -> Result<Payment, ClientError> {
        let (payment, newly_settled) = {
            let mut entry = self
                .payments
                .get_mut(payment_id)
                .ok_or_else(|| ClientError::NotFound(format!("Payment {}", payment_id)))?;

            if entry.status == PaymentStatus::Succeeded {
                (entry.clone(), false)
            } else {
                entry.status = PaymentStatus::Succeeded;
                (entry.clone(), true)
            }
        };

        if !newly_settled {
            tracing::debug!(payment_id, "Simulation: payment already settled");
            return Ok(payment);
        }

        match self.bookings.get_mut(&payment.booking_id) {
            Some(mut booking) => {
                booking.mark_paid();
            }
            None => tracing::warn!(
                payment_id,
                booking_id = %payment.booking_id,
                "Simulation: settled payment references an unknown booking"
            ),
        }

        tracing::info!(payment_id, "Simulation: payment succeeded");
        Ok(payment)
    }

    // ─── Bookings ────────────────────────────────────────────────

    pub async fn create_booking(&self, request: BookingRequest) -> BookingResponse {
        self.pause(READ_DELAY).await;
        let booking = self.insert_booking(request.class_id, request.session_id);
        BookingResponse {
            message: "Booking created successfully (mock)".to_string(),
            booking,
        }
    }

    /// Schedule a consultation and book it in one step.
    pub async fn book_doctor(
        &self,
        doctor_id: &str,
        request: DoctorBookingRequest,
    ) -> Result<DoctorBookingResponse, ClientError> {
        self.pause(READ_DELAY).await;

        let session = request
            .into_session(
                self.next_id("mock_session"),
                self.user_id.clone(),
                doctor_id.to_string(),
                Utc::now(),
            )
            .map_err(|msg| ClientError::BadRequest(msg.to_string()))?;
        self.sessions.insert(session.id.clone(), session.clone());

        let booking = self.insert_booking(None, Some(session.id.clone()));
        Ok(DoctorBookingResponse {
            message: "Doctor session booked successfully (mock)".to_string(),
            session,
            booking,
        })
    }

    fn insert_booking(&self, class_id: Option<String>, session_id: Option<String>) -> Booking {
        let booking = Booking::confirmed(
            self.next_id("mock_booking"),
            self.user_id.clone(),
            class_id,
            session_id,
            Utc::now(),
        );
        self.bookings.insert(booking.id.clone(), booking.clone());
        tracing::info!(booking_id = %booking.id, "Simulation: booking created");
        booking
    }

    // ─── Assessment ──────────────────────────────────────────────

    pub async fn predict_anxiety(
        &self,
        input: AnxietyInput,
    ) -> Result<PredictionResponse, ClientError> {
        input
            .validate()
            .map_err(|e| ClientError::BadRequest(e.to_string()))?;
        self.pause(PREDICTION_DELAY).await;

        Ok(PredictionResponse {
            message: "ML Prediction successful".to_string(),
            prediction: anxiety::predict(&input),
            timestamp: Utc::now(),
        })
    }
}

impl Default for SimulationBackend {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}
