// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API client with automatic fallback to the simulation backend.
//!
//! Handles:
//! - A one-time health probe before the first request
//! - Bearer auth (user token or the public anon key)
//! - Per-call timeouts
//! - Switching to the simulation for good on timeout or network failure
//! - Decoding every response into the caller's type

pub mod mode;
pub mod route;

pub use mode::{BackendMode, ClientContext, ModeLatch};
pub use route::MockRoute;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{
    AnxietyInput, BookingRequest, BookingResponse, BookingsResponse, CapturePaymentRequest,
    ClassesResponse, ConfirmPaymentRequest, DoctorBookingRequest, DoctorBookingResponse,
    PaymentInitiation, PaymentRequest, PaymentResponse, PredictionResponse, ProfileResponse,
    SessionsResponse,
};
use crate::services::simulation::{Latency, SimulationBackend};
use reqwest::{header, Method};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Gateway to the remote API. Clones share one context.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    context: Arc<ClientContext>,
}

impl ApiClient {
    /// Create a client with a fresh simulation backend.
    pub fn new(config: ClientConfig) -> Self {
        let latency = if config.simulated_latency {
            Latency::Realistic
        } else {
            Latency::Disabled
        };
        let context = Arc::new(ClientContext::new(SimulationBackend::new(latency)));
        Self::with_context(config, context)
    }

    /// Create a client around an existing context.
    pub fn with_context(mut config: ClientConfig, context: Arc<ClientContext>) -> Self {
        config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            config,
            context,
        }
    }

    /// Backend currently serving requests.
    pub fn mode(&self) -> BackendMode {
        self.context.mode()
    }

    pub fn context(&self) -> &Arc<ClientContext> {
        &self.context
    }

    // ─── Generic Requests ────────────────────────────────────────

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        self.request(Method::GET, endpoint, Value::Null, token).await
    }

    pub async fn post<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_body(body)?;
        self.request(Method::POST, endpoint, body, token).await
    }

    pub async fn put<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = to_body(body)?;
        self.request(Method::PUT, endpoint, body, token).await
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Value,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        if self.should_use_mock().await {
            return self.simulate(&method, endpoint, body).await;
        }

        match self.send_remote(&method, endpoint, &body, token).await {
            Err(e) if e.is_transport() => {
                if self.context.latch().latch_mock() {
                    tracing::warn!(
                        %method,
                        endpoint,
                        error = %e,
                        "Remote request failed, switching to simulation backend"
                    );
                }
                self.simulate(&method, endpoint, body).await
            }
            result => result,
        }
    }

    async fn simulate<T: DeserializeOwned>(
        &self,
        method: &Method,
        endpoint: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let value = route::dispatch(self.context.simulation(), method, endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn send_remote<T: DeserializeOwned>(
        &self,
        method: &Method,
        endpoint: &str,
        body: &Value,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.config.api_base_url, endpoint);
        tracing::debug!(%method, url = %url, "Sending API request");

        let mut request = self
            .http
            .request(method.clone(), &url)
            .timeout(self.config.request_timeout)
            .bearer_auth(token.unwrap_or(self.config.public_anon_key.as_str()))
            .header(header::CONTENT_TYPE, "application/json");
        if !body.is_null() {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = error_message(status, &bytes);
            tracing::warn!(status = status.as_u16(), error = %message, url = %url, "API error");
            return Err(ClientError::RemoteApi {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Decide the backend, probing `/health` once if nobody has yet.
    async fn should_use_mock(&self) -> bool {
        match self.context.mode() {
            BackendMode::Remote => return false,
            BackendMode::Mock => return true,
            BackendMode::Unprobed => {}
        }

        let _guard = self.context.probe_lock.lock().await;

        // Another task may have probed while we waited
        match self.context.mode() {
            BackendMode::Remote => false,
            BackendMode::Mock => true,
            BackendMode::Unprobed => self.probe().await,
        }
    }

    /// Returns true when the simulation should be used.
    async fn probe(&self) -> bool {
        let url = format!("{}/health", self.config.api_base_url);
        let result = self
            .http
            .get(&url)
            .timeout(self.config.health_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!(url = %url, "Remote API is available");
                self.context.latch().mark_remote();
                false
            }
            Ok(response) => {
                tracing::warn!(
                    status = response.status().as_u16(),
                    "Health check failed, using simulation backend"
                );
                self.context.latch().latch_mock();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote API unreachable, using simulation backend");
                self.context.latch().latch_mock();
                true
            }
        }
    }

    // ─── Catalog & Dashboards ────────────────────────────────────

    pub async fn classes(&self, token: Option<&str>) -> Result<ClassesResponse, ClientError> {
        self.get("/classes", token).await
    }

    /// Sessions booked by the signed-in patient.
    pub async fn sessions(&self, token: Option<&str>) -> Result<SessionsResponse, ClientError> {
        self.get("/sessions", token).await
    }

    pub async fn bookings(&self, token: Option<&str>) -> Result<BookingsResponse, ClientError> {
        self.get("/bookings", token).await
    }

    pub async fn user_classes(&self, token: Option<&str>) -> Result<ClassesResponse, ClientError> {
        self.get("/user-classes", token).await
    }

    /// Sessions assigned to the signed-in doctor.
    pub async fn doctor_sessions(
        &self,
        token: Option<&str>,
    ) -> Result<SessionsResponse, ClientError> {
        self.get("/doctors/sessions", token).await
    }

    // ─── Profile ─────────────────────────────────────────────────

    pub async fn profile(&self, token: Option<&str>) -> Result<ProfileResponse, ClientError> {
        self.get("/profile", token).await
    }

    /// Merge `details` into the profile and mark it complete.
    pub async fn complete_profile(
        &self,
        details: &Value,
        token: Option<&str>,
    ) -> Result<ProfileResponse, ClientError> {
        self.post("/profile/complete", details, token).await
    }

    // ─── Payments ────────────────────────────────────────────────

    pub async fn create_payment_intent(
        &self,
        request: &PaymentRequest,
        token: Option<&str>,
    ) -> Result<PaymentResponse<PaymentInitiation>, ClientError> {
        self.post("/payments/create-intent", request, token).await
    }

    pub async fn confirm_payment(
        &self,
        payment_id: &str,
        payment_method_id: Option<&str>,
        token: Option<&str>,
    ) -> Result<PaymentResponse, ClientError> {
        let body = ConfirmPaymentRequest {
            payment_method_id: payment_method_id.map(str::to_string),
        };
        self.post(&format!("/payments/{}/confirm", payment_id), &body, token)
            .await
    }

    pub async fn create_paypal_payment(
        &self,
        request: &PaymentRequest,
        token: Option<&str>,
    ) -> Result<PaymentResponse<PaymentInitiation>, ClientError> {
        self.post("/payments/paypal/create", request, token).await
    }

    pub async fn capture_paypal_payment(
        &self,
        payment_id: &str,
        paypal_order_id: Option<&str>,
        token: Option<&str>,
    ) -> Result<PaymentResponse, ClientError> {
        let body = CapturePaymentRequest {
            paypal_order_id: paypal_order_id.map(str::to_string),
        };
        self.post(
            &format!("/payments/paypal/{}/capture", payment_id),
            &body,
            token,
        )
        .await
    }

    // ─── Bookings ────────────────────────────────────────────────

    pub async fn book_class(
        &self,
        class_id: &str,
        token: Option<&str>,
    ) -> Result<BookingResponse, ClientError> {
        let body = BookingRequest {
            class_id: Some(class_id.to_string()),
            session_id: None,
        };
        self.post(&format!("/classes/{}/book", class_id), &body, token)
            .await
    }

    pub async fn book_session(
        &self,
        session_id: &str,
        token: Option<&str>,
    ) -> Result<BookingResponse, ClientError> {
        let body = BookingRequest {
            class_id: None,
            session_id: Some(session_id.to_string()),
        };
        self.post(&format!("/sessions/{}/book", session_id), &body, token)
            .await
    }

    pub async fn book_doctor(
        &self,
        doctor_id: &str,
        request: &DoctorBookingRequest,
        token: Option<&str>,
    ) -> Result<DoctorBookingResponse, ClientError> {
        self.post(&format!("/doctors/{}/book", doctor_id), request, token)
            .await
    }

    // ─── Assessment ──────────────────────────────────────────────

    pub async fn predict_anxiety(
        &self,
        input: &AnxietyInput,
        token: Option<&str>,
    ) -> Result<PredictionResponse, ClientError> {
        self.post("/ml/predict-anxiety", input, token).await
    }
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::BadRequest(e.to_string()))
}

#[derive(Deserialize)]
struct RemoteErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Server-provided message, else one derived from the status line.
fn error_message(status: reqwest::StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<RemoteErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown Status")
            )
        })
}
