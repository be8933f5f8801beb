// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Payment model and payment-initiation payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
}

/// A tracked monetary transaction tied to exactly one booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub user_id: String,
    pub booking_id: String,
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub status: PaymentStatus,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
    /// Provider redirect for approval (PayPal only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
}

/// Body for card intents and PayPal order creation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    #[validate(length(min = 1))]
    pub currency: String,
    #[validate(length(min = 1))]
    pub booking_id: String,
    #[serde(default)]
    pub description: String,
}

/// Body for `/payments/{id}/confirm`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentRequest {
    #[serde(default)]
    pub payment_method_id: Option<String>,
}

/// Body for `/payments/paypal/{id}/capture`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturePaymentRequest {
    #[serde(default)]
    pub paypal_order_id: Option<String>,
}

/// Summary returned when a payment is initiated.
///
/// Card intents carry `client_secret`; PayPal orders carry `paypal_order_id`
/// and, when the provider needs buyer approval, `approval_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitiation {
    pub id: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_order_id: Option<String>,
    #[serde(default)]
    pub approval_url: Option<String>,
}
