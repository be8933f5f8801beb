// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Booking model: a reservation for a class or a doctor session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Lifecycle of the reservation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

/// Payment progress as seen from the booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum BookingPaymentStatus {
    Pending,
    Completed,
}

/// A confirmed reservation, independent of payment completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    /// Set when a class was booked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    /// Set when a doctor session was booked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub booked_at: DateTime<Utc>,
    pub status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
}

impl Booking {
    /// Create a confirmed booking awaiting payment.
    pub fn confirmed(
        id: String,
        user_id: String,
        class_id: Option<String>,
        session_id: Option<String>,
        booked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            class_id,
            session_id,
            booked_at,
            status: BookingStatus::Confirmed,
            payment_status: BookingPaymentStatus::Pending,
        }
    }

    /// Mark the booking as paid. Returns false if it already was.
    pub fn mark_paid(&mut self) -> bool {
        if self.payment_status == BookingPaymentStatus::Completed {
            return false;
        }
        self.payment_status = BookingPaymentStatus::Completed;
        true
    }
}

/// Optional body for class/session booking calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_wire_format() {
        let booking = Booking::confirmed(
            "mock_booking_1".to_string(),
            "user_1".to_string(),
            Some("class_1".to_string()),
            None,
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        );

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["userId"], "user_1");
        assert_eq!(json["classId"], "class_1");
        assert_eq!(json["status"], "confirmed");
        assert_eq!(json["paymentStatus"], "pending");
        assert!(json.get("sessionId").is_none());
    }

    #[test]
    fn test_mark_paid_only_once() {
        let mut booking = Booking::confirmed(
            "b".to_string(),
            "u".to_string(),
            None,
            None,
            Utc::now(),
        );

        assert!(booking.mark_paid());
        assert!(!booking.mark_paid());
        assert_eq!(booking.payment_status, BookingPaymentStatus::Completed);
    }
}
