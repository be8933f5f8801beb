// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod assessment;
pub mod booking;
pub mod catalog;
pub mod payment;
pub mod profile;
pub mod responses;

pub use assessment::{AnxietyInput, AnxietyLevel, AnxietyPrediction};
pub use booking::{Booking, BookingPaymentStatus, BookingRequest, BookingStatus};
pub use catalog::{
    seed_classes, ClassInfo, ClassSchedule, DoctorBookingRequest, DoctorSession, SessionStatus,
};
pub use payment::{
    CapturePaymentRequest, ConfirmPaymentRequest, Payment, PaymentInitiation, PaymentMethod,
    PaymentRequest, PaymentStatus,
};
pub use profile::Profile;
pub use responses::{
    BookingResponse, BookingsResponse, ClassesResponse, DoctorBookingResponse, PaymentResponse,
    PredictionResponse, ProfileResponse, SessionsResponse,
};
