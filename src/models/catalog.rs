// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bookable offerings: group classes and one-to-one doctor sessions.

use super::booking::BookingPaymentStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Recurring weekly slot for a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
pub struct ClassSchedule {
    pub days: Vec<String>,
    /// 24h "HH:MM"
    pub time: String,
}

/// A children's group class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub instructor_id: String,
    /// Display range, e.g. "9:00 AM - 9:45 AM"
    pub time: String,
    pub age_group: String,
    pub participants: u32,
    pub max_participants: u32,
    pub day: String,
    #[serde(rename = "type")]
    pub class_type: String,
    pub difficulty: String,
    pub description: String,
    /// Price in INR
    pub price: f64,
    pub recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ClassSchedule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// A one-to-one consultation between a patient and a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSession {
    pub id: String,
    /// Patient
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_id: Option<String>,
    /// "YYYY-MM-DD"
    pub session_date: String,
    /// "HH:MM"
    pub session_time: String,
    pub session_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: SessionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<BookingPaymentStatus>,
}

/// Body for `POST /doctors/{id}/book`.
///
/// Date and time are optional on the wire so a missing field can be
/// reported with a readable message instead of a deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorBookingRequest {
    #[serde(default)]
    pub session_date: Option<String>,
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default)]
    pub session_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Session type used when the caller does not name one.
pub const DEFAULT_SESSION_TYPE: &str = "consultation";

impl DoctorBookingRequest {
    /// Build a scheduled session, or explain which inputs are missing.
    pub fn into_session(
        self,
        id: String,
        user_id: String,
        doctor_id: String,
        booked_at: DateTime<Utc>,
    ) -> Result<DoctorSession, &'static str> {
        let (Some(session_date), Some(session_time)) = (
            self.session_date.filter(|d| !d.is_empty()),
            self.session_time.filter(|t| !t.is_empty()),
        ) else {
            return Err("Session date and time are required");
        };

        Ok(DoctorSession {
            id,
            user_id,
            doctor_id: Some(doctor_id),
            session_date,
            session_time,
            session_type: self
                .session_type
                .unwrap_or_else(|| DEFAULT_SESSION_TYPE.to_string()),
            notes: Some(self.notes.unwrap_or_default()),
            status: SessionStatus::Scheduled,
            booked_at: Some(booked_at),
            payment_status: Some(BookingPaymentStatus::Pending),
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn class(
    id: &str,
    title: &str,
    instructor: (&str, &str),
    time: &str,
    age_group: &str,
    seats: (u32, u32),
    day: &str,
    class_type: &str,
    difficulty: &str,
    description: &str,
    price: f64,
    schedule: (&[&str], &str),
) -> ClassInfo {
    ClassInfo {
        id: id.to_string(),
        title: title.to_string(),
        instructor: instructor.0.to_string(),
        instructor_id: instructor.1.to_string(),
        time: time.to_string(),
        age_group: age_group.to_string(),
        participants: seats.0,
        max_participants: seats.1,
        day: day.to_string(),
        class_type: class_type.to_string(),
        difficulty: difficulty.to_string(),
        description: description.to_string(),
        price,
        recurring: true,
        schedule: Some(ClassSchedule {
            days: schedule.0.iter().map(|d| d.to_string()).collect(),
            time: schedule.1.to_string(),
        }),
    }
}

/// The class catalog seeded at startup.
pub fn seed_classes() -> Vec<ClassInfo> {
    vec![
        class(
            "class_1",
            "Brain Gym Morning Session",
            ("Uncle Raj", "instructor_1"),
            "9:00 AM - 9:45 AM",
            "6-10 years",
            (12, 15),
            "Monday",
            "Brain Gym",
            "Beginner",
            "Fun exercises to boost memory and focus through movement and games",
            500.0,
            (&["Monday", "Wednesday", "Friday"], "09:00"),
        ),
        class(
            "class_2",
            "Little Yogis Meditation",
            ("Aunt Priya", "instructor_2"),
            "4:00 PM - 4:30 PM",
            "4-8 years",
            (8, 12),
            "Tuesday",
            "Meditation",
            "Beginner",
            "Gentle meditation and breathing exercises for young minds",
            400.0,
            (&["Tuesday", "Thursday"], "16:00"),
        ),
        class(
            "class_3",
            "Gita Stories & Wisdom",
            ("Uncle Raj", "instructor_1"),
            "6:00 PM - 6:45 PM",
            "8-14 years",
            (15, 20),
            "Wednesday",
            "Wisdom",
            "Intermediate",
            "Interactive storytelling from Bhagavad Gita with life lessons",
            600.0,
            (&["Wednesday", "Saturday"], "18:00"),
        ),
    ]
}
