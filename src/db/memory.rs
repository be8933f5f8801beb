// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store with typed operations.
//!
//! Provides operations for:
//! - Classes (seeded catalog)
//! - Doctor sessions (booked consultations)
//! - Bookings (one per booked session)

use crate::models::{seed_classes, Booking, ClassInfo, DoctorSession};
use crate::time_utils::MonotonicMillis;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared in-memory store. Clones see the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    classes: Arc<DashMap<String, ClassInfo>>,
    sessions: Arc<DashMap<String, DoctorSession>>,
    bookings: Arc<DashMap<String, Booking>>,
    clock: Arc<MonotonicMillis>,
}

impl MemoryStore {
    /// Create a store holding the seeded class catalog.
    pub fn seeded() -> Self {
        let store = Self::default();
        for class in seed_classes() {
            store.classes.insert(class.id.clone(), class);
        }
        tracing::info!(count = store.classes.len(), "Sample classes initialized");
        store
    }

    /// Fresh `<prefix>_<millis>` id, unique within this store.
    pub fn next_id(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.clock.next(Utc::now()))
    }

    // ─── Class Operations ────────────────────────────────────────

    pub fn list_classes(&self) -> Vec<ClassInfo> {
        let mut classes: Vec<_> = self.classes.iter().map(|c| c.value().clone()).collect();
        classes.sort_by(|a, b| a.id.cmp(&b.id));
        classes
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Store a newly booked session together with its booking.
    pub fn insert_session(&self, session: DoctorSession, booking: Booking) {
        self.bookings.insert(booking.id.clone(), booking);
        self.sessions.insert(session.id.clone(), session);
    }

    /// Sessions where `user_id` is the patient.
    pub fn sessions_for_patient(&self, user_id: &str) -> Vec<DoctorSession> {
        self.sessions_where(|s| s.user_id == user_id)
    }

    /// Sessions where `doctor_id` is the doctor.
    pub fn sessions_for_doctor(&self, doctor_id: &str) -> Vec<DoctorSession> {
        self.sessions_where(|s| s.doctor_id.as_deref() == Some(doctor_id))
    }

    fn sessions_where(&self, keep: impl Fn(&DoctorSession) -> bool) -> Vec<DoctorSession> {
        let mut sessions: Vec<_> = self
            .sessions
            .iter()
            .filter(|s| keep(s.value()))
            .map(|s| s.value().clone())
            .collect();
        sessions.sort_by(|a, b| {
            (&a.session_date, &a.session_time, &a.id)
                .cmp(&(&b.session_date, &b.session_time, &b.id))
        });
        sessions
    }

    pub fn get_booking(&self, booking_id: &str) -> Option<Booking> {
        self.bookings.get(booking_id).map(|b| b.value().clone())
    }
}
