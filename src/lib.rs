// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SoulCare: wellness class and consultation booking.
//!
//! This crate provides the API client used by SoulCare front ends, which
//! falls back to an in-memory simulation when the remote API cannot be
//! reached, and a reference server implementing that remote API.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::MemoryStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
}
