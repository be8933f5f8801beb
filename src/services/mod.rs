// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod anxiety;
pub mod simulation;

pub use simulation::{Latency, SimulationBackend};
