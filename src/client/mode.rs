// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend selection state shared by clones of an API client.

use crate::services::SimulationBackend;
use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::Mutex;

/// Which backend serves requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Health probe not yet run
    Unprobed,
    /// Remote API answered the health probe
    Remote,
    /// Simulation backend; terminal
    Mock,
}

const UNPROBED: u8 = 0;
const REMOTE: u8 = 1;
const MOCK: u8 = 2;

/// One-way latch: `Unprobed -> Remote -> Mock` or `Unprobed -> Mock`.
///
/// Once `Mock` is set it is never cleared, even if the remote recovers.
#[derive(Debug)]
pub struct ModeLatch(AtomicU8);

impl ModeLatch {
    pub fn new(initial: BackendMode) -> Self {
        Self(AtomicU8::new(match initial {
            BackendMode::Unprobed => UNPROBED,
            BackendMode::Remote => REMOTE,
            BackendMode::Mock => MOCK,
        }))
    }

    pub fn get(&self) -> BackendMode {
        match self.0.load(Ordering::Acquire) {
            UNPROBED => BackendMode::Unprobed,
            REMOTE => BackendMode::Remote,
            _ => BackendMode::Mock,
        }
    }

    /// Record a successful probe. No effect unless still unprobed.
    pub fn mark_remote(&self) -> bool {
        self.0
            .compare_exchange(UNPROBED, REMOTE, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Switch to the simulation for good. Returns true if this call flipped it.
    pub fn latch_mock(&self) -> bool {
        self.0.swap(MOCK, Ordering::AcqRel) != MOCK
    }
}

impl Default for ModeLatch {
    fn default() -> Self {
        Self::new(BackendMode::Unprobed)
    }
}

/// Explicit client context: the mode latch plus the simulation store it
/// falls back to.
#[derive(Debug)]
pub struct ClientContext {
    mode: ModeLatch,
    simulation: SimulationBackend,
    /// Serializes the health probe so concurrent first calls share one.
    pub(crate) probe_lock: Mutex<()>,
}

impl ClientContext {
    pub fn new(simulation: SimulationBackend) -> Self {
        Self::with_mode(simulation, BackendMode::Unprobed)
    }

    /// Start in a given mode, e.g. `Mock` for offline tooling.
    pub fn with_mode(simulation: SimulationBackend, mode: BackendMode) -> Self {
        Self {
            mode: ModeLatch::new(mode),
            simulation,
            probe_lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> BackendMode {
        self.mode.get()
    }

    pub(crate) fn latch(&self) -> &ModeLatch {
        &self.mode
    }

    pub fn simulation(&self) -> &SimulationBackend {
        &self.simulation
    }
}
