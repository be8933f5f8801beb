// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer for the reference server (process memory).

pub mod memory;

pub use memory::MemoryStore;
