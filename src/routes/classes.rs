// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public class catalog.

use crate::models::ClassesResponse;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/classes", get(list_classes))
}

async fn list_classes(State(state): State<Arc<AppState>>) -> Json<ClassesResponse> {
    Json(ClassesResponse {
        classes: state.store.list_classes(),
    })
}
