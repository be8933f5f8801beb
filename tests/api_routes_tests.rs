// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reference server route tests.
//!
//! These tests verify that:
//! 1. Public routes answer without a token
//! 2. Protected routes reject missing or bad tokens
//! 3. Unreadable bodies get the same JSON error shape as other errors
//! 4. Booked sessions show up for both the patient and the doctor
//! 5. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{create_test_app, create_test_jwt, json_body};

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health_reports_status() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Server is running");
    assert_eq!(body["paypalConfigured"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_classes_are_public() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/classes", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let classes = body["classes"].as_array().unwrap();
    assert_eq!(classes.len(), 3);
    assert_eq!(classes[0]["id"], "class_1");
    assert!(classes[0]["type"].is_string());
}

#[tokio::test]
async fn test_predict_missing_inputs() {
    let (app, _) = create_test_app();

    let request = json_request(
        Method::POST,
        "/ml/predict-anxiety",
        None,
        json!({"stress": 5, "overwhelmed": false}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(
        body["error"],
        "Missing required inputs: stress, sleep, overwhelmed"
    );
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_predict_out_of_range() {
    let (app, _) = create_test_app();

    let request = json_request(
        Method::POST,
        "/ml/predict-anxiety",
        None,
        json!({"stress": 42, "sleep": 7, "overwhelmed": false}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_predict_mistyped_field_is_json_error() {
    let (app, _) = create_test_app();

    let request = json_request(
        Method::POST,
        "/ml/predict-anxiety",
        None,
        json!({"stress": 5, "sleep": 7, "overwhelmed": "yes"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].as_str().unwrap().contains("overwhelmed"));
}

#[tokio::test]
async fn test_predict_without_content_type_is_json_error() {
    let (app, _) = create_test_app();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/ml/predict-anxiety")
        .body(Body::from(r#"{"stress": 5, "sleep": 7, "overwhelmed": false}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_predict_accepts_numeric_strings() {
    let (app, _) = create_test_app();

    let request = json_request(
        Method::POST,
        "/ml/predict-anxiety",
        None,
        json!({"stress": "5", "sleep": "7", "overwhelmed": false}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["prediction"]["score"], 22);
    assert_eq!(body["prediction"]["anxietyLevel"], "low");
}

#[tokio::test]
async fn test_predict_scores_inputs() {
    let (app, _) = create_test_app();

    let request = json_request(
        Method::POST,
        "/ml/predict-anxiety",
        None,
        json!({"stress": 10, "sleep": 0, "overwhelmed": true}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "ML Prediction successful");
    assert_eq!(body["prediction"]["anxietyLevel"], "high");
    assert_eq!(body["prediction"]["score"], 100);
    assert_eq!(
        body["prediction"]["recommendations"].as_array().unwrap().len(),
        6
    );
}

#[tokio::test]
async fn test_sessions_require_token() {
    let (app, _) = create_test_app();

    let response = app.oneshot(get("/sessions", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn test_sessions_reject_bad_token() {
    let (app, _) = create_test_app();

    let response = app
        .oneshot(get("/doctors/sessions", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["code"], "invalid_token");
}

#[tokio::test]
async fn test_session_cookie_is_not_accepted() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("patient_1");

    let request = Request::builder()
        .uri("/sessions")
        .header(header::COOKIE, format!("soulcare_token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = json_body(response).await;
    assert_eq!(body["code"], "unauthorized");
}

#[tokio::test]
async fn test_book_doctor_malformed_body_is_json_error() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("patient_1");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/doctors/doctor_7/book")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from("{\"sessionDate\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_book_doctor_requires_date_and_time() {
    let (app, _) = create_test_app();
    let token = create_test_jwt("patient_1");

    let request = json_request(
        Method::POST,
        "/doctors/doctor_7/book",
        Some(&token),
        json!({"sessionDate": "2026-11-02"}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Session date and time are required");
}

#[tokio::test]
async fn test_booked_session_visible_to_patient_and_doctor() {
    let (app, state) = create_test_app();
    let patient = create_test_jwt("patient_1");
    let doctor = create_test_jwt("doctor_7");

    let request = json_request(
        Method::POST,
        "/doctors/doctor_7/book",
        Some(&patient),
        json!({"sessionDate": "2026-11-02", "sessionTime": "10:30", "notes": "first visit"}),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Doctor session booked successfully");
    let session_id = body["session"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["session"]["userId"], "patient_1");
    assert_eq!(body["session"]["doctorId"], "doctor_7");
    assert_eq!(body["session"]["sessionType"], "consultation");
    assert_eq!(body["session"]["status"], "scheduled");
    assert_eq!(body["booking"]["sessionId"], session_id.as_str());

    let booking_id = body["booking"]["id"].as_str().unwrap();
    assert!(state.store.get_booking(booking_id).is_some());

    let response = app
        .clone()
        .oneshot(get("/sessions", Some(&patient)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["sessions"][0]["id"], session_id.as_str());

    let response = app
        .clone()
        .oneshot(get("/doctors/sessions", Some(&doctor)))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
    assert_eq!(body["sessions"][0]["notes"], "first visit");

    // The doctor has booked nothing as a patient
    let response = app.oneshot(get("/sessions", Some(&doctor))).await.unwrap();
    let body = json_body(response).await;
    assert!(body["sessions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = create_test_app();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/ml/predict-anxiety")
        .header(header::ORIGIN, "https://app.soulcare.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "600");
}
