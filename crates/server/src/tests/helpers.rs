// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Router fixtures and request helpers.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use ferias_domain::NationalHolidays;
use ferias_persistence::Persistence;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use time::macros::{datetime, offset};
use time::{OffsetDateTime, UtcOffset};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::holidays::{HolidayProvider, RemoteHolidays};
use crate::{AppState, build_router};

/// Thursday 2025-01-02, 10:00 UTC.
fn fixed_now() -> OffsetDateTime {
    datetime!(2025-01-02 10:00 UTC)
}

/// Creates a router over a fresh in-memory database, running on Brasilia time.
pub fn create_test_app(holidays: NationalHolidays) -> Router {
    create_test_app_with(HolidayProvider::Fixed(holidays), fixed_now, offset!(-3))
}

/// Creates a router with an explicit holiday source, clock and offset.
pub fn create_test_app_with(
    holidays: HolidayProvider,
    clock: fn() -> OffsetDateTime,
    utc_offset: UtcOffset,
) -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        holidays,
        clock,
        utc_offset,
    })
}

/// A holiday service that accepts connections and never answers.
///
/// Returns the provider pointed at it and a count of accepted connections.
pub async fn create_silent_holiday_service(
    timeout: Duration,
) -> (HolidayProvider, Arc<AtomicUsize>) {
    let listener: TcpListener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr: std::net::SocketAddr = listener.local_addr().expect("Listener has no address");
    let connections: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));

    let counter: Arc<AtomicUsize> = Arc::clone(&connections);
    tokio::spawn(async move {
        let mut open: Vec<TcpStream> = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            open.push(stream);
        }
    });

    let remote: RemoteHolidays = RemoteHolidays::new(&format!("http://{addr}/feriados"), timeout)
        .expect("Failed to build holiday client");
    (HolidayProvider::Remote(remote), connections)
}

/// Sends a request and returns the status and raw body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

/// Sends a request, asserts the status and decodes the body.
pub async fn send_json<T: DeserializeOwned>(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    expected: StatusCode,
) -> T {
    let (status, bytes) = send(app, method, uri, body).await;
    assert_eq!(
        status,
        expected,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&bytes)
    );
    serde_json::from_slice(&bytes).unwrap()
}

pub fn employee_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "position": "Analista",
        "department": "Financeiro",
        "hireDate": "2023-06-01",
    })
}

/// Registers an employee and returns its id.
pub async fn create_employee(app: &Router) -> i64 {
    let employee: ferias_api::EmployeeResponse = send_json(
        app,
        "POST",
        "/employees",
        Some(employee_body("Paulo Souza", "paulo.souza@empresa.com")),
        StatusCode::CREATED,
    )
    .await;
    employee.id
}

pub fn vacation_body(employee_id: i64, start: &str, end: &str) -> Value {
    json!({
        "employeeId": employee_id,
        "startDate": start,
        "endDate": end,
        "type": "Total",
    })
}

/// Submits a vacation and returns its id.
pub async fn submit_vacation(app: &Router, employee_id: i64, start: &str, end: &str) -> i64 {
    let vacation: ferias_api::VacationResponse = send_json(
        app,
        "POST",
        "/vacations",
        Some(vacation_body(employee_id, start, end)),
        StatusCode::CREATED,
    )
    .await;
    vacation.id
}
