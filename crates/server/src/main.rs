// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod holidays;

#[cfg(test)]
mod tests;

use axum::{
    Json, Router,
    extract::{Path, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use clap::Parser;
use ferias_api::{
    ApiError, CalendarResponse, CreateEmployeeRequest, EmployeeResponse, SubmitVacationRequest,
    UpdateAbsencesRequest, UpdateVacationStatusRequest, VacationResponse, VacationStatsResponse,
    cancel_vacation, create_employee, get_employee, get_vacation, get_vacation_calendar,
    get_vacation_stats, list_employee_vacations, list_employees, list_vacations,
    submit_vacation_request, update_unjustified_absences, update_vacation_status,
};
use ferias_domain::{NationalHolidays, parse_date};
use ferias_persistence::Persistence;
use holidays::{DEFAULT_HOLIDAY_API_URL, HolidayProvider, RemoteHolidays};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use time::{Date, OffsetDateTime, UtcOffset};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Ferias Server - HTTP server for CLT vacation requests
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "FERIAS_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "FERIAS_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(long, env = "FERIAS_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Base URL of the national holiday service; the year is appended
    #[arg(long, env = "FERIAS_HOLIDAY_API_URL", default_value = DEFAULT_HOLIDAY_API_URL)]
    holiday_api_url: String,

    /// Milliseconds to wait for a holiday lookup before continuing without holidays
    #[arg(long, env = "FERIAS_HOLIDAY_TIMEOUT_MS", default_value_t = 3000)]
    holiday_timeout_ms: u64,

    /// Skip holiday lookups entirely; only weekends block a start date
    #[arg(long, env = "FERIAS_OFFLINE_HOLIDAYS")]
    offline_holidays: bool,

    /// Whole-hour UTC offset used to decide today's date (Brasilia is -3)
    #[arg(
        long,
        env = "FERIAS_UTC_OFFSET_HOURS",
        default_value_t = -3,
        allow_hyphen_values = true
    )]
    utc_offset_hours: i8,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex: every load, validate and
/// write sequence runs while holding it, so two requests can never both
/// pass the overlap check against the same history.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
    holidays: HolidayProvider,
    /// Source of the current time.
    clock: fn() -> OffsetDateTime,
    /// Offset the business calendar runs in.
    utc_offset: UtcOffset,
}

impl AppState {
    /// The current time in the business offset; its date is "today".
    fn now(&self) -> OffsetDateTime {
        (self.clock)().to_offset(self.utc_offset)
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Key of the violated rule, for domain rule violations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    message: String,
    rule: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            rule: self.rule,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::DomainRuleViolation { rule, .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                rule: Some(rule),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message,
                rule: None,
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message,
                rule: None,
            },
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message,
                    rule: None,
                }
            }
        }
    }
}

/// Holidays for the year a submission starts in.
///
/// Only the start date is checked against holidays, so one lookup per
/// request is enough. A malformed start date skips the lookup; the API
/// layer reports it.
async fn holidays_for_request(
    provider: &HolidayProvider,
    req: &SubmitVacationRequest,
) -> NationalHolidays {
    match parse_date(&req.start_date) {
        Ok(start) => provider.national_holidays(start.year()).await,
        Err(_) => NationalHolidays::empty(),
    }
}

/// Handler for POST `/vacations` endpoint.
///
/// Holidays are fetched before the store lock is taken.
async fn handle_submit_vacation(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitVacationRequest>,
) -> Result<(StatusCode, Json<VacationResponse>), HttpError> {
    info!(
        employee_id = req.employee_id,
        start_date = %req.start_date,
        end_date = %req.end_date,
        "Handling submit_vacation request"
    );

    let holidays: NationalHolidays = holidays_for_request(&app_state.holidays, &req).await;
    let now: OffsetDateTime = app_state.now();

    let mut persistence = app_state.persistence.lock().await;
    let response: VacationResponse =
        submit_vacation_request(&mut persistence, &holidays, &req, now)?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for PATCH `/vacations/{id}/status` endpoint.
async fn handle_update_vacation_status(
    AxumState(app_state): AxumState<AppState>,
    Path(vacation_id): Path<i64>,
    Json(req): Json<UpdateVacationStatusRequest>,
) -> Result<Json<VacationResponse>, HttpError> {
    info!(vacation_id, status = %req.status, "Handling update_vacation_status request");

    let now: OffsetDateTime = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: VacationResponse = update_vacation_status(&mut persistence, vacation_id, req, now)?;

    Ok(Json(response))
}

/// Handler for DELETE `/vacations/{id}` endpoint.
async fn handle_cancel_vacation(
    AxumState(app_state): AxumState<AppState>,
    Path(vacation_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(vacation_id, "Handling cancel_vacation request");

    let now: OffsetDateTime = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    cancel_vacation(&mut persistence, vacation_id, now)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/vacations` endpoint.
async fn handle_list_vacations(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<VacationResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_vacations(&mut persistence)?))
}

/// Handler for GET `/vacations/{id}` endpoint.
async fn handle_get_vacation(
    AxumState(app_state): AxumState<AppState>,
    Path(vacation_id): Path<i64>,
) -> Result<Json<VacationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_vacation(&mut persistence, vacation_id)?))
}

/// Handler for GET `/vacations/employee/{employee_id}` endpoint.
async fn handle_list_employee_vacations(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<VacationResponse>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_employee_vacations(&mut persistence, employee_id)?))
}

/// Handler for GET `/vacations/stats/dashboard` endpoint.
async fn handle_vacation_stats(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<VacationStatsResponse>, HttpError> {
    let today: Date = app_state.now().date();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_vacation_stats(&mut persistence, today)?))
}

/// Handler for GET `/vacations/calendar/{year}/{month}` endpoint.
async fn handle_vacation_calendar(
    AxumState(app_state): AxumState<AppState>,
    Path((year, month)): Path<(i32, u8)>,
) -> Result<Json<CalendarResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_vacation_calendar(&mut persistence, year, month)?))
}

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HttpError> {
    info!(email = %req.email, hire_date = %req.hire_date, "Handling create_employee request");

    let now: OffsetDateTime = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeResponse = create_employee(&mut persistence, req, now)?;
    drop(persistence);

    info!(employee_id = response.id, "Registered employee");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, HttpError> {
    let today: Date = app_state.now().date();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_employees(&mut persistence, today)?))
}

/// Handler for GET `/employees/{id}` endpoint.
async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let today: Date = app_state.now().date();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_employee(&mut persistence, employee_id, today)?))
}

/// Handler for PATCH `/employees/{id}/absences` endpoint.
async fn handle_update_absences(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateAbsencesRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(
        employee_id,
        unjustified_absences = req.unjustified_absences,
        "Handling update_absences request"
    );

    let now: OffsetDateTime = app_state.now();
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_unjustified_absences(
        &mut persistence,
        employee_id,
        req,
        now,
    )?))
}

/// Handler for GET `/health` endpoint.
#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route(
            "/vacations",
            post(handle_submit_vacation).get(handle_list_vacations),
        )
        .route("/vacations/stats/dashboard", get(handle_vacation_stats))
        .route(
            "/vacations/calendar/{year}/{month}",
            get(handle_vacation_calendar),
        )
        .route(
            "/vacations/employee/{employee_id}",
            get(handle_list_employee_vacations),
        )
        .route(
            "/vacations/{id}",
            get(handle_get_vacation).delete(handle_cancel_vacation),
        )
        .route(
            "/vacations/{id}/status",
            patch(handle_update_vacation_status),
        )
        .route(
            "/employees",
            post(handle_create_employee).get(handle_list_employees),
        )
        .route("/employees/{id}", get(handle_get_employee))
        .route("/employees/{id}/absences", patch(handle_update_absences))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Ferias Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let holidays: HolidayProvider = if args.offline_holidays {
        info!("Holiday lookups disabled");
        HolidayProvider::Fixed(NationalHolidays::empty())
    } else {
        info!(url = %args.holiday_api_url, timeout_ms = args.holiday_timeout_ms, "Using holiday service");
        HolidayProvider::Remote(RemoteHolidays::new(
            &args.holiday_api_url,
            Duration::from_millis(args.holiday_timeout_ms),
        )?)
    };

    let utc_offset: UtcOffset = UtcOffset::from_hms(args.utc_offset_hours, 0, 0)?;
    info!(hours = args.utc_offset_hours, "Business calendar offset");

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        holidays,
        clock: OffsetDateTime::now_utc,
        utc_offset,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
