// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use ferias_domain::NationalHolidays;
use ferias_persistence::Persistence;
use time::macros::{date, datetime};

use super::helpers::{
    approval_request, create_employee_request, create_submit_request, create_test_employee,
    create_test_now, create_test_persistence, submit,
};
use crate::{
    ApiError, CalendarResponse, SubmitVacationRequest, UpdateVacationStatusRequest,
    VacationResponse, VacationStatsResponse, cancel_vacation, create_employee, get_employee,
    get_vacation, get_vacation_calendar, get_vacation_stats, list_employee_vacations,
    list_vacations, submit_vacation_request, update_vacation_status,
};

fn submit_err(persistence: &mut Persistence, request: &SubmitVacationRequest) -> ApiError {
    submit_vacation_request(
        persistence,
        &NationalHolidays::empty(),
        request,
        create_test_now(),
    )
    .unwrap_err()
}

fn assert_rule(err: &ApiError, expected: &str) {
    match err {
        ApiError::DomainRuleViolation { rule, .. } => assert_eq!(rule, expected),
        other => panic!("expected rule {expected}, got {other:?}"),
    }
}

fn assert_invalid_field(err: &ApiError, expected: &str) {
    match err {
        ApiError::InvalidInput { field, .. } => assert_eq!(field, expected),
        other => panic!("expected invalid {expected}, got {other:?}"),
    }
}

#[test]
fn test_submit_vacation_success() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;

    let response: VacationResponse = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04");

    assert_eq!(response.employee_id, employee_id);
    assert_eq!(response.start_date, "2025-01-06");
    assert_eq!(response.end_date, "2025-02-04");
    assert_eq!(response.days, 30);
    assert_eq!(response.business_days, 22);
    assert_eq!(response.vacation_type, "Total");
    assert_eq!(response.status, "Pendente");
    assert!(!response.is_abono_pecuniario);
    assert_eq!(response.requested_at, "2025-01-02T10:00:00Z");
    assert_eq!(response.approved_by, None);
    assert_eq!(response.acquisitive_period_start, "2024-06-01");
    assert_eq!(response.acquisitive_period_end, "2025-05-31");
    assert_eq!(
        response.employee.map(|e| e.name),
        Some(String::from("Maria Santos"))
    );
}

#[test]
fn test_submit_rejects_reversed_range_before_validation() {
    let mut persistence: Persistence = create_test_persistence();

    // No employee exists: shape errors win over lookups
    let err: ApiError = submit_err(
        &mut persistence,
        &create_submit_request(1, "2025-02-04", "2025-01-06"),
    );

    assert_invalid_field(&err, "endDate");
}

#[test]
fn test_submit_rejects_malformed_date() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = submit_err(
        &mut persistence,
        &create_submit_request(1, "06/01/2025", "2025-02-04"),
    );

    assert_invalid_field(&err, "startDate");
}

#[test]
fn test_submit_rejects_unknown_type() {
    let mut persistence: Persistence = create_test_persistence();
    let mut request: SubmitVacationRequest = create_submit_request(1, "2025-01-06", "2025-02-04");
    request.vacation_type = String::from("Integral");

    assert_invalid_field(&submit_err(&mut persistence, &request), "type");
}

#[test]
fn test_submit_for_missing_employee() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = submit_err(
        &mut persistence,
        &create_submit_request(77, "2025-01-06", "2025-02-04"),
    );

    assert!(matches!(
        err,
        ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Employee"
    ));
}

#[test]
fn test_submit_starting_on_holiday() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let holidays: NationalHolidays = std::iter::once(date!(2025 - 01 - 06)).collect();

    let err: ApiError = submit_vacation_request(
        &mut persistence,
        &holidays,
        &create_submit_request(employee_id, "2025-01-06", "2025-02-04"),
        create_test_now(),
    )
    .unwrap_err();

    assert_rule(&err, "invalid_start_date");
}

#[test]
fn test_submit_overlapping_request() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04");

    let err: ApiError = submit_err(
        &mut persistence,
        &create_submit_request(employee_id, "2025-01-20", "2025-02-02"),
    );

    assert_rule(&err, "overlapping_period");
    assert_eq!(list_vacations(&mut persistence).unwrap().len(), 1);
}

#[test]
fn test_submit_abono_above_one_third() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let mut request: SubmitVacationRequest =
        create_submit_request(employee_id, "2025-01-06", "2025-01-24");
    request.is_abono_pecuniario = true;
    request.abono_days = Some(11);

    assert_rule(
        &submit_err(&mut persistence, &request),
        "abono_exceeds_one_third",
    );
}

#[test]
fn test_submit_abono_success() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let mut request: SubmitVacationRequest =
        create_submit_request(employee_id, "2025-01-06", "2025-01-25");
    request.is_abono_pecuniario = true;
    request.abono_days = Some(10);

    let response: VacationResponse = submit_vacation_request(
        &mut persistence,
        &NationalHolidays::empty(),
        &request,
        create_test_now(),
    )
    .unwrap();

    assert!(response.is_abono_pecuniario);
    assert_eq!(response.abono_days, Some(10));
    assert_eq!(response.days, 20);
}

#[test]
fn test_submit_partial_below_minimum() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let mut request: SubmitVacationRequest =
        create_submit_request(employee_id, "2025-01-06", "2025-01-09");
    request.vacation_type = String::from("Parcial");

    assert_rule(&submit_err(&mut persistence, &request), "period_too_short");
}

#[test]
fn test_submit_before_twelve_months_of_service() {
    let mut persistence: Persistence = create_test_persistence();
    let mut employee_request = create_employee_request("João Silva", "joao.silva@empresa.com");
    employee_request.hire_date = String::from("2024-09-01");
    let employee_id: i64 = create_employee(&mut persistence, employee_request, create_test_now())
        .unwrap()
        .id;

    let err: ApiError = submit_err(
        &mut persistence,
        &create_submit_request(employee_id, "2025-01-06", "2025-01-19"),
    );

    assert_rule(&err, "acquisitive_period_not_met");
}

#[test]
fn test_approve_vacation() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;

    let response: VacationResponse = update_vacation_status(
        &mut persistence,
        vacation_id,
        approval_request(),
        create_test_now(),
    )
    .unwrap();

    assert_eq!(response.status, "Aprovada");
    assert_eq!(response.approved_by.as_deref(), Some("gestor@empresa.com"));
    assert_eq!(response.approved_at.as_deref(), Some("2025-01-02T10:00:00Z"));

    let employee = get_employee(&mut persistence, employee_id, date!(2025 - 01 - 02)).unwrap();
    assert_eq!(employee.last_vacation_end_date.as_deref(), Some("2025-02-04"));
}

#[test]
fn test_approval_time_in_local_offset_is_reported_in_utc() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;

    update_vacation_status(
        &mut persistence,
        vacation_id,
        approval_request(),
        datetime!(2025-01-02 07:00 -3),
    )
    .unwrap();

    let response: VacationResponse = get_vacation(&mut persistence, vacation_id).unwrap();
    assert_eq!(response.approved_at.as_deref(), Some("2025-01-02T10:00:00Z"));
}

#[test]
fn test_cancel_after_approval_is_invalid_transition() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;
    update_vacation_status(
        &mut persistence,
        vacation_id,
        approval_request(),
        create_test_now(),
    )
    .unwrap();

    let err: ApiError = cancel_vacation(&mut persistence, vacation_id, create_test_now()).unwrap_err();

    assert_rule(&err, "invalid_transition");
}

#[test]
fn test_second_decision_is_already_processed() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;
    update_vacation_status(
        &mut persistence,
        vacation_id,
        approval_request(),
        create_test_now(),
    )
    .unwrap();

    let err: ApiError = update_vacation_status(
        &mut persistence,
        vacation_id,
        approval_request(),
        create_test_now(),
    )
    .unwrap_err();

    assert_rule(&err, "already_processed");
}

#[test]
fn test_reject_vacation_with_reason() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;

    let response: VacationResponse = update_vacation_status(
        &mut persistence,
        vacation_id,
        UpdateVacationStatusRequest {
            status: String::from("Rejeitada"),
            approved_by: String::from("gestor@empresa.com"),
            rejected_reason: Some(String::from("Fechamento de balanço")),
        },
        create_test_now(),
    )
    .unwrap();

    assert_eq!(response.status, "Rejeitada");
    assert_eq!(
        response.rejected_reason.as_deref(),
        Some("Fechamento de balanço")
    );
    assert_eq!(response.approved_at, None);
}

#[test]
fn test_status_update_only_accepts_decisions() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;

    for status in ["Cancelada", "Pendente", "Approved"] {
        let err: ApiError = update_vacation_status(
            &mut persistence,
            vacation_id,
            UpdateVacationStatusRequest {
                status: String::from(status),
                approved_by: String::from("gestor@empresa.com"),
                rejected_reason: None,
            },
            create_test_now(),
        )
        .unwrap_err();
        assert_invalid_field(&err, "status");
    }
}

#[test]
fn test_blank_approver_is_invalid() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;
    let mut request: UpdateVacationStatusRequest = approval_request();
    request.approved_by = String::from("   ");

    let err: ApiError =
        update_vacation_status(&mut persistence, vacation_id, request, create_test_now())
            .unwrap_err();

    assert_invalid_field(&err, "approvedBy");
}

#[test]
fn test_cancel_pending_vacation() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let vacation_id: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-02-04").id;

    cancel_vacation(&mut persistence, vacation_id, create_test_now()).unwrap();

    let response: VacationResponse = get_vacation(&mut persistence, vacation_id).unwrap();
    assert_eq!(response.status, "Cancelada");
}

#[test]
fn test_unknown_vacation_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    for err in [
        get_vacation(&mut persistence, 5).unwrap_err(),
        cancel_vacation(&mut persistence, 5, create_test_now()).unwrap_err(),
        update_vacation_status(&mut persistence, 5, approval_request(), create_test_now())
            .unwrap_err(),
    ] {
        assert!(matches!(
            err,
            ApiError::ResourceNotFound { ref resource_type, .. } if resource_type == "Vacation"
        ));
    }
}

#[test]
fn test_list_employee_vacations() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    submit(&mut persistence, employee_id, "2025-01-06", "2025-01-19");

    let vacations: Vec<VacationResponse> =
        list_employee_vacations(&mut persistence, employee_id).unwrap();
    assert_eq!(vacations.len(), 1);
    assert!(vacations[0].employee.is_some());

    assert!(matches!(
        list_employee_vacations(&mut persistence, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_vacation_stats() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let soon: i64 = submit(&mut persistence, employee_id, "2025-01-06", "2025-01-19").id;
    submit(&mut persistence, employee_id, "2025-03-03", "2025-03-16");
    update_vacation_status(&mut persistence, soon, approval_request(), create_test_now())
        .unwrap();

    let stats: VacationStatsResponse =
        get_vacation_stats(&mut persistence, date!(2025 - 01 - 02)).unwrap();

    assert_eq!(
        stats,
        VacationStatsResponse {
            total: 2,
            pending: 1,
            approved: 1,
            rejected: 0,
            upcoming: 1,
        }
    );
}

#[test]
fn test_vacation_calendar() {
    let mut persistence: Persistence = create_test_persistence();
    let employee_id: i64 = create_test_employee(&mut persistence).id;
    let spanning: i64 = submit(&mut persistence, employee_id, "2025-01-27", "2025-02-09").id;
    update_vacation_status(
        &mut persistence,
        spanning,
        approval_request(),
        create_test_now(),
    )
    .unwrap();

    let february: CalendarResponse = get_vacation_calendar(&mut persistence, 2025, 2).unwrap();
    assert_eq!(february.year, 2025);
    assert_eq!(february.month, 2);
    assert_eq!(
        february.vacations.iter().map(|v| v.id).collect::<Vec<_>>(),
        vec![spanning]
    );

    let december: CalendarResponse = get_vacation_calendar(&mut persistence, 2025, 12).unwrap();
    assert!(december.vacations.is_empty());

    assert_invalid_field(
        &get_vacation_calendar(&mut persistence, 2025, 13).unwrap_err(),
        "month",
    );
}

#[test]
fn test_submit_request_wire_format() {
    let request: SubmitVacationRequest = serde_json::from_str(
        r#"{"employeeId":1,"startDate":"2025-01-06","endDate":"2025-01-25","type":"Total","isAbonoPecuniario":true,"abonoDays":10}"#,
    )
    .unwrap();

    assert_eq!(request.vacation_type, "Total");
    assert!(request.is_abono_pecuniario);
    assert_eq!(request.abono_days, Some(10));

    let minimal: SubmitVacationRequest = serde_json::from_str(
        r#"{"employeeId":1,"startDate":"2025-01-06","endDate":"2025-01-25","type":"Parcial"}"#,
    )
    .unwrap();
    assert!(!minimal.is_abono_pecuniario);
    assert_eq!(minimal.abono_days, None);
}
