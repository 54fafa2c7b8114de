use clap::Parser;

use super::*;
use crate::args::Cli;

fn plan_args(argv: &[&str]) -> Result<Plan, CliError> {
    let mut full = vec!["fleetctl"];
    full.extend_from_slice(argv);
    let cli = Cli::try_parse_from(full).unwrap();
    plan(cli.command)
}

fn call(argv: &[&str]) -> ApiCall {
    match plan_args(argv).unwrap() {
        Plan::Call(call) => call,
        other => panic!("expected an API call, got {other:?}"),
    }
}

#[test]
fn list_with_filters_builds_query() {
    let call = call(&["drivers", "list", "--status", "on_trip", "--park", "p1"]);
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.path, "/api/drivers?park_id=p1&status=on_trip");
    assert_eq!(call.body, None);
}

#[test]
fn list_without_filters_is_bare_collection() {
    assert_eq!(call(&["car-classes", "list"]).path, "/api/car-classes");
}

#[test]
fn unknown_status_is_rejected() {
    let err = plan_args(&["bookings", "list", "--status", "lost"]).unwrap_err();
    assert!(matches!(err, CliError::Model(_)));
}

#[test]
fn status_filter_on_parks_is_unsupported() {
    let err = plan_args(&["parks", "list", "--status", "available"]).unwrap_err();
    assert!(matches!(err, CliError::UnsupportedFilter { resource: "parks", filter: "status" }));
}

#[test]
fn create_and_update_carry_json_bodies() {
    let create = call(&["vehicles", "create", "--data", r#"{"plate_number":"A123BC"}"#]);
    assert_eq!(create.method, Method::POST);
    assert_eq!(create.path, "/api/vehicles");
    assert_eq!(create.body, Some(serde_json::json!({ "plate_number": "A123BC" })));

    let update = call(&["users", "update", "u 1", "--data", r#"{"is_active":false}"#]);
    assert_eq!(update.method, Method::PATCH);
    assert_eq!(update.path, "/api/users/u%201");
}

#[test]
fn non_object_data_is_rejected() {
    let err = plan_args(&["parks", "create", "--data", "[1,2]"]).unwrap_err();
    assert!(matches!(err, CliError::NotAnObject));
}

#[test]
fn booking_lifecycle_routes() {
    let assign = call(&["bookings", "assign", "b1", "d7"]);
    assert_eq!((assign.method, assign.path.as_str()), (Method::POST, "/api/bookings/b1/assign-driver/d7"));
    assert_eq!(call(&["bookings", "cancel", "b1"]).path, "/api/bookings/b1/cancel");
    assert_eq!(call(&["bookings", "delete", "b1"]).method, Method::DELETE);
}

#[test]
fn driver_status_change_is_validated() {
    let change = call(&["drivers", "status", "d1", "offline"]);
    assert_eq!(change.path, "/api/drivers/d1/status");
    assert_eq!(change.body, Some(serde_json::json!({ "status": "offline" })));
    assert!(plan_args(&["vehicles", "status", "v1", "flying"]).is_err());
}

#[test]
fn notification_reads_patch_empty_objects() {
    let read = call(&["notifications", "read", "n1"]);
    assert_eq!(read.method, Method::PATCH);
    assert_eq!(read.path, "/api/notifications/n1/read");
    assert_eq!(read.body, Some(serde_json::json!({})));
    assert_eq!(call(&["notifications", "read-all"]).path, "/api/notifications/read-all");
}

#[test]
fn settings_value_and_analytics_paths() {
    assert_eq!(call(&["settings", "value", "base fare"]).path, "/api/settings/value/base%20fare");
    assert_eq!(call(&["analytics", "revenue", "--period", "month"]).path, "/api/analytics/revenue?period=month");
    assert_eq!(call(&["analytics", "bookings"]).path, "/api/analytics/bookings?period=week");
    assert_eq!(call(&["analytics", "dashboard"]).path, "/api/analytics/dashboard");
}

#[test]
fn login_and_listen_are_not_plain_calls() {
    let login = plan_args(&["login", "--email", "a@b.co", "--password", "pw"]).unwrap();
    assert_eq!(login, Plan::Login(LoginRequest { email: "a@b.co".to_owned(), password: "pw".to_owned() }));

    let listen = plan_args(&["listen", "--park", "p1", "--booking", "b2", "--limit", "3"]).unwrap();
    assert_eq!(
        listen,
        Plan::Listen {
            commands: vec![
                ClientCommand::JoinPark { park_id: "p1".to_owned() },
                ClientCommand::JoinBooking { booking_id: "b2".to_owned() },
            ],
            limit: Some(3),
        }
    );
}

#[test]
fn empty_response_reads_as_null() {
    assert_eq!(parse_response("").unwrap(), Value::Null);
    assert_eq!(parse_response(" {\"ok\":true} ").unwrap(), serde_json::json!({ "ok": true }));
    assert!(parse_response("<html>").is_err());
}
