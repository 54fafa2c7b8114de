//! Turns parsed commands into concrete requests.
//!
//! Nothing here touches the network, so every route and body the CLI can
//! produce is checked in `plan_test.rs`.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use models::endpoints;
use models::{BookingStatus, ClientCommand, DriverStatus, ListFilter, LoginRequest, VehicleStatus, WireEnum};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::CliError;
use crate::args::{
    AnalyticsSubcommand, BookingsSubcommand, Command, CrudSubcommand, ListArgs, NotificationsSubcommand,
    SettingsSubcommand, StatusResourceSubcommand,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Users,
    Drivers,
    Vehicles,
    Bookings,
    Parks,
    CarClasses,
    Settings,
    Notifications,
}

impl Resource {
    fn collection(self) -> &'static str {
        match self {
            Self::Users => endpoints::USERS,
            Self::Drivers => endpoints::DRIVERS,
            Self::Vehicles => endpoints::VEHICLES,
            Self::Bookings => endpoints::BOOKINGS,
            Self::Parks => endpoints::PARKS,
            Self::CarClasses => endpoints::CAR_CLASSES,
            Self::Settings => endpoints::SETTINGS,
            Self::Notifications => endpoints::NOTIFICATIONS,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Drivers => "drivers",
            Self::Vehicles => "vehicles",
            Self::Bookings => "bookings",
            Self::Parks => "parks",
            Self::CarClasses => "car-classes",
            Self::Settings => "settings",
            Self::Notifications => "notifications",
        }
    }

    /// Canonical wire value for a `--status` filter.
    fn status_filter(self, raw: &str) -> Result<String, CliError> {
        let wire = match self {
            Self::Drivers => DriverStatus::parse_wire(raw)?.as_str(),
            Self::Vehicles => VehicleStatus::parse_wire(raw)?.as_str(),
            Self::Bookings => BookingStatus::parse_wire(raw)?.as_str(),
            _ => return Err(CliError::UnsupportedFilter { resource: self.name(), filter: "status" }),
        };
        Ok(wire.to_owned())
    }

    fn accepts_park_filter(self) -> bool {
        matches!(self, Self::Users | Self::Drivers | Self::Vehicles | Self::Bookings)
    }
}

/// One authenticated REST call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiCall {
    fn get(path: impl Into<String>) -> Self {
        Self { method: Method::GET, path: path.into(), body: None }
    }

    fn with_body(method: Method, path: impl Into<String>, body: Value) -> Self {
        Self { method, path: path.into(), body: Some(body) }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Plan {
    Login(LoginRequest),
    Call(ApiCall),
    Listen { commands: Vec<ClientCommand>, limit: Option<usize> },
}

/// Resolve a command into the request(s) it performs.
///
/// # Errors
///
/// Returns [`CliError`] for malformed `--data`, unknown status values and
/// filters the resource does not support.
pub fn plan(command: Command) -> Result<Plan, CliError> {
    let call = match command {
        Command::Login { email, password } => return Ok(Plan::Login(LoginRequest { email, password })),
        Command::Listen(args) => {
            let commands = args
                .parks
                .into_iter()
                .map(|park_id| ClientCommand::JoinPark { park_id })
                .chain(args.bookings.into_iter().map(|booking_id| ClientCommand::JoinBooking { booking_id }))
                .collect();
            return Ok(Plan::Listen { commands, limit: args.limit });
        }
        Command::Whoami => ApiCall::get(endpoints::AUTH_ME),
        Command::Users(cmd) => crud(Resource::Users, cmd.command)?,
        Command::Parks(cmd) => crud(Resource::Parks, cmd.command)?,
        Command::CarClasses(cmd) => crud(Resource::CarClasses, cmd.command)?,
        Command::Drivers(cmd) => match cmd.command {
            StatusResourceSubcommand::Crud(sub) => crud(Resource::Drivers, sub)?,
            StatusResourceSubcommand::Status { id, status } => {
                let status = DriverStatus::parse_wire(&status)?;
                ApiCall::with_body(Method::PATCH, endpoints::driver_status(&id), serde_json::json!({ "status": status }))
            }
        },
        Command::Vehicles(cmd) => match cmd.command {
            StatusResourceSubcommand::Crud(sub) => crud(Resource::Vehicles, sub)?,
            StatusResourceSubcommand::Status { id, status } => {
                let status = VehicleStatus::parse_wire(&status)?;
                ApiCall::with_body(Method::PATCH, endpoints::vehicle_status(&id), serde_json::json!({ "status": status }))
            }
        },
        Command::Bookings(cmd) => match cmd.command {
            BookingsSubcommand::Crud(sub) => crud(Resource::Bookings, sub)?,
            BookingsSubcommand::Assign { id, driver_id } => {
                empty_post(endpoints::booking_assign_driver(&id, &driver_id))
            }
            BookingsSubcommand::Start { id } => empty_post(endpoints::booking_start(&id)),
            BookingsSubcommand::Complete { id } => empty_post(endpoints::booking_complete(&id)),
            BookingsSubcommand::Cancel { id } => empty_post(endpoints::booking_cancel(&id)),
        },
        Command::Settings(cmd) => match cmd.command {
            SettingsSubcommand::Crud(sub) => crud(Resource::Settings, sub)?,
            SettingsSubcommand::Value { key } => ApiCall::get(endpoints::setting_value(&key)),
        },
        Command::Notifications(cmd) => match cmd.command {
            NotificationsSubcommand::Crud(sub) => crud(Resource::Notifications, sub)?,
            NotificationsSubcommand::Read { id } => {
                ApiCall::with_body(Method::PATCH, endpoints::notification_read(&id), empty_object())
            }
            NotificationsSubcommand::ReadAll => {
                ApiCall::with_body(Method::PATCH, endpoints::NOTIFICATIONS_READ_ALL, empty_object())
            }
        },
        Command::Analytics(cmd) => match cmd.command {
            AnalyticsSubcommand::Dashboard => ApiCall::get(endpoints::ANALYTICS_DASHBOARD),
            AnalyticsSubcommand::Bookings { period } => ApiCall::get(endpoints::analytics_bookings(period)),
            AnalyticsSubcommand::Revenue { period } => ApiCall::get(endpoints::analytics_revenue(period)),
        },
    };
    Ok(Plan::Call(call))
}

fn crud(resource: Resource, sub: CrudSubcommand) -> Result<ApiCall, CliError> {
    let collection = resource.collection();
    Ok(match sub {
        CrudSubcommand::List(args) => ApiCall::get(list_path(resource, args)?),
        CrudSubcommand::Get { id } => ApiCall::get(endpoints::item(collection, &id)),
        CrudSubcommand::Create { data } => ApiCall::with_body(Method::POST, collection, parse_data(&data)?),
        CrudSubcommand::Update { id, data } => {
            ApiCall::with_body(Method::PATCH, endpoints::item(collection, &id), parse_data(&data)?)
        }
        CrudSubcommand::Delete { id } => {
            ApiCall { method: Method::DELETE, path: endpoints::item(collection, &id), body: None }
        }
    })
}

fn list_path(resource: Resource, args: ListArgs) -> Result<String, CliError> {
    let status = args.status.as_deref().map(|raw| resource.status_filter(raw)).transpose()?;
    if args.park.is_some() && !resource.accepts_park_filter() {
        return Err(CliError::UnsupportedFilter { resource: resource.name(), filter: "park" });
    }
    let filter = ListFilter { status, ..ListFilter::default() }.with_park(args.park);
    let filter = ListFilter { search: args.search, ..filter };
    Ok(endpoints::with_query(resource.collection(), &filter.query_pairs()))
}

fn empty_post(path: String) -> ApiCall {
    ApiCall { method: Method::POST, path, body: None }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// `--data` must be a JSON object.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] or [`CliError::NotAnObject`].
pub fn parse_data(raw: &str) -> Result<Value, CliError> {
    let value = serde_json::from_str::<Value>(raw)?;
    if value.is_object() { Ok(value) } else { Err(CliError::NotAnObject) }
}

/// Response bodies; an empty body (e.g. `204 No Content`) reads as `null`.
///
/// # Errors
///
/// Returns [`CliError::InvalidJson`] for a non-empty body that is not JSON.
pub fn parse_response(text: &str) -> Result<Value, CliError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}
