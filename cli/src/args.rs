//! Command-line surface.

use clap::{Args, Parser, Subcommand};
use models::Period;

#[derive(Parser, Debug)]
#[command(name = "fleetctl", about = "Fleet admin API and push-socket CLI")]
pub struct Cli {
    #[arg(long, env = "FLEET_API_BASE_URL", default_value = "http://127.0.0.1:8080")]
    pub base_url: String,

    /// Bearer token from `fleetctl login`.
    #[arg(long, env = "FLEET_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print an access token for the given credentials.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLEET_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the account the token belongs to.
    Whoami,
    Users(CrudCommand),
    Drivers(StatusResourceCommand),
    Vehicles(StatusResourceCommand),
    Bookings(BookingsCommand),
    Parks(CrudCommand),
    CarClasses(CrudCommand),
    Settings(SettingsCommand),
    Notifications(NotificationsCommand),
    Analytics(AnalyticsCommand),
    /// Stream push events as JSON lines.
    Listen(ListenArgs),
}

#[derive(Args, Debug)]
pub struct CrudCommand {
    #[command(subcommand)]
    pub command: CrudSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CrudSubcommand {
    List(ListArgs),
    Get {
        id: String,
    },
    Create {
        /// JSON object body.
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        /// JSON object with the fields to change.
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<String>,
    /// Park (branch) id.
    #[arg(long)]
    pub park: Option<String>,
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusResourceCommand {
    #[command(subcommand)]
    pub command: StatusResourceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum StatusResourceSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),
    /// Set the availability status.
    Status { id: String, status: String },
}

#[derive(Args, Debug)]
pub struct BookingsCommand {
    #[command(subcommand)]
    pub command: BookingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BookingsSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),
    Assign { id: String, driver_id: String },
    Start { id: String },
    Complete { id: String },
    Cancel { id: String },
}

#[derive(Args, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SettingsSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),
    /// Look up a value by key.
    Value { key: String },
}

#[derive(Args, Debug)]
pub struct NotificationsCommand {
    #[command(subcommand)]
    pub command: NotificationsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum NotificationsSubcommand {
    #[command(flatten)]
    Crud(CrudSubcommand),
    Read { id: String },
    ReadAll,
}

#[derive(Args, Debug)]
pub struct AnalyticsCommand {
    #[command(subcommand)]
    pub command: AnalyticsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AnalyticsSubcommand {
    Dashboard,
    Bookings {
        #[arg(long, default_value = "week")]
        period: Period,
    },
    Revenue {
        #[arg(long, default_value = "week")]
        period: Period,
    },
}

#[derive(Args, Debug)]
pub struct ListenArgs {
    /// Join a park room; repeatable.
    #[arg(long = "park")]
    pub parks: Vec<String>,

    /// Join a booking room; repeatable.
    #[arg(long = "booking")]
    pub bookings: Vec<String>,

    /// Exit after this many events.
    #[arg(long)]
    pub limit: Option<usize>,
}
