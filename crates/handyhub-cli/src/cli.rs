//! Command-line arguments, using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Number;

/// HandyHub - book local handymen from the terminal.
#[derive(Parser, Debug)]
#[command(name = "handyhub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// API base URL (overrides HANDYHUB_API_URL and the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Start a local session when the backend is unreachable
    #[arg(long, global = true, conflicts_with = "auto_signup")]
    pub offline: bool,

    /// Create the account when a login is rejected
    #[arg(long, global = true)]
    pub auto_signup: bool,

    /// Credential storage backend: file, keyring or memory
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Also write logs to daily-rotated files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in. Prompts for the password when it is not given.
    Login {
        email: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in.
    Signup {
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in with one of the built-in demo accounts (1 or 2).
    DemoLogin { index: usize },

    /// List the built-in demo accounts.
    DemoAccounts,

    /// Sign out and forget the cached user.
    Logout,

    /// Show the cached user.
    Whoami,

    /// Show whether a session is active.
    Status,

    /// Browse service providers.
    #[command(subcommand)]
    Providers(ProviderCommand),

    /// Manage bookings.
    #[command(subcommand)]
    Bookings(BookingCommand),

    /// View or change the signed-in profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
}

#[derive(Subcommand, Debug)]
pub enum ProviderCommand {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        min_rating: Option<f64>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show {
        id: String,
    },
    Reviews {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

#[derive(Subcommand, Debug)]
pub enum BookingCommand {
    Create(NewBookingArgs),
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    Show {
        id: String,
    },
    Status {
        id: String,
        status: String,
    },
    Cancel {
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct NewBookingArgs {
    #[arg(long)]
    pub provider: String,
    #[arg(long)]
    pub service: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: String,
    /// HH:MM
    #[arg(long)]
    pub time: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub notes: Option<String>,
    /// Price, e.g. 500 or 499.5
    #[arg(long, value_parser = parse_amount)]
    pub amount: Number,
}

/// Non-negative JSON number. Integers stay integers on the wire.
fn parse_amount(raw: &str) -> Result<Number, String> {
    let amount: Number = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    match amount.as_f64() {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(amount),
        _ => Err(format!("'{}' is not a valid amount", raw)),
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Apply for the provider role.
    BecomeProvider {
        /// Comma-separated list of offered services
        #[arg(long, value_delimiter = ',', required = true)]
        services: Vec<String>,
        #[arg(long)]
        experience: Option<String>,
        #[arg(long, value_delimiter = ',')]
        certifications: Vec<String>,
    },
}
