use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use crate::models::TimeRange;

/// Car maintenance CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "car-maintenance",
    version,
    about = "Track odometer readings, vehicles and in-app alerts"
)]
pub struct Cli {
    /// SQLite database URL (overrides DATABASE_URL)
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    /// Enable debug logging for this crate
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load a JSON snapshot of alerts, vehicles and readings
    Import {
        /// Path to a file shaped like {"alerts": [], "vehicles": [], "readings": []}
        file: PathBuf,
    },

    /// Show the newest alert the user has not acknowledged
    Alert {
        /// Comma-separated ids of alerts already dismissed
        #[arg(long, value_delimiter = ',')]
        acknowledged: Vec<String>,
    },

    /// Chart series and list rows for a user's odometer readings
    Readings {
        #[arg(long)]
        user: String,

        /// all or last30days
        #[arg(long, default_value = "all")]
        range: TimeRange,

        /// Reference time (RFC 3339), defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Show a vehicle's details
    Vehicle {
        #[arg(long)]
        user: String,

        /// Vehicle id
        id: String,
    },

    /// List project contributors
    Contributors,
}
