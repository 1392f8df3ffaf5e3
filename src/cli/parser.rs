use clap::{Parser, Subcommand};

/// Command-line interface definition for PunchPad
/// Single-location time clock: kiosk PIN punches and attendance reports
#[derive(Parser)]
#[command(
    name = "punchpad",
    version = env!("CARGO_PKG_VERSION"),
    about = "Employee time clock: kiosk PIN punches, lockout control, attendance reports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Read or change settings
    Config {
        #[arg(long = "get", value_name = "KEY", help = "Print one setting")]
        get: Option<String>,

        #[arg(
            long = "set",
            num_args = 2,
            value_names = ["KEY", "VALUE"],
            help = "Upsert one setting"
        )]
        set: Option<Vec<String>>,

        #[arg(long = "list", help = "Print all settings")]
        list: bool,
    },

    /// Manage the employee registry
    Employee {
        #[command(subcommand)]
        action: EmployeeAction,
    },

    /// Kiosk operations
    Kiosk {
        #[command(subcommand)]
        action: KioskAction,
    },

    /// Attendance report for one employee
    Report {
        #[arg(long, value_name = "ID")]
        employee: i64,

        #[arg(long = "from", value_name = "DATE", help = "Start day (YYYY-MM-DD, inclusive)")]
        from: String,

        #[arg(long = "to", value_name = "DATE", help = "End day (YYYY-MM-DD, exclusive)")]
        to: String,

        #[arg(long = "csv", value_name = "FILE", help = "Write daily totals to a CSV file")]
        csv: Option<String>,
    },

    /// Manage absence records
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },

    /// Print recent audit log rows
    Audit {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },

    /// Print recent PIN attempts for a source
    Attempts {
        #[arg(long, value_name = "SOURCE")]
        source: String,

        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
}

#[derive(Subcommand)]
pub enum EmployeeAction {
    /// Add an employee with an initial PIN
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, default_value_t = 0.0, help = "Hourly pay rate")]
        rate: f64,

        #[arg(long, help = "Initial numeric PIN")]
        pin: String,
    },

    /// Deactivate an employee (kept for reporting history)
    Disable {
        #[arg(long)]
        id: i64,
    },

    /// Replace an employee's PIN
    ResetPin {
        #[arg(long)]
        id: i64,

        #[arg(long, help = "New numeric PIN")]
        pin: String,
    },

    /// List employees
    List {
        #[arg(long, help = "Include deactivated employees")]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum KioskAction {
    /// Submit one PIN and toggle the punch
    Pin {
        #[arg(long, help = "Source terminal identifier for audit/lockout")]
        source: Option<String>,

        #[arg(long, help = "PIN to submit (read from stdin when omitted)")]
        pin: Option<String>,

        #[arg(
            long = "at",
            value_name = "TIMESTAMP",
            hide = true,
            help = "Override the submission instant (ISO-8601 UTC, for scripting/tests)"
        )]
        at: Option<String>,

        #[arg(long, help = "Free-text note attached to a clock-in")]
        note: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum AbsenceAction {
    /// Record an absence day
    Add {
        #[arg(long, value_name = "ID")]
        employee: i64,

        #[arg(long, value_name = "DATE", help = "Day (YYYY-MM-DD)")]
        day: String,

        #[arg(long)]
        reason: String,
    },

    /// List absence days for an employee
    List {
        #[arg(long, value_name = "ID")]
        employee: i64,
    },
}
