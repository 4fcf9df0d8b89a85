use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::Route;

mod commands;

pub use commands::{EmployeeFieldArgs, UpdateArgs};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "ems")]
#[command(about = "A CLI for the employee management service", version)]
#[command(after_help = "EXAMPLES:
    ems list                                   List all employees
    ems add --first-name Jane --last-name Doe --email jane@doe.com
    ems update 5 --email jane.doe@example.com  Change one field
    ems delete 5                               Delete after confirmation
    ems open /add-employee                     Fill the add form interactively")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Employee collection URL (overrides EMS_API_URL and the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List employees
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    ems list
    ems list --json"
    )]
    List,
    /// Show one employee
    #[command(after_help = "EXAMPLES:
    ems show 5")]
    Show {
        /// Employee id
        id: i64,
    },
    /// Add a new employee
    #[command(after_help = "EXAMPLES:
    ems add --first-name Jane --last-name Doe --email jane@doe.com")]
    Add(EmployeeFieldArgs),
    /// Update an existing employee; omitted fields keep their current value
    #[command(after_help = "EXAMPLES:
    ems update 5 --last-name Smith
    ems update 5 --first-name Jane --email jane@smith.com")]
    Update(UpdateArgs),
    /// Delete an employee
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    ems delete 5
    ems delete 5 --yes"
    )]
    Delete {
        /// Employee id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Open a view by route; form routes prompt for each field
    #[command(after_help = "EXAMPLES:
    ems open /employees
    ems open /add-employee
    ems open /update-employee/5")]
    Open {
        /// One of /, /employees, /add-employee, /update-employee/<id>
        route: Route,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    ems completions bash > ~/.bash_completion.d/ems
    ems completions zsh > ~/.zfunc/_ems")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    ems init")]
    Init,
}
