//! Project Germany CLI - database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pg-cli migrate
//!
//! # Create an admin (password from -p or SITE_ADMIN_PASSWORD)
//! pg-cli admin create -u admin -e admin@example.com
//!
//! # Reset an admin's password, creating the account if missing
//! pg-cli admin set-password -u admin -e admin@example.com
//!
//! # Insert sample enquiries for local development
//! pg-cli seed --count 25
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `SITE_ADMIN_PASSWORD` - Admin password when `-p` is not given

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pg-cli")]
#[command(author, version, about = "Project Germany CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Insert sample enquiries
    Seed {
        /// Number of enquiries to insert
        #[arg(short, long, default_value_t = 20)]
        count: usize,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin
    Create {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password (falls back to `SITE_ADMIN_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Set an admin's password, creating the admin if it does not exist
    SetPassword {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Email address, required when the admin does not exist yet
        #[arg(short, long)]
        email: Option<String>,

        /// Password (falls back to `SITE_ADMIN_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                username,
                email,
                password,
            } => {
                commands::admin::create(&username, &email, password).await?;
            }
            AdminAction::SetPassword {
                username,
                email,
                password,
            } => {
                commands::admin::set_password(&username, email.as_deref(), password).await?;
            }
        },
        Commands::Seed { count } => commands::seed::enquiries(count).await?,
    }
    Ok(())
}
