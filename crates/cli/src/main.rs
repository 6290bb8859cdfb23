//! AEESTR CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! aeestr-cli migrate
//!
//! # Manage the admin allow-list
//! aeestr-cli admin create -e admin@aeestr.org -n "Admin Name"
//! aeestr-cli admin list
//! aeestr-cli admin set-password -e admin@aeestr.org
//! aeestr-cli admin remove -e admin@aeestr.org
//!
//! # Seed the database with starter content
//! aeestr-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `AEESTR_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "aeestr-cli")]
#[command(author, version, about = "AEESTR site CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage the admin allow-list
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the database with starter content
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add an admin to the allow-list
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin display name
        #[arg(short, long)]
        name: String,

        /// Password; prompted on stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// List allow-listed admins
    List,
    /// Remove an admin from the allow-list
    Remove {
        /// Admin email address
        #[arg(short, long)]
        email: String,
    },
    /// Replace an admin's password
    SetPassword {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Password; prompted on stdin when omitted
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
                email,
                name,
                password,
            } => {
                commands::admin::create(&email, &name, password).await?;
            }
            AdminAction::List => commands::admin::list().await?,
            AdminAction::Remove { email } => commands::admin::remove(&email).await?,
            AdminAction::SetPassword { email, password } => {
                commands::admin::set_password(&email, password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
