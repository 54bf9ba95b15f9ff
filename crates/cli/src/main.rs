//! Naturalle CLI - Database migrations and directory management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! nt-cli migrate
//!
//! # Seed the sample users into an empty directory
//! nt-cli seed
//!
//! # Manage users
//! nt-cli user list --query vendas
//! nt-cli user add -n "Ana Souza" -e ana@naturalle.com -r Financeiro
//! nt-cli user remove 4
//! ```
//!
//! # Environment Variables
//!
//! - `NATURALLE_DATABASE_URL` - `SQLite` connection string
//!   (default: `sqlite://naturalle.db?mode=rwc`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use naturalle_admin::models::UserFields;
use naturalle_core::{UserId, UserStatus};

mod commands;

#[derive(Parser)]
#[command(name = "nt-cli")]
#[command(author, version, about = "Naturalle team directory CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert the sample users
    Seed {
        /// Seed even if the directory already has users
        #[arg(long)]
        force: bool,
    },
    /// Manage directory users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        /// Only users whose name or email contains this text (case-insensitive)
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Add a user
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Role label
        #[arg(short, long, default_value = "Convidado")]
        role: String,

        /// Status (`Ativo`, `Inativo`, `Pendente`, or any text)
        #[arg(short, long, default_value_t = UserStatus::Pending.to_string())]
        status: String,
    },
    /// Remove a user
    Remove {
        /// User ID
        id: UserId,
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
        Commands::Seed { force } => {
            commands::seed::run(force).await?;
        }
        Commands::User { action } => match action {
            UserAction::List { query } => {
                commands::user::list(query.as_deref()).await?;
            }
            UserAction::Add {
                name,
                email,
                role,
                status,
            } => {
                let fields = UserFields {
                    name,
                    email,
                    role,
                    status,
                };
                commands::user::add(&fields).await?;
            }
            UserAction::Remove { id } => commands::user::remove(id).await?,
        },
    }
    Ok(())
}
