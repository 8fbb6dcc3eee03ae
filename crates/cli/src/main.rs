//! Northwind CLI - database migrations and customer management.
//!
//! # Usage
//!
//! ```bash
//! # Create the storefront and session schemas
//! nw-cli migrate
//!
//! # Create a customer without going through the web form
//! nw-cli customer create --user-id alice --password hunter2
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "nw-cli")]
#[command(author, version, about = "Northwind storefront CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage customers
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Create a new customer
    Create {
        /// Customer user id (case-insensitive)
        #[arg(short, long)]
        user_id: String,

        /// Customer password
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Customer { action } => match action {
            CustomerAction::Create { user_id, password } => {
                commands::customer::create(&user_id, &password).await?;
            }
        },
    }
    Ok(())
}
