//! TabulaX auth CLI
//!
//! # Main Commands
//!
//! ```bash
//! tabulax-auth serve               # Start HTTP server (port 5002)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! tabulax-auth user list           # List registered accounts
//! tabulax-auth user delete <name>  # Remove an account
//! ```

use clap::{Parser, Subcommand};
use tabulax_backend::UserRegistry;

#[derive(Parser)]
#[command(name = "tabulax-auth")]
#[command(about = "Username/password auth service for TabulaX", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5002")]
        port: u16,
    },

    /// Manage registered accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all registered accounts
    List,

    /// Delete an account
    Delete {
        /// Username to remove
        username: String,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::User { action } => cmd_user(action),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    tabulax_backend::server::start_server(port).await
}

fn cmd_user(action: UserAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = UserRegistry::new();

    match action {
        UserAction::List => {
            let users = registry.list();
            if users.is_empty() {
                eprintln!("📋 No accounts registered yet.");
                return Ok(());
            }

            eprintln!("📋 Registered accounts ({}):\n", users.len());
            for u in users {
                println!("  👤 {}", u.username);
                println!("     Created: {}", u.created_at);
                if let Some(ref last) = u.last_login {
                    println!("     Last login: {}", last);
                }
                println!();
            }
        }

        UserAction::Delete { username } => {
            registry.delete(&username)?;
            eprintln!("🗑️  Account deleted: {}", username);
        }
    }

    Ok(())
}
