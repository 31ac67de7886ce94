use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nephew_diaries_backend::config::{AppConfig, ConfigOverrides};
use nephew_diaries_backend::domain::commands::auth::CreateUserCommand;
use nephew_diaries_backend::{create_router, initialize_backend};
use shared::UserRole;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nephew-diaries", about = "Birthday time capsule server")]
struct Args {
    /// Data directory holding the CSV files and capsule_config.yaml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long, global = true)]
    bind: Option<SocketAddr>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Add a user record to users.csv
    SeedUser {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// admin or family
        #[arg(long, default_value = "family", value_parser = parse_role)]
        role: UserRole,
        /// Store the user as inactive
        #[arg(long)]
        inactive: bool,
        /// Store an Argon2 hash instead of the plaintext password
        #[arg(long)]
        hash: bool,
    },
}

fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::parse(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let overrides = ConfigOverrides {
        data_dir: args.data_dir,
        bind_addr: args.bind,
    };
    let config = AppConfig::load(&overrides)?;
    let app_state = initialize_backend(&config)?;

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let app = create_router(app_state, &config)?;

            info!("Serving frontend bundle from {}", config.dist_dir.display());
            let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
            info!("Listening on {}", config.bind_addr);

            axum::serve(listener, app).await?;
        }
        Command::SeedUser {
            email,
            name,
            password,
            role,
            inactive,
            hash,
        } => {
            let user = app_state
                .auth_service
                .create_user(CreateUserCommand {
                    email,
                    name,
                    password,
                    role,
                    is_active: !inactive,
                    hash_password: hash,
                })
                .await?;
            println!("Created {} user {} ({})", user.role, user.email, user.id);
        }
    }

    Ok(())
}
