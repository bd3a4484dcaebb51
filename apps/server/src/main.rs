use anyhow::Context;
use clap::{Parser, Subcommand};
use skylab_api::{build_router, services::user::create_admin_user, AppState};
use skylab_config::load as load_config;
use skylab_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "skylab-server")]
#[command(about = "Skylab admin backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
    /// Create or refresh an administrator account
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Length of the administrator term in days
        #[arg(long, default_value_t = 365)]
        days: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(services, &config.http.address, config.http.port).await,
        Commands::Migrate => {
            info!("database migrations are up to date");
            Ok(())
        }
        Commands::CreateAdmin {
            email,
            password,
            days,
        } => {
            let (user, admin) = create_admin_user(&services.db_pool, &email, &password, days)
                .await
                .context("failed to create administrator")?;
            info!(
                user_id = user.id,
                email = %user.email,
                end_date = %admin.end_date,
                "administrator ready"
            );
            Ok(())
        }
    }
}

async fn run_server(services: BackendServices, host: &str, port: u16) -> anyhow::Result<()> {
    info!("starting Skylab backend");

    let state = AppState::new(services.db_pool.clone(), &services.auth);
    let app = build_router(state);

    let address = format!("{host}:{port}");
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(skylab_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("backend shut down");
    Ok(())
}
