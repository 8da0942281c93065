//! marquee-web - Movie browsing web application
//!
//! Server-rendered movie browser: session-authenticated users browse
//! movies mirrored from TMDB, like them, and write ratings and reviews.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use marquee_web::services::tmdb::TmdbClient;
use marquee_web::{build_router, AppState};

#[derive(Parser)]
#[command(name = "marquee-web", version, about = "Marquee movie browsing web application")]
struct Args {
    /// Root data folder (holds marquee.db); falls back to
    /// MARQUEE_ROOT_FOLDER, the TOML config, then the OS data dir
    #[arg(long)]
    root_folder: Option<PathBuf>,

    /// HTTP listen port (overrides the http_port setting)
    #[arg(long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create a user account from the command line
    SeedUser { username: String, password: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Marquee (marquee-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Resolve root folder and open (or create) the database
    let root_folder = marquee_common::config::resolve_root_folder(args.root_folder.as_deref());
    let db_path = marquee_common::config::ensure_root_folder(&root_folder)?;
    info!("Database: {}", db_path.display());

    let db = marquee_common::db::init_database(&db_path).await?;
    info!("Database connection established");

    if let Some(Command::SeedUser { username, password }) = args.command {
        return seed_user(&db, &username, &password).await;
    }

    // TMDB API key: Database -> ENV -> TOML
    let toml_config = marquee_common::config::load_toml_config().unwrap_or_default();
    let api_key = marquee_web::config::resolve_tmdb_api_key(&db, &toml_config).await?;
    let tmdb = TmdbClient::new(api_key)?;

    let port = match args.port {
        Some(port) => port,
        None => marquee_web::db::settings::get_http_port(&db).await?,
    };

    let state = AppState::new(db, tmdb);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    info!("Listening on http://127.0.0.1:{}", port);
    info!("Health check: http://127.0.0.1:{}/health", port);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create a user account without going through the signup form
async fn seed_user(db: &sqlx::SqlitePool, username: &str, password: &str) -> Result<()> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        anyhow::bail!("Username and password must be non-empty");
    }

    if marquee_web::db::users::username_taken_ci(db, username, None).await? {
        anyhow::bail!("Username '{}' is already taken", username);
    }

    let guid = Uuid::new_v4().to_string();
    let password_hash = marquee_web::auth::hash_password(password)?;
    marquee_web::db::users::insert_user(db, &guid, username, &password_hash).await?;

    info!("User '{}' created successfully", username);
    Ok(())
}
