//! blogr server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `BLOGR_*`
//! environment variables, then either serves the blog over HTTP or resets the
//! database.
//!
//! ```
//! cargo run -p blogr-web -- init-db
//! cargo run -p blogr-web
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use blogr_store_sqlite::Database;
use blogr_web::{AppState, ServerConfig};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_SECRET: &str = "dev";

#[derive(Parser)]
#[command(author, version, about = "Blogr blog server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the blog over HTTP (the default).
  Serve,
  /// Drop all tables and recreate them empty.
  InitDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = load_config(&cli.config)?;

  let store_path = expand_tilde(&server_cfg.database);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let db = Database::new(&store_path);

  match cli.command.unwrap_or(Command::Serve) {
    Command::InitDb => {
      db.init()
        .await
        .with_context(|| format!("failed to initialise {store_path:?}"))?;
      println!("Initialized the database.");
      Ok(())
    }
    Command::Serve => serve(db, server_cfg).await,
  }
}

async fn serve(db: Database, server_cfg: ServerConfig) -> anyhow::Result<()> {
  db.ensure_schema()
    .await
    .with_context(|| format!("failed to open store at {:?}", db.path()))?;

  if server_cfg.secret_key == DEFAULT_SECRET {
    tracing::warn!("using the default secret key; set BLOGR_SECRET_KEY before deploying");
  }

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app = blogr_web::router(AppState::new(db, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Defaults, then the optional config file, then `BLOGR_*` variables.
fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 5000_i64)?
    .set_default("database", "instance/blogr.sqlite")?
    .set_default("secret_key", DEFAULT_SECRET)?
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("BLOGR"))
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
