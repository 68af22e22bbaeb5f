//! HTTP layer for Blogr.
//!
//! Exposes an axum [`Router`] serving the blog: registration, login, and post
//! CRUD, backed by a SQLite [`Database`].
//!
//! Every request passes through [`context::open_context`], which gives it a
//! store handle and the session's identity. Routes that need a signed-in user
//! sit in a group guarded by [`session::require_identity`].

pub mod context;
pub mod error;
pub mod handlers;
pub mod session;
pub mod templates;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::FromRef,
  middleware,
  routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use blogr_store_sqlite::Database;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{auth, blog};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BLOGR_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub database:   PathBuf,
  /// Secret the session-cookie signing key is derived from.
  pub secret_key: String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState {
  pub db:     Database,
  pub config: Arc<ServerConfig>,
  pub key:    Key,
}

impl AppState {
  pub fn new(db: Database, config: ServerConfig) -> Self {
    let key = session::signing_key(&config.secret_key);
    Self {
      db,
      config: Arc::new(config),
      key,
    }
  }
}

impl FromRef<AppState> for Key {
  fn from_ref(state: &AppState) -> Self { state.key.clone() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the blog [`Router`].
pub fn router(state: AppState) -> Router {
  let gated = Router::new()
    .route("/create",       get(blog::create_form).post(blog::create))
    .route("/{id}/update",  get(blog::update_form).post(blog::update))
    .route("/{id}/delete",  post(blog::delete))
    .route_layer(middleware::from_fn(session::require_identity));

  Router::new()
    .route("/",              get(blog::index))
    .route("/hello",         get(handlers::hello))
    .route("/auth/register", get(auth::register_form).post(auth::register))
    .route("/auth/login",    get(auth::login_form).post(auth::login))
    .route("/auth/logout",   get(auth::logout))
    .merge(gated)
    .layer(middleware::from_fn_with_state(state.clone(), context::open_context))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
