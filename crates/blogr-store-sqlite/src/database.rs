//! [`Database`] and the request-scoped [`Handle`].
//!
//! A `Database` only names the SQLite file. Every request gets its own
//! `Handle`, which opens a connection the first time it is asked for one and
//! closes it on [`Handle::release`]. A request that never touches the store
//! never opens a connection.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use tokio::sync::Mutex;
use tokio_rusqlite::Connection;

use crate::{
  Error, Result,
  schema::{CONNECTION_PRAGMAS, DROP_ALL, SCHEMA},
};

// ─── Database ────────────────────────────────────────────────────────────────

/// The location of a Blogr store.
///
/// Cloning is cheap; no connection is held.
#[derive(Debug, Clone)]
pub struct Database {
  path: Arc<PathBuf>,
}

impl Database {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: Arc::new(path.into()) }
  }

  pub fn path(&self) -> &Path { &self.path }

  /// A fresh, unopened handle for one request.
  pub fn handle(&self) -> Handle {
    Handle {
      path: Arc::clone(&self.path),
      slot: Mutex::new(Slot::Unopened),
    }
  }

  /// Create any missing tables. Existing data is kept.
  pub async fn ensure_schema(&self) -> Result<()> {
    self.run_batch(SCHEMA).await
  }

  /// Drop all tables and recreate them empty.
  pub async fn init(&self) -> Result<()> {
    self.run_batch(DROP_ALL).await?;
    self.run_batch(SCHEMA).await
  }

  async fn run_batch(&self, sql: &'static str) -> Result<()> {
    let handle = self.handle();
    let conn = handle.acquire().await?;
    let outcome = conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await;
    handle.release().await?;
    outcome?;
    Ok(())
  }
}

// ─── Handle ──────────────────────────────────────────────────────────────────

enum Slot {
  Unopened,
  Open(Connection),
  Released,
}

/// One request's connection to the store.
pub struct Handle {
  path: Arc<PathBuf>,
  slot: Mutex<Slot>,
}

impl Handle {
  /// Return this request's connection, opening it on first use.
  ///
  /// Fails with [`Error::ConnectionClosed`] once the handle is released.
  pub async fn acquire(&self) -> Result<Connection> {
    let mut slot = self.slot.lock().await;
    match &*slot {
      Slot::Open(conn) => Ok(conn.clone()),
      Slot::Released => Err(Error::ConnectionClosed),
      Slot::Unopened => {
        let conn = open_connection(&self.path).await?;
        tracing::debug!(path = %self.path.display(), "opened database connection");
        *slot = Slot::Open(conn.clone());
        Ok(conn)
      }
    }
  }

  /// Close the connection if one was opened. Safe to call more than once.
  pub async fn release(&self) -> Result<()> {
    let mut slot = self.slot.lock().await;
    if let Slot::Open(conn) = std::mem::replace(&mut *slot, Slot::Released) {
      conn.close().await?;
      tracing::debug!(path = %self.path.display(), "closed database connection");
    }
    Ok(())
  }

  /// Whether a connection is currently held.
  pub async fn is_open(&self) -> bool {
    matches!(*self.slot.lock().await, Slot::Open(_))
  }
}

async fn open_connection(path: &Path) -> Result<Connection> {
  let conn = Connection::open(path.to_path_buf()).await?;
  conn
    .call(|conn| {
      conn.execute_batch(CONNECTION_PRAGMAS)?;
      Ok(())
    })
    .await?;
  Ok(conn)
}
