//! Error type for `blogr-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] blogr_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("password hash error: {0}")]
  PasswordHash(String),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The request's handle was already released.
  #[error("connection closed")]
  ConnectionClosed,
}

impl Error {
  /// The domain error underneath, if this is one.
  pub fn as_core(&self) -> Option<&blogr_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      _ => None,
    }
  }

  /// True for use of a released handle, whether caught by the handle itself
  /// or by the driver on a stale connection clone.
  pub fn is_connection_closed(&self) -> bool {
    matches!(
      self,
      Error::ConnectionClosed | Error::Database(tokio_rusqlite::Error::ConnectionClosed)
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
