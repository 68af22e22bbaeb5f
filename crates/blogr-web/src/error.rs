//! Error types and axum `IntoResponse` implementation.
//!
//! Only terminal failures travel as [`Error`]. Form mistakes (validation,
//! duplicate username, bad login) are turned into an inline message with
//! [`inline_message`] and the form is rendered again.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use blogr_core::{Error as CoreError, post::PostId};
use blogr_store_sqlite::Error as StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found: {0}")]
  NotFound(String),
  /// The signed-in user does not own the post.
  #[error("forbidden: post {0}")]
  Forbidden(PostId),
  #[error("store error: {0}")]
  Store(#[source] StoreError),
  #[error("request context missing")]
  MissingContext,
}

impl From<StoreError> for Error {
  fn from(e: StoreError) -> Self {
    match e {
      StoreError::Core(err @ CoreError::NotFound(_)) => Error::NotFound(err.to_string()),
      StoreError::Core(CoreError::Forbidden(id)) => Error::Forbidden(id),
      other => Error::Store(other),
    }
  }
}

/// The message to show beside the form, or the error if it is not one the
/// user can fix by resubmitting.
pub fn inline_message(e: StoreError) -> Result<String, Error> {
  match e.as_core() {
    Some(err) if err.is_recoverable() => Ok(err.to_string()),
    _ => Err(e.into()),
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
      Error::Forbidden(post_id) => {
        tracing::warn!(post_id, "blocked change by non-author");
        (StatusCode::FORBIDDEN, "Forbidden").into_response()
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
      Error::MissingContext => {
        tracing::error!("handler reached without a request context");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn domain_errors_map_to_http_variants() {
    assert!(matches!(
      Error::from(StoreError::Core(CoreError::NotFound(2))),
      Error::NotFound(msg) if msg == "Post id 2 doesn't exist."
    ));
    assert!(matches!(
      Error::from(StoreError::Core(CoreError::Forbidden(2))),
      Error::Forbidden(2)
    ));
    assert!(matches!(
      Error::from(StoreError::ConnectionClosed),
      Error::Store(_)
    ));
  }

  #[test]
  fn status_codes() {
    assert_eq!(
      Error::NotFound("x".into()).into_response().status(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(Error::Forbidden(1).into_response().status(), StatusCode::FORBIDDEN);
    assert_eq!(
      Error::MissingContext.into_response().status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn only_form_errors_become_inline_messages() {
    let msg = inline_message(StoreError::Core(CoreError::Duplicate("a".into()))).unwrap();
    assert_eq!(msg, "User a is already registered.");

    assert!(matches!(
      inline_message(StoreError::Core(CoreError::Forbidden(1))),
      Err(Error::Forbidden(1))
    ));
  }
}
