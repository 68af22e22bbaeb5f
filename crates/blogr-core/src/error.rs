//! Error types for `blogr-core`.
//!
//! The `Display` output of each variant is the message shown to the user.

use thiserror::Error;

use crate::{post::PostId, user::UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  /// A required form field was empty.
  #[error("{0}")]
  Validation(&'static str),

  #[error("User {0} is already registered.")]
  Duplicate(String),

  #[error("Incorrect username.")]
  UnknownUser,

  #[error("Incorrect password.")]
  BadCredential,

  #[error("Post id {0} doesn't exist.")]
  NotFound(PostId),

  /// The actor is not the post's author.
  #[error("post {0} belongs to another user")]
  Forbidden(PostId),

  #[error("user {0} does not exist")]
  UnknownAuthor(UserId),
}

impl Error {
  /// Errors the user can fix by resubmitting the form.
  pub fn is_recoverable(&self) -> bool {
    matches!(
      self,
      Error::Validation(_)
        | Error::Duplicate(_)
        | Error::UnknownUser
        | Error::BadCredential
    )
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
