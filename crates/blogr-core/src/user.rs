//! Users and the credentials submitted to register or log in.

use std::fmt;

use crate::{Error, Result};

pub type UserId = i64;

/// A registered account.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
  pub id:            UserId,
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl fmt::Debug for User {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("User")
      .field("id", &self.id)
      .field("username", &self.username)
      .finish_non_exhaustive()
  }
}

/// A username/password pair as typed into a form.
#[derive(Clone, Default)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

impl Credentials {
  pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
    Self { username: username.into(), password: password.into() }
  }

  /// Both fields are required. When both are empty the password message
  /// is the one reported.
  pub fn validate(&self) -> Result<()> {
    let mut error = None;
    if self.username.is_empty() {
      error = Some("Username is required.");
    }
    if self.password.is_empty() {
      error = Some("Password is required.");
    }
    error.map_or(Ok(()), |msg| Err(Error::Validation(msg)))
  }
}

impl fmt::Debug for Credentials {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credentials")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}
