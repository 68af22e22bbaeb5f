//! Conversions between SQLite rows and domain types.
//!
//! `created` is stored in SQLite's `CURRENT_TIMESTAMP` text form,
//! `YYYY-MM-DD HH:MM:SS` in UTC.

use blogr_core::{post::Post, user::User};
use chrono::NaiveDateTime;

use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn decode_timestamp(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// Columns: `id, username, password`.
pub fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:            row.get(0)?,
    username:      row.get(1)?,
    password_hash: row.get(2)?,
  })
}

/// A post row before its timestamp is decoded.
pub struct RawPost {
  pub id:        i64,
  pub title:     String,
  pub body:      String,
  pub created:   String,
  pub author_id: i64,
  pub username:  String,
}

impl RawPost {
  /// Columns as selected by `post_select!`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawPost {
      id:        row.get(0)?,
      title:     row.get(1)?,
      body:      row.get(2)?,
      created:   row.get(3)?,
      author_id: row.get(4)?,
      username:  row.get(5)?,
    })
  }

  pub fn into_post(self) -> Result<Post> {
    Ok(Post {
      id:              self.id,
      title:           self.title,
      body:            self.body,
      created:         decode_timestamp(&self.created)?,
      author_id:       self.author_id,
      author_username: self.username,
    })
  }
}
