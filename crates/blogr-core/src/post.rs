//! Blog posts and the owner gate.
//!
//! A post may be read by anyone. Only its author may change or remove it.

use chrono::NaiveDateTime;

use crate::{
  Error, Result,
  user::UserId,
};

pub type PostId = i64;

/// A stored post joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
  pub id:              PostId,
  pub title:           String,
  pub body:            String,
  pub created:         NaiveDateTime,
  pub author_id:       UserId,
  pub author_username: String,
}

impl Post {
  /// Creation date as shown next to the author, e.g. `2018-01-01`.
  pub fn created_date(&self) -> String {
    self.created.format("%Y-%m-%d").to_string()
  }

  pub fn is_authored_by(&self, actor: UserId) -> bool {
    self.author_id == actor
  }

  /// Fail with [`Error::Forbidden`] unless `actor` wrote this post.
  /// An absent actor is never the author.
  pub fn ensure_author(&self, actor: Option<UserId>) -> Result<()> {
    match actor {
      Some(id) if self.is_authored_by(id) => Ok(()),
      _ => Err(Error::Forbidden(self.id)),
    }
  }
}

/// Title and body submitted from the create or update form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
  pub title: String,
  pub body:  String,
}

impl PostDraft {
  pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
    Self { title: title.into(), body: body.into() }
  }

  /// Title and body are required; a missing body is reported over a
  /// missing title.
  pub fn validate(&self) -> Result<()> {
    let mut error = None;
    if self.title.is_empty() {
      error = Some("Title is required.");
    }
    if self.body.is_empty() {
      error = Some("Blog post content is required.");
    }
    error.map_or(Ok(()), |msg| Err(Error::Validation(msg)))
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn post(author_id: UserId) -> Post {
    Post {
      id: 1,
      title: "test title".into(),
      body: "test\nbody".into(),
      created: NaiveDate::from_ymd_opt(2018, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap(),
      author_id,
      author_username: "test".into(),
    }
  }

  #[test]
  fn author_passes_owner_gate() {
    assert!(post(1).ensure_author(Some(1)).is_ok());
  }

  #[test]
  fn other_user_is_forbidden() {
    assert_eq!(post(1).ensure_author(Some(2)), Err(Error::Forbidden(1)));
  }

  #[test]
  fn anonymous_actor_is_forbidden() {
    assert_eq!(post(1).ensure_author(None), Err(Error::Forbidden(1)));
  }

  #[test]
  fn created_date_drops_time() {
    assert_eq!(post(1).created_date(), "2018-01-01");
  }

  #[test]
  fn draft_validation_reports_last_missing_field() {
    assert_eq!(
      PostDraft::new("", "").validate(),
      Err(Error::Validation("Blog post content is required."))
    );
    assert_eq!(
      PostDraft::new("", "b").validate(),
      Err(Error::Validation("Title is required."))
    );
    assert_eq!(
      PostDraft::new("t", "").validate(),
      Err(Error::Validation("Blog post content is required."))
    );
    assert!(PostDraft::new("t", "b").validate().is_ok());
  }
}
