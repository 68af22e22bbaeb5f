//! [`SqliteStore`]: the SQLite implementation of [`CredentialStore`] and
//! [`PostStore`].

use std::sync::Arc;

use blogr_core::{
  Error as CoreError,
  post::{Post, PostDraft, PostId},
  store::{CredentialStore, PostStore},
  user::{Credentials, User, UserId},
};
use rusqlite::OptionalExtension as _;
use tokio_rusqlite::Connection;

use crate::{
  Error, Handle, Result,
  encode::{RawPost, user_from_row},
  password::{hash_password, verify_password},
};

/// `SELECT` prefix shared by every post read. Column order matches
/// [`RawPost::from_row`].
macro_rules! post_select {
  () => {
    "SELECT p.id, p.title, p.body, p.created, p.author_id, u.username
       FROM post p JOIN user u ON p.author_id = u.id"
  };
}

fn is_constraint_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _) if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Stores backed by one request's [`Handle`].
///
/// Cloning is cheap; clones share the handle and so the connection.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) handle: Arc<Handle>,
}

impl SqliteStore {
  pub fn new(handle: Arc<Handle>) -> Self { Self { handle } }

  async fn conn(&self) -> Result<Connection> { self.handle.acquire().await }

  async fn fetch_post(&self, id: PostId) -> Result<Option<Post>> {
    let raw: Option<RawPost> = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              concat!(post_select!(), " WHERE p.id = ?1"),
              rusqlite::params![id],
              RawPost::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPost::into_post).transpose()
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteStore {
  type Error = Error;

  async fn register(&self, credentials: Credentials) -> Result<User> {
    credentials.validate()?;
    let password_hash = hash_password(&credentials.password)?;

    let username = credentials.username.clone();
    let hash = password_hash.clone();
    let inserted: rusqlite::Result<i64> = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(
          conn
            .execute(
              "INSERT INTO user (username, password) VALUES (?1, ?2)",
              rusqlite::params![username, hash],
            )
            .map(|_| conn.last_insert_rowid()),
        )
      })
      .await?;

    let id = match inserted {
      Ok(id) => id,
      Err(e) if is_constraint_violation(&e) => {
        return Err(CoreError::Duplicate(credentials.username).into());
      }
      Err(e) => return Err(Error::Database(e.into())),
    };

    tracing::info!(user_id = id, username = %credentials.username, "registered user");
    Ok(User {
      id,
      username: credentials.username,
      password_hash,
    })
  }

  async fn authenticate(&self, credentials: Credentials) -> Result<User> {
    let username = credentials.username.clone();
    let user: Option<User> = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password FROM user WHERE username = ?1",
              rusqlite::params![username],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;

    let user = user.ok_or(CoreError::UnknownUser)?;
    if !verify_password(&credentials.password, &user.password_hash)? {
      return Err(CoreError::BadCredential.into());
    }
    Ok(user)
  }

  async fn find_user(&self, id: UserId) -> Result<Option<User>> {
    let user = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, username, password FROM user WHERE id = ?1",
              rusqlite::params![id],
              user_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(user)
  }
}

// ─── PostStore impl ──────────────────────────────────────────────────────────

impl PostStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Post>> {
    let raws: Vec<RawPost> = self
      .conn()
      .await?
      .call(|conn| {
        let mut stmt =
          conn.prepare(concat!(post_select!(), " ORDER BY p.created DESC, p.id DESC"))?;
        let rows = stmt
          .query_map([], RawPost::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPost::into_post).collect()
  }

  async fn create(&self, author_id: UserId, draft: PostDraft) -> Result<Post> {
    draft.validate()?;

    let inserted: rusqlite::Result<i64> = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(
          conn
            .execute(
              "INSERT INTO post (title, body, author_id) VALUES (?1, ?2, ?3)",
              rusqlite::params![draft.title, draft.body, author_id],
            )
            .map(|_| conn.last_insert_rowid()),
        )
      })
      .await?;

    // The only constraint a valid draft can break is the author reference.
    let id = match inserted {
      Ok(id) => id,
      Err(e) if is_constraint_violation(&e) => {
        return Err(CoreError::UnknownAuthor(author_id).into());
      }
      Err(e) => return Err(Error::Database(e.into())),
    };

    tracing::info!(post_id = id, author_id, "created post");
    Ok(self.fetch_post(id).await?.ok_or(CoreError::NotFound(id))?)
  }

  async fn get(
    &self,
    id: PostId,
    require_author: bool,
    current_user: Option<UserId>,
  ) -> Result<Post> {
    let post = self.fetch_post(id).await?.ok_or(CoreError::NotFound(id))?;
    if require_author {
      post.ensure_author(current_user)?;
    }
    Ok(post)
  }

  async fn update(&self, id: PostId, draft: PostDraft) -> Result<()> {
    draft.validate()?;

    let changed = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE post SET title = ?1, body = ?2 WHERE id = ?3",
          rusqlite::params![draft.title, draft.body, id],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(CoreError::NotFound(id).into());
    }
    tracing::info!(post_id = id, "updated post");
    Ok(())
  }

  async fn delete(&self, id: PostId) -> Result<()> {
    let removed = self
      .conn()
      .await?
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM post WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    if removed == 0 {
      return Err(CoreError::NotFound(id).into());
    }
    tracing::info!(post_id = id, "deleted post");
    Ok(())
  }
}
