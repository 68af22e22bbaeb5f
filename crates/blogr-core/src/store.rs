//! The `CredentialStore` and `PostStore` traits.
//!
//! Implemented by storage backends (e.g. `blogr-store-sqlite`). The web layer
//! talks to these abstractions rather than to SQL.

use std::future::Future;

use crate::{
  post::{Post, PostDraft, PostId},
  user::{Credentials, User, UserId},
};

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Persists username/password-hash pairs. Usernames are unique.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store a new account with a salted hash of the password.
  ///
  /// Fails with a validation error if either field is empty, or with
  /// [`Error::Duplicate`](crate::Error::Duplicate) if the username is taken.
  fn register(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Check a username/password pair and return the matching account.
  ///
  /// Fails with [`Error::UnknownUser`](crate::Error::UnknownUser) or
  /// [`Error::BadCredential`](crate::Error::BadCredential).
  fn authenticate(
    &self,
    credentials: Credentials,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Look up an account by id. Returns `None` if not found.
  fn find_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;
}

// ─── Posts ───────────────────────────────────────────────────────────────────

/// Persists blog posts.
///
/// `update` and `delete` do not check ownership; callers authorize with
/// [`PostStore::get`] first.
pub trait PostStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All posts, newest first, each with its author's username.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Post>, Self::Error>> + Send + '_;

  /// Validate and insert a post written by `author_id`.
  fn create(
    &self,
    author_id: UserId,
    draft: PostDraft,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Fetch one post.
  ///
  /// Fails "not found" if absent. When `require_author` is set, fails
  /// "forbidden" unless `current_user` is the author.
  fn get(
    &self,
    id: PostId,
    require_author: bool,
    current_user: Option<UserId>,
  ) -> impl Future<Output = Result<Post, Self::Error>> + Send + '_;

  /// Replace the title and body of a post.
  fn update(
    &self,
    id: PostId,
    draft: PostDraft,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete(&self, id: PostId) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
