//! Integration tests for `SqliteStore` against a temporary database file.

use std::sync::Arc;

use blogr_core::{
  Error as CoreError,
  post::PostDraft,
  store::{CredentialStore, PostStore},
  user::Credentials,
};
use tempfile::TempDir;

use crate::{Database, Error, SqliteStore};

async fn database() -> (TempDir, Database) {
  let dir = tempfile::tempdir().expect("temp dir");
  let db = Database::new(dir.path().join("blogr.sqlite"));
  db.init().await.expect("schema");
  (dir, db)
}

fn store(db: &Database) -> SqliteStore {
  SqliteStore::new(Arc::new(db.handle()))
}

fn core(err: Error) -> CoreError {
  match err {
    Error::Core(e) => e,
    other => panic!("expected a domain error, got {other:?}"),
  }
}

// ─── Connection lifecycle ────────────────────────────────────────────────────

#[tokio::test]
async fn handle_opens_lazily_and_reuses_connection() {
  let (_dir, db) = database().await;
  let handle = db.handle();
  assert!(!handle.is_open().await);

  let first = handle.acquire().await.unwrap();
  assert!(handle.is_open().await);
  first
    .call(|conn| {
      conn.execute_batch("CREATE TEMP TABLE marker (x INTEGER);")?;
      Ok(())
    })
    .await
    .unwrap();

  // Temp tables are private to one connection, so seeing it proves reuse.
  let second = handle.acquire().await.unwrap();
  let seen: i64 = second
    .call(|conn| {
      Ok(conn.query_row(
        "SELECT count(*) FROM sqlite_temp_master WHERE name = 'marker'",
        [],
        |row| row.get(0),
      )?)
    })
    .await
    .unwrap();
  assert_eq!(seen, 1);

  handle.release().await.unwrap();
}

#[tokio::test]
async fn released_handle_refuses_work() {
  let (_dir, db) = database().await;
  let handle = Arc::new(db.handle());
  let conn = handle.acquire().await.unwrap();
  handle.release().await.unwrap();
  assert!(!handle.is_open().await);

  let stale = conn
    .call(|conn| {
      conn.execute_batch("SELECT 1;")?;
      Ok(())
    })
    .await
    .unwrap_err();
  assert!(Error::from(stale).is_connection_closed());

  let err = handle.acquire().await.unwrap_err();
  assert!(matches!(err, Error::ConnectionClosed));
  assert_eq!(err.to_string(), "connection closed");

  let err = SqliteStore::new(handle).list_all().await.unwrap_err();
  assert!(err.is_connection_closed());
}

#[tokio::test]
async fn release_is_idempotent_and_fine_without_acquire() {
  let (_dir, db) = database().await;
  let handle = db.handle();
  handle.release().await.unwrap();
  handle.release().await.unwrap();
  assert!(!handle.is_open().await);
}

#[tokio::test]
async fn init_wipes_existing_rows() {
  let (_dir, db) = database().await;
  store(&db)
    .register(Credentials::new("a", "a"))
    .await
    .unwrap();

  db.init().await.unwrap();
  let err = store(&db)
    .authenticate(Credentials::new("a", "a"))
    .await
    .unwrap_err();
  assert_eq!(core(err), CoreError::UnknownUser);
}

#[tokio::test]
async fn ensure_schema_keeps_existing_rows() {
  let (_dir, db) = database().await;
  store(&db)
    .register(Credentials::new("a", "a"))
    .await
    .unwrap();

  db.ensure_schema().await.unwrap();
  assert!(
    store(&db)
      .authenticate(Credentials::new("a", "a"))
      .await
      .is_ok()
  );
}

// ─── Credentials ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn register_then_authenticate() {
  let (_dir, db) = database().await;
  let s = store(&db);

  let user = s.register(Credentials::new("a", "a")).await.unwrap();
  assert_eq!(user.username, "a");
  assert_ne!(user.password_hash, "a");

  let authed = s.authenticate(Credentials::new("a", "a")).await.unwrap();
  assert_eq!(authed.id, user.id);

  let found = s.find_user(user.id).await.unwrap();
  assert_eq!(found.map(|u| u.username), Some("a".to_string()));
  assert!(s.find_user(user.id + 100).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_conflicts_and_keeps_one_record() {
  let (_dir, db) = database().await;
  let s = store(&db);

  s.register(Credentials::new("a", "first")).await.unwrap();
  let err = s.register(Credentials::new("a", "second")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Duplicate("a".into()));

  let handle = db.handle();
  let count: i64 = handle
    .acquire()
    .await
    .unwrap()
    .call(|conn| {
      Ok(conn.query_row(
        "SELECT count(*) FROM user WHERE username = 'a'",
        [],
        |row| row.get(0),
      )?)
    })
    .await
    .unwrap();
  handle.release().await.unwrap();
  assert_eq!(count, 1);

  // The original password still works.
  assert!(s.authenticate(Credentials::new("a", "first")).await.is_ok());
}

#[tokio::test]
async fn register_requires_both_fields() {
  let (_dir, db) = database().await;
  let s = store(&db);

  let err = s.register(Credentials::new("", "a")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Validation("Username is required."));

  let err = s.register(Credentials::new("a", "")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Validation("Password is required."));

  let err = s.register(Credentials::new("", "")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Validation("Password is required."));
}

#[tokio::test]
async fn authenticate_distinguishes_unknown_user_from_bad_password() {
  let (_dir, db) = database().await;
  let s = store(&db);
  s.register(Credentials::new("test", "test")).await.unwrap();

  let err = s.authenticate(Credentials::new("a", "test")).await.unwrap_err();
  assert_eq!(core(err), CoreError::UnknownUser);

  let err = s.authenticate(Credentials::new("test", "a")).await.unwrap_err();
  assert_eq!(core(err), CoreError::BadCredential);
}

// ─── Posts ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_returns_post_with_author() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();

  let post = s.create(user.id, PostDraft::new("t", "b")).await.unwrap();
  assert_eq!(post.title, "t");
  assert_eq!(post.body, "b");
  assert_eq!(post.author_id, user.id);
  assert_eq!(post.author_username, "a");
}

#[tokio::test]
async fn create_validates_draft() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();

  let err = s.create(user.id, PostDraft::new("", "b")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Validation("Title is required."));

  let err = s.create(user.id, PostDraft::new("t", "")).await.unwrap_err();
  assert_eq!(
    core(err),
    CoreError::Validation("Blog post content is required.")
  );
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_author() {
  let (_dir, db) = database().await;
  let err = store(&db)
    .create(42, PostDraft::new("t", "b"))
    .await
    .unwrap_err();
  assert_eq!(core(err), CoreError::UnknownAuthor(42));
}

#[tokio::test]
async fn list_all_is_newest_first() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();

  let old = s.create(user.id, PostDraft::new("old", "b")).await.unwrap();
  let new = s.create(user.id, PostDraft::new("new", "b")).await.unwrap();

  let old_id = old.id;
  s.handle
    .acquire()
    .await
    .unwrap()
    .call(move |conn| {
      conn.execute(
        "UPDATE post SET created = '2018-01-01 00:00:00' WHERE id = ?1",
        rusqlite::params![old_id],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let posts = s.list_all().await.unwrap();
  let ids: Vec<_> = posts.iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![new.id, old.id]);
  assert_eq!(posts[1].created_date(), "2018-01-01");
}

#[tokio::test]
async fn get_enforces_owner_gate() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let author = s.register(Credentials::new("a", "a")).await.unwrap();
  let other = s.register(Credentials::new("b", "b")).await.unwrap();
  let post = s.create(author.id, PostDraft::new("t", "b")).await.unwrap();

  assert!(s.get(post.id, true, Some(author.id)).await.is_ok());
  assert!(s.get(post.id, false, Some(other.id)).await.is_ok());
  assert!(s.get(post.id, false, None).await.is_ok());

  let err = s.get(post.id, true, Some(other.id)).await.unwrap_err();
  assert_eq!(core(err), CoreError::Forbidden(post.id));

  let err = s.get(post.id, true, None).await.unwrap_err();
  assert_eq!(core(err), CoreError::Forbidden(post.id));
}

#[tokio::test]
async fn missing_post_is_not_found_for_every_operation() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();

  let err = s.get(99, true, Some(user.id)).await.unwrap_err();
  assert_eq!(core(err), CoreError::NotFound(99));

  let err = s.update(99, PostDraft::new("t", "b")).await.unwrap_err();
  assert_eq!(core(err), CoreError::NotFound(99));

  let err = s.delete(99).await.unwrap_err();
  assert_eq!(core(err), CoreError::NotFound(99));
}

#[tokio::test]
async fn update_replaces_title_and_body() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();
  let post = s.create(user.id, PostDraft::new("t", "b")).await.unwrap();

  s.update(post.id, PostDraft::new("updated", "new body"))
    .await
    .unwrap();
  let fetched = s.get(post.id, false, None).await.unwrap();
  assert_eq!(fetched.title, "updated");
  assert_eq!(fetched.body, "new body");
  assert_eq!(fetched.created, post.created);

  let err = s.update(post.id, PostDraft::new("", "x")).await.unwrap_err();
  assert_eq!(core(err), CoreError::Validation("Title is required."));
}

#[tokio::test]
async fn delete_removes_post() {
  let (_dir, db) = database().await;
  let s = store(&db);
  let user = s.register(Credentials::new("a", "a")).await.unwrap();
  let post = s.create(user.id, PostDraft::new("t", "b")).await.unwrap();

  s.delete(post.id).await.unwrap();

  let err = s.get(post.id, false, None).await.unwrap_err();
  assert_eq!(core(err), CoreError::NotFound(post.id));
  assert!(s.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn register_login_post_delete_round() {
  let (_dir, db) = database().await;
  let s = store(&db);

  s.register(Credentials::new("a", "a")).await.unwrap();
  let user = s.authenticate(Credentials::new("a", "a")).await.unwrap();
  let post = s.create(user.id, PostDraft::new("t", "b")).await.unwrap();

  let posts = s.list_all().await.unwrap();
  assert_eq!(posts.len(), 1);
  assert_eq!(posts[0].title, "t");
  assert_eq!(posts[0].author_username, "a");

  s.get(post.id, true, Some(user.id)).await.unwrap();
  s.delete(post.id).await.unwrap();
  assert!(s.list_all().await.unwrap().is_empty());
}
