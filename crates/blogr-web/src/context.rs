//! The per-request context: one store handle plus the resolved identity.
//!
//! [`open_context`] runs around every route. It creates the request's
//! [`Handle`], resolves the session into a [`User`], stores both in the
//! request extensions, and closes the handle once the response is built.
//! Handlers receive the context through the [`RequestContext`] extractor.

use std::sync::Arc;

use axum::{
  extract::{FromRequestParts, Request, State},
  http::request::Parts,
  middleware::Next,
  response::{IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use blogr_core::user::User;
use blogr_store_sqlite::{Handle, SqliteStore};

use crate::{AppState, error::Error, session};

#[derive(Clone)]
pub struct RequestContext {
  handle:   Arc<Handle>,
  identity: Option<User>,
}

impl RequestContext {
  /// Credential and post stores sharing this request's connection.
  pub fn store(&self) -> SqliteStore { SqliteStore::new(Arc::clone(&self.handle)) }

  /// The signed-in user, if any.
  pub fn identity(&self) -> Option<&User> { self.identity.as_ref() }
}

/// Middleware wrapping every request in a [`RequestContext`].
pub async fn open_context(
  State(state): State<AppState>,
  jar: SignedCookieJar,
  mut req: Request,
  next: Next,
) -> Response {
  let handle = Arc::new(state.db.handle());

  let identity = match session::resolve(&jar, &SqliteStore::new(Arc::clone(&handle))).await {
    Ok(identity) => identity,
    Err(e) => {
      release(&handle).await;
      return Error::from(e).into_response();
    }
  };

  req.extensions_mut().insert(RequestContext {
    handle: Arc::clone(&handle),
    identity,
  });
  let response = next.run(req).await;

  release(&handle).await;
  response
}

async fn release(handle: &Handle) {
  if let Err(e) = handle.release().await {
    tracing::warn!(error = %e, "failed to close database connection");
  }
}

impl<S> FromRequestParts<S> for RequestContext
where
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<RequestContext>()
      .cloned()
      .ok_or(Error::MissingContext)
  }
}
