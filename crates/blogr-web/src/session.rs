//! Session gate: signed-cookie identity and the login guard.
//!
//! The session is a single private-key-signed cookie whose value is the user
//! id. A cookie with a bad signature is treated as absent.

use axum::{
  extract::{FromRequestParts, Request},
  http::request::Parts,
  middleware::Next,
  response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{
  SignedCookieJar,
  cookie::{Cookie, Key, SameSite},
};
use blogr_core::{
  store::CredentialStore,
  user::{User, UserId},
};
use sha2::{Digest, Sha512};

use crate::context::RequestContext;

pub const SESSION_COOKIE: &str = "session";

/// Where anonymous visitors of gated routes are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn signing_key(secret: &str) -> Key {
  let digest = Sha512::digest(secret.as_bytes());
  Key::from(digest.as_slice())
}

/// Drop any previous session and store `user_id` in a new one.
pub fn establish(jar: SignedCookieJar, user_id: UserId) -> SignedCookieJar {
  let cookie = Cookie::build((SESSION_COOKIE, user_id.to_string()))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax);
  clear(jar).add(cookie)
}

pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
  jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

/// The user id carried by a validly signed session cookie.
pub fn stored_user_id(jar: &SignedCookieJar) -> Option<UserId> {
  jar.get(SESSION_COOKIE)?.value().parse().ok()
}

/// Look up the session's user. An id that no longer exists is no identity.
pub async fn resolve<S: CredentialStore>(
  jar: &SignedCookieJar,
  store: &S,
) -> Result<Option<User>, S::Error> {
  match stored_user_id(jar) {
    Some(id) => store.find_user(id).await,
    None => Ok(None),
  }
}

/// Route-layer guard: let the request through only with an identity.
pub async fn require_identity(req: Request, next: Next) -> Response {
  let signed_in = req
    .extensions()
    .get::<RequestContext>()
    .is_some_and(|ctx| ctx.identity().is_some());

  if !signed_in {
    return Redirect::to(LOGIN_PATH).into_response();
  }
  next.run(req).await
}

/// Extractor for the signed-in user on gated routes.
pub struct CurrentUser(pub User);

impl<S> FromRequestParts<S> for CurrentUser
where
  S: Send + Sync,
{
  type Rejection = Redirect;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    parts
      .extensions
      .get::<RequestContext>()
      .and_then(|ctx| ctx.identity().cloned())
      .map(CurrentUser)
      .ok_or_else(|| Redirect::to(LOGIN_PATH))
  }
}
