//! Handlers for `/auth/*`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`/`POST` | `/auth/register` | redirects to login on success |
//! | `GET`/`POST` | `/auth/login` | sets the session, redirects to `/` |
//! | `GET` | `/auth/logout` | clears the session, redirects to `/` |

use axum::{
  Form,
  response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;
use blogr_core::store::CredentialStore;

use crate::{
  context::RequestContext,
  error::{Error, inline_message},
  handlers::CredentialsForm,
  session::{self, LOGIN_PATH},
  templates::{HtmlTemplate, LoginPage, RegisterPage},
};

// ─── Register ─────────────────────────────────────────────────────────────────

/// `GET /auth/register`
pub async fn register_form(ctx: RequestContext) -> Response {
  HtmlTemplate(RegisterPage {
    identity: ctx.identity().cloned(),
    error:    None,
  })
  .into_response()
}

/// `POST /auth/register`
pub async fn register(
  ctx: RequestContext,
  Form(form): Form<CredentialsForm>,
) -> Result<Response, Error> {
  match ctx.store().register(form.into()).await {
    Ok(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
    Err(e) => Ok(
      HtmlTemplate(RegisterPage {
        identity: ctx.identity().cloned(),
        error:    Some(inline_message(e)?),
      })
      .into_response(),
    ),
  }
}

// ─── Login ────────────────────────────────────────────────────────────────────

/// `GET /auth/login`
pub async fn login_form(ctx: RequestContext) -> Response {
  HtmlTemplate(LoginPage {
    identity: ctx.identity().cloned(),
    error:    None,
  })
  .into_response()
}

/// `POST /auth/login`
pub async fn login(
  ctx: RequestContext,
  jar: SignedCookieJar,
  Form(form): Form<CredentialsForm>,
) -> Result<Response, Error> {
  let username = form.username.clone();
  match ctx.store().authenticate(form.into()).await {
    Ok(user) => {
      tracing::info!(user_id = user.id, "user logged in");
      Ok((session::establish(jar, user.id), Redirect::to("/")).into_response())
    }
    Err(e) => {
      let message = inline_message(e)?;
      tracing::warn!(%username, "rejected login");
      Ok(
        HtmlTemplate(LoginPage {
          identity: ctx.identity().cloned(),
          error:    Some(message),
        })
        .into_response(),
      )
    }
  }
}

// ─── Logout ───────────────────────────────────────────────────────────────────

/// `GET /auth/logout`
pub async fn logout(jar: SignedCookieJar) -> impl IntoResponse {
  (session::clear(jar), Redirect::to("/"))
}
