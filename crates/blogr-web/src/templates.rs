//! Askama page templates.
//!
//! Every page extends `base.html`, which reads `identity` to choose the
//! navigation links.

use askama::Template;
use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use blogr_core::{post::Post, user::User};

/// Template wrapper that converts Askama templates into HTML responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
  T: Template,
{
  fn into_response(self) -> Response {
    match self.0.render() {
      Ok(html) => Html(html).into_response(),
      Err(err) => {
        tracing::error!(error = %err, "failed to render template");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
      }
    }
  }
}

#[derive(Template)]
#[template(path = "auth/register.html")]
pub struct RegisterPage {
  pub identity: Option<User>,
  pub error:    Option<String>,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPage {
  pub identity: Option<User>,
  pub error:    Option<String>,
}

#[derive(Template)]
#[template(path = "blog/index.html")]
pub struct IndexPage {
  pub identity: Option<User>,
  pub posts:    Vec<Post>,
}

/// The create form; `title` and `body` echo what was submitted.
#[derive(Template)]
#[template(path = "blog/create.html")]
pub struct CreatePage {
  pub identity: Option<User>,
  pub error:    Option<String>,
  pub title:    String,
  pub body:     String,
}

#[derive(Template)]
#[template(path = "blog/update.html")]
pub struct UpdatePage {
  pub identity: Option<User>,
  pub error:    Option<String>,
  pub post:     Post,
}
