//! Request handlers, one module per route group.
//!
//! Form bodies are decoded into the structs below. Missing fields decode as
//! empty strings so they reach validation instead of being rejected.

pub mod auth;
pub mod blog;

use blogr_core::{post::PostDraft, user::Credentials};
use serde::Deserialize;

/// `GET /hello`
pub async fn hello() -> &'static str { "Hello, World!" }

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsForm {
  pub username: String,
  pub password: String,
}

impl From<CredentialsForm> for Credentials {
  fn from(form: CredentialsForm) -> Self { Credentials::new(form.username, form.password) }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
  pub title: String,
  pub body:  String,
}

impl From<PostForm> for PostDraft {
  fn from(form: PostForm) -> Self { PostDraft::new(form.title, form.body) }
}
