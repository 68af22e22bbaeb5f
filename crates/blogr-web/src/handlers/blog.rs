//! Handlers for the post routes.
//!
//! Everything except `GET /` sits behind the login guard. Update and delete
//! also pass the owner gate through `PostStore::get` before touching the row.

use axum::{
  Form,
  extract::{Path, rejection::FormRejection},
  response::{IntoResponse, Redirect, Response},
};
use blogr_core::{
  post::{PostDraft, PostId},
  store::PostStore,
};

use crate::{
  context::RequestContext,
  error::{Error, inline_message},
  handlers::PostForm,
  session::CurrentUser,
  templates::{CreatePage, HtmlTemplate, IndexPage, UpdatePage},
};

/// `GET /`
pub async fn index(ctx: RequestContext) -> Result<Response, Error> {
  let posts = ctx.store().list_all().await?;
  Ok(
    HtmlTemplate(IndexPage {
      identity: ctx.identity().cloned(),
      posts,
    })
    .into_response(),
  )
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `GET /create`
pub async fn create_form(CurrentUser(user): CurrentUser) -> Response {
  HtmlTemplate(CreatePage {
    identity: Some(user),
    error:    None,
    title:    String::new(),
    body:     String::new(),
  })
  .into_response()
}

/// `POST /create`
pub async fn create(
  ctx: RequestContext,
  CurrentUser(user): CurrentUser,
  Form(form): Form<PostForm>,
) -> Result<Response, Error> {
  let draft = PostDraft::from(form);
  match ctx.store().create(user.id, draft.clone()).await {
    Ok(_) => Ok(Redirect::to("/").into_response()),
    Err(e) => Ok(
      HtmlTemplate(CreatePage {
        error:    Some(inline_message(e)?),
        identity: Some(user),
        title:    draft.title,
        body:     draft.body,
      })
      .into_response(),
    ),
  }
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `GET /{id}/update`
pub async fn update_form(
  ctx: RequestContext,
  CurrentUser(user): CurrentUser,
  Path(id): Path<PostId>,
) -> Result<Response, Error> {
  let post = ctx.store().get(id, true, Some(user.id)).await?;
  Ok(
    HtmlTemplate(UpdatePage {
      identity: Some(user),
      error:    None,
      post,
    })
    .into_response(),
  )
}

/// `POST /{id}/update`
///
/// The body is read leniently so the owner gate answers first. A request with
/// no form body is an empty draft and fails validation.
pub async fn update(
  ctx: RequestContext,
  CurrentUser(user): CurrentUser,
  Path(id): Path<PostId>,
  form: Result<Form<PostForm>, FormRejection>,
) -> Result<Response, Error> {
  let store = ctx.store();
  let post = store.get(id, true, Some(user.id)).await?;
  let form = form.map(|Form(form)| form).unwrap_or_else(|rejection| {
    tracing::debug!(post_id = id, %rejection, "unreadable update form, treating as empty");
    PostForm::default()
  });
  match store.update(id, form.into()).await {
    Ok(()) => Ok(Redirect::to("/").into_response()),
    Err(e) => Ok(
      HtmlTemplate(UpdatePage {
        error:    Some(inline_message(e)?),
        identity: Some(user),
        post,
      })
      .into_response(),
    ),
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `POST /{id}/delete`
pub async fn delete(
  ctx: RequestContext,
  CurrentUser(user): CurrentUser,
  Path(id): Path<PostId>,
) -> Result<Response, Error> {
  let store = ctx.store();
  store.get(id, true, Some(user.id)).await?;
  store.delete(id).await?;
  Ok(Redirect::to("/").into_response())
}
