//! SQLite backend for the Blogr blog.
//!
//! [`Database`] names the store file and hands out request-scoped
//! [`Handle`]s. Each handle opens at most one [`tokio_rusqlite`] connection,
//! so all SQLite work runs on a dedicated thread without blocking the async
//! runtime. [`SqliteStore`] implements the credential and post stores on top
//! of a handle.

mod encode;
mod password;
mod schema;
mod store;

pub mod database;
pub mod error;

pub use database::{Database, Handle};
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
