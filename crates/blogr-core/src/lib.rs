//! Core types and trait definitions for the Blogr blog.
//!
//! This crate has no HTTP or database dependencies.
//! The store and web crates depend on it.

pub mod error;
pub mod post;
pub mod store;
pub mod user;

pub use error::{Error, Result};
