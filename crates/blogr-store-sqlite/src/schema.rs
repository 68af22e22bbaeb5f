//! SQL schema for the Blogr SQLite store.

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS user (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL         -- argon2 PHC string
);

CREATE TABLE IF NOT EXISTS post (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL REFERENCES user(id),
    created   TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    title     TEXT NOT NULL,
    body      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS post_created_idx ON post(created);
";

/// Drops every table. Run before [`SCHEMA`] to start from an empty store.
pub const DROP_ALL: &str = "
DROP TABLE IF EXISTS post;
DROP TABLE IF EXISTS user;
";

/// Applied to every freshly opened connection.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";
