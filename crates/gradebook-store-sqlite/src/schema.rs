//! SQL schema for the gradebook SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per account. Collections are stored whole as JSON arrays and are
-- always rewritten together with the row.
CREATE TABLE IF NOT EXISTS users (
    email         TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL,
    weights       TEXT NOT NULL DEFAULT '[]',
    subjects      TEXT NOT NULL DEFAULT '[]',
    grades        TEXT NOT NULL DEFAULT '[]'
);

-- At most one current session.
-- `email` is not a foreign key: `write_all` may drop the user.
CREATE TABLE IF NOT EXISTS current_session (
    slot          INTEGER PRIMARY KEY CHECK (slot = 1),
    email         TEXT NOT NULL,
    token_digest  TEXT NOT NULL,
    started_at    TEXT NOT NULL    -- ISO 8601 UTC
);

PRAGMA user_version = 1;
";
