//! [`SqliteStore`] — the SQLite implementation of [`UserStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use gradebook_core::{
  session::Session,
  store::UserStore,
  user::{UserMap, UserRecord},
};

use crate::{
  encode::{encode_dt, RawSession, RawUser},
  schema::SCHEMA,
  Error, Result,
};

const SELECT_USER: &str =
  "SELECT email, password_hash, weights, subjects, grades FROM users";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A gradebook store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for SqliteStore {
  type Error = crate::Error;

  // ── Whole-store access ────────────────────────────────────────────────────

  async fn read_all(&self) -> Result<UserMap> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_USER} ORDER BY email"))?;
        let rows = stmt
          .query_map([], |row| RawUser::from_row(row))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(|raw| raw.into_record().map(|r| (r.email.clone(), r)))
      .collect()
  }

  async fn write_all(&self, users: UserMap) -> Result<()> {
    let rows = users
      .iter()
      .map(|(key, record)| {
        if *key != record.email {
          return Err(Error::KeyMismatch {
            key:   key.clone(),
            email: record.email.clone(),
          });
        }
        RawUser::from_record(record)
      })
      .collect::<Result<Vec<_>>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM users", [])?;
        {
          let mut stmt = tx.prepare(
            "INSERT INTO users (email, password_hash, weights, subjects, grades)
             VALUES (?1, ?2, ?3, ?4, ?5)",
          )?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              row.email,
              row.password_hash,
              row.weights,
              row.subjects,
              row.grades,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Single records ────────────────────────────────────────────────────────

  async fn get_user(&self, email: &str) -> Result<Option<UserRecord>> {
    let email = email.to_owned();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("{SELECT_USER} WHERE email = ?1"),
            rusqlite::params![email],
            |row| RawUser::from_row(row),
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_record).transpose()
  }

  async fn put_user(&self, record: UserRecord) -> Result<()> {
    let row = RawUser::from_record(&record)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO users (email, password_hash, weights, subjects, grades)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            row.email,
            row.password_hash,
            row.weights,
            row.subjects,
            row.grades,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Session slot ──────────────────────────────────────────────────────────

  async fn current_session(&self) -> Result<Option<Session>> {
    let raw: Option<RawSession> = self
      .conn
      .call(|conn| {
        Ok(conn
          .query_row(
            "SELECT email, token_digest, started_at FROM current_session WHERE slot = 1",
            [],
            |row| {
              Ok(RawSession {
                email:        row.get(0)?,
                token_digest: row.get(1)?,
                started_at:   row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSession::into_session).transpose()
  }

  async fn set_current_session(&self, session: Session) -> Result<()> {
    let started_at = encode_dt(session.started_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO current_session (slot, email, token_digest, started_at)
           VALUES (1, ?1, ?2, ?3)",
          rusqlite::params![session.email, session.token_digest, started_at],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn clear_current_session(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute("DELETE FROM current_session", [])?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
