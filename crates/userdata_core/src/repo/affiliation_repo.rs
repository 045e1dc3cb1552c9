//! Affiliation storage sink contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the single write operation the exporter depends on.
//! - Persist export records into the `user_affiliations` table.
//!
//! # Invariants
//! - A write replaces the whole table with the given batch, or changes nothing.
//! - Dates are stored as `YYYY-MM-DD` text and rejected on read if malformed.

use crate::db::DbError;
use crate::model::date::CalendarDate;
use crate::model::userdata::UserAffiliation;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const AFFILIATION_SELECT_SQL: &str = "SELECT
    user_login,
    organization,
    start_date,
    end_date
FROM user_affiliations";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for affiliation persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted affiliation data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable destination for flattened affiliation records.
pub trait AffiliationStore {
    type Error: Error;

    /// Writes the full batch as one call; succeeds or fails as a whole.
    fn write_all_user_affiliations(&self, records: &[UserAffiliation]) -> Result<(), Self::Error>;
}

/// SQLite-backed affiliation repository.
pub struct SqliteAffiliationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAffiliationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Lists every stored record in write order.
    pub fn list_user_affiliations(&self) -> RepoResult<Vec<UserAffiliation>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AFFILIATION_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_affiliation_row(row)?);
        }

        Ok(records)
    }

    /// Lists the stored records for one login in write order.
    pub fn list_for_user(&self, user_login: &str) -> RepoResult<Vec<UserAffiliation>> {
        let mut stmt = self.conn.prepare(&format!(
            "{AFFILIATION_SELECT_SQL}
             WHERE user_login = ?1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([user_login])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_affiliation_row(row)?);
        }

        Ok(records)
    }
}

impl AffiliationStore for SqliteAffiliationRepository<'_> {
    type Error = RepoError;

    fn write_all_user_affiliations(&self, records: &[UserAffiliation]) -> RepoResult<()> {
        // `unchecked_transaction` because the repository only borrows the
        // connection immutably.
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM user_affiliations;", [])?;

        {
            let mut insert = tx.prepare(
                "INSERT INTO user_affiliations (
                    user_login,
                    organization,
                    start_date,
                    end_date
                ) VALUES (?1, ?2, ?3, ?4);",
            )?;
            for record in records {
                insert.execute(params![
                    record.user_login.as_str(),
                    record.organization.as_str(),
                    record.start_time.encode(),
                    record.end_time.encode(),
                ])?;
            }
        }

        tx.commit()?;
        debug!(
            "event=affiliations_write module=repo status=ok removed={} inserted={}",
            removed,
            records.len()
        );
        Ok(())
    }
}

fn parse_affiliation_row(row: &Row<'_>) -> RepoResult<UserAffiliation> {
    let start_text: String = row.get("start_date")?;
    let end_text: String = row.get("end_date")?;

    Ok(UserAffiliation {
        user_login: row.get("user_login")?,
        organization: row.get("organization")?,
        start_time: parse_stored_date(&start_text, "start_date")?,
        end_time: parse_stored_date(&end_text, "end_date")?,
    })
}

fn parse_stored_date(value: &str, column: &str) -> RepoResult<CalendarDate> {
    CalendarDate::decode(value).map_err(|err| {
        RepoError::InvalidData(format!(
            "invalid date `{value}` in user_affiliations.{column}: {err}"
        ))
    })
}
