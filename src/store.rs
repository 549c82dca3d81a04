// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::calculator::apply_patch;
use crate::error::{Result, SplitError};
use crate::feed::{ChangeEvent, ChangeFeed, Subscription};
use crate::models::{Checkpoint, Transaction, TransactionDraft, TransactionPatch};

/// What the rest of the app needs from persistence.
///
/// Every write is validated before it is stored and announced on the change
/// feed after it commits.
pub trait RecordStore {
    fn insert_at(&self, draft: &TransactionDraft, at: DateTime<Utc>) -> Result<Transaction>;

    fn insert(&self, draft: &TransactionDraft) -> Result<Transaction> {
        self.insert_at(draft, Utc::now())
    }

    fn update(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction>;

    fn delete(&self, id: i64) -> Result<()>;

    /// Deletes every transaction created in `[start, end]`; returns their ids.
    fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<i64>>;

    /// Newest first.
    fn query_all(&self) -> Result<Vec<Transaction>>;

    fn get(&self, id: i64) -> Result<Transaction>;

    fn insert_checkpoint(&self, at: DateTime<Utc>) -> Result<Checkpoint>;

    fn latest_checkpoint(&self) -> Result<Option<Checkpoint>>;

    fn subscribe(&self) -> Subscription;
}

pub fn format_ts(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_ts(id: i64, s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| SplitError::CorruptRecord {
            id,
            reason: format!("timestamp '{}': {}", s, e),
        })
}

fn parse_dec(id: i64, field: &str, s: &str) -> Result<Decimal> {
    s.parse::<Decimal>().map_err(|e| SplitError::CorruptRecord {
        id,
        reason: format!("{} '{}': {}", field, s, e),
    })
}

const SELECT_TX: &str = "SELECT id, created_at, original_price, selling_price, profit, profit_per_person, note FROM transactions";

/// Columns as stored, before parsing.
pub struct RawRow {
    pub id: i64,
    pub created_at: String,
    pub original_price: String,
    pub selling_price: String,
    pub profit: String,
    pub profit_per_person: String,
    pub note: Option<String>,
}

impl RawRow {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
        Ok(RawRow {
            id: r.get(0)?,
            created_at: r.get(1)?,
            original_price: r.get(2)?,
            selling_price: r.get(3)?,
            profit: r.get(4)?,
            profit_per_person: r.get(5)?,
            note: r.get(6)?,
        })
    }

    pub fn decode(&self) -> Result<Transaction> {
        Ok(Transaction {
            id: self.id,
            created_at: parse_ts(self.id, &self.created_at)?,
            original_price: parse_dec(self.id, "original_price", &self.original_price)?,
            selling_price: parse_dec(self.id, "selling_price", &self.selling_price)?,
            profit: parse_dec(self.id, "profit", &self.profit)?,
            profit_per_person: parse_dec(self.id, "profit_per_person", &self.profit_per_person)?,
            note: self.note.clone(),
        })
    }
}

/// SQLite-backed store. Change events only reach subscribers of this handle;
/// other processes notice writes through [`SqliteStore::data_version`].
pub struct SqliteStore {
    conn: Connection,
    feed: ChangeFeed,
}

impl SqliteStore {
    /// Wraps an open connection. The schema must already exist.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            feed: ChangeFeed::new(),
        }
    }

    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        crate::db::init_schema(&conn)?;
        Ok(Self::new(conn))
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Changes whenever another connection commits to the database.
    pub fn data_version(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("PRAGMA data_version", [], |r| r.get(0))?)
    }

    /// Every stored row without parsing, oldest first.
    pub fn raw_rows(&self) -> Result<Vec<RawRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY created_at, id", SELECT_TX))?;
        let rows = stmt.query_map([], RawRow::from_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    fn find_raw(&self, id: i64) -> Result<Option<RawRow>> {
        Ok(self
            .conn
            .query_row(
                &format!("{} WHERE id=?1", SELECT_TX),
                params![id],
                RawRow::from_row,
            )
            .optional()?)
    }
}

impl RecordStore for SqliteStore {
    fn insert_at(&self, draft: &TransactionDraft, at: DateTime<Utc>) -> Result<Transaction> {
        draft.validate()?;
        let at = at.trunc_subsecs(6);
        self.conn.execute(
            "INSERT INTO transactions(created_at, original_price, selling_price, profit, profit_per_person, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                format_ts(&at),
                draft.original_price.to_string(),
                draft.selling_price.to_string(),
                draft.profit.to_string(),
                draft.profit_per_person.to_string(),
                draft.note
            ],
        )?;
        let tx = draft.clone().into_transaction(self.conn.last_insert_rowid(), at);
        log::debug!("inserted transaction {} (profit {})", tx.id, tx.profit);
        self.feed.publish(ChangeEvent::Inserted(tx.clone()));
        Ok(tx)
    }

    fn update(&self, id: i64, patch: &TransactionPatch) -> Result<Transaction> {
        let existing = self.get(id)?;
        let draft = apply_patch(&existing, patch)?;
        draft.validate()?;
        let changed = self.conn.execute(
            "UPDATE transactions SET original_price=?1, selling_price=?2, profit=?3, profit_per_person=?4, note=?5
             WHERE id=?6",
            params![
                draft.original_price.to_string(),
                draft.selling_price.to_string(),
                draft.profit.to_string(),
                draft.profit_per_person.to_string(),
                draft.note,
                id
            ],
        )?;
        if changed == 0 {
            return Err(SplitError::NotFound(id));
        }
        let tx = draft.into_transaction(id, existing.created_at);
        log::debug!("updated transaction {}", id);
        self.feed.publish(ChangeEvent::Updated(tx.clone()));
        Ok(tx)
    }

    fn delete(&self, id: i64) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if changed == 0 {
            return Err(SplitError::NotFound(id));
        }
        log::debug!("deleted transaction {}", id);
        self.feed.publish(ChangeEvent::Deleted { id });
        Ok(())
    }

    fn delete_between(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<i64>> {
        let (start, end) = (format_ts(&start), format_ts(&end));
        let txn = self.conn.unchecked_transaction()?;
        let ids = {
            let mut stmt = txn.prepare(
                "SELECT id FROM transactions WHERE created_at>=?1 AND created_at<=?2 ORDER BY id",
            )?;
            let rows = stmt.query_map(params![start, end], |r| r.get::<_, i64>(0))?;
            let mut ids = Vec::new();
            for id in rows {
                ids.push(id?);
            }
            ids
        };
        txn.execute(
            "DELETE FROM transactions WHERE created_at>=?1 AND created_at<=?2",
            params![start, end],
        )?;
        txn.commit()?;
        log::debug!("deleted {} transactions between {} and {}", ids.len(), start, end);
        for id in &ids {
            self.feed.publish(ChangeEvent::Deleted { id: *id });
        }
        Ok(ids)
    }

    fn query_all(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_TX))?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(RawRow::from_row(r)?.decode()?);
        }
        Ok(out)
    }

    fn get(&self, id: i64) -> Result<Transaction> {
        match self.find_raw(id)? {
            Some(raw) => raw.decode(),
            None => Err(SplitError::NotFound(id)),
        }
    }

    fn insert_checkpoint(&self, at: DateTime<Utc>) -> Result<Checkpoint> {
        let at = at.trunc_subsecs(6);
        self.conn.execute(
            "INSERT INTO reset_checkpoints(created_at) VALUES (?1)",
            params![format_ts(&at)],
        )?;
        let cp = Checkpoint {
            id: self.conn.last_insert_rowid(),
            created_at: at,
        };
        log::info!("totals reset at {}", format_ts(&at));
        self.feed.publish(ChangeEvent::CheckpointCreated(cp.clone()));
        Ok(cp)
    }

    fn latest_checkpoint(&self) -> Result<Option<Checkpoint>> {
        let row: Option<(i64, String)> = self
            .conn
            .query_row(
                "SELECT id, created_at FROM reset_checkpoints ORDER BY created_at DESC, id DESC LIMIT 1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        match row {
            Some((id, ts)) => Ok(Some(Checkpoint {
                id,
                created_at: parse_ts(id, &ts)?,
            })),
            None => Ok(None),
        }
    }

    fn subscribe(&self) -> Subscription {
        self.feed.subscribe()
    }
}
